//! Base trait for state held by reducer stores.

/// Marker trait for store state.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Comparable (PartialEq drives the equality-gated commit)
/// - Shareable across the fetch runtime (Send + Sync)
pub trait State: Clone + PartialEq + Default + Send + Sync + 'static {}
