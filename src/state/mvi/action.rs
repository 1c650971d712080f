//! Base trait for actions dispatched to reducer stores.

/// Marker trait for action objects.
///
/// Actions are immutable tagged values describing an intended transition:
/// - User actions (button presses)
/// - System events (responses, timers)
///
/// Actions are processed by reducers to produce new states.
pub trait Action: Send + 'static {}
