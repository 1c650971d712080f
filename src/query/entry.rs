use std::time::SystemTime;

/// Lifecycle position of a resource entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    /// A fetch is in flight.
    Pending,
    /// The last fetch returned data.
    Success,
    /// The last fetch failed.
    Error,
}

/// Snapshot of one cached resource.
///
/// Once `status` leaves `Pending`, exactly one of `data`/`error` is set.
/// While `Pending`, `data` holds the last successful result (if any) so the
/// caller can keep showing it next to a loading indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceEntry<T, E> {
    pub status: ResourceStatus,
    pub data: Option<T>,
    pub error: Option<E>,
    /// When the last fetch settled; `None` until the first one does.
    pub fetched_at: Option<SystemTime>,
}

impl<T, E> ResourceEntry<T, E> {
    pub(crate) fn pending(stale_data: Option<T>, fetched_at: Option<SystemTime>) -> Self {
        Self {
            status: ResourceStatus::Pending,
            data: stale_data,
            error: None,
            fetched_at,
        }
    }

    pub(crate) fn settled(result: Result<T, E>) -> Self {
        let fetched_at = Some(SystemTime::now());
        match result {
            Ok(data) => Self {
                status: ResourceStatus::Success,
                data: Some(data),
                error: None,
                fetched_at,
            },
            Err(error) => Self {
                status: ResourceStatus::Error,
                data: None,
                error: Some(error),
                fetched_at,
            },
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ResourceStatus::Pending
    }

    pub fn is_success(&self) -> bool {
        self.status == ResourceStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == ResourceStatus::Error
    }

    /// Pending while still showing data from an earlier fetch.
    pub fn is_refreshing(&self) -> bool {
        self.is_pending() && self.data.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settled_success_holds_only_data() {
        let entry: ResourceEntry<u32, String> = ResourceEntry::settled(Ok(3));
        assert!(entry.is_success());
        assert_eq!(entry.data, Some(3));
        assert!(entry.error.is_none());
        assert!(entry.fetched_at.is_some());
    }

    #[test]
    fn settled_error_holds_only_error() {
        let entry: ResourceEntry<u32, String> = ResourceEntry::settled(Err("boom".to_string()));
        assert!(entry.is_error());
        assert!(entry.data.is_none());
        assert_eq!(entry.error.as_deref(), Some("boom"));
    }

    #[test]
    fn pending_with_stale_data_is_refreshing() {
        let entry: ResourceEntry<u32, String> = ResourceEntry::pending(Some(1), None);
        assert!(entry.is_pending());
        assert!(entry.is_refreshing());

        let fresh: ResourceEntry<u32, String> = ResourceEntry::pending(None, None);
        assert!(!fresh.is_refreshing());
    }
}
