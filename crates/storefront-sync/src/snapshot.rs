//! # Store Snapshot
//!
//! The reactive triple every store publishes: the collection, a loading
//! flag, and the last remote-failure message.

/// One observable state of a store.
///
/// `error` holds a display string when the most recent remote operation
/// failed; a subsequent successful operation clears it. `loading` is true
/// only while a full refetch is in flight; single-entity mutations do
/// not toggle it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot<T> {
    /// The mirrored collection as the store last knew it.
    pub collection: Vec<T>,

    /// True while a full refetch is in flight.
    pub loading: bool,

    /// Human-readable message from the last failed remote operation.
    pub error: Option<String>,
}

impl<T> Default for StoreSnapshot<T> {
    fn default() -> Self {
        StoreSnapshot {
            collection: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T> StoreSnapshot<T> {
    /// The state published before the initial fetch completes.
    pub fn initial() -> Self {
        StoreSnapshot {
            collection: Vec::new(),
            loading: true,
            error: None,
        }
    }

    /// True when the initial fetch failed and nothing was ever loaded:
    /// the full-page error state, as opposed to a transient mutation
    /// failure over a usable list.
    pub fn failed_empty(&self) -> bool {
        !self.loading && self.collection.is_empty() && self.error.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_is_loading() {
        let snapshot: StoreSnapshot<u32> = StoreSnapshot::initial();
        assert!(snapshot.loading);
        assert!(snapshot.collection.is_empty());
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn test_failed_empty_distinguishes_page_error() {
        let mut snapshot: StoreSnapshot<u32> = StoreSnapshot::default();
        snapshot.error = Some("API error: 500".to_string());
        assert!(snapshot.failed_empty());

        snapshot.collection.push(1);
        assert!(!snapshot.failed_empty());
    }
}
