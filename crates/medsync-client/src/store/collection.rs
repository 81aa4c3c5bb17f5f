//! # Collection State Machine
//!
//! The shared core of every entity store.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Per-Store State Machine                              │
//! │                                                                         │
//! │        begin_fetch / begin_mutation                                    │
//! │   Idle ────────────────────────────────► Loading                      │
//! │    ▲                                        │                           │
//! │    │      finish_* (success)                │                           │
//! │    ├────────────────────────────────────────┤                           │
//! │    │      fail_*   (error set)              │                           │
//! │    └────────────────────────────────────────┘                           │
//! │                                                                         │
//! │  Re-enters Loading on every call. Concurrent calls are not coalesced   │
//! │  or cancelled; fetch replacement is guarded by a monotonic request     │
//! │  token so a response that raced past a newer request is discarded      │
//! │  instead of clobbering fresher rows.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed operation never touches the records: the collection keeps
//! exactly what it held before the call.

/// Identity by business key, used to locate records for merge and remove.
pub trait Keyed {
    fn key(&self) -> &str;
}

macro_rules! keyed_by_id {
    ($($ty:ty),* $(,)?) => {
        $(impl Keyed for $ty {
            fn key(&self) -> &str {
                &self.id
            }
        })*
    };
}

keyed_by_id!(
    medsync_core::InventoryItem,
    medsync_core::Supplier,
    medsync_core::Customer,
    medsync_core::Transfer,
    medsync_core::Transaction,
    medsync_core::Branch,
);

/// A cloned snapshot of a store, safe to hand to a view.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreView<T> {
    pub records: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

// =============================================================================
// Collection
// =============================================================================

/// In-memory collection plus loading/error flags and the fetch token.
#[derive(Debug)]
pub struct Collection<T> {
    records: Vec<T>,
    loading: bool,
    error: Option<String>,
    /// Monotonic token of the most recently issued fetch.
    issued: u64,
}

impl<T: Keyed + Clone> Collection<T> {
    pub fn new() -> Self {
        Collection {
            records: Vec::new(),
            loading: false,
            error: None,
            issued: 0,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> StoreView<T> {
        StoreView {
            records: self.records.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    // =========================================================================
    // Fetch
    // =========================================================================

    /// Enters Loading and issues a new fetch token.
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        self.issued
    }

    /// Fully replaces the collection if `token` is still the latest issued.
    ///
    /// Returns false for a stale response; the rows are dropped and the
    /// loading flag is left to the in-flight newer request.
    pub fn finish_fetch(&mut self, token: u64, records: Vec<T>) -> bool {
        if token != self.issued {
            return false;
        }
        self.records = records;
        self.loading = false;
        self.error = None;
        true
    }

    /// Records a fetch failure if `token` is still the latest issued.
    /// The existing records are untouched either way.
    pub fn fail_fetch(&mut self, token: u64, message: String) -> bool {
        if token != self.issued {
            return false;
        }
        self.loading = false;
        self.error = Some(message);
        true
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Enters Loading for an add/update/delete.
    pub fn begin_mutation(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Appends the confirmed record to the end of the collection.
    pub fn finish_append(&mut self, record: T) {
        self.records.push(record);
        self.loading = false;
        self.error = None;
    }

    /// Shallow-merges a confirmed update into the matching record.
    ///
    /// Returns false when no record matches; the update still settles
    /// successfully (the row may simply not be cached locally).
    pub fn finish_merge(&mut self, id: &str, merge: impl FnOnce(&mut T)) -> bool {
        let found = match self.records.iter_mut().find(|r| r.key() == id) {
            Some(record) => {
                merge(record);
                true
            }
            None => false,
        };
        self.loading = false;
        self.error = None;
        found
    }

    /// Removes the confirmed-deleted record.
    pub fn finish_remove(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.key() != id);
        self.loading = false;
        self.error = None;
        self.records.len() != before
    }

    /// Records a mutation failure; the collection is untouched.
    pub fn fail_mutation(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}

impl<T: Keyed + Clone> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Slot
// =============================================================================

/// Single-value variant of [`Collection`] for stores that hold one record
/// (dashboard snapshot, settings).
#[derive(Debug)]
pub struct Slot<T> {
    value: Option<T>,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl<T: Clone> Slot<T> {
    pub fn new() -> Self {
        Slot {
            value: None,
            loading: false,
            error: None,
            issued: 0,
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn begin_fetch(&mut self) -> u64 {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        self.issued
    }

    pub fn finish_fetch(&mut self, token: u64, value: T) -> bool {
        if token != self.issued {
            return false;
        }
        self.value = Some(value);
        self.loading = false;
        self.error = None;
        true
    }

    pub fn fail_fetch(&mut self, token: u64, message: String) -> bool {
        if token != self.issued {
            return false;
        }
        self.loading = false;
        self.error = Some(message);
        true
    }

    pub fn begin_mutation(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Settles a confirmed mutation by replacing the held value.
    pub fn finish_mutation(&mut self, value: T) {
        self.value = Some(value);
        self.loading = false;
        self.error = None;
    }

    pub fn fail_mutation(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}

impl<T: Clone> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        value: i64,
    }

    impl Keyed for Row {
        fn key(&self) -> &str {
            &self.id
        }
    }

    fn row(id: &str, value: i64) -> Row {
        Row {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn test_fetch_replaces_records() {
        let mut c: Collection<Row> = Collection::new();
        let token = c.begin_fetch();
        assert!(c.loading());

        assert!(c.finish_fetch(token, vec![row("A", 1), row("B", 2)]));
        assert!(!c.loading());
        assert_eq!(c.records().len(), 2);

        // A second fetch with identical rows is idempotent.
        let token = c.begin_fetch();
        assert!(c.finish_fetch(token, vec![row("A", 1), row("B", 2)]));
        assert_eq!(c.records(), &[row("A", 1), row("B", 2)]);
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut c: Collection<Row> = Collection::new();
        let old = c.begin_fetch();
        let new = c.begin_fetch();

        // Newest response lands first.
        assert!(c.finish_fetch(new, vec![row("fresh", 2)]));
        // The older in-flight response resolves afterwards and is dropped.
        assert!(!c.finish_fetch(old, vec![row("stale", 1)]));

        assert_eq!(c.records(), &[row("fresh", 2)]);
        assert!(!c.loading());
        assert!(c.error().is_none());
    }

    #[test]
    fn test_stale_fetch_does_not_clear_loading() {
        let mut c: Collection<Row> = Collection::new();
        let old = c.begin_fetch();
        let _new = c.begin_fetch();

        // Old response lands while the newer request is still in flight.
        assert!(!c.finish_fetch(old, vec![row("stale", 1)]));
        assert!(c.loading());
        assert!(c.records().is_empty());
    }

    #[test]
    fn test_failed_mutation_keeps_records() {
        let mut c: Collection<Row> = Collection::new();
        let token = c.begin_fetch();
        c.finish_fetch(token, vec![row("A", 1)]);
        let before = c.records().to_vec();

        c.begin_mutation();
        c.fail_mutation("endpoint rejected".into());

        assert_eq!(c.records(), &before[..]);
        assert_eq!(c.error(), Some("endpoint rejected"));
        assert!(!c.loading());
    }

    #[test]
    fn test_merge_and_remove() {
        let mut c: Collection<Row> = Collection::new();
        let token = c.begin_fetch();
        c.finish_fetch(token, vec![row("A", 1), row("B", 2)]);

        c.begin_mutation();
        assert!(c.finish_merge("B", |r| r.value = 20));
        assert_eq!(c.records()[1], row("B", 20));

        c.begin_mutation();
        assert!(!c.finish_merge("missing", |r| r.value = 99));

        c.begin_mutation();
        assert!(c.finish_remove("A"));
        assert_eq!(c.records(), &[row("B", 20)]);
    }

    #[test]
    fn test_success_clears_previous_error() {
        let mut c: Collection<Row> = Collection::new();
        c.begin_mutation();
        c.fail_mutation("nope".into());
        assert!(c.error().is_some());

        let token = c.begin_fetch();
        assert!(c.error().is_none());
        c.finish_fetch(token, vec![row("A", 1)]);
        assert!(c.error().is_none());
    }

    #[test]
    fn test_slot_fetch_and_stale_guard() {
        let mut s: Slot<i64> = Slot::new();
        let old = s.begin_fetch();
        let new = s.begin_fetch();

        assert!(s.finish_fetch(new, 2));
        assert!(!s.finish_fetch(old, 1));
        assert_eq!(s.value(), Some(&2));
    }
}
