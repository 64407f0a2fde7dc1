//! Bounded recency list for ghost entries.
//!
//! Tracks recently evicted keys without storing values, so an admission
//! policy can recognise a key that was pushed out only moments ago.
//! Implemented as a [`RecencyList`] of keys plus a hash index for O(1)
//! lookups.
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────────────────┐   ┌─────────────────────────────────┐
//!   │  index: FxHashMap<K, Id>    │   │  list: RecencyList<K, ()>       │
//!   │                             │   │                                 │
//!   │  "key_a" ──► id_0 ──────────┼───┼──► [A] ◄──► [B] ◄──► [C]        │
//!   │  "key_b" ──► id_1           │   │    MRU               LRU        │
//!   │  "key_c" ──► id_2           │   │                                 │
//!   └─────────────────────────────┘   └─────────────────────────────────┘
//!
//!   record("key_d") when full: evict LRU key, insert "key_d" at MRU.
//!   record("key_a") when present: move "key_a" to MRU.
//! ```
//!
//! ## Operations
//!
//! | Operation  | Description                           | Complexity |
//! |------------|---------------------------------------|------------|
//! | `record`   | Add/promote key to MRU, evict if full | O(1) avg   |
//! | `remove`   | Drop a key from the ghost list        | O(1) avg   |
//! | `contains` | Ghost-hit check                       | O(1) avg   |
//!
//! A zero-capacity ghost list ignores all records, which makes ghost hits
//! impossible and lets the surrounding policy degrade gracefully.

use rustc_hash::FxHashMap;
use std::hash::Hash;

use crate::ds::recency_list::{EntryId, RecencyList};

/// Bounded recency list of keys (no values) for ghost tracking.
///
/// # Example
///
/// ```
/// use twoq::ds::GhostList;
///
/// let mut ghost = GhostList::new(3);
/// ghost.record("a");
/// ghost.record("b");
/// ghost.record("c");
///
/// // At capacity, the oldest key ages out
/// ghost.record("d");
/// assert!(!ghost.contains(&"a"));
/// assert!(ghost.contains(&"d"));
///
/// // Re-recording promotes to MRU
/// ghost.record("b");
/// ghost.record("e");
/// assert!(ghost.contains(&"b"));
/// assert!(!ghost.contains(&"c"));
/// ```
#[derive(Debug)]
pub struct GhostList<K> {
    list: RecencyList<K, ()>,
    index: FxHashMap<K, EntryId>,
    capacity: usize,
}

impl<K> GhostList<K>
where
    K: Eq + Hash + Clone,
{
    /// Creates a ghost list tracking at most `capacity` keys.
    ///
    /// A capacity of 0 creates a no-op ghost list that ignores all records.
    pub fn new(capacity: usize) -> Self {
        Self {
            list: RecencyList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            capacity,
        }
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns `true` if `key` is tracked (a ghost hit).
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Records `key` as recently evicted.
    ///
    /// A key already present is promoted to the MRU position. When the list
    /// is full, the least recently recorded key ages out first.
    pub fn record(&mut self, key: K) {
        if self.capacity == 0 {
            return;
        }
        if let Some(&id) = self.index.get(&key) {
            self.list.move_to_front(id);
            return;
        }
        if self.list.len() >= self.capacity {
            if let Some((evicted, ())) = self.list.pop_back() {
                self.index.remove(&evicted);
            }
        }
        let id = self.list.push_front(key.clone(), ());
        self.index.insert(key, id);
    }

    /// Removes `key` from the ghost list; returns `true` if it was tracked.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(id) => {
                self.list.remove(id);
                true
            },
            None => false,
        }
    }

    /// Drops all tracked keys.
    pub fn clear(&mut self) {
        self.list.clear();
        self.index.clear();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self)
    where
        K: std::fmt::Debug,
    {
        assert_eq!(self.index.len(), self.list.len());
        assert!(self.list.len() <= self.capacity);
        for (key, &id) in &self.index {
            assert_eq!(self.list.key(id), Some(key));
        }
        self.list.debug_validate_invariants();
    }
}
