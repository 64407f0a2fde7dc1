//! # 2Q cache
//!
//! A scan-resistant admission policy that separates recently-seen keys from
//! frequently-reused ones. A key enters the `recent` queue on first sight;
//! only a second reference promotes it to the `frequent` queue. A bounded
//! ghost list remembers keys recently evicted from `recent`, so a key that
//! re-appears shortly after eviction is promoted directly to `frequent`.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                       TwoQCore<K, V>                             │
//!   │                                                                  │
//!   │   put(cold key) ──────────► recent: LruCore<K, V>                │
//!   │                                 │ evict oldest                   │
//!   │                                 ▼                                │
//!   │                             ghost: GhostList<K>  (keys only)     │
//!   │                                 │ ghost hit on re-reference      │
//!   │                                 ▼                                │
//!   │   put/get(seen key) ──────► frequent: LruCore<K, V>              │
//!   │                                                                  │
//!   │   invariant: recent ∩ frequent = ∅                               │
//!   │   invariant: recent.len + frequent.len ≤ size                    │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Eviction bias
//!
//! `ensure_space` trims `recent` while it exceeds its quota
//! (`recent_size = size × recent_ratio`), recording the victim's key in the
//! ghost list; otherwise it trims `frequent`. On a ghost hit the tie-break
//! at exactly the quota flips toward `frequent`, so cold scans cannot knock
//! out the frequently-referenced working set.
//!
//! ## Key Components
//!
//! | Component            | Description                                     |
//! |----------------------|-------------------------------------------------|
//! | `TwoQCore<K, V>`     | Single-threaded admission core over three lists |
//! | `TwoQueueCache<K, V>`| Thread-safe facade with `parking_lot::RwLock`   |
//!
//! ## TwoQueueCache locking
//!
//! | Method                                            | Lock  |
//! |---------------------------------------------------|-------|
//! | `peek`, `contains`, `keys`, `len`, length accessors | Read |
//! | `get` (may promote), `insert`, `remove`, `purge`  | Write |
//!
//! ## Thread Safety
//!
//! - `TwoQCore`: **NOT thread-safe**, single-threaded only.
//! - `TwoQueueCache`: thread-safe; `Clone` yields another handle to the
//!   same cache. Values are shared as `Arc<V>`.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::ds::GhostList;
use crate::error::ConfigError;
use crate::policy::lru::LruCore;
use crate::traits::{ConcurrentCache, CoreCache};

/// Default fraction of the capacity reserved for recently-seen keys.
pub const DEFAULT_RECENT_RATIO: f64 = 0.25;

/// Default fraction of the capacity used to track ghost entries.
pub const DEFAULT_GHOST_RATIO: f64 = 0.5;

/// Single-threaded 2Q cache core.
///
/// Composes two LRU queues (`recent` for single-hit keys, `frequent` for
/// re-referenced keys) and a ghost list of recently evicted `recent` keys.
/// `len` counts only resident entries; ghosts carry no values.
///
/// # Example
///
/// ```
/// use twoq::policy::two_q::TwoQCore;
///
/// let mut cache = TwoQCore::try_new(4).unwrap();
/// cache.put("a", 1);
/// assert_eq!(cache.recent_len(), 1);
///
/// // A second reference promotes to the frequent queue
/// assert_eq!(cache.get(&"a"), Some(&1));
/// assert_eq!(cache.recent_len(), 0);
/// assert_eq!(cache.frequent_len(), 1);
/// ```
#[derive(Debug)]
pub struct TwoQCore<K, V> {
    size: usize,
    recent_size: usize,
    recent: LruCore<K, V>,
    frequent: LruCore<K, V>,
    ghost: GhostList<K>,
}

impl<K, V> TwoQCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a 2Q core with the default recent/ghost ratios.
    ///
    /// Fails with [`ConfigError::InvalidSize`] when `size` is zero.
    pub fn try_new(size: usize) -> Result<Self, ConfigError> {
        Self::try_with_params(size, DEFAULT_RECENT_RATIO, DEFAULT_GHOST_RATIO)
    }

    /// Creates a 2Q core with explicit ratios.
    ///
    /// `recent_size` and the ghost capacity are derived by truncation
    /// (`size × ratio`), so small sizes deterministically round down.
    /// Fails with [`ConfigError::InvalidSize`] when `size` is zero, or with
    /// [`ConfigError::InvalidRecentRatio`] /
    /// [`ConfigError::InvalidGhostRatio`] when a ratio falls outside
    /// `[0, 1]` (NaN is rejected).
    pub fn try_with_params(
        size: usize,
        recent_ratio: f64,
        ghost_ratio: f64,
    ) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidSize);
        }
        if !(0.0..=1.0).contains(&recent_ratio) {
            return Err(ConfigError::InvalidRecentRatio);
        }
        if !(0.0..=1.0).contains(&ghost_ratio) {
            return Err(ConfigError::InvalidGhostRatio);
        }

        let recent_size = (size as f64 * recent_ratio) as usize;
        let evict_size = (size as f64 * ghost_ratio) as usize;

        Ok(Self {
            size,
            recent_size,
            // Both queues get the full capacity; ensure_space keeps their
            // combined length within `size`.
            recent: LruCore::try_new(size)?,
            frequent: LruCore::try_new(size)?,
            ghost: GhostList::new(evict_size),
        })
    }

    /// Inserts or updates an entry.
    ///
    /// Admission, evaluated top-down: a key resident in `frequent` is
    /// overwritten in place; a key resident in `recent` is transferred to
    /// `frequent` (it has now been seen twice); a ghost hit frees space and
    /// re-admits directly into `frequent`; a cold key enters `recent`.
    pub fn put(&mut self, key: K, value: V) {
        if self.frequent.contains(&key) {
            self.frequent.put(key, value);
            return;
        }

        if self.recent.contains(&key) {
            self.recent.remove(&key);
            self.frequent.put(key, value);
            return;
        }

        if self.ghost.contains(&key) {
            self.ensure_space(true);
            self.ghost.remove(&key);
            self.frequent.put(key, value);
            return;
        }

        self.ensure_space(false);
        self.recent.put(key, value);
    }

    /// Looks up a value, promoting a `recent` hit into `frequent`.
    ///
    /// Ghost entries never produce hits; they carry no values.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.frequent.contains(key) {
            return self.frequent.get(key);
        }
        if let Some((key_owned, value)) = self.recent.remove(key) {
            self.frequent.put(key_owned, value);
            return self.frequent.peek(key);
        }
        None
    }

    /// Looks up a value without updating recency or promoting.
    pub fn peek(&self, key: &K) -> Option<&V> {
        if let Some(value) = self.frequent.peek(key) {
            return Some(value);
        }
        self.recent.peek(key)
    }

    /// Returns `true` if `key` is resident (ghosts excluded).
    pub fn contains(&self, key: &K) -> bool {
        self.frequent.contains(key) || self.recent.contains(key)
    }

    /// Removes `key` from whichever list holds it, checking `frequent`,
    /// then `recent`, then the ghost list. Returns `true` if anything was
    /// removed.
    pub fn remove(&mut self, key: &K) -> bool {
        if self.frequent.remove(key).is_some() {
            return true;
        }
        if self.recent.remove(key).is_some() {
            return true;
        }
        self.ghost.remove(key)
    }

    /// Returns the number of resident entries (ghosts excluded).
    pub fn len(&self) -> usize {
        self.recent.len() + self.frequent.len()
    }

    /// Returns `true` if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the total capacity shared by `recent` and `frequent`.
    pub fn capacity(&self) -> usize {
        self.size
    }

    /// Returns the quota of the `recent` queue.
    pub fn recent_size(&self) -> usize {
        self.recent_size
    }

    /// Returns the number of entries in the `recent` queue.
    pub fn recent_len(&self) -> usize {
        self.recent.len()
    }

    /// Returns the number of entries in the `frequent` queue.
    pub fn frequent_len(&self) -> usize {
        self.frequent.len()
    }

    /// Returns the number of tracked ghost keys.
    pub fn ghost_len(&self) -> usize {
        self.ghost.len()
    }

    /// Returns a key snapshot: `frequent` keys then `recent` keys, each
    /// ordered oldest to newest. Ghosts are excluded.
    pub fn keys(&self) -> Vec<K> {
        let mut keys = self.frequent.keys();
        keys.extend(self.recent.keys());
        keys
    }

    /// Drops every resident entry and all ghosts.
    pub fn purge(&mut self) {
        self.recent.purge();
        self.frequent.purge();
        self.ghost.clear();
    }

    /// Frees one slot when the resident total is at capacity.
    ///
    /// Trims `recent` (recording the victim as a ghost) while it exceeds
    /// its quota; at exactly the quota the tie-break depends on whether the
    /// caller is re-admitting a ghost (`ghost_hit`), in which case
    /// `frequent` is trimmed instead.
    fn ensure_space(&mut self, ghost_hit: bool) {
        let recent_len = self.recent.len();
        let frequent_len = self.frequent.len();
        if recent_len + frequent_len < self.size {
            return;
        }

        if recent_len > 0
            && (recent_len > self.recent_size || (recent_len == self.recent_size && !ghost_hit))
        {
            if let Some((key, _)) = self.recent.remove_oldest() {
                self.ghost.record(key);
            }
            return;
        }

        self.frequent.remove_oldest();
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self)
    where
        K: fmt::Debug,
    {
        assert!(self.recent.len() + self.frequent.len() <= self.size);
        for key in self.recent.keys() {
            assert!(!self.frequent.contains(&key), "key resident in both queues");
        }
        self.recent.debug_validate_invariants();
        self.frequent.debug_validate_invariants();
        self.ghost.debug_validate_invariants();
    }
}

impl<K, V> CoreCache<K, V> for TwoQCore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.frequent.contains(&key) {
            return CoreCache::insert(&mut self.frequent, key, value);
        }
        if let Some((_, previous)) = self.recent.remove(&key) {
            self.frequent.put(key, value);
            return Some(previous);
        }
        self.put(key, value);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        TwoQCore::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        TwoQCore::contains(self, key)
    }

    fn len(&self) -> usize {
        TwoQCore::len(self)
    }

    fn capacity(&self) -> usize {
        TwoQCore::capacity(self)
    }

    fn clear(&mut self) {
        self.purge()
    }
}

/// Thread-safe 2Q cache.
///
/// Wraps a [`TwoQCore`] in a `parking_lot::RwLock`; values are stored as
/// `Arc<V>` so lookups return shared handles without cloning user data.
/// Cloning the cache yields another handle to the same underlying state.
///
/// # Example
///
/// ```
/// use twoq::policy::two_q::TwoQueueCache;
///
/// let cache: TwoQueueCache<u64, String> = TwoQueueCache::try_new(128).unwrap();
/// cache.insert(1, "one".to_string());
///
/// assert_eq!(cache.get(&1).as_deref(), Some(&"one".to_string()));
/// assert_eq!(cache.len(), 1);
/// ```
pub struct TwoQueueCache<K, V> {
    inner: Arc<RwLock<TwoQCore<K, Arc<V>>>>,
}

impl<K, V> Clone for TwoQueueCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> TwoQueueCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a thread-safe 2Q cache with the default ratios.
    ///
    /// Fails with [`ConfigError::InvalidSize`] when `size` is zero.
    pub fn try_new(size: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Arc::new(RwLock::new(TwoQCore::try_new(size)?)),
        })
    }

    /// Creates a thread-safe 2Q cache with explicit recent/ghost ratios.
    pub fn try_with_params(
        size: usize,
        recent_ratio: f64,
        ghost_ratio: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Arc::new(RwLock::new(TwoQCore::try_with_params(
                size,
                recent_ratio,
                ghost_ratio,
            )?)),
        })
    }

    /// Inserts a value, wrapping it in `Arc<V>` internally.
    pub fn insert(&self, key: K, value: V) {
        self.insert_arc(key, Arc::new(value));
    }

    /// Inserts a pre-wrapped `Arc<V>` directly.
    pub fn insert_arc(&self, key: K, value: Arc<V>) {
        self.inner.write().put(key, value);
    }

    /// Looks up a key, promoting a `recent` hit into `frequent`.
    ///
    /// Takes the write lock because a hit may reorder or promote.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().get(key).map(Arc::clone)
    }

    /// Looks up a key without updating recency (read lock only).
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.inner.read().peek(key).map(Arc::clone)
    }

    /// Returns `true` if `key` is resident (ghosts excluded).
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// Removes `key` from whichever list holds it; returns `true` if
    /// anything was removed.
    pub fn remove(&self, key: &K) -> bool {
        self.inner.write().remove(key)
    }

    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns the total capacity shared by the two resident queues.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Returns the number of entries in the `recent` queue.
    pub fn recent_len(&self) -> usize {
        self.inner.read().recent_len()
    }

    /// Returns the number of entries in the `frequent` queue.
    pub fn frequent_len(&self) -> usize {
        self.inner.read().frequent_len()
    }

    /// Returns the number of tracked ghost keys.
    pub fn ghost_len(&self) -> usize {
        self.inner.read().ghost_len()
    }

    /// Returns a key snapshot: `frequent` keys then `recent` keys, each
    /// ordered oldest to newest.
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().keys()
    }

    /// Drops every resident entry and all ghosts.
    pub fn purge(&self) {
        self.inner.write().purge();
    }
}

impl<K, V> fmt::Debug for TwoQueueCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.read();
        f.debug_struct("TwoQueueCache")
            .field("len", &core.len())
            .field("capacity", &core.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> ConcurrentCache for TwoQueueCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
}
