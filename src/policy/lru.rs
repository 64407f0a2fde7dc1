//! # Least Recently Used (LRU) cache
//!
//! A fixed-capacity LRU cache built from a hash index over a slab-backed
//! recency list, plus a thread-safe facade that defers eviction callbacks to
//! outside its critical section.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                         LruCache<K, V>                           │
//!   │                                                                  │
//!   │   on_evict: Option<Arc<dyn Fn(&K, &V)>>   (invoked AFTER unlock) │
//!   │                                                                  │
//!   │   ┌────────────────────────────────────────────────────────────┐ │
//!   │   │              Arc<RwLock<LruCore<K, Arc<V>>>>               │ │
//!   │   └────────────────────────────────────────────────────────────┘ │
//!   │                                │                                 │
//!   │                                ▼                                 │
//!   │   ┌────────────────────────────────────────────────────────────┐ │
//!   │   │                      LruCore<K, V, E>                      │ │
//!   │   │                                                            │ │
//!   │   │   index: FxHashMap<K, EntryId>                             │ │
//!   │   │       │                                                    │ │
//!   │   │       ▼                                                    │ │
//!   │   │   order: RecencyList<K, V>                                 │ │
//!   │   │   head ──► [MRU] ◄──► ... ◄──► [LRU] ◄── tail              │ │
//!   │   │                                  │                         │ │
//!   │   │                                  ▼ eviction victim         │ │
//!   │   │   on_evict: Option<E> (E: FnMut(&K, &V))                   │ │
//!   │   └────────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! | Component        | Description                                          |
//! |------------------|------------------------------------------------------|
//! | `LruCore<K, V, E>` | Single-threaded core: index + recency list         |
//! | `LruCache<K, V>` | Thread-safe facade with `parking_lot::RwLock`        |
//!
//! ## LruCore operations
//!
//! | Method            | Complexity | Description                            |
//! |-------------------|------------|----------------------------------------|
//! | `put(k, v)`       | O(1)*      | Insert or update; returns evicted entry|
//! | `get(&k)`         | O(1)       | Lookup, moves entry to MRU             |
//! | `peek(&k)`        | O(1)       | Lookup without recency touch           |
//! | `contains(&k)`    | O(1)       | Membership without recency touch       |
//! | `remove(&k)`      | O(1)       | Remove by key                          |
//! | `remove_oldest()` | O(1)       | Evict the LRU entry                    |
//! | `peek_oldest()`   | O(1)       | Inspect the LRU entry                  |
//! | `keys()`          | O(n)       | Key snapshot, oldest first             |
//! | `purge()`         | O(n)       | Drain everything, notifying per entry  |
//! | `resize(n)`       | O(evicted) | Shrink/grow capacity, drain overflow   |
//!
//! ## LruCache locking
//!
//! | Method                          | Lock  |
//! |---------------------------------|-------|
//! | `peek`, `contains`, `peek_oldest`, `keys`, `len`, `capacity` | Read |
//! | `get` (recency touch), `insert`, `remove`, `remove_oldest`, `contains_or_insert`, `peek_or_insert`, `resize`, `purge` | Write |
//!
//! ## Eviction callback deferral
//!
//! The facade's user callback never runs while the cache lock is held. Each
//! mutating operation collects the evicted entries from the core under the
//! exclusive lock, releases the lock, and only then invokes the callback
//! once per entry in eviction order. A callback is therefore free to call
//! back into the same cache without deadlocking.
//!
//! ## Thread Safety
//!
//! - `LruCore`: **NOT thread-safe**, single-threaded only.
//! - `LruCache`: thread-safe; `Clone` yields another handle to the same
//!   cache. Values are shared as `Arc<V>` so `get`/`peek` return without
//!   cloning user data.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::recency_list::{EntryId, RecencyList};
use crate::error::ConfigError;
use crate::traits::{ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};

/// Initial capacity hint for the facade's deferred-eviction buffer.
pub const DEFAULT_EVICTED_BUFFER_SIZE: usize = 16;

/// Single-threaded LRU cache core.
///
/// The core is polymorphic over an optional eviction handler `E` (any
/// `FnMut(&K, &V)`); without one, `LruCore<K, V>` defaults the parameter to
/// a function pointer and stores `None`. The handler observes every entry
/// that leaves the cache: capacity eviction, [`remove`](LruCore::remove),
/// [`remove_oldest`](LruCore::remove_oldest), [`purge`](LruCore::purge) and
/// [`resize`](LruCore::resize).
///
/// # Example
///
/// ```
/// use twoq::policy::lru::LruCore;
///
/// let mut cache = LruCore::try_new(2).unwrap();
/// cache.put(1, "one");
/// cache.put(2, "two");
///
/// // Touch key 1, then overflow: key 2 is now the victim
/// assert_eq!(cache.get(&1), Some(&"one"));
/// let evicted = cache.put(3, "three");
/// assert_eq!(evicted, Some((2, "two")));
/// assert!(cache.contains(&1));
/// ```
pub struct LruCore<K, V, E = fn(&K, &V)> {
    index: FxHashMap<K, EntryId>,
    order: RecencyList<K, V>,
    capacity: usize,
    on_evict: Option<E>,
}

impl<K, V> LruCore<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an LRU core without eviction notification.
    ///
    /// Fails with [`ConfigError::InvalidSize`] when `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_callback(capacity, None)
    }
}

impl<K, V, E> LruCore<K, V, E>
where
    K: Eq + Hash + Clone,
    E: FnMut(&K, &V),
{
    /// Creates an LRU core that reports evicted entries to `on_evict`.
    ///
    /// The handler runs synchronously inside the evicting operation, with
    /// borrowed key and value, before the entry's ownership leaves the
    /// cache. Fails with [`ConfigError::InvalidSize`] when `capacity` is
    /// zero.
    ///
    /// # Example
    ///
    /// ```
    /// use twoq::policy::lru::LruCore;
    ///
    /// let mut log = Vec::new();
    /// let mut cache = LruCore::try_with_evict(1, |k: &u32, v: &u32| {
    ///     log.push((*k, *v));
    /// })
    /// .unwrap();
    /// cache.put(1, 10);
    /// cache.put(2, 20); // evicts (1, 10)
    /// drop(cache);
    /// assert_eq!(log, vec![(1, 10)]);
    /// ```
    pub fn try_with_evict(capacity: usize, on_evict: E) -> Result<Self, ConfigError> {
        Self::with_callback(capacity, Some(on_evict))
    }

    fn with_callback(capacity: usize, on_evict: Option<E>) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidSize);
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: RecencyList::with_capacity(capacity),
            capacity,
            on_evict,
        })
    }

    /// Runs the eviction handler, if one is installed.
    #[inline]
    fn notify(&mut self, key: &K, value: &V) {
        if let Some(on_evict) = self.on_evict.as_mut() {
            on_evict(key, value);
        }
    }

    /// Inserts or updates an entry, returning the entry evicted to make
    /// room, if any.
    ///
    /// A present key has its value overwritten and is moved to the MRU
    /// position; no eviction happens. A new key is inserted at the MRU
    /// position, evicting the LRU entry first when the cache is full.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&id) = self.index.get(&key) {
            self.order.replace(id, value);
            self.order.move_to_front(id);
            return None;
        }
        // A core resized to zero capacity accepts no entries.
        if self.capacity == 0 {
            return None;
        }
        let evicted = if self.order.len() >= self.capacity {
            self.remove_oldest()
        } else {
            None
        };
        let id = self.order.push_front(key.clone(), value);
        self.index.insert(key, id);
        evicted
    }

    /// Looks up a value, moving the entry to the MRU position.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.order.move_to_front(id);
        self.order.value(id)
    }

    /// Looks up a value without updating recency.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.index.get(key).and_then(|&id| self.order.value(id))
    }

    /// Returns `true` if `key` is resident, without updating recency.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Removes `key`, notifying the handler and returning the entry.
    ///
    /// A second call for the same key returns `None`.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let id = self.index.remove(key)?;
        let (key, value) = self.order.remove(id)?;
        self.notify(&key, &value);
        Some((key, value))
    }

    /// Removes the least recently used entry, notifying the handler.
    pub fn remove_oldest(&mut self) -> Option<(K, V)> {
        let (key, value) = self.order.pop_back()?;
        self.index.remove(&key);
        self.notify(&key, &value);
        Some((key, value))
    }

    /// Returns the least recently used entry without mutating anything.
    #[inline]
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.order.back()
    }

    /// Returns a snapshot of the keys, ordered oldest to newest.
    pub fn keys(&self) -> Vec<K> {
        self.order.iter_oldest().map(|(k, _)| k.clone()).collect()
    }

    /// Returns the current number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the maximum number of entries.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every entry, notifying the handler per entry (oldest first).
    pub fn purge(&mut self) {
        while self.remove_oldest().is_some() {}
    }

    /// Changes the capacity, draining the oldest entries while over the new
    /// bound.
    ///
    /// The handler is notified per drained entry; the drained entries are
    /// returned oldest-first.
    pub fn resize(&mut self, capacity: usize) -> Vec<(K, V)> {
        let mut evicted = Vec::new();
        while self.order.len() > capacity {
            match self.remove_oldest() {
                Some(entry) => evicted.push(entry),
                None => break,
            }
        }
        self.capacity = capacity;
        evicted
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self)
    where
        K: std::fmt::Debug,
    {
        assert_eq!(self.index.len(), self.order.len());
        assert!(self.order.len() <= self.capacity);
        for (key, &id) in &self.index {
            assert_eq!(self.order.key(id), Some(key));
        }
        self.order.debug_validate_invariants();
    }
}

impl<K, V, E> CoreCache<K, V> for LruCore<K, V, E>
where
    K: Eq + Hash + Clone,
    E: FnMut(&K, &V),
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            let previous = self.order.replace(id, value);
            self.order.move_to_front(id);
            return previous;
        }
        self.put(key, value);
        None
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LruCore::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LruCore::contains(self, key)
    }

    fn len(&self) -> usize {
        LruCore::len(self)
    }

    fn capacity(&self) -> usize {
        LruCore::capacity(self)
    }

    fn clear(&mut self) {
        self.purge()
    }
}

impl<K, V, E> MutableCache<K, V> for LruCore<K, V, E>
where
    K: Eq + Hash + Clone,
    E: FnMut(&K, &V),
{
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCore::remove(self, key).map(|(_, value)| value)
    }
}

impl<K, V, E> LruCacheTrait<K, V> for LruCore<K, V, E>
where
    K: Eq + Hash + Clone,
    E: FnMut(&K, &V),
{
    fn pop_oldest(&mut self) -> Option<(K, V)> {
        self.remove_oldest()
    }

    fn peek_oldest(&self) -> Option<(&K, &V)> {
        LruCore::peek_oldest(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        match self.index.get(key) {
            Some(&id) => self.order.move_to_front(id),
            None => false,
        }
    }
}

impl<K, V, E> fmt::Debug for LruCore<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCore")
            .field("len", &self.order.len())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

type EvictCallback<K, V> = Arc<dyn Fn(&K, &V) + Send + Sync>;

/// Thread-safe LRU cache with deferred eviction callbacks.
///
/// Wraps an [`LruCore`] in a `parking_lot::RwLock`; values are stored as
/// `Arc<V>` so lookups return shared handles without cloning user data.
/// Cloning the cache yields another handle to the same underlying state.
///
/// The optional eviction callback registered with
/// [`try_with_evict`](LruCache::try_with_evict) is always invoked after the
/// cache lock has been released, so it may call back into the cache.
///
/// # Example
///
/// ```
/// use twoq::policy::lru::LruCache;
///
/// let cache: LruCache<u32, String> = LruCache::try_new(100).unwrap();
/// cache.insert(1, "one".to_string());
///
/// assert_eq!(cache.get(&1).as_deref(), Some(&"one".to_string()));
/// assert!(cache.contains(&1));
/// assert_eq!(cache.len(), 1);
/// ```
pub struct LruCache<K, V> {
    inner: Arc<RwLock<LruCore<K, Arc<V>>>>,
    on_evict: Option<EvictCallback<K, V>>,
}

impl<K, V> Clone for LruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            on_evict: self.on_evict.clone(),
        }
    }
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a thread-safe LRU cache without an eviction callback.
    ///
    /// Fails with [`ConfigError::InvalidSize`] when `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Arc::new(RwLock::new(LruCore::try_new(capacity)?)),
            on_evict: None,
        })
    }

    /// Creates a thread-safe LRU cache that reports removed entries to
    /// `on_evict`.
    ///
    /// The callback fires once per entry removed for any reason (capacity
    /// pressure, [`remove`](LruCache::remove),
    /// [`remove_oldest`](LruCache::remove_oldest),
    /// [`resize`](LruCache::resize), [`purge`](LruCache::purge)), and never
    /// while the cache lock is held.
    pub fn try_with_evict<F>(capacity: usize, on_evict: F) -> Result<Self, ConfigError>
    where
        F: Fn(&K, &V) + Send + Sync + 'static,
    {
        Ok(Self {
            inner: Arc::new(RwLock::new(LruCore::try_new(capacity)?)),
            on_evict: Some(Arc::new(on_evict)),
        })
    }

    /// Inserts a value, wrapping it in `Arc<V>` internally.
    ///
    /// Returns `true` if the insertion evicted another entry.
    pub fn insert(&self, key: K, value: V) -> bool {
        self.insert_arc(key, Arc::new(value))
    }

    /// Inserts a pre-wrapped `Arc<V>` directly.
    ///
    /// Returns `true` if the insertion evicted another entry.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use twoq::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::try_new(10).unwrap();
    /// let shared = Arc::new("shared".to_string());
    /// cache.insert_arc(1, Arc::clone(&shared));
    ///
    /// let retrieved = cache.get(&1).unwrap();
    /// assert!(Arc::ptr_eq(&shared, &retrieved));
    /// ```
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> bool {
        let evicted = self.inner.write().put(key, value);
        self.notify(evicted)
    }

    /// Looks up a key, moving it to the MRU position.
    ///
    /// Takes the write lock because it updates recency order.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().get(key).map(Arc::clone)
    }

    /// Looks up a key without updating recency (read lock only).
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.inner.read().peek(key).map(Arc::clone)
    }

    /// Returns `true` if `key` is resident, without updating recency.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// Checks for `key` and inserts `value` only when absent, atomically.
    ///
    /// Returns `(present, evicted)`: whether the key was already resident
    /// (in which case recency is untouched and nothing is inserted), and
    /// whether the insertion evicted another entry.
    pub fn contains_or_insert(&self, key: K, value: V) -> (bool, bool) {
        let evicted = {
            let mut core = self.inner.write();
            if core.contains(&key) {
                return (true, false);
            }
            core.put(key, Arc::new(value))
        };
        (false, self.notify(evicted))
    }

    /// Peeks at `key` and inserts `value` only when absent, atomically.
    ///
    /// Returns `(previous, evicted)`: the resident value when the key was
    /// present (recency untouched, nothing inserted), and whether the
    /// insertion evicted another entry.
    pub fn peek_or_insert(&self, key: K, value: V) -> (Option<Arc<V>>, bool) {
        let evicted = {
            let mut core = self.inner.write();
            if let Some(previous) = core.peek(&key) {
                return (Some(Arc::clone(previous)), false);
            }
            core.put(key, Arc::new(value))
        };
        (None, self.notify(evicted))
    }

    /// Removes `key`; returns `true` if it was resident.
    ///
    /// Fires the eviction callback for the removed entry.
    pub fn remove(&self, key: &K) -> bool {
        let removed = self.inner.write().remove(key);
        self.notify(removed)
    }

    /// Removes and returns the least recently used entry.
    ///
    /// Fires the eviction callback for the removed entry.
    pub fn remove_oldest(&self) -> Option<(K, Arc<V>)> {
        let removed = self.inner.write().remove_oldest();
        if let Some((key, value)) = &removed {
            if let Some(on_evict) = &self.on_evict {
                on_evict(key, value.as_ref());
            }
        }
        removed
    }

    /// Returns the least recently used entry without mutating anything.
    pub fn peek_oldest(&self) -> Option<(K, Arc<V>)> {
        let core = self.inner.read();
        core.peek_oldest()
            .map(|(key, value)| (key.clone(), Arc::clone(value)))
    }

    /// Returns a snapshot of the keys, ordered oldest to newest.
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().keys()
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Changes the capacity, draining the oldest entries while over the new
    /// bound. Returns the number of entries drained.
    ///
    /// Fires the eviction callback once per drained entry, oldest first.
    pub fn resize(&self, capacity: usize) -> usize {
        let evicted = self.inner.write().resize(capacity);
        let count = evicted.len();
        if let Some(on_evict) = &self.on_evict {
            for (key, value) in &evicted {
                on_evict(key, value.as_ref());
            }
        }
        count
    }

    /// Removes every entry.
    ///
    /// Fires the eviction callback once per entry after the lock has been
    /// released.
    pub fn purge(&self) {
        let Some(on_evict) = &self.on_evict else {
            self.inner.write().purge();
            return;
        };
        let drained = {
            let mut core = self.inner.write();
            let mut drained = Vec::with_capacity(DEFAULT_EVICTED_BUFFER_SIZE);
            while let Some(entry) = core.remove_oldest() {
                drained.push(entry);
            }
            drained
        };
        for (key, value) in &drained {
            on_evict(key, value.as_ref());
        }
    }

    /// Fires the user callback for a single evicted entry, outside the lock.
    fn notify(&self, evicted: Option<(K, Arc<V>)>) -> bool {
        match evicted {
            Some((key, value)) => {
                if let Some(on_evict) = &self.on_evict {
                    on_evict(&key, value.as_ref());
                }
                true
            },
            None => false,
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.read();
        f.debug_struct("LruCache")
            .field("len", &core.len())
            .field("capacity", &core.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> ConcurrentCache for LruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
}
