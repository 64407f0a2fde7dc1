//! # Cache trait hierarchy
//!
//! Defines the shared interface for the crate's eviction policies.
//!
//! ## Architecture
//!
//! ```text
//!                ┌─────────────────────────────────────────┐
//!                │            CoreCache<K, V>              │
//!                │                                         │
//!                │  insert(&mut, K, V) → Option<V>         │
//!                │  get(&mut, &K) → Option<&V>             │
//!                │  contains(&, &K) → bool                 │
//!                │  len / is_empty / capacity              │
//!                │  clear(&mut)                            │
//!                └──────────────────┬──────────────────────┘
//!                                   │
//!                                   ▼
//!                ┌─────────────────────────────────────────┐
//!                │          MutableCache<K, V>             │
//!                │                                         │
//!                │  remove(&K) → Option<V>                 │
//!                └──────────────────┬──────────────────────┘
//!                                   │
//!                                   ▼
//!                ┌─────────────────────────────────────────┐
//!                │          LruCacheTrait<K, V>            │
//!                │                                         │
//!                │  pop_oldest() → Option<(K, V)>          │
//!                │  peek_oldest() → Option<(&K, &V)>       │
//!                │  touch(&K) → bool                       │
//!                └─────────────────────────────────────────┘
//! ```
//!
//! | Trait             | Extends        | Purpose                              |
//! |-------------------|----------------|--------------------------------------|
//! | `CoreCache`       | -              | Universal cache operations           |
//! | `MutableCache`    | `CoreCache`    | Arbitrary key removal                |
//! | `LruCacheTrait`   | `MutableCache` | Recency-ordered eviction + touch     |
//! | `ConcurrentCache` | `Send + Sync`  | Marker for thread-safe facades       |
//!
//! Both `LruCore` and `TwoQCore` implement `CoreCache`; `LruCore`
//! additionally implements `MutableCache` and `LruCacheTrait`.

/// Core cache operations every policy supports.
///
/// # Example
///
/// ```
/// use twoq::traits::CoreCache;
/// use twoq::policy::lru::LruCore;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCore::try_new(100).unwrap();
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if the key was
    /// resident.
    ///
    /// If the cache is full, an entry may be evicted according to the
    /// cache's admission policy before the new entry is inserted.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value, updating policy state (recency).
    ///
    /// Use [`contains`](Self::contains) to check existence without touching
    /// eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks membership without updating policy state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes all entries.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a key, returning its value if it was resident.
    fn remove(&mut self, key: &K) -> Option<V>;
}

/// Recency-ordered caches with explicit oldest-entry eviction.
///
/// # Example
///
/// ```
/// use twoq::traits::{CoreCache, LruCacheTrait};
/// use twoq::policy::lru::LruCore;
///
/// let mut cache = LruCore::try_new(3).unwrap();
/// cache.insert(1, "one");
/// cache.insert(2, "two");
///
/// assert_eq!(cache.peek_oldest(), Some((&1, &"one")));
/// assert!(cache.touch(&1));
/// assert_eq!(cache.pop_oldest(), Some((2, "two")));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_oldest(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without touching recency.
    fn peek_oldest(&self) -> Option<(&K, &V)>;

    /// Marks a key as most recently used without retrieving its value.
    ///
    /// Returns `true` if the key was resident.
    fn touch(&mut self, key: &K) -> bool;
}

/// Marker for cache types that are safe to share across threads.
pub trait ConcurrentCache: Send + Sync {}
