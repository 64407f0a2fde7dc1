pub use crate::ds::{EntryId, GhostList, RecencyList};
pub use crate::error::ConfigError;
pub use crate::policy::lru::{LruCache, LruCore, DEFAULT_EVICTED_BUFFER_SIZE};
pub use crate::policy::two_q::{
    TwoQCore, TwoQueueCache, DEFAULT_GHOST_RATIO, DEFAULT_RECENT_RATIO,
};
pub use crate::traits::{ConcurrentCache, CoreCache, LruCacheTrait, MutableCache};
