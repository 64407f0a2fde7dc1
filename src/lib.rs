//! twoq: bounded LRU and 2Q cache primitives.
//!
//! Two admission/eviction policies over the same slab-backed recency list:
//! a classic least-recently-used cache ([`policy::lru`]) and a 2Q cache
//! ([`policy::two_q`]) that separates recently-seen from frequently-reused
//! keys with a ghost list. Both ship a single-threaded core and a
//! `RwLock`-based thread-safe facade.

pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;
