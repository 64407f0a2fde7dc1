pub mod ghost_list;
pub mod recency_list;

pub use ghost_list::GhostList;
pub use recency_list::{EntryId, RecencyList};
