mod entry;
mod query_cache;

pub use entry::{FetchStatus, QuerySnapshot};
pub use query_cache::QueryCache;
