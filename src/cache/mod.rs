//! Cache Module
//!
//! In-memory TTL cache for upstream payloads, plus the key policy used to
//! address it.

mod entry;
pub mod keys;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
