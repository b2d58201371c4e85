//! # hoard
//!
//! Thread-safe in-process key/value cache.
//!
//! ## Architecture
//! - **Table**: AHash map behind one `parking_lot` reader/writer lock
//! - **Envelope**: every value is stored with its creation timestamp
//! - **Lazy fill**: an optional lookup hook populates misses on read
//! - **Newer wins**: `update_if_newer` keeps the later of two writes
//!
//! ## Example
//! ```
//! use hoard::{Cache, Envelope};
//!
//! let cache: Cache<String, u32> = Cache::with_lookup(|key: &String| {
//!     key.parse().ok()
//! });
//!
//! assert_eq!(cache.get(&"12".to_string()), Some(12));
//! assert_eq!(cache.get(&"nope".to_string()), None);
//!
//! cache.upsert_value("a".to_string(), 1);
//! assert_eq!(cache.get(&"a".to_string()), Some(1));
//!
//! // A key with no entry always accepts the candidate
//! assert!(cache.update_if_newer("b".to_string(), Envelope::new(2)));
//! assert_eq!(cache.search(|v| *v == 2), vec![2]);
//! ```
//!
//! Compound operations (lazy fill, `update_if_newer`) are not atomic: each
//! phase takes its own lock, and the lookup hook runs with no lock held.

#![warn(missing_docs)]

mod cache;
mod config;
mod envelope;
mod error;
mod stats;

pub use cache::Cache;
pub use config::CacheConfig;
pub use envelope::Envelope;
pub use error::{BoxError, Error, Result};
pub use stats::CacheStats;
