//! Persistent cache for status line data.
//!
//! Git values are fingerprinted by the mtime of a file inside the git
//! directory, CI status by ref mtime plus a TTL, and task tracker values by
//! working directory plus a TTL. The whole cache is one JSON document shared
//! by concurrent invocations through an advisory lock.

pub mod clock;
pub mod entry;
pub mod lock;
pub mod store;
pub mod validation;

pub use clock::{Clock, MockClock, SystemClock};
pub use entry::CacheDocument;
pub use store::{CacheStore, CACHE_FILE_NAME};
pub use validation::format_duration;
