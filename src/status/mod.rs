//! Status line data assembly.
//!
//! [`StatusInput`] is the payload read from stdin. [`StatusBuilder`] turns it
//! into a flat [`StatusData`] by reading git, CI, task tracker and
//! transcript state through the cache.
//!
//! # Example
//!
//! ```
//! use claude_status::cache::CacheStore;
//! use claude_status::config::Config;
//! use claude_status::status::{StatusBuilder, StatusInput};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let builder = StatusBuilder::builder()
//!     .config(Config::default())
//!     .cache(CacheStore::new(temp.path()))
//!     .without_repository()
//!     .without_tasks()
//!     .build()
//!     .unwrap();
//!
//! let input = StatusInput::from_json(r#"{"workspace": {"current_dir": "/src/app"}}"#).unwrap();
//! let data = builder.collect(&input);
//! assert_eq!(data.model, "Claude");
//! assert_eq!(data.dir, "app");
//! ```

pub mod builder;
pub mod data;
pub mod input;
pub mod journal;
pub mod sources;

pub use builder::{StatusBuilder, StatusBuilderOptions};
pub use data::StatusData;
pub use input::{ModelInfo, StatusInput, WorkspaceInfo, DEFAULT_MODEL_NAME};
pub use journal::{append_entry, read_journal, record, JournalEntry};
pub use sources::{BuildStatusSource, Repository};
