//! Task tracker integration.
//!
//! Each backend detects itself by a marker directory in the working
//! directory. [`ProviderRegistry`] probes them in priority order and returns
//! the first one that is active.

pub mod beads;
pub mod kt;
pub mod registry;
pub mod tk;
pub mod types;

pub use registry::{ProviderFactory, ProviderRegistry, PRIORITY_BEADS, PRIORITY_KT, PRIORITY_TK};
pub use types::{has_marker_dir, TaskProvider, TaskStats};
