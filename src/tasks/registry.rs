//! Priority-ordered task provider discovery.
//!
//! Backends are compiled in and registered explicitly at startup; only the
//! selection of the active backend for a working directory is dynamic.
//!
//! # Example
//!
//! ```
//! use claude_status::tasks::{ProviderRegistry, PRIORITY_BEADS, PRIORITY_KT, PRIORITY_TK};
//!
//! let registry = ProviderRegistry::with_builtins();
//! assert_eq!(registry.priorities(), vec![PRIORITY_KT, PRIORITY_TK, PRIORITY_BEADS]);
//! ```

use std::path::Path;

use super::types::TaskProvider;

/// kt is checked first.
pub const PRIORITY_KT: i32 = 10;
/// tk is checked second.
pub const PRIORITY_TK: i32 = 20;
/// beads is checked last.
pub const PRIORITY_BEADS: i32 = 30;

/// Builds a provider for a working directory. Construction must not fail.
pub type ProviderFactory = Box<dyn Fn(&Path) -> Box<dyn TaskProvider>>;

struct Registration {
    priority: i32,
    factory: ProviderFactory,
}

/// Ordered set of provider factories (lower priority value wins).
#[derive(Default)]
pub struct ProviderRegistry {
    registrations: Vec<Registration>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the kt, tk and beads backends.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        super::kt::register(&mut registry);
        super::tk::register(&mut registry);
        super::beads::register(&mut registry);
        registry
    }

    /// Add a factory, keeping registrations sorted by priority.
    ///
    /// Equal priorities keep their registration order.
    pub fn register(&mut self, priority: i32, factory: ProviderFactory) {
        let index = self
            .registrations
            .partition_point(|r| r.priority <= priority);
        self.registrations
            .insert(index, Registration { priority, factory });
    }

    /// First provider reporting itself available for `workdir`, if any.
    pub fn select(&self, workdir: &Path) -> Option<Box<dyn TaskProvider>> {
        for registration in &self.registrations {
            let provider = (registration.factory)(workdir);
            if provider.available() {
                tracing::debug!(
                    provider = provider.name(),
                    workdir = %workdir.display(),
                    "using task tracker"
                );
                return Some(provider);
            }
        }
        tracing::debug!(workdir = %workdir.display(), "no task tracker found");
        None
    }

    /// Registered priorities in probe order.
    pub fn priorities(&self) -> Vec<i32> {
        self.registrations.iter().map(|r| r.priority).collect()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
