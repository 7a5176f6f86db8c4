//! Library integration tests.

use claude_status::cache::{CacheStore, MockClock};
use claude_status::config::{Config, Layout};
use claude_status::render::{render, Theme};
use claude_status::status::{StatusBuilder, StatusInput};
use claude_status::tasks::{ProviderRegistry, TaskProvider, TaskStats};
use claude_status::StatusLineError;
use chrono::{TimeZone, Utc};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

struct StaticTracker;

impl TaskProvider for StaticTracker {
    fn name(&self) -> &str {
        "static"
    }

    fn available(&self) -> bool {
        true
    }

    fn stats(&self) -> claude_status::Result<TaskStats> {
        Ok(TaskStats {
            total_issues: 5,
            open_issues: 3,
            ready_issues: 2,
            ..TaskStats::default()
        })
    }

    fn next_task(&self) -> claude_status::Result<String> {
        Ok("Triage bugs".to_string())
    }
}

#[test]
fn error_types_are_public() {
    let err = StatusLineError::WorkflowNotFound {
        name: "build".into(),
    };
    assert!(err.to_string().contains("build"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> claude_status::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn missing_config_is_reported() {
    let err = StatusBuilder::builder().build().err();
    assert!(matches!(err, Some(StatusLineError::MissingConfig)));
}

#[test]
fn custom_provider_registered_through_registry() {
    let temp = TempDir::new().unwrap();
    let mut registry = ProviderRegistry::new();
    registry.register(5, Box::new(|_: &Path| Box::new(StaticTracker) as Box<dyn TaskProvider>));

    let clock = Arc::new(MockClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()));
    let builder = StatusBuilder::builder()
        .config(Config::default())
        .cache(CacheStore::with_clock(temp.path().join("cache"), clock))
        .workdir(temp.path())
        .without_repository()
        .registry(registry)
        .build()
        .unwrap();

    let input = StatusInput::from_json(r#"{"model": {"display_name": "Sonnet"}}"#).unwrap();
    let data = builder.collect(&input);
    let line = render(&data, Layout::Tasks, &Theme::plain());

    assert_eq!(builder.task_provider(), Some("static"));
    assert!(line.starts_with("[Sonnet] | "));
    assert!(line.ends_with("📋 static: 2 ready. Next Up: Triage bugs"));

    let cached = builder.cache().snapshot();
    assert_eq!(cached.task_stats_map.len(), 1);
    assert_eq!(cached.next_task_map.len(), 1);
}
