//! Status data assembly.
//!
//! [`StatusBuilder`] owns no caching logic. It hands each collaborator's
//! fetch to the [`CacheStore`] together with the TTL from the configuration
//! and copies whatever comes back into a [`StatusData`]. Every step is
//! independent and degrades to empty fields on failure.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use super::data::StatusData;
use super::input::StatusInput;
use super::sources::{BuildStatusSource, Repository};
use crate::cache::CacheStore;
use crate::config::{self, Config};
use crate::error::{Result, StatusLineError};
use crate::git::{parse_github_repo, GitRepo};
use crate::github::{resolve_token, GitHubClient};
use crate::render::Color;
use crate::shell::{SystemCommander, GH_TIMEOUT};
use crate::tasks::{ProviderRegistry, TaskProvider};
use crate::transcript::{parse_transcript, ContextWindow};

enum Slot<T> {
    Default,
    Set(T),
    Off,
}

/// Builder for a [`StatusBuilder`].
///
/// Only the configuration is required. Collaborators not supplied are
/// discovered from the working directory.
pub struct StatusBuilderOptions {
    config: Option<Config>,
    cache: Option<CacheStore>,
    workdir: Option<PathBuf>,
    repository: Slot<Box<dyn Repository>>,
    github: Slot<Box<dyn BuildStatusSource>>,
    tasks: Slot<Box<dyn TaskProvider>>,
    registry: Option<ProviderRegistry>,
    prefix: String,
    prefix_color: Color,
}

impl Default for StatusBuilderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBuilderOptions {
    pub fn new() -> Self {
        Self {
            config: None,
            cache: None,
            workdir: None,
            repository: Slot::Default,
            github: Slot::Default,
            tasks: Slot::Default,
            registry: None,
            prefix: String::new(),
            prefix_color: Color::default(),
        }
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Cache store to read through. Defaults to the platform cache directory.
    pub fn cache(mut self, cache: CacheStore) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Directory the session runs in. Empty means the current directory.
    pub fn workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }

    pub fn repository(mut self, repository: Box<dyn Repository>) -> Self {
        self.repository = Slot::Set(repository);
        self
    }

    /// Treat the working directory as outside any repository.
    pub fn without_repository(mut self) -> Self {
        self.repository = Slot::Off;
        self
    }

    pub fn github(mut self, source: Box<dyn BuildStatusSource>) -> Self {
        self.github = Slot::Set(source);
        self
    }

    /// Never query CI status.
    pub fn without_github(mut self) -> Self {
        self.github = Slot::Off;
        self
    }

    /// Use `provider` instead of probing the registry.
    pub fn provider(mut self, provider: Box<dyn TaskProvider>) -> Self {
        self.tasks = Slot::Set(provider);
        self
    }

    /// Registry probed for a task tracker. Defaults to the built-in backends.
    pub fn registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Never query a task tracker.
    pub fn without_tasks(mut self) -> Self {
        self.tasks = Slot::Off;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn prefix_color(mut self, color: Color) -> Self {
        self.prefix_color = color;
        self
    }

    /// Resolve collaborators and build.
    ///
    /// Fails only when no configuration was supplied.
    pub fn build(self) -> Result<StatusBuilder> {
        let config = self.config.ok_or(StatusLineError::MissingConfig)?;

        let workdir = self
            .workdir
            .filter(|w| !w.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("."));

        let cache = self
            .cache
            .unwrap_or_else(|| CacheStore::new(config::cache_dir()));
        if let Err(err) = cache.ensure_dir() {
            tracing::warn!(
                path = %cache.cache_dir().display(),
                error = %err,
                "cannot create cache directory"
            );
        }

        let repository = match self.repository {
            Slot::Set(repository) => Some(repository),
            Slot::Off => None,
            Slot::Default => match GitRepo::discover(&workdir) {
                Ok(repo) => Some(Box::new(repo) as Box<dyn Repository>),
                Err(err) => {
                    tracing::debug!(workdir = %workdir.display(), error = %err, "git skipped");
                    None
                }
            },
        };

        let github = match self.github {
            Slot::Set(source) => OnceCell::from(Some(source)),
            Slot::Off => OnceCell::from(None),
            Slot::Default => OnceCell::new(),
        };

        let provider = match self.tasks {
            Slot::Set(provider) => Some(provider),
            Slot::Off => None,
            Slot::Default => self
                .registry
                .unwrap_or_else(ProviderRegistry::with_builtins)
                .select(&workdir),
        };

        Ok(StatusBuilder {
            config,
            cache,
            workdir,
            repository,
            github,
            provider,
            prefix: self.prefix,
            prefix_color: self.prefix_color,
        })
    }
}

/// Assembles [`StatusData`] for one render.
pub struct StatusBuilder {
    config: Config,
    cache: CacheStore,
    workdir: PathBuf,
    repository: Option<Box<dyn Repository>>,
    github: OnceCell<Option<Box<dyn BuildStatusSource>>>,
    provider: Option<Box<dyn TaskProvider>>,
    prefix: String,
    prefix_color: Color,
}

impl StatusBuilder {
    /// Create a new builder.
    pub fn builder() -> StatusBuilderOptions {
        StatusBuilderOptions::new()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn has_repository(&self) -> bool {
        self.repository.is_some()
    }

    /// Name of the selected task tracker.
    pub fn task_provider(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.name())
    }

    /// Gather every field for `input`.
    pub fn collect(&self, input: &StatusInput) -> StatusData {
        let mut data = StatusData {
            prefix: self.prefix.clone(),
            prefix_color: self.prefix_color,
            model: input.model_name().to_string(),
            dir: input.dir_name(),
            version: input.version.clone(),
            ..StatusData::default()
        };

        self.populate_tokens(&mut data, input);
        self.populate_tasks(&mut data);

        let Some(repo) = self.repository.as_deref() else {
            return data;
        };
        self.populate_git(&mut data, repo);

        if !data.git_branch.is_empty() {
            let branch = data.git_branch.clone();
            self.populate_github(&mut data, repo, &branch);
        }

        data
    }

    fn populate_tokens(&self, data: &mut StatusData, input: &StatusInput) {
        let Some(path) = input.transcript() else {
            return;
        };
        match parse_transcript(Some(path)) {
            Ok(metrics) => data.apply_tokens(&metrics, ContextWindow::for_model(&input.model.id)),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "failed to parse transcript")
            }
        }
    }

    fn populate_tasks(&self, data: &mut StatusData) {
        let Some(provider) = self.provider.as_deref() else {
            return;
        };
        let ttl = self.config.tasks_ttl();

        let stats = match self.cache.task_stats(&self.workdir, ttl, || provider.stats()) {
            Ok(stats) => stats,
            Err(err) => {
                tracing::debug!(provider = provider.name(), error = %err, "failed to get task stats");
                return;
            }
        };
        data.apply_task_stats(provider.name(), &stats);

        match self.cache.next_task(&self.workdir, ttl, || provider.next_task()) {
            Ok(title) => data.tasks_next_task = title,
            Err(err) => {
                tracing::debug!(provider = provider.name(), error = %err, "failed to get next task")
            }
        }
    }

    fn populate_git(&self, data: &mut StatusData, repo: &dyn Repository) {
        match self.cache.git_branch(&repo.head_path(), || repo.branch()) {
            Ok(branch) => data.git_branch = branch,
            Err(err) => tracing::debug!(error = %err, "failed to get git branch"),
        }

        let index = repo.index_path();
        match self.cache.git_status(&index, || repo.status()) {
            Ok(status) => data.git_status = status,
            Err(err) => tracing::debug!(error = %err, "failed to get git status"),
        }

        match self.cache.git_diff_stats(&index, || repo.diff_stats()) {
            Ok(stats) => data.apply_diff_stats(&stats),
            Err(err) => tracing::debug!(error = %err, "failed to get git diff stats"),
        }
    }

    fn populate_github(&self, data: &mut StatusData, repo: &dyn Repository, branch: &str) {
        if matches!(self.github.get(), Some(None)) {
            return;
        }

        let remote = match repo.remote_url() {
            Ok(remote) => remote,
            Err(err) => {
                tracing::debug!(error = %err, "failed to get remote URL");
                return;
            }
        };
        let Some(github_repo) = parse_github_repo(&remote) else {
            tracing::debug!(remote = %remote, "not a GitHub repository");
            return;
        };

        let fetch = || match self.github_source() {
            Some(source) => source.build_status(&github_repo.owner, &github_repo.repo, branch),
            None => Err(StatusLineError::MissingToken),
        };
        let ref_path = repo.ref_path(branch);

        match self
            .cache
            .github_build(&ref_path, branch, self.config.github_ttl(), fetch)
        {
            Ok(status) => data.github_status = Some(status),
            Err(err) => tracing::debug!(
                owner = %github_repo.owner,
                repo = %github_repo.repo,
                branch,
                error = %err,
                "failed to get GitHub build status"
            ),
        }
    }

    /// CI client, connected on first use so cache hits never resolve a token.
    fn github_source(&self) -> Option<&dyn BuildStatusSource> {
        self.github
            .get_or_init(|| match self.connect_github() {
                Ok(client) => Some(Box::new(client) as Box<dyn BuildStatusSource>),
                Err(err) => {
                    tracing::debug!(error = %err, "failed to create GitHub client");
                    None
                }
            })
            .as_deref()
    }

    fn connect_github(&self) -> Result<GitHubClient> {
        let commander = SystemCommander::new(&self.workdir, GH_TIMEOUT);
        let token = resolve_token(&commander)?;
        GitHubClient::new(self.config.github_workflow.clone(), token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MockClock;
    use crate::git::DiffStats;
    use crate::github::BuildStatus;
    use crate::tasks::TaskStats;
    use chrono::{TimeZone, Utc};
    use std::cell::Cell;
    use std::fs;
    use std::io::Write;
    use std::rc::Rc;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Calls {
        branch: Cell<u32>,
        status: Cell<u32>,
        diff: Cell<u32>,
        remote: Cell<u32>,
        build: Cell<u32>,
        stats: Cell<u32>,
        next: Cell<u32>,
    }

    fn bump(cell: &Cell<u32>) {
        cell.set(cell.get() + 1);
    }

    struct FakeRepo {
        git_dir: PathBuf,
        branch: String,
        remote: Option<String>,
        calls: Rc<Calls>,
    }

    impl Repository for FakeRepo {
        fn branch(&self) -> Result<String> {
            bump(&self.calls.branch);
            Ok(self.branch.clone())
        }

        fn status(&self) -> Result<String> {
            bump(&self.calls.status);
            Ok("±2".to_string())
        }

        fn diff_stats(&self) -> Result<DiffStats> {
            bump(&self.calls.diff);
            Ok(DiffStats {
                additions: 12,
                deletions: 3,
                new_files: 1,
                modified_files: 1,
                ..DiffStats::default()
            })
        }

        fn remote_url(&self) -> Result<String> {
            bump(&self.calls.remote);
            self.remote.clone().ok_or(StatusLineError::CommandFailed {
                command: "git remote get-url origin".into(),
                code: Some(2),
            })
        }

        fn head_path(&self) -> PathBuf {
            self.git_dir.join("HEAD")
        }

        fn index_path(&self) -> PathBuf {
            self.git_dir.join("index")
        }

        fn ref_path(&self, branch: &str) -> PathBuf {
            self.git_dir.join("refs/heads").join(branch)
        }
    }

    struct FakeGitHub {
        result: Option<BuildStatus>,
        calls: Rc<Calls>,
    }

    impl BuildStatusSource for FakeGitHub {
        fn build_status(&self, owner: &str, repo: &str, branch: &str) -> Result<BuildStatus> {
            bump(&self.calls.build);
            assert_eq!((owner, repo, branch), ("acme", "widgets", "main"));
            self.result.ok_or(StatusLineError::NoWorkflowRuns {
                branch: branch.to_string(),
            })
        }
    }

    struct FakeTasks {
        fail_stats: bool,
        calls: Rc<Calls>,
    }

    impl TaskProvider for FakeTasks {
        fn name(&self) -> &str {
            "tk"
        }

        fn available(&self) -> bool {
            true
        }

        fn stats(&self) -> Result<TaskStats> {
            bump(&self.calls.stats);
            if self.fail_stats {
                return Err(StatusLineError::CommandFailed {
                    command: "tk query".into(),
                    code: Some(1),
                });
            }
            Ok(TaskStats {
                total_issues: 9,
                open_issues: 4,
                ready_issues: 3,
                blocked_issues: 1,
                ..TaskStats::default()
            })
        }

        fn next_task(&self) -> Result<String> {
            bump(&self.calls.next);
            Ok("Write docs".to_string())
        }
    }

    struct Fixture {
        temp: TempDir,
        clock: Arc<MockClock>,
        calls: Rc<Calls>,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let git_dir = temp.path().join("repo/.git");
            fs::create_dir_all(git_dir.join("refs/heads")).unwrap();
            fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
            fs::write(git_dir.join("index"), "index").unwrap();
            fs::write(git_dir.join("refs/heads/main"), "abc123\n").unwrap();
            Self {
                temp,
                clock: Arc::new(MockClock::new(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())),
                calls: Rc::new(Calls::default()),
            }
        }

        fn workdir(&self) -> PathBuf {
            self.temp.path().join("repo")
        }

        fn repo(&self, branch: &str, remote: Option<&str>) -> Box<dyn Repository> {
            Box::new(FakeRepo {
                git_dir: self.workdir().join(".git"),
                branch: branch.to_string(),
                remote: remote.map(str::to_string),
                calls: Rc::clone(&self.calls),
            })
        }

        fn github(&self, result: Option<BuildStatus>) -> Box<dyn BuildStatusSource> {
            Box::new(FakeGitHub {
                result,
                calls: Rc::clone(&self.calls),
            })
        }

        fn tasks(&self, fail_stats: bool) -> Box<dyn TaskProvider> {
            Box::new(FakeTasks {
                fail_stats,
                calls: Rc::clone(&self.calls),
            })
        }

        fn options(&self) -> StatusBuilderOptions {
            StatusBuilder::builder()
                .config(Config::default())
                .cache(CacheStore::with_clock(
                    self.temp.path().join("cache"),
                    self.clock.clone(),
                ))
                .workdir(self.workdir())
        }
    }

    fn input(workdir: &Path) -> StatusInput {
        StatusInput::from_json(&format!(
            r#"{{"model": {{"id": "claude-opus-4-1", "display_name": "Opus"}},
                "workspace": {{"current_dir": "{}"}}, "version": "1.0.80"}}"#,
            workdir.display()
        ))
        .unwrap()
    }

    const GITHUB_REMOTE: &str = "git@github.com:acme/widgets.git";

    #[test]
    fn build_requires_config() {
        let result = StatusBuilder::builder().without_repository().build();
        assert!(matches!(result, Err(StatusLineError::MissingConfig)));
    }

    #[test]
    fn build_creates_cache_dir() {
        let f = Fixture::new();
        let builder = f.options().without_repository().without_tasks().build().unwrap();
        assert!(builder.cache().cache_dir().is_dir());
        assert!(!builder.has_repository());
        assert_eq!(builder.task_provider(), None);
    }

    #[test]
    fn no_repository_leaves_git_fields_empty() {
        let f = Fixture::new();
        let builder = f.options().without_repository().without_tasks().build().unwrap();

        let data = builder.collect(&input(&f.workdir()));

        assert_eq!(data.model, "Opus");
        assert_eq!(data.dir, "repo");
        assert_eq!(data.version, "1.0.80");
        assert!(data.git_branch.is_empty());
        assert!(data.git_status.is_empty());
        assert_eq!(data.github_status, None);
        assert!(!data.has_tasks);
        assert!(!builder.cache().cache_path().exists());
    }

    #[test]
    fn missing_model_name_defaults() {
        let f = Fixture::new();
        let builder = f.options().without_repository().without_tasks().build().unwrap();
        let data = builder.collect(&StatusInput::default());
        assert_eq!(data.model, "Claude");
    }

    #[test]
    fn git_fields_are_cached_by_fingerprint() {
        let f = Fixture::new();
        let builder = f
            .options()
            .repository(f.repo("main", None))
            .without_tasks()
            .build()
            .unwrap();

        let first = builder.collect(&input(&f.workdir()));
        let second = builder.collect(&input(&f.workdir()));

        assert_eq!(first, second);
        assert_eq!(first.git_branch, "main");
        assert_eq!(first.git_status, "±2");
        assert_eq!(first.git_additions, 12);
        assert_eq!(first.git_deletions, 3);
        assert_eq!(first.git_new_files, 1);
        assert_eq!(first.git_modified_files, 1);
        assert_eq!(f.calls.branch.get(), 1);
        assert_eq!(f.calls.status.get(), 1);
        assert_eq!(f.calls.diff.get(), 1);
    }

    #[test]
    fn github_status_fetched_for_github_remote() {
        let f = Fixture::new();
        let builder = f
            .options()
            .repository(f.repo("main", Some(GITHUB_REMOTE)))
            .github(f.github(Some(BuildStatus::Success)))
            .without_tasks()
            .build()
            .unwrap();

        let data = builder.collect(&input(&f.workdir()));
        assert_eq!(data.github_status, Some(BuildStatus::Success));

        builder.collect(&input(&f.workdir()));
        assert_eq!(f.calls.build.get(), 1);
    }

    #[test]
    fn github_status_expires_after_ttl() {
        let f = Fixture::new();
        let builder = f
            .options()
            .repository(f.repo("main", Some(GITHUB_REMOTE)))
            .github(f.github(Some(BuildStatus::Pending)))
            .without_tasks()
            .build()
            .unwrap();

        builder.collect(&input(&f.workdir()));
        f.clock.advance(chrono::Duration::seconds(61));
        builder.collect(&input(&f.workdir()));

        assert_eq!(f.calls.build.get(), 2);
    }

    #[test]
    fn github_skipped_without_branch() {
        let f = Fixture::new();
        let builder = f
            .options()
            .repository(f.repo("", Some(GITHUB_REMOTE)))
            .github(f.github(Some(BuildStatus::Success)))
            .without_tasks()
            .build()
            .unwrap();

        let data = builder.collect(&input(&f.workdir()));

        assert_eq!(data.github_status, None);
        assert_eq!(f.calls.remote.get(), 0);
        assert_eq!(f.calls.build.get(), 0);
    }

    #[test]
    fn github_skipped_for_other_hosts() {
        let f = Fixture::new();
        let builder = f
            .options()
            .repository(f.repo("main", Some("https://gitlab.com/acme/widgets.git")))
            .github(f.github(Some(BuildStatus::Success)))
            .without_tasks()
            .build()
            .unwrap();

        let data = builder.collect(&input(&f.workdir()));

        assert_eq!(data.github_status, None);
        assert_eq!(f.calls.build.get(), 0);
    }

    #[test]
    fn github_skipped_without_remote() {
        let f = Fixture::new();
        let builder = f
            .options()
            .repository(f.repo("main", None))
            .github(f.github(Some(BuildStatus::Success)))
            .without_tasks()
            .build()
            .unwrap();

        let data = builder.collect(&input(&f.workdir()));

        assert_eq!(data.github_status, None);
        assert_eq!(f.calls.remote.get(), 1);
        assert_eq!(f.calls.build.get(), 0);
    }

    #[test]
    fn github_failure_leaves_field_empty_and_retries() {
        let f = Fixture::new();
        let builder = f
            .options()
            .repository(f.repo("main", Some(GITHUB_REMOTE)))
            .github(f.github(None))
            .without_tasks()
            .build()
            .unwrap();

        let data = builder.collect(&input(&f.workdir()));
        assert_eq!(data.github_status, None);
        assert_eq!(data.git_branch, "main");

        builder.collect(&input(&f.workdir()));
        assert_eq!(f.calls.build.get(), 2);
    }

    #[test]
    fn github_disabled_never_reads_remote() {
        let f = Fixture::new();
        let builder = f
            .options()
            .repository(f.repo("main", Some(GITHUB_REMOTE)))
            .without_github()
            .without_tasks()
            .build()
            .unwrap();

        let data = builder.collect(&input(&f.workdir()));

        assert_eq!(data.github_status, None);
        assert_eq!(f.calls.remote.get(), 0);
    }

    #[test]
    fn task_fields_from_provider() {
        let f = Fixture::new();
        let builder = f
            .options()
            .without_repository()
            .provider(f.tasks(false))
            .build()
            .unwrap();

        let data = builder.collect(&input(&f.workdir()));

        assert!(data.has_tasks);
        assert_eq!(data.task_provider, "tk");
        assert_eq!(data.tasks_total, 9);
        assert_eq!(data.tasks_open, 4);
        assert_eq!(data.tasks_ready, 3);
        assert_eq!(data.tasks_blocked, 1);
        assert_eq!(data.tasks_next_task, "Write docs");
        assert_eq!(builder.task_provider(), Some("tk"));
    }

    #[test]
    fn task_fields_cached_until_ttl() {
        let f = Fixture::new();
        let builder = f
            .options()
            .without_repository()
            .provider(f.tasks(false))
            .build()
            .unwrap();

        builder.collect(&input(&f.workdir()));
        builder.collect(&input(&f.workdir()));
        assert_eq!(f.calls.stats.get(), 1);
        assert_eq!(f.calls.next.get(), 1);

        f.clock.advance(chrono::Duration::seconds(6));
        builder.collect(&input(&f.workdir()));
        assert_eq!(f.calls.stats.get(), 2);
        assert_eq!(f.calls.next.get(), 2);
    }

    #[test]
    fn task_stats_failure_skips_next_task() {
        let f = Fixture::new();
        let builder = f
            .options()
            .without_repository()
            .provider(f.tasks(true))
            .build()
            .unwrap();

        let data = builder.collect(&input(&f.workdir()));

        assert!(!data.has_tasks);
        assert!(data.task_provider.is_empty());
        assert_eq!(f.calls.next.get(), 0);
    }

    #[test]
    fn empty_registry_means_no_tasks() {
        let f = Fixture::new();
        let builder = f
            .options()
            .without_repository()
            .registry(ProviderRegistry::new())
            .build()
            .unwrap();

        let data = builder.collect(&input(&f.workdir()));

        assert!(!data.has_tasks);
        assert_eq!(builder.task_provider(), None);
    }

    #[test]
    fn token_metrics_from_transcript() {
        let f = Fixture::new();
        let transcript = f.temp.path().join("t.jsonl");
        let mut file = fs::File::create(&transcript).unwrap();
        writeln!(
            file,
            r#"{{"type":"assistant","message":{{"usage":{{"input_tokens":80000,"output_tokens":500}}}}}}"#
        )
        .unwrap();

        let builder = f.options().without_repository().without_tasks().build().unwrap();
        let mut payload = input(&f.workdir());
        payload.transcript_path = transcript.display().to_string();

        let data = builder.collect(&payload);

        assert_eq!(data.tokens_input, 80_000);
        assert_eq!(data.tokens_output, 500);
        assert_eq!(data.tokens_total, 80_500);
        assert_eq!(data.context_length, 80_000);
        assert!((data.context_pct - 40.0).abs() < 1e-9);
        assert!((data.context_pct_usable - 50.0).abs() < 1e-9);
    }

    #[test]
    fn missing_transcript_yields_zero_tokens() {
        let f = Fixture::new();
        let builder = f.options().without_repository().without_tasks().build().unwrap();
        let mut payload = input(&f.workdir());
        payload.transcript_path = "/nonexistent/transcript.jsonl".into();

        let data = builder.collect(&payload);

        assert_eq!(data.tokens_total, 0);
        assert_eq!(data.context_pct_usable, 0.0);
    }

    #[test]
    fn prefix_is_carried() {
        let f = Fixture::new();
        let builder = f
            .options()
            .without_repository()
            .without_tasks()
            .prefix("work")
            .prefix_color(Color::Magenta)
            .build()
            .unwrap();

        let data = builder.collect(&input(&f.workdir()));

        assert_eq!(data.prefix, "work");
        assert_eq!(data.prefix_color, Color::Magenta);
    }

    #[test]
    fn empty_workdir_means_current_dir() {
        let f = Fixture::new();
        let builder = f
            .options()
            .workdir("")
            .without_repository()
            .without_tasks()
            .build()
            .unwrap();
        assert_eq!(builder.workdir(), Path::new("."));
    }
}
