//! Git repository access through the `git` CLI.

use std::path::{Path, PathBuf};

use super::diff::{classify_porcelain, count_changes, parse_shortstat, DiffStats};
use crate::error::{Result, StatusLineError};
use crate::shell::{Commander, SystemCommander, GIT_TIMEOUT};

/// A discovered git repository.
pub struct GitRepo {
    workdir: PathBuf,
    git_dir: PathBuf,
    commander: Box<dyn Commander>,
}

impl GitRepo {
    /// Locate the repository containing `workdir`.
    ///
    /// Fails with [`StatusLineError::NotARepository`] outside a repository.
    pub fn discover(workdir: &Path) -> Result<Self> {
        Self::with_commander(workdir, Box::new(SystemCommander::new(workdir, GIT_TIMEOUT)))
    }

    /// Locate the repository using a custom commander.
    pub fn with_commander(workdir: &Path, commander: Box<dyn Commander>) -> Result<Self> {
        let git_dir = commander
            .output("git", &["rev-parse", "--git-dir"])
            .map_err(|err| {
                tracing::debug!(workdir = %workdir.display(), error = %err, "git rev-parse failed");
                StatusLineError::NotARepository {
                    path: workdir.to_path_buf(),
                }
            })?;

        let git_dir = PathBuf::from(git_dir.trim());
        let git_dir = if git_dir.is_absolute() {
            git_dir
        } else {
            workdir.join(git_dir)
        };

        Ok(Self {
            workdir: workdir.to_path_buf(),
            git_dir,
            commander,
        })
    }

    /// Working directory the repository was discovered from.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Absolute path of the git directory.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Current branch name; `HEAD` when detached.
    pub fn branch(&self) -> Result<String> {
        let branch = self.git(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(branch.trim().to_string())
    }

    /// `±N` for N changed paths, or empty when clean.
    pub fn status(&self) -> Result<String> {
        let porcelain = self.git(&["status", "--porcelain"])?;
        Ok(match count_changes(&porcelain) {
            0 => String::new(),
            n => format!("±{n}"),
        })
    }

    /// Line and file statistics for uncommitted changes.
    ///
    /// Line counts combine unstaged and staged diffs; a failing shortstat
    /// counts as zero.
    pub fn diff_stats(&self) -> Result<DiffStats> {
        let (add_unstaged, del_unstaged) = self
            .git(&["diff", "--shortstat"])
            .map(|out| parse_shortstat(&out))
            .unwrap_or_default();
        let (add_staged, del_staged) = self
            .git(&["diff", "--shortstat", "--cached"])
            .map(|out| parse_shortstat(&out))
            .unwrap_or_default();

        let porcelain = self.git(&["status", "--porcelain"])?;
        let mut stats = classify_porcelain(&porcelain);
        stats.additions = add_unstaged + add_staged;
        stats.deletions = del_unstaged + del_staged;
        Ok(stats)
    }

    /// URL of the `origin` remote.
    pub fn remote_url(&self) -> Result<String> {
        let url = self.git(&["remote", "get-url", "origin"])?;
        Ok(url.trim().to_string())
    }

    /// Fingerprint file for the branch name.
    pub fn head_path(&self) -> PathBuf {
        self.git_dir.join("HEAD")
    }

    /// Fingerprint file for status and diff statistics.
    pub fn index_path(&self) -> PathBuf {
        self.git_dir.join("index")
    }

    /// Loose ref file for `branch`.
    pub fn ref_path(&self, branch: &str) -> PathBuf {
        self.git_dir.join("refs").join("heads").join(branch)
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        self.commander.output("git", args)
    }
}
