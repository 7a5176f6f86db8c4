//! Persistent, process-shared cache store.
//!
//! [`CacheStore`] keeps one [`CacheDocument`] per cache directory. Every
//! getter follows the same sequence:
//!
//! 1. take the cross-process file lock (or give up after a timeout),
//! 2. check the in-memory document for a still-valid entry,
//! 3. on a miss, call the fetch callback outside the in-process mutex,
//! 4. re-check under the mutex and write the fresh value,
//! 5. persist the document atomically, evicting stale per-workdir entries.
//!
//! A failed fetch never touches the document.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::clock::{Clock, SystemClock};
use super::entry::{
    CacheDocument, CachedDiffStats, CachedGitHubBuild, CachedNextTask, CachedTaskStats,
    CachedValue,
};
use super::lock::{with_file_lock, DEFAULT_LOCK_TIMEOUT};
use super::validation::{file_mtime, ref_fingerprint, within_ttl};
use crate::git::DiffStats;
use crate::github::BuildStatus;
use crate::tasks::TaskStats;

/// File name of the cache document inside the cache directory.
pub const CACHE_FILE_NAME: &str = "cache.json";

/// Per-workdir entries older than this are evicted on every save.
pub fn retention_window() -> ChronoDuration {
    ChronoDuration::days(7)
}

/// File-backed cache shared by every status line invocation of a user.
pub struct CacheStore {
    cache_dir: PathBuf,
    cache_path: PathBuf,
    lock_path: PathBuf,
    clock: Arc<dyn Clock>,
    lock_timeout: Duration,
    /// Lazily loaded mirror of the document; `None` until first access.
    document: Mutex<Option<CacheDocument>>,
}

impl CacheStore {
    /// Create a store rooted at `cache_dir` using the system clock.
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(cache_dir, Arc::new(SystemClock))
    }

    /// Create a store with a custom clock.
    pub fn with_clock(cache_dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        let cache_dir = cache_dir.into();
        let cache_path = cache_dir.join(CACHE_FILE_NAME);
        let lock_path = cache_dir.join(format!("{CACHE_FILE_NAME}.lock"));
        Self {
            cache_dir,
            cache_path,
            lock_path,
            clock,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            document: Mutex::new(None),
        }
    }

    /// Override how long to wait for the cross-process lock.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Directory holding the document and its lock file.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path of the persisted document.
    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Path of the advisory lock file.
    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    /// Create the cache directory if it doesn't exist.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Current git branch, fingerprinted by `head_path` (usually `.git/HEAD`).
    pub fn git_branch<E>(
        &self,
        head_path: &Path,
        fetch: impl FnOnce() -> Result<String, E>,
    ) -> Result<String, E> {
        self.fingerprinted(
            head_path,
            |doc| doc.git_branch.as_ref().map(|c| (c.file_mtime, c.value.clone())),
            |doc, value, file_mtime, cached_at| {
                doc.git_branch = Some(CachedValue {
                    value,
                    file_mtime,
                    cached_at,
                })
            },
            fetch,
        )
    }

    /// Working tree status summary, fingerprinted by `index_path` (`.git/index`).
    pub fn git_status<E>(
        &self,
        index_path: &Path,
        fetch: impl FnOnce() -> Result<String, E>,
    ) -> Result<String, E> {
        self.fingerprinted(
            index_path,
            |doc| doc.git_status.as_ref().map(|c| (c.file_mtime, c.value.clone())),
            |doc, value, file_mtime, cached_at| {
                doc.git_status = Some(CachedValue {
                    value,
                    file_mtime,
                    cached_at,
                })
            },
            fetch,
        )
    }

    /// Diff statistics, fingerprinted by `index_path`.
    pub fn git_diff_stats<E>(
        &self,
        index_path: &Path,
        fetch: impl FnOnce() -> Result<DiffStats, E>,
    ) -> Result<DiffStats, E> {
        self.fingerprinted(
            index_path,
            |doc| {
                doc.git_diff_stats
                    .as_ref()
                    .map(|c| (c.file_mtime, c.stats.clone()))
            },
            |doc, stats, file_mtime, cached_at| {
                doc.git_diff_stats = Some(CachedDiffStats {
                    stats,
                    file_mtime,
                    cached_at,
                })
            },
            fetch,
        )
    }

    /// CI build status for `branch`.
    ///
    /// Valid only while the branch matches, the ref fingerprint is unchanged
    /// and the entry is younger than `ttl`. Unlike the git getters, a missing
    /// ref file does not disable caching: the packed-refs mtime or a sentinel
    /// fingerprint is used and the TTL bounds staleness.
    pub fn github_build<E>(
        &self,
        ref_path: &Path,
        branch: &str,
        ttl: Duration,
        fetch: impl FnOnce() -> Result<BuildStatus, E>,
    ) -> Result<BuildStatus, E> {
        with_file_lock(&self.lock_path, self.lock_timeout, || {
            let fingerprint = ref_fingerprint(ref_path);
            let lookup = |doc: &CacheDocument, now: DateTime<Utc>| {
                doc.github_build
                    .as_ref()
                    .filter(|c| {
                        c.branch == branch
                            && c.file_mtime == fingerprint
                            && within_ttl(c.cached_at, now, ttl)
                    })
                    .map(|c| c.status)
            };
            self.read_through(
                lookup,
                |doc, status, cached_at| {
                    doc.github_build = Some(CachedGitHubBuild {
                        status,
                        file_mtime: fingerprint,
                        cached_at,
                        branch: branch.to_string(),
                    })
                },
                fetch,
            )
        })
    }

    /// Task statistics for `workdir`, invalidated by TTL only.
    pub fn task_stats<E>(
        &self,
        workdir: &Path,
        ttl: Duration,
        fetch: impl FnOnce() -> Result<TaskStats, E>,
    ) -> Result<TaskStats, E> {
        let key = workdir_key(workdir);
        with_file_lock(&self.lock_path, self.lock_timeout, || {
            self.read_through(
                |doc, now| {
                    doc.task_stats_map
                        .get(&key)
                        .filter(|c| within_ttl(c.cached_at, now, ttl))
                        .map(|c| c.stats.clone())
                },
                |doc, stats, cached_at| {
                    doc.task_stats_map
                        .insert(key.clone(), CachedTaskStats { stats, cached_at });
                },
                fetch,
            )
        })
    }

    /// Next ready task title for `workdir`, invalidated by TTL only.
    pub fn next_task<E>(
        &self,
        workdir: &Path,
        ttl: Duration,
        fetch: impl FnOnce() -> Result<String, E>,
    ) -> Result<String, E> {
        let key = workdir_key(workdir);
        with_file_lock(&self.lock_path, self.lock_timeout, || {
            self.read_through(
                |doc, now| {
                    doc.next_task_map
                        .get(&key)
                        .filter(|c| within_ttl(c.cached_at, now, ttl))
                        .map(|c| c.title.clone())
                },
                |doc, title, cached_at| {
                    doc.next_task_map
                        .insert(key.clone(), CachedNextTask { title, cached_at });
                },
                fetch,
            )
        })
    }

    /// Delete the persisted document and forget the in-memory copy.
    ///
    /// Clearing an already-absent document succeeds.
    pub fn clear(&self) -> std::io::Result<()> {
        let mut document = self.lock_document();
        *document = None;
        match fs::remove_file(&self.cache_path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }

    /// Snapshot of the current document (loading it if needed).
    pub fn snapshot(&self) -> CacheDocument {
        let mut document = self.lock_document();
        self.load(&mut document).clone()
    }

    /// Getter for entries keyed on a file mtime. When the file cannot be
    /// stat'ed the cache is bypassed and `fetch` is called directly.
    fn fingerprinted<T: Clone, E>(
        &self,
        fingerprint_path: &Path,
        cached: impl Fn(&CacheDocument) -> Option<(i64, T)>,
        insert: impl FnOnce(&mut CacheDocument, T, i64, DateTime<Utc>),
        fetch: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        with_file_lock(&self.lock_path, self.lock_timeout, || {
            let mtime = match file_mtime(fingerprint_path) {
                Ok(mtime) => mtime,
                Err(err) => {
                    tracing::debug!(
                        path = %fingerprint_path.display(),
                        error = %err,
                        "fingerprint unavailable, bypassing cache"
                    );
                    return fetch();
                }
            };
            self.read_through(
                |doc, _| {
                    cached(doc)
                        .filter(|(file_mtime, _)| *file_mtime == mtime)
                        .map(|(_, value)| value)
                },
                |doc, value, cached_at| insert(doc, value, mtime, cached_at),
                fetch,
            )
        })
    }

    /// Check, fetch on miss, re-check, then write and persist.
    fn read_through<T: Clone, E>(
        &self,
        lookup: impl Fn(&CacheDocument, DateTime<Utc>) -> Option<T>,
        insert: impl FnOnce(&mut CacheDocument, T, DateTime<Utc>),
        fetch: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        {
            let mut document = self.lock_document();
            let doc = self.load(&mut document);
            if let Some(hit) = lookup(doc, self.clock.now()) {
                return Ok(hit);
            }
        }

        let value = fetch()?;

        let mut document = self.lock_document();
        let now = self.clock.now();
        let doc = self.load(&mut document);
        // Another caller in this process may have refreshed the entry meanwhile.
        if let Some(hit) = lookup(doc, now) {
            return Ok(hit);
        }
        insert(doc, value.clone(), now);
        self.save(doc, now);
        Ok(value)
    }

    fn lock_document(&self) -> MutexGuard<'_, Option<CacheDocument>> {
        self.document.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Return the in-memory document, reading it from disk on first use.
    /// Missing or unreadable files yield an empty document.
    fn load<'a>(&self, slot: &'a mut Option<CacheDocument>) -> &'a mut CacheDocument {
        slot.get_or_insert_with(|| read_document(&self.cache_path))
    }

    /// Evict stale entries and write the document atomically.
    /// Failures are logged; the in-memory document keeps the update.
    fn save(&self, doc: &mut CacheDocument, now: DateTime<Utc>) {
        let evicted = doc.evict_older_than(now, retention_window());
        if evicted > 0 {
            tracing::debug!(evicted, "evicted stale per-workdir cache entries");
        }

        let data = match serde_json::to_vec(doc) {
            Ok(data) => data,
            Err(err) => {
                tracing::error!(error = %err, "failed to serialize cache");
                return;
            }
        };

        let tmp_path = self.cache_path.with_extension("json.tmp");
        if let Err(err) = fs::write(&tmp_path, data) {
            tracing::error!(path = %tmp_path.display(), error = %err, "failed to write cache temp file");
            return;
        }
        if let Err(err) = fs::rename(&tmp_path, &self.cache_path) {
            tracing::error!(path = %self.cache_path.display(), error = %err, "failed to rename cache file");
            let _ = fs::remove_file(&tmp_path);
        }
    }
}

fn read_document(path: &Path) -> CacheDocument {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) => {
            if err.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %err, "failed to read cache file");
            }
            return CacheDocument::default();
        }
    };

    serde_json::from_slice(&data).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), error = %err, "cache file corrupted, resetting");
        CacheDocument::default()
    })
}

/// Absolute form of `workdir` without trailing separators or `.` segments.
fn workdir_key(workdir: &Path) -> String {
    let absolute = std::path::absolute(workdir).unwrap_or_else(|_| workdir.to_path_buf());
    absolute
        .components()
        .collect::<PathBuf>()
        .to_string_lossy()
        .into_owned()
}
