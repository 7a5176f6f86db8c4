//! Cross-process advisory lock for the cache document.
//!
//! Status line invocations overlap when the host refreshes quickly, so every
//! read-modify-write of the document runs under an exclusive lock on a
//! sibling `.lock` file. Acquisition is bounded: if another process holds the
//! lock for longer than the timeout the caller proceeds unlocked.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

/// Default time to wait for the lock before giving up.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Delay between acquisition attempts.
const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// An exclusive lock held on a lock file; released on drop.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Try to take the lock at `path`, retrying until `timeout` elapses.
    ///
    /// Returns `None` when the lock could not be taken (timeout or IO error);
    /// the caller is expected to continue without it.
    pub fn acquire(path: &Path, timeout: Duration) -> Option<Self> {
        let file = match OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
        {
            Ok(file) => file,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot open cache lock file, proceeding without lock");
                return None;
            }
        };

        let start = Instant::now();
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    return Some(Self {
                        file,
                        path: path.to_path_buf(),
                    })
                }
                Err(err) if err.kind() == ErrorKind::WouldBlock || is_contended(&err) => {
                    if start.elapsed() >= timeout {
                        tracing::warn!(
                            path = %path.display(),
                            timeout_ms = timeout.as_millis() as u64,
                            "cache lock timeout, proceeding without lock"
                        );
                        return None;
                    }
                    thread::sleep(LOCK_RETRY_INTERVAL.min(timeout));
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "cache lock failed, proceeding without lock");
                    return None;
                }
            }
        }
    }

    /// Path of the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

fn is_contended(err: &std::io::Error) -> bool {
    err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

/// Run `f` while holding the lock at `path` if it can be taken in time.
pub fn with_file_lock<T>(path: &Path, timeout: Duration, f: impl FnOnce() -> T) -> T {
    let _guard = FileLock::acquire(path, timeout);
    f()
}
