//! Invalidation predicates: file fingerprints and TTL freshness.

use chrono::{DateTime, Duration, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Fingerprint used for CI status when no ref file can be found.
///
/// Caching still happens; the TTL alone decides freshness.
pub const MISSING_REF_FINGERPRINT: i64 = 0;

/// Modification time of `path` in nanoseconds since the epoch.
pub fn file_mtime(path: &Path) -> io::Result<i64> {
    let modified = fs::metadata(path)?.modified()?;
    let modified: DateTime<Utc> = modified.into();
    modified
        .timestamp_nanos_opt()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "mtime out of range"))
}

/// Location of `packed-refs` for a loose ref path (`<gitdir>/refs/heads/<branch>`).
///
/// Branch names may contain slashes, so the git dir is found by walking up to
/// the `refs` component rather than a fixed number of parents.
pub fn packed_refs_path(ref_path: &Path) -> Option<PathBuf> {
    let git_dir = ref_path
        .ancestors()
        .find(|p| p.file_name().is_some_and(|n| n == "refs"))?
        .parent()?;
    Some(git_dir.join("packed-refs"))
}

/// Fingerprint for a branch ref: loose ref mtime, else packed-refs mtime,
/// else [`MISSING_REF_FINGERPRINT`].
pub fn ref_fingerprint(ref_path: &Path) -> i64 {
    if let Ok(mtime) = file_mtime(ref_path) {
        return mtime;
    }
    packed_refs_path(ref_path)
        .and_then(|packed| file_mtime(&packed).ok())
        .unwrap_or(MISSING_REF_FINGERPRINT)
}

/// Whether a value cached at `cached_at` is still inside `ttl` at `now`.
pub fn within_ttl(cached_at: DateTime<Utc>, now: DateTime<Utc>, ttl: std::time::Duration) -> bool {
    let ttl = Duration::from_std(ttl).unwrap_or(Duration::MAX);
    now.signed_duration_since(cached_at) < ttl
}

/// Format a duration for display.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds();

    if secs >= 86400 {
        format!("{}d", secs / 86400)
    } else if secs >= 3600 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}
