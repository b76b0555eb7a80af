//! Advisory locks keyed by timestamped marker files.
//!
//! A lock is a namespace (`header`) inside a lock directory.  Holding the
//! lock means having written a marker file
//!
//! ```text
//! {lock_dir}/{header}_{YYYYMMDD}_{HHMMSS}
//! ```
//!
//! that is younger than the staleness window.  The layout is fixed so that
//! existing lock directories written by other tools stay interoperable.
//!
//! The free functions [`is_locked`] and [`create_lock`] cover one-shot use;
//! [`TimeWindowLock`] keeps the directory, header and window together.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::warn;

pub mod marker;
pub mod store;
pub mod window;

pub use marker::{LockMarker, TIMESTAMP_FORMAT};
pub use store::{FsLockStore, LockStore};
pub use window::{TimeWindowLock, DEFAULT_WINDOW};

/// Error type for lock operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// The header would not produce a single plain file name.
    #[error("invalid lock header {0:?}: must be non-empty and contain no path separator")]
    InvalidHeader(String),

    /// A file-system operation on the lock directory failed.
    #[error("I/O error on lock directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Returns `true` if `lock_dir` holds a marker for `header` younger than
/// `window`, deleting expired markers for `header` along the way.
///
/// Every failure (missing directory, unreadable directory, bad header) is
/// logged and reported as "not locked".
pub fn is_locked(lock_dir: impl AsRef<Path>, header: &str, window: Duration) -> bool {
    match TimeWindowLock::in_dir(lock_dir.as_ref(), header, window) {
        Ok(lock) => lock.is_locked(),
        Err(e) => {
            warn!("lock check skipped: {e}");
            false
        }
    }
}

/// Writes a marker for `header` into `lock_dir`, stamped `timestamp` or the
/// current local time.  Existing markers are not consulted.
///
/// # Errors
///
/// Returns [`LockError::InvalidHeader`] or [`LockError::Io`].
pub fn create_lock(
    lock_dir: impl AsRef<Path>,
    header: &str,
    timestamp: Option<NaiveDateTime>,
) -> Result<LockMarker, LockError> {
    let lock = TimeWindowLock::in_dir(lock_dir.as_ref(), header, DEFAULT_WINDOW)?;
    match timestamp {
        Some(timestamp) => lock.create_lock_at(timestamp),
        None => lock.create_lock(),
    }
}
