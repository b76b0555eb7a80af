//! The time-window lock: check-and-sweep plus unconditional marker creation.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use super::marker::LockMarker;
use super::store::{FsLockStore, LockStore};
use super::LockError;

/// Markers younger than this many seconds hold the lock by default.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(300);

/// An advisory lock namespace (`header`) inside one lock directory.
///
/// # Semantics
///
/// - [`is_locked`](Self::is_locked) returns `true` while any marker for the
///   header is younger than `window`.  Every expired marker it encounters is
///   deleted on the way, so checking is self-cleaning.
/// - [`create_lock`](Self::create_lock) writes a new marker without looking at
///   existing ones.  Two callers stamping the same second write the same file.
///
/// Nothing serialises the check and the create: two processes can both see
/// "unlocked" and both create a marker.  The lock is advisory.
#[derive(Debug)]
pub struct TimeWindowLock<S> {
    store: S,
    header: String,
    window: Duration,
}

impl TimeWindowLock<FsLockStore> {
    /// Lock rooted at the directory `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::InvalidHeader`] for an unusable header.
    pub fn in_dir(
        dir: impl Into<PathBuf>,
        header: impl Into<String>,
        window: Duration,
    ) -> Result<Self, LockError> {
        Self::new(FsLockStore::new(dir), header, window)
    }
}

impl<S: LockStore> TimeWindowLock<S> {
    /// Creates a lock over `store`.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::InvalidHeader`] if `header` is empty or contains a
    /// path separator, since it becomes part of a file name.
    pub fn new(store: S, header: impl Into<String>, window: Duration) -> Result<Self, LockError> {
        let header = header.into();
        if header.is_empty() || header.contains(['/', '\\']) {
            return Err(LockError::InvalidHeader(header));
        }
        Ok(Self {
            store,
            header,
            window,
        })
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Returns `true` if a fresh marker exists right now, sweeping expired ones.
    pub fn is_locked(&self) -> bool {
        self.is_locked_at(now())
    }

    /// [`is_locked`](Self::is_locked) evaluated at `now`.
    pub fn is_locked_at(&self, now: NaiveDateTime) -> bool {
        !self.active_markers_at(now).is_empty()
    }

    /// Fresh markers for this header right now, oldest first.
    pub fn active_markers(&self) -> Vec<LockMarker> {
        self.active_markers_at(now())
    }

    /// Scans the lock directory at `now`.
    ///
    /// Returns the fresh markers for this header, oldest first, and deletes
    /// the expired ones.  Entries of other headers and malformed names are
    /// left alone.  A missing or unreadable directory yields an empty list;
    /// a failed deletion is logged and skipped.
    pub fn active_markers_at(&self, now: NaiveDateTime) -> Vec<LockMarker> {
        if !self.store.exists() {
            return Vec::new();
        }

        let names = match self.store.list() {
            Ok(names) => names,
            Err(e) => {
                warn!(
                    "cannot list lock directory {}: {e}; assuming unlocked",
                    self.store.location().display()
                );
                return Vec::new();
            }
        };

        let mut active = Vec::new();
        for name in names {
            let Some(marker) = LockMarker::parse(&self.header, &name) else {
                continue;
            };
            if marker.is_fresh_at(now, self.window) {
                active.push(marker);
                continue;
            }
            debug!("removing expired lock marker {name}");
            if let Err(e) = self.store.remove(&name) {
                warn!(
                    "cannot remove expired lock marker {} in {}: {e}",
                    name,
                    self.store.location().display()
                );
            }
        }

        if !active.is_empty() {
            info!("operation is locked: {}", self.header);
        }
        active.sort_by_key(LockMarker::timestamp);
        active
    }

    /// Writes a marker stamped with the current local time.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::Io`] if the directory or file cannot be created.
    pub fn create_lock(&self) -> Result<LockMarker, LockError> {
        self.create_lock_at(now())
    }

    /// Writes a marker stamped `timestamp`, creating the lock directory first.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::Io`] if the directory or file cannot be created.
    pub fn create_lock_at(&self, timestamp: NaiveDateTime) -> Result<LockMarker, LockError> {
        let io_error = |source| LockError::Io {
            path: self.store.location(),
            source,
        };

        self.store.create_dir_all().map_err(io_error)?;
        let marker = LockMarker::new(self.header.clone(), timestamp);
        self.store
            .write_marker(&marker.file_name())
            .map_err(io_error)?;
        info!(
            "created lock marker {} in {}",
            marker,
            self.store.location().display()
        );
        Ok(marker)
    }

    /// Checks the lock and, if it is free, creates a marker.
    ///
    /// Returns `Ok(None)` when the lock is held.  This is exactly
    /// `is_locked()` followed by `create_lock()`, race included.
    ///
    /// # Errors
    ///
    /// Propagates [`LockError::Io`] from marker creation.
    pub fn try_acquire(&self) -> Result<Option<LockMarker>, LockError> {
        if self.is_locked() {
            return Ok(None);
        }
        self.create_lock().map(Some)
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
