//! The lock directory seen through a narrow trait.
//!
//! [`TimeWindowLock`](super::TimeWindowLock) only needs to list, create and
//! delete entries in one directory.  [`FsLockStore`] does that with `std::fs`;
//! tests substitute a mock to exercise failure paths that are awkward to
//! provoke on a real file system.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory operations required by the time-window lock.
#[cfg_attr(test, mockall::automock)]
pub trait LockStore {
    /// Path of the lock directory, used in error messages and logs.
    fn location(&self) -> PathBuf;

    /// Returns `true` if the lock directory exists.
    fn exists(&self) -> bool;

    /// Names of all entries in the lock directory.
    ///
    /// # Errors
    ///
    /// Fails if the directory cannot be read.
    fn list(&self) -> io::Result<Vec<String>>;

    /// Creates the lock directory and any missing parents.
    ///
    /// # Errors
    ///
    /// Fails if a component cannot be created.
    fn create_dir_all(&self) -> io::Result<()>;

    /// Creates (or truncates) an empty entry called `name`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    fn write_marker(&self, name: &str) -> io::Result<()>;

    /// Deletes the entry called `name`.
    ///
    /// # Errors
    ///
    /// Fails if the entry cannot be removed.
    fn remove(&self, name: &str) -> io::Result<()>;
}

/// [`LockStore`] backed by a real directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsLockStore {
    dir: PathBuf,
}

impl FsLockStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl LockStore for FsLockStore {
    fn location(&self) -> PathBuf {
        self.dir.clone()
    }

    fn exists(&self) -> bool {
        self.dir.exists()
    }

    fn list(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            // Names that are not valid UTF-8 cannot be markers.
            if let Ok(name) = entry?.file_name().into_string() {
                names.push(name);
            }
        }
        Ok(names)
    }

    fn create_dir_all(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    fn write_marker(&self, name: &str) -> io::Result<()> {
        fs::write(self.dir.join(name), b"")
    }

    fn remove(&self, name: &str) -> io::Result<()> {
        fs::remove_file(self.dir.join(name))
    }
}
