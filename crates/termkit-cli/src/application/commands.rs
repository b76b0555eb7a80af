//! One function per `termkit` subcommand.
//!
//! Each returns a typed outcome; rendering and exit codes are left to
//! `main.rs` so the same functions back both the one-shot subcommands and the
//! interactive menu.

use std::fmt;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use termkit_core::{
    is_ip_in_network, is_ipv4, is_ipv4_route, is_ipv4_route_list, is_ipv4_with_prefix,
    netmask_to_prefix, parse_prefix, prefix_to_netmask, FsLockStore, LockError, LockMarker,
    LockStore, NetError, TimeWindowLock,
};
use thiserror::Error;

use super::prompt::trim_line_ending;

/// `termkit netmask <PREFIX>`.
///
/// # Errors
///
/// Returns [`NetError::InvalidPrefix`] for non-numeric or out-of-range input.
/// The binary treats this as fatal.
pub fn netmask(prefix: &str) -> Result<String, NetError> {
    prefix_to_netmask(parse_prefix(prefix)?)
}

/// `termkit prefix <NETMASK>`; `None` for a malformed netmask.
pub fn prefix(netmask: &str) -> Option<u8> {
    netmask_to_prefix(netmask)
}

/// `termkit contains <NETWORK> <IP>`.
pub fn contains(network: &str, ip: &str) -> bool {
    is_ip_in_network(network, ip)
}

/// Grammar selected by `termkit check <KIND>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Ipv4,
    Ipv4Prefix,
    Route,
    RouteList,
}

impl CheckKind {
    pub const ALL: [CheckKind; 4] = [
        CheckKind::Ipv4,
        CheckKind::Ipv4Prefix,
        CheckKind::Route,
        CheckKind::RouteList,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ipv4 => "ipv4",
            Self::Ipv4Prefix => "ipv4-prefix",
            Self::Route => "route",
            Self::RouteList => "route-list",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised `check` kind.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown check kind {0:?} (expected ipv4, ipv4-prefix, route or route-list)")]
pub struct UnknownCheckKind(pub String);

impl FromStr for CheckKind {
    type Err = UnknownCheckKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownCheckKind(s.to_string()))
    }
}

/// `termkit check <KIND> <VALUE>`.
pub fn check(kind: CheckKind, value: &str) -> bool {
    match kind {
        CheckKind::Ipv4 => is_ipv4(value),
        CheckKind::Ipv4Prefix => is_ipv4_with_prefix(value),
        CheckKind::Route => is_ipv4_route(value),
        CheckKind::RouteList => is_ipv4_route_list(value),
    }
}

/// Reads a `check` value from `reader` (stdin for `check <KIND> -`).
///
/// One trailing `\n` or `\r\n` is dropped, so `echo 10.0.0.1 | termkit check
/// ipv4 -` checks `10.0.0.1`.
///
/// # Errors
///
/// Propagates read failures, including input that is not UTF-8.
pub fn read_check_value(mut reader: impl Read) -> io::Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    Ok(trim_line_ending(buf))
}

/// Where lock markers live and how long they stay fresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockSettings {
    pub dir: PathBuf,
    pub window: Duration,
}

impl LockSettings {
    /// Lock for `header` in the configured directory.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::InvalidHeader`] for an unusable header.
    pub fn lock(&self, header: &str) -> Result<TimeWindowLock<FsLockStore>, LockError> {
        TimeWindowLock::in_dir(self.dir.clone(), header, self.window)
    }
}

/// Result of `termkit lock status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockReport {
    pub header: String,
    /// Fresh markers, oldest first.
    pub active: Vec<LockMarker>,
}

impl LockReport {
    pub fn is_locked(&self) -> bool {
        !self.active.is_empty()
    }
}

impl fmt::Display for LockReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_locked() {
            return write!(f, "unlocked: {}", self.header);
        }
        write!(f, "locked: {}", self.header)?;
        for marker in &self.active {
            write!(f, "\n  {marker}")?;
        }
        Ok(())
    }
}

/// `termkit lock status`: checks (and sweeps) the lock.
pub fn lock_status<S: LockStore>(lock: &TimeWindowLock<S>) -> LockReport {
    LockReport {
        header: lock.header().to_string(),
        active: lock.active_markers(),
    }
}

/// `termkit lock create`: writes a marker unconditionally.
///
/// # Errors
///
/// Returns [`LockError::Io`] if the marker cannot be written.
pub fn lock_create<S: LockStore>(lock: &TimeWindowLock<S>) -> Result<LockMarker, LockError> {
    lock.create_lock()
}

/// Outcome of `termkit lock acquire`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireOutcome {
    Acquired(LockMarker),
    Held,
}

/// `termkit lock acquire`: creates a marker only if the lock is free.
///
/// # Errors
///
/// Returns [`LockError::Io`] if the marker cannot be written.
pub fn lock_acquire<S: LockStore>(lock: &TimeWindowLock<S>) -> Result<AcquireOutcome, LockError> {
    Ok(match lock.try_acquire()? {
        Some(marker) => AcquireOutcome::Acquired(marker),
        None => AcquireOutcome::Held,
    })
}
