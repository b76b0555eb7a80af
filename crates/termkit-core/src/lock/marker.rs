//! Lock marker file names: `<header>_<YYYYMMDD>_<HHMMSS>`.

use std::fmt;
use std::time::Duration;

use chrono::{NaiveDateTime, Timelike};

/// `strftime` layout of the timestamp part of a marker name.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Length of `YYYYMMDD_HHMMSS`.
const TIMESTAMP_LEN: usize = 15;

/// One advisory lock marker: a header (namespace) plus the acquisition time,
/// truncated to whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LockMarker {
    header: String,
    timestamp: NaiveDateTime,
}

impl LockMarker {
    /// Creates a marker.  Sub-second precision is dropped because the file
    /// name only records seconds.
    pub fn new(header: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            header: header.into(),
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// The on-disk file name, e.g. `backup_20240101_120030`.
    pub fn file_name(&self) -> String {
        format!("{}_{}", self.header, self.timestamp.format(TIMESTAMP_FORMAT))
    }

    /// Parses `file_name` as a marker belonging to `header`.
    ///
    /// The name must be exactly `header`, `_`, eight digits, `_`, six digits,
    /// and the digits must form a real calendar date-time.  Anything else
    /// belongs to another namespace or is malformed, and yields `None`.
    pub fn parse(header: &str, file_name: &str) -> Option<Self> {
        let suffix = file_name.strip_prefix(header)?.strip_prefix('_')?;
        let bytes = suffix.as_bytes();
        if bytes.len() != TIMESTAMP_LEN
            || bytes[8] != b'_'
            || !bytes[..8].iter().all(u8::is_ascii_digit)
            || !bytes[9..].iter().all(u8::is_ascii_digit)
        {
            return None;
        }
        let timestamp = NaiveDateTime::parse_from_str(suffix, TIMESTAMP_FORMAT).ok()?;
        Some(Self::new(header, timestamp))
    }

    /// Returns `true` while the marker is younger than `window` at `now`.
    ///
    /// A marker stamped in the future counts as fresh.
    pub fn is_fresh_at(&self, now: NaiveDateTime, window: Duration) -> bool {
        match (now - self.timestamp).to_std() {
            Ok(age) => age < window,
            Err(_) => true,
        }
    }
}

impl fmt::Display for LockMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}
