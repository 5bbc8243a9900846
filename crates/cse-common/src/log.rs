// SPDX-License-Identifier: Apache-2.0
// Copyright 2024-2026 Qbitel Inc.

//! Firmware console log
//!
//! Boot code has no wall clock and often no console yet, so diagnostics are
//! recorded into a fixed ring of records and replayed to a console later
//! through any `core::fmt::Write` sink. Each record carries a sequence
//! number; once the ring is full the oldest record is dropped and counted.
//!
//! Levels follow the usual firmware console scale, from `Critical` (platform
//! left in a degraded security state) down to `Trace`.

use core::fmt::{self, Write};
use heapless::{Deque, String};

/// Longest recorded line; longer text is cut on a char boundary
pub const CONSOLE_LINE_MAX: usize = 128;

/// Records kept before the oldest is dropped
pub const CONSOLE_RING_ENTRIES: usize = 64;

/// Console level, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    /// Security-relevant failure
    Critical = 0,
    /// Operation failed
    Error = 1,
    /// Degraded but continuing
    Warn = 2,
    /// Notable event
    Info = 3,
    /// Diagnostic detail
    Debug = 4,
    /// Everything
    Trace = 5,
}

impl LogLevel {
    /// Console tag
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Critical => "CRIT",
            Self::Error => "ERR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "SPEW",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One recorded console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Level
    pub level: LogLevel,
    /// Position in the stream of recorded lines
    pub sequence: u32,
    /// Emitting component
    pub module: &'static str,
    /// Line text
    pub text: String<CONSOLE_LINE_MAX>,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:04}] {:<5} {}: {}",
            self.sequence,
            self.level.tag(),
            self.module,
            self.text
        )
    }
}

/// Writer that keeps what fits and silently cuts the rest
struct Clipped<'a>(&'a mut String<CONSOLE_LINE_MAX>);

impl Write for Clipped<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = CONSOLE_LINE_MAX - self.0.len();
        let mut end = s.len().min(room);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        // Cannot fail: `end` bytes fit by construction
        let _ = self.0.push_str(&s[..end]);
        Ok(())
    }
}

/// Ring of console records with a level filter
pub struct LogBuffer {
    ring: Deque<LogRecord, CONSOLE_RING_ENTRIES>,
    sequence: u32,
    dropped: u32,
    min_level: LogLevel,
}

impl LogBuffer {
    /// Empty ring recording `Info` and above
    #[must_use]
    pub const fn new() -> Self {
        Self::with_min_level(LogLevel::Info)
    }

    /// Empty ring recording `min_level` and above
    #[must_use]
    pub const fn with_min_level(min_level: LogLevel) -> Self {
        Self {
            ring: Deque::new(),
            sequence: 0,
            dropped: 0,
            min_level,
        }
    }

    /// Change the level filter
    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    /// Current level filter
    #[must_use]
    pub const fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Check if `level` passes the filter
    #[must_use]
    pub const fn should_log(&self, level: LogLevel) -> bool {
        level as u8 <= self.min_level as u8
    }

    /// Record a formatted line; used by the `log_*!` macros
    pub fn log(&mut self, level: LogLevel, module: &'static str, args: fmt::Arguments<'_>) {
        if !self.should_log(level) {
            return;
        }

        let mut text = String::new();
        let _ = Clipped(&mut text).write_fmt(args);

        let record = LogRecord {
            level,
            sequence: self.sequence,
            module,
            text,
        };
        self.sequence = self.sequence.wrapping_add(1);

        if self.ring.is_full() {
            self.ring.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }
        // The ring has room after the pop above
        let _ = self.ring.push_back(record);
    }

    /// Records currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Check if nothing is held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Records pushed out of a full ring
    #[must_use]
    pub const fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Forget every record; sequence numbers keep counting
    pub fn clear(&mut self) {
        self.ring.clear();
        self.dropped = 0;
    }

    /// Records, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> + '_ {
        self.ring.iter()
    }

    /// Check whether any held record's text contains `needle`
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.iter().any(|r| r.text.contains(needle))
    }

    /// Count held records at exactly `level`
    #[must_use]
    pub fn count_level(&self, level: LogLevel) -> usize {
        self.iter().filter(|r| r.level == level).count()
    }

    /// Replay held records to a console, one per line
    ///
    /// Notes dropped records first so the gap is visible.
    pub fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        if self.dropped > 0 {
            writeln!(out, "... {} earlier lines dropped", self.dropped)?;
        }
        for record in self.iter() {
            writeln!(out, "{record}")?;
        }
        Ok(())
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Record a `Critical` line
#[macro_export]
macro_rules! log_crit {
    ($log:expr, $module:expr, $($arg:tt)*) => {
        $log.log($crate::log::LogLevel::Critical, $module, format_args!($($arg)*))
    };
}

/// Record an `Error` line
#[macro_export]
macro_rules! log_error {
    ($log:expr, $module:expr, $($arg:tt)*) => {
        $log.log($crate::log::LogLevel::Error, $module, format_args!($($arg)*))
    };
}

/// Record a `Warn` line
#[macro_export]
macro_rules! log_warn {
    ($log:expr, $module:expr, $($arg:tt)*) => {
        $log.log($crate::log::LogLevel::Warn, $module, format_args!($($arg)*))
    };
}

/// Record an `Info` line
#[macro_export]
macro_rules! log_info {
    ($log:expr, $module:expr, $($arg:tt)*) => {
        $log.log($crate::log::LogLevel::Info, $module, format_args!($($arg)*))
    };
}

/// Record a `Debug` line
#[macro_export]
macro_rules! log_debug {
    ($log:expr, $module:expr, $($arg:tt)*) => {
        $log.log($crate::log::LogLevel::Debug, $module, format_args!($($arg)*))
    };
}

/// Record a `Trace` line
#[macro_export]
macro_rules! log_trace {
    ($log:expr, $module:expr, $($arg:tt)*) => {
        $log.log($crate::log::LogLevel::Trace, $module, format_args!($($arg)*))
    };
}
