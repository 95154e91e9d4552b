// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Severity levels for both calling conventions.
//!
//! Two independent, statically declared enumerations live here:
//!
//! - [`StandardSeverity`] – the eight leveled severities used by the
//!   `(level, message, context)` convention, ordered `Debug` → `Emergency`.
//! - [`LegacySeverity`] – the bit-flag constants of the old
//!   `(message, level, category)` convention.
//!
//! Their numeric codes never overlap, so a JSON value can be tested for
//! membership in either set without ambiguity about *which* set it came from.
//! [`call_format`] is the pure classification used by the dispatcher.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Leveled severity, ordered from least to most important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardSeverity {
    /// Detailed debug information
    Debug,
    /// Interesting events
    Info,
    /// Normal but significant events
    Notice,
    /// Exceptional occurrences that are not errors
    Warning,
    /// Runtime errors that do not require immediate action
    Error,
    /// Critical conditions
    Critical,
    /// Action must be taken immediately
    Alert,
    /// System is unusable
    Emergency,
}

impl StandardSeverity {
    /// Every severity, lowest first.
    pub const ALL: [StandardSeverity; 8] = [
        StandardSeverity::Debug,
        StandardSeverity::Info,
        StandardSeverity::Notice,
        StandardSeverity::Warning,
        StandardSeverity::Error,
        StandardSeverity::Critical,
        StandardSeverity::Alert,
        StandardSeverity::Emergency,
    ];

    /// Numeric code of the severity.
    pub fn code(self) -> u16 {
        match self {
            StandardSeverity::Debug => 100,
            StandardSeverity::Info => 200,
            StandardSeverity::Notice => 250,
            StandardSeverity::Warning => 300,
            StandardSeverity::Error => 400,
            StandardSeverity::Critical => 500,
            StandardSeverity::Alert => 550,
            StandardSeverity::Emergency => 600,
        }
    }

    /// Lowercase name, identical to the adapter method name.
    pub fn name(self) -> &'static str {
        match self {
            StandardSeverity::Debug => "debug",
            StandardSeverity::Info => "info",
            StandardSeverity::Notice => "notice",
            StandardSeverity::Warning => "warning",
            StandardSeverity::Error => "error",
            StandardSeverity::Critical => "critical",
            StandardSeverity::Alert => "alert",
            StandardSeverity::Emergency => "emergency",
        }
    }

    /// Look a severity up by its numeric code.
    pub fn from_code(code: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| u64::from(s.code()) == code)
    }

    /// Interpret a dynamic argument as a severity.
    ///
    /// Strings match by name (case-insensitive), integers by code.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => n.as_u64().and_then(Self::from_code),
            _ => None,
        }
    }

    /// The closest `slog` level. `slog` has six levels, so the top three
    /// severities collapse into `Critical` and `Notice` into `Info`.
    pub fn slog_level(self) -> slog::Level {
        match self {
            StandardSeverity::Debug => slog::Level::Debug,
            StandardSeverity::Info | StandardSeverity::Notice => slog::Level::Info,
            StandardSeverity::Warning => slog::Level::Warning,
            StandardSeverity::Error => slog::Level::Error,
            StandardSeverity::Critical | StandardSeverity::Alert | StandardSeverity::Emergency => {
                slog::Level::Critical
            }
        }
    }
}

impl fmt::Display for StandardSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StandardSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sev| sev.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown severity '{s}'"))
    }
}

/// Severity constants of the legacy positional convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacySeverity {
    Error,
    Warning,
    Info,
    Trace,
    Profile,
    ProfileBegin,
    ProfileEnd,
}

impl LegacySeverity {
    pub const ALL: [LegacySeverity; 7] = [
        LegacySeverity::Error,
        LegacySeverity::Warning,
        LegacySeverity::Info,
        LegacySeverity::Trace,
        LegacySeverity::Profile,
        LegacySeverity::ProfileBegin,
        LegacySeverity::ProfileEnd,
    ];

    pub fn code(self) -> u8 {
        match self {
            LegacySeverity::Error => 0x01,
            LegacySeverity::Warning => 0x02,
            LegacySeverity::Info => 0x04,
            LegacySeverity::Trace => 0x08,
            LegacySeverity::Profile => 0x40,
            LegacySeverity::ProfileBegin => 0x50,
            LegacySeverity::ProfileEnd => 0x60,
        }
    }

    /// Symbolic constant name, e.g. `LEVEL_PROFILE_BEGIN`.
    pub fn constant_name(self) -> &'static str {
        match self {
            LegacySeverity::Error => "LEVEL_ERROR",
            LegacySeverity::Warning => "LEVEL_WARNING",
            LegacySeverity::Info => "LEVEL_INFO",
            LegacySeverity::Trace => "LEVEL_TRACE",
            LegacySeverity::Profile => "LEVEL_PROFILE",
            LegacySeverity::ProfileBegin => "LEVEL_PROFILE_BEGIN",
            LegacySeverity::ProfileEnd => "LEVEL_PROFILE_END",
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| u64::from(s.code()) == code)
    }

    /// Interpret a dynamic argument as a legacy constant, either by its
    /// numeric value or by its exact symbolic name.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().and_then(Self::from_code),
            Value::String(s) => Self::ALL.into_iter().find(|l| l.constant_name() == s),
            _ => None,
        }
    }

    /// Leveled severity a legacy constant is recorded at.
    pub fn to_standard(self) -> StandardSeverity {
        match self {
            LegacySeverity::Error => StandardSeverity::Error,
            LegacySeverity::Warning => StandardSeverity::Warning,
            LegacySeverity::Info => StandardSeverity::Info,
            LegacySeverity::Trace
            | LegacySeverity::Profile
            | LegacySeverity::ProfileBegin
            | LegacySeverity::ProfileEnd => StandardSeverity::Debug,
        }
    }
}

impl fmt::Display for LegacySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.constant_name())
    }
}

/// The level handed to the generic `log` adapter.
///
/// The adapter never converts between conventions; the engine decides what a
/// legacy constant means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Standard(StandardSeverity),
    Legacy(LegacySeverity),
}

impl Level {
    /// Parse a dynamic level argument, standard severities first.
    pub fn from_value(value: &Value) -> Option<Self> {
        StandardSeverity::from_value(value)
            .map(Level::Standard)
            .or_else(|| LegacySeverity::from_value(value).map(Level::Legacy))
    }

    /// Leveled severity this level is recorded at.
    pub fn severity(self) -> StandardSeverity {
        match self {
            Level::Standard(s) => s,
            Level::Legacy(l) => l.to_standard(),
        }
    }
}

impl From<StandardSeverity> for Level {
    fn from(s: StandardSeverity) -> Self {
        Level::Standard(s)
    }
}

impl From<LegacySeverity> for Level {
    fn from(l: LegacySeverity) -> Self {
        Level::Legacy(l)
    }
}

impl From<log::Level> for LegacySeverity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LegacySeverity::Error,
            log::Level::Warn => LegacySeverity::Warning,
            log::Level::Info => LegacySeverity::Info,
            log::Level::Debug | log::Level::Trace => LegacySeverity::Trace,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Standard(s) => s.fmt(f),
            Level::Legacy(l) => l.fmt(f),
        }
    }
}

/// Calling convention of a dynamic `log` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallFormat {
    /// `(level, message, context)`
    Standard,
    /// `(message, level, category)`
    Legacy,
}

/// Classify the arguments of a dynamic `log` call.
///
/// Standard only when position 0 is a recognized severity, position 1 is not
/// a legacy constant and position 3 is absent or an object. Everything else
/// is legacy.
pub fn call_format(args: &[Value], recognized: &[StandardSeverity]) -> CallFormat {
    let level_ok = args
        .first()
        .and_then(StandardSeverity::from_value)
        .is_some_and(|s| recognized.contains(&s));
    let message_ok = args.get(1).is_none_or(|v| LegacySeverity::from_value(v).is_none());
    let trailing_ok = args.get(3).is_none_or(Value::is_object);

    if level_ok && message_ok && trailing_ok {
        CallFormat::Standard
    } else {
        CallFormat::Legacy
    }
}
