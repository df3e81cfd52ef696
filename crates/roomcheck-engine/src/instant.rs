//! Canonical time-of-day values shared by every parser in the crate.
//!
//! A [`CanonicalInstant`] is minutes since midnight in `[0, 1439]`. Instants are
//! only built from validated parses; there is no default instant, so a failed
//! parse can never masquerade as midnight.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};

use crate::policy::BoundaryMode;

/// Number of minutes in one day; the exclusive upper bound of an instant.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day normalized to minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalInstant(u16);

impl CanonicalInstant {
    /// Midnight (00:00).
    pub const MIDNIGHT: Self = Self(0);
    /// Noon (12:00).
    pub const NOON: Self = Self(720);

    /// Build an instant from minutes since midnight. Out-of-range values yield `None`.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Build an instant from a 24-hour clock reading.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self((hour * 60 + minute) as u16))
        } else {
            None
        }
    }

    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u32 {
        u32::from(self.0 / 60)
    }

    pub fn minute(self) -> u32 {
        u32::from(self.0 % 60)
    }

    /// Format as a 12-hour reading with a lowercase marker, e.g. `"2:05pm"`.
    ///
    /// Midnight formats as `"12:00am"` and noon as `"12:00pm"`, which is the
    /// notation [`crate::time_parser::parse_time`] reads back to the same instant.
    pub fn format_12h(self) -> String {
        let (hour, marker) = match self.hour() {
            0 => (12, "am"),
            h @ 1..=11 => (h, "am"),
            12 => (12, "pm"),
            h => (h - 12, "pm"),
        };
        format!("{}:{:02}{}", hour, self.minute(), marker)
    }
}

impl fmt::Display for CanonicalInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for CanonicalInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A same-day interval between two instants. Always `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalInterval {
    start: CanonicalInstant,
    end: CanonicalInstant,
}

impl CanonicalInterval {
    /// Returns `None` when `start > end`; intervals never wrap past midnight.
    pub fn new(start: CanonicalInstant, end: CanonicalInstant) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> CanonicalInstant {
        self.start
    }

    pub fn end(&self) -> CanonicalInstant {
        self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes() - self.start.minutes()
    }

    /// Whether `instant` falls inside this interval under the given boundary mode.
    pub fn contains(&self, instant: CanonicalInstant, mode: BoundaryMode) -> bool {
        match mode {
            BoundaryMode::Inclusive => self.start <= instant && instant <= self.end,
            BoundaryMode::HalfOpen => self.start <= instant && instant < self.end,
        }
    }
}

impl fmt::Display for CanonicalInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
