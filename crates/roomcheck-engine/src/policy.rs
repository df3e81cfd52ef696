//! Named, overridable disambiguation policies.
//!
//! Timetable authors routinely omit or misplace am/pm markers. The guesses used
//! to recover them are conventions of a particular college day, not general
//! time-parsing rules, so they live here as data rather than inline in the
//! parsers:
//!
//! - [`SlotMeridiemPolicy`]: how stored slot tokens are read ([`MeridiemPolicy`]).
//! - [`QueryMeridiemPolicy`]: how a user's bare query time is read.
//! - [`BoundaryMode`]: whether a slot's end minute still counts as inside it.

use serde::{Deserialize, Serialize};

/// An am/pm marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Read a marker suffix such as `"am"` or `"PM"`.
    pub fn from_marker(marker: &str) -> Option<Self> {
        if marker.eq_ignore_ascii_case("am") {
            Some(Meridiem::Am)
        } else if marker.eq_ignore_ascii_case("pm") {
            Some(Meridiem::Pm)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Meridiem::Am => "am",
            Meridiem::Pm => "pm",
        }
    }
}

/// Policy hooks consulted by the time parser for stored slot tokens.
///
/// Implement this to teach the parser a dataset's conventions without touching
/// the parser itself.
pub trait MeridiemPolicy {
    /// Marker to assume when a token carries none.
    fn infer(&self, hour: u32) -> Meridiem;

    /// Final marker for a token that carried `marker` explicitly.
    fn correct(&self, hour: u32, marker: Meridiem) -> Meridiem {
        let _ = hour;
        marker
    }
}

/// Default convention for slot data: periods run from about 8 AM into the
/// evening, so a bare hour before the start of the day is an afternoon hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotMeridiemPolicy {
    /// Bare hours below this are read as PM, the rest as AM.
    pub day_start_hour: u32,
    /// Read a bare `12:MM` as noon rather than midnight.
    pub bare_twelve_is_noon: bool,
    /// The source is known to write "pm" on morning periods; a "pm" hour in
    /// `[day_start_hour, 11]` is read as AM.
    pub morning_pm_correction: bool,
}

impl Default for SlotMeridiemPolicy {
    fn default() -> Self {
        Self {
            day_start_hour: 8,
            bare_twelve_is_noon: true,
            morning_pm_correction: false,
        }
    }
}

impl SlotMeridiemPolicy {
    /// The default policy with morning "pm" correction switched on.
    pub fn with_morning_pm_correction() -> Self {
        Self {
            morning_pm_correction: true,
            ..Self::default()
        }
    }
}

impl MeridiemPolicy for SlotMeridiemPolicy {
    fn infer(&self, hour: u32) -> Meridiem {
        if hour < self.day_start_hour || (hour == 12 && self.bare_twelve_is_noon) {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    }

    fn correct(&self, hour: u32, marker: Meridiem) -> Meridiem {
        if self.morning_pm_correction
            && marker == Meridiem::Pm
            && (self.day_start_hour..=11).contains(&hour)
        {
            Meridiem::Am
        } else {
            marker
        }
    }
}

/// Convention for a user's query time when it carries no marker.
///
/// Hours in `[afternoon_from, afternoon_until]` are read as PM; `0` is midnight,
/// `12` is noon and anything from `13` up is already a 24-hour reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryMeridiemPolicy {
    pub afternoon_from: u32,
    pub afternoon_until: u32,
}

impl Default for QueryMeridiemPolicy {
    fn default() -> Self {
        Self {
            afternoon_from: 1,
            afternoon_until: 7,
        }
    }
}

impl QueryMeridiemPolicy {
    /// Read every bare hour from 1 to 11 as PM.
    pub fn afternoon_biased() -> Self {
        Self {
            afternoon_from: 1,
            afternoon_until: 11,
        }
    }

    /// Convert a bare (marker-less) hour to a 24-hour value.
    pub fn bare_hour_to_24h(&self, hour: u32) -> Option<u32> {
        match hour {
            0 => Some(0),
            12 => Some(12),
            h if h >= 24 => None,
            h if h < 12 && (self.afternoon_from..=self.afternoon_until).contains(&h) => {
                Some(h + 12)
            }
            h => Some(h),
        }
    }
}

/// Whether a slot's end instant still counts as inside the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// `start <= t <= end`.
    #[default]
    Inclusive,
    /// `start <= t < end`.
    HalfOpen,
}
