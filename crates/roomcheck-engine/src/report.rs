//! Query reports and their text rendering.

use std::fmt;

use serde::Serialize;

use crate::instant::{CanonicalInstant, CanonicalInterval};
use crate::occupancy::OccupancyVerdict;
use crate::record::ClassroomKey;

/// Whether the queried day and time had anything to report on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCoverage {
    /// At least one record exists for the day; `rooms` lists every known room.
    Scheduled,
    /// No record matches the day. `rooms` is empty.
    NoData,
    /// The instant lies outside the configured college hours. `rooms` is empty.
    Closed,
}

/// The status of one classroom at the queried instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomStatus {
    pub key: ClassroomKey,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub block: String,
    /// The matched record's interval; `None` when no record covers the instant.
    pub interval: Option<CanonicalInterval>,
    /// The matched record's slot text as written in the source.
    pub raw_slot: Option<String>,
    pub verdict: OccupancyVerdict,
}

impl RoomStatus {
    /// A room with nothing scheduled at the instant.
    pub fn unscheduled(key: ClassroomKey, block: String) -> Self {
        Self {
            key,
            block,
            interval: None,
            raw_slot: None,
            verdict: OccupancyVerdict::Free,
        }
    }

    fn room_label(&self) -> String {
        if self.block.is_empty() {
            self.key.to_string()
        } else {
            format!("{} {} {}", self.key.department, self.block, self.key.classroom)
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.interval {
            Some(interval) => write!(f, "- {} [{}] -> {}", self.room_label(), interval, self.verdict),
            None => write!(f, "- {} -> {}", self.room_label(), self.verdict),
        }
    }
}

/// Which rooms a front end wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomFilter {
    #[default]
    All,
    Free,
    Occupied,
}

impl RoomFilter {
    pub fn admits(self, room: &RoomStatus) -> bool {
        match self {
            RoomFilter::All => true,
            RoomFilter::Free => room.verdict.is_free(),
            RoomFilter::Occupied => !room.verdict.is_free(),
        }
    }
}

/// The answer to "which rooms are occupied at this day and time".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub day: String,
    /// The time as the user typed it.
    pub time_input: String,
    pub instant: CanonicalInstant,
    pub coverage: DayCoverage,
    /// Every known room in first-observed order.
    pub rooms: Vec<RoomStatus>,
}

impl Report {
    pub fn is_no_data(&self) -> bool {
        self.coverage == DayCoverage::NoData
    }

    pub fn rows(&self, filter: RoomFilter) -> impl Iterator<Item = &RoomStatus> + '_ {
        self.rooms.iter().filter(move |room| filter.admits(room))
    }

    pub fn free_rooms(&self) -> impl Iterator<Item = &RoomStatus> + '_ {
        self.rows(RoomFilter::Free)
    }

    pub fn occupied_rooms(&self) -> impl Iterator<Item = &RoomStatus> + '_ {
        self.rows(RoomFilter::Occupied)
    }

    /// Look up one room's status.
    pub fn room(&self, department: &str, classroom: &str) -> Option<&RoomStatus> {
        self.rooms
            .iter()
            .find(|room| room.key.department == department && room.key.classroom == classroom)
    }

    /// A copy of this report keeping only the rooms `filter` admits.
    pub fn filtered(&self, filter: RoomFilter) -> Report {
        Report {
            rooms: self.rows(filter).cloned().collect(),
            ..self.clone()
        }
    }

    /// Render the report as text lines, restricted to `filter`.
    ///
    /// ```text
    /// At 09:00 on Monday:
    /// - CS 101 [08:50-09:40] -> OCCUPIED (DBMS, Rao)
    /// - CS 102 -> FREE
    /// ```
    pub fn render(&self, filter: RoomFilter) -> String {
        match self.coverage {
            DayCoverage::NoData => format!("No data available for {}.", self.day),
            DayCoverage::Closed => format!("College over - no classes at {}.", self.instant),
            DayCoverage::Scheduled => {
                let mut out = format!("At {} on {}:", self.instant, self.day);
                let mut any = false;
                for room in self.rows(filter) {
                    out.push('\n');
                    out.push_str(&room.to_string());
                    any = true;
                }
                if !any {
                    out.push_str(match filter {
                        RoomFilter::Free => "\nNo free classrooms.",
                        RoomFilter::Occupied => "\nNo occupied classrooms.",
                        RoomFilter::All => "\nNo classrooms known.",
                    });
                }
                out
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(RoomFilter::All))
    }
}
