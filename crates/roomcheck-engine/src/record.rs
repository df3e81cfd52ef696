//! Timetable records and room identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One scheduled period of one classroom, as harmonized by [`crate::ingest`].
///
/// Missing cells are empty strings, never absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableRecord {
    pub department: String,
    /// Building or block label; informational, not part of the room identity.
    #[serde(default)]
    pub block: String,
    pub classroom: String,
    pub day: String,
    pub raw_slot: String,
    pub subject: String,
    pub faculty: String,
}

impl TimetableRecord {
    pub fn new(
        department: impl Into<String>,
        classroom: impl Into<String>,
        day: impl Into<String>,
        raw_slot: impl Into<String>,
        subject: impl Into<String>,
        faculty: impl Into<String>,
    ) -> Self {
        Self {
            department: department.into(),
            block: String::new(),
            classroom: classroom.into(),
            day: day.into(),
            raw_slot: raw_slot.into(),
            subject: subject.into(),
            faculty: faculty.into(),
        }
    }

    pub fn with_block(mut self, block: impl Into<String>) -> Self {
        self.block = block.into();
        self
    }

    pub fn key(&self) -> ClassroomKey {
        ClassroomKey::new(&self.department, &self.classroom)
    }

    /// Case-insensitive day comparison, ignoring surrounding whitespace.
    pub fn is_on(&self, day: &str) -> bool {
        self.day.trim().eq_ignore_ascii_case(day.trim())
    }
}

/// A physical room across all source tables: department plus room label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassroomKey {
    pub department: String,
    pub classroom: String,
}

impl ClassroomKey {
    pub fn new(department: impl Into<String>, classroom: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            classroom: classroom.into(),
        }
    }
}

impl fmt::Display for ClassroomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.department, self.classroom)
    }
}
