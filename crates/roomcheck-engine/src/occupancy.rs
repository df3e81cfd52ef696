//! FREE / OCCUPIED verdicts from a record's subject and faculty.

use std::fmt;

use serde::Serialize;

/// Subject texts that mean the room holds no class.
pub const DEFAULT_FREE_MARKERS: &[&str] = &["free", "break", "mentor hour", "mentoring"];

/// How the ingestion layer spells a missing cell.
pub const NULL_MARKERS: &[&str] = &["nan", "none", "null"];

/// The occupancy of one classroom at one queried instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OccupancyVerdict {
    Free,
    Occupied {
        subject: String,
        faculty: Option<String>,
    },
}

impl OccupancyVerdict {
    pub fn is_free(&self) -> bool {
        matches!(self, OccupancyVerdict::Free)
    }

    /// `"SUBJECT, FACULTY"`, `"SUBJECT"`, or `None` for a free room.
    pub fn label(&self) -> Option<String> {
        match self {
            OccupancyVerdict::Free => None,
            OccupancyVerdict::Occupied {
                subject,
                faculty: Some(faculty),
            } => Some(format!("{}, {}", subject, faculty)),
            OccupancyVerdict::Occupied {
                subject,
                faculty: None,
            } => Some(subject.clone()),
        }
    }
}

impl fmt::Display for OccupancyVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            None => write!(f, "FREE"),
            Some(label) => write!(f, "OCCUPIED ({})", label),
        }
    }
}

/// Classifies subjects against a configurable list of not-a-class markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    free_markers: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_FREE_MARKERS.iter().copied())
    }
}

impl Classifier {
    /// Markers are compared trimmed and case-insensitively. The null markers are
    /// always included.
    pub fn new<I, S>(free_markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut markers: Vec<String> = free_markers
            .into_iter()
            .map(|m| m.as_ref().trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        markers.extend(NULL_MARKERS.iter().map(|m| m.to_string()));
        Self {
            free_markers: markers,
        }
    }

    pub fn classify(&self, subject: &str, faculty: &str) -> OccupancyVerdict {
        let subject = subject.trim();
        if self.is_free_subject(subject) {
            return OccupancyVerdict::Free;
        }

        let faculty = faculty.trim();
        let faculty = (!faculty.is_empty() && !is_null_marker(faculty)).then(|| faculty.to_string());
        OccupancyVerdict::Occupied {
            subject: subject.to_string(),
            faculty,
        }
    }

    fn is_free_subject(&self, subject: &str) -> bool {
        subject.is_empty() || {
            let lowered = subject.to_lowercase();
            self.free_markers.iter().any(|marker| *marker == lowered)
        }
    }
}

fn is_null_marker(value: &str) -> bool {
    NULL_MARKERS
        .iter()
        .any(|marker| value.eq_ignore_ascii_case(marker))
}

/// Classify with the default markers.
///
/// ```
/// use roomcheck_engine::occupancy::{classify, OccupancyVerdict};
///
/// assert_eq!(classify("Break", ""), OccupancyVerdict::Free);
/// assert_eq!(classify("DBMS", "Dr. Rao").label().as_deref(), Some("DBMS, Dr. Rao"));
/// ```
pub fn classify(subject: &str, faculty: &str) -> OccupancyVerdict {
    Classifier::default().classify(subject, faculty)
}
