//! TOML configuration for the engine and its front ends.
//!
//! Every field is optional; an empty file yields the defaults.
//!
//! ```toml
//! boundary = "half_open"
//! morning_pm_departments = ["CIVIL"]
//! free_markers = ["free", "break", "mentor hour", "library"]
//! data_files = ["civil.csv", "datascience.csv"]
//!
//! [college_hours]
//! open = "8:00"
//! close = "16:35"
//!
//! [query_policy]
//! afternoon_until = 11
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoomcheckError};
use crate::policy::{BoundaryMode, QueryMeridiemPolicy, SlotMeridiemPolicy};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub boundary: BoundaryMode,
    pub slot_policy: SlotMeridiemPolicy,
    pub query_policy: QueryMeridiemPolicy,
    /// Replaces the default not-a-class subject markers when set.
    pub free_markers: Option<Vec<String>>,
    /// Departments whose tables write "pm" on morning periods.
    pub morning_pm_departments: Vec<String>,
    pub college_hours: Option<CollegeHours>,
    /// Timetable CSV files, relative to the working directory.
    pub data_files: Vec<PathBuf>,
}

/// Opening and closing time, written like query times (`"8:00"`, `"16:35"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeHours {
    pub open: String,
    pub close: String,
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RoomcheckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
