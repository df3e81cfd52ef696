//! CSV timetables to [`TimetableRecord`]s.
//!
//! Each department authors its own table, so column names vary ("Room" vs
//! "Classroom", "Time" vs "Slot"). Headers are matched case-insensitively
//! against a list of aliases per field; missing optional columns become empty
//! strings, and a missing department column falls back to the source name.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, warn};

use crate::error::{Result, RoomcheckError};
use crate::record::TimetableRecord;

const DEPARTMENT_ALIASES: &[&str] = &["department", "dept", "branch"];
const BLOCK_ALIASES: &[&str] = &["block", "building"];
const CLASSROOM_ALIASES: &[&str] = &["classroom", "room", "class room", "room no"];
const DAY_ALIASES: &[&str] = &["day", "weekday"];
const SLOT_ALIASES: &[&str] = &["slot", "time", "timing", "period", "time slot"];
const SUBJECT_ALIASES: &[&str] = &["subject", "course"];
const FACULTY_ALIASES: &[&str] = &["faculty", "teacher", "instructor"];

/// Column positions for one source's header row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnMap {
    department: Option<usize>,
    block: Option<usize>,
    classroom: usize,
    day: usize,
    slot: usize,
    subject: Option<usize>,
    faculty: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord, source_name: &str) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(normalize_header).collect();
        let find = |aliases: &[&str]| names.iter().position(|name| aliases.contains(&name.as_str()));
        let require = |aliases: &[&str], column: &'static str| {
            find(aliases).ok_or_else(|| RoomcheckError::MissingColumn {
                source_name: source_name.to_string(),
                column,
            })
        };

        Ok(Self {
            department: find(DEPARTMENT_ALIASES),
            block: find(BLOCK_ALIASES),
            classroom: require(CLASSROOM_ALIASES, "Classroom")?,
            day: require(DAY_ALIASES, "Day")?,
            slot: require(SLOT_ALIASES, "Slot")?,
            subject: find(SUBJECT_ALIASES),
            faculty: find(FACULTY_ALIASES),
        })
    }
}

/// Lowercase, turn `_` and `.` into spaces, collapse runs of whitespace.
fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .replace(['_', '.'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn cell(row: &StringRecord, column: Option<usize>) -> String {
    column
        .and_then(|i| row.get(i))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Read one CSV timetable.
///
/// `source_name` names the source in errors and stands in for the department
/// when the table has no department column.
///
/// # Errors
///
/// `EmptySource` when there is no header row, `MissingColumn` when the
/// classroom, day or slot column cannot be found, `Csv` on malformed input.
pub fn read_csv<R: std::io::Read>(reader: R, source_name: &str) -> Result<Vec<TimetableRecord>> {
    let csv_error = |source| RoomcheckError::Csv {
        source_name: source_name.to_string(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(RoomcheckError::EmptySource(source_name.to_string()));
    }
    let columns = ColumnMap::from_headers(&headers, source_name)?;

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.map_err(csv_error)?;
        let classroom = cell(&row, Some(columns.classroom));
        if classroom.is_empty() {
            // +2: one for the header, one for 1-based numbering.
            warn!(source = source_name, line = line + 2, "skipping row without classroom");
            continue;
        }

        let department = match columns.department {
            Some(_) => cell(&row, columns.department),
            None => source_name.to_string(),
        };
        records.push(TimetableRecord {
            department,
            block: cell(&row, columns.block),
            classroom,
            day: cell(&row, Some(columns.day)),
            raw_slot: cell(&row, Some(columns.slot)),
            subject: cell(&row, columns.subject),
            faculty: cell(&row, columns.faculty),
        });
    }

    Ok(records)
}

/// Read one CSV timetable from disk. The file stem is the source name.
pub fn load_csv(path: &Path) -> Result<Vec<TimetableRecord>> {
    let file = File::open(path).map_err(|source| RoomcheckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let source_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let records = read_csv(file, &source_name)?;
    info!(path = %path.display(), records = records.len(), "timetable loaded");
    Ok(records)
}

/// Load several timetables into one record list, preserving file order.
pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<TimetableRecord>> {
    let mut records = Vec::new();
    for path in paths {
        records.extend(load_csv(path.as_ref())?);
    }
    Ok(records)
}
