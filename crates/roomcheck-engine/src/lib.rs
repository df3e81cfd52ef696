//! # roomcheck-engine
//!
//! Answers "at day D and time T, which classrooms are occupied, and by what?"
//! across timetables that each write time slots differently: 12-hour with
//! missing or wrong am/pm markers, dot- or colon-separated, `S`-prefixed,
//! mixed 24-hour.
//!
//! The engine normalizes every notation into minutes since midnight, matches a
//! query instant against slot intervals, and labels every known room FREE or
//! OCCUPIED.
//!
//! ## Modules
//!
//! - [`time_parser`]: one slot time token to a canonical instant
//! - [`slot`]: slot strings to canonical intervals via ordered format matchers
//! - [`query_time`]: user query times to canonical instants
//! - [`occupancy`]: FREE / OCCUPIED verdicts from subject and faculty
//! - [`availability`]: the per-classroom query over a record set
//! - [`policy`]: am/pm inference and boundary policies
//! - [`instant`]: canonical instant and interval types
//! - [`record`]: timetable records and room identity
//! - [`snapshot`]: immutable snapshots with atomic reload
//! - [`ingest`]: CSV loading and column harmonization
//! - [`config`]: TOML configuration
//! - [`report`]: query reports and text rendering
//! - [`error`]: error types

pub mod availability;
pub mod config;
pub mod error;
pub mod ingest;
pub mod instant;
pub mod occupancy;
pub mod policy;
pub mod query_time;
pub mod record;
pub mod report;
pub mod slot;
pub mod snapshot;
pub mod time_parser;

pub use availability::{query, AvailabilityEngine};
pub use config::EngineConfig;
pub use error::{QueryError, RoomcheckError};
pub use instant::{CanonicalInstant, CanonicalInterval};
pub use occupancy::{classify, Classifier, OccupancyVerdict};
pub use policy::{BoundaryMode, MeridiemPolicy, QueryMeridiemPolicy, SlotMeridiemPolicy};
pub use query_time::parse_query;
pub use record::{ClassroomKey, TimetableRecord};
pub use report::{DayCoverage, Report, RoomFilter, RoomStatus};
pub use slot::resolve_slot;
pub use snapshot::{SnapshotStore, TimetableSnapshot};
pub use time_parser::parse_time;
