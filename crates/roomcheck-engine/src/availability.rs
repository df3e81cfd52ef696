//! Per-classroom availability at one day and time.
//!
//! Takes an immutable set of timetable records, normalizes the query time,
//! resolves every same-day record's slot into a canonical interval, and labels
//! each classroom FREE or OCCUPIED. Every room known to the record set is
//! reported exactly once, in the order it was first observed, even if it has
//! nothing scheduled that day.
//!
//! A malformed slot never aborts a query: the record is simply left out of
//! matching. Only an unusable query time or day fails the whole query.

use std::collections::HashMap;

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{QueryError, Result, RoomcheckError};
use crate::instant::CanonicalInterval;
use crate::occupancy::Classifier;
use crate::policy::{BoundaryMode, QueryMeridiemPolicy, SlotMeridiemPolicy};
use crate::query_time::parse_query_with;
use crate::record::{ClassroomKey, TimetableRecord};
use crate::report::{DayCoverage, Report, RoomStatus};
use crate::slot::{SlotResolution, SlotResolver};
use crate::snapshot::TimetableSnapshot;

/// Policies and markers for answering availability queries.
///
/// Built once and shared; querying takes `&self` and holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityEngine {
    boundary: BoundaryMode,
    slot_policy: SlotMeridiemPolicy,
    /// Keyed by lowercased department.
    department_policies: HashMap<String, SlotMeridiemPolicy>,
    query_policy: QueryMeridiemPolicy,
    classifier: Classifier,
    resolver: SlotResolver,
    college_hours: Option<CanonicalInterval>,
}

impl AvailabilityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from configuration.
    ///
    /// # Errors
    ///
    /// Returns `RoomcheckError::ConfigValue` if the college hours do not parse
    /// as query times or open after they close.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let mut engine = Self::new()
            .with_boundary(config.boundary)
            .with_slot_policy(config.slot_policy.clone())
            .with_query_policy(config.query_policy.clone());

        if let Some(markers) = &config.free_markers {
            engine = engine.with_classifier(Classifier::new(markers));
        }

        for department in &config.morning_pm_departments {
            let policy = SlotMeridiemPolicy {
                morning_pm_correction: true,
                ..config.slot_policy.clone()
            };
            engine = engine.with_department_policy(department, policy);
        }

        if let Some(hours) = &config.college_hours {
            let open = parse_query_with(&hours.open, &config.query_policy).ok_or_else(|| {
                RoomcheckError::ConfigValue {
                    field: "college_hours.open",
                    value: hours.open.clone(),
                }
            })?;
            let close = parse_query_with(&hours.close, &config.query_policy).ok_or_else(|| {
                RoomcheckError::ConfigValue {
                    field: "college_hours.close",
                    value: hours.close.clone(),
                }
            })?;
            let window =
                CanonicalInterval::new(open, close).ok_or_else(|| RoomcheckError::ConfigValue {
                    field: "college_hours",
                    value: format!("{}-{}", hours.open, hours.close),
                })?;
            engine = engine.with_college_hours(window);
        }

        Ok(engine)
    }

    pub fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    /// The slot policy for departments without their own.
    pub fn with_slot_policy(mut self, policy: SlotMeridiemPolicy) -> Self {
        self.slot_policy = policy;
        self
    }

    /// Read one department's slots under a different policy.
    pub fn with_department_policy(mut self, department: &str, policy: SlotMeridiemPolicy) -> Self {
        self.department_policies
            .insert(department.trim().to_lowercase(), policy);
        self
    }

    pub fn with_query_policy(mut self, policy: QueryMeridiemPolicy) -> Self {
        self.query_policy = policy;
        self
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_resolver(mut self, resolver: SlotResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Report [`DayCoverage::Closed`] for instants outside `window` (inclusive).
    pub fn with_college_hours(mut self, window: CanonicalInterval) -> Self {
        self.college_hours = Some(window);
        self
    }

    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    pub fn slot_policy_for(&self, department: &str) -> &SlotMeridiemPolicy {
        self.department_policies
            .get(&department.trim().to_lowercase())
            .unwrap_or(&self.slot_policy)
    }

    /// Resolve a record's slot under its department's policy.
    pub fn explain_slot(&self, record: &TimetableRecord) -> SlotResolution {
        self.resolver
            .explain(&record.raw_slot, self.slot_policy_for(&record.department))
    }

    pub fn resolve_slot(&self, record: &TimetableRecord) -> Option<CanonicalInterval> {
        self.explain_slot(record).interval()
    }

    /// Answer "which rooms are free or occupied on `day` at `time_input`".
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidTime` if `time_input` does not normalize to an
    /// instant, and `QueryError::EmptyDay` if `day` is blank. A day with no
    /// records is not an error; the report carries [`DayCoverage::NoData`].
    pub fn query(
        &self,
        day: &str,
        time_input: &str,
        records: &[TimetableRecord],
    ) -> std::result::Result<Report, QueryError> {
        let instant = parse_query_with(time_input, &self.query_policy)
            .ok_or_else(|| QueryError::InvalidTime(time_input.to_string()))?;
        let day = day.trim();
        if day.is_empty() {
            return Err(QueryError::EmptyDay);
        }

        let mut report = Report {
            day: day.to_string(),
            time_input: time_input.to_string(),
            instant,
            coverage: DayCoverage::Scheduled,
            rooms: Vec::new(),
        };

        if let Some(hours) = self.college_hours {
            if !hours.contains(instant, BoundaryMode::Inclusive) {
                debug!(%instant, %hours, "query outside college hours");
                report.coverage = DayCoverage::Closed;
                return Ok(report);
            }
        }

        let day_records: Vec<&TimetableRecord> = records.iter().filter(|r| r.is_on(day)).collect();
        if day_records.is_empty() {
            debug!(day, "no records for day");
            report.coverage = DayCoverage::NoData;
            return Ok(report);
        }

        // Every known room starts FREE, in first-observed order.
        let mut index: HashMap<ClassroomKey, usize> = HashMap::new();
        for record in records {
            let key = record.key();
            match index.get(&key) {
                Some(&i) => {
                    let room = &mut report.rooms[i];
                    if room.block.is_empty() && !record.block.is_empty() {
                        room.block = record.block.clone();
                    }
                }
                None => {
                    index.insert(key.clone(), report.rooms.len());
                    report
                        .rooms
                        .push(RoomStatus::unscheduled(key, record.block.clone()));
                }
            }
        }

        for record in day_records {
            let Some(interval) = self.resolve_slot(record) else {
                continue;
            };
            if !interval.contains(instant, self.boundary) {
                continue;
            }
            let Some(&i) = index.get(&record.key()) else {
                continue;
            };

            let verdict = self.classifier.classify(&record.subject, &record.faculty);
            debug!(room = %record.key(), %interval, %verdict, "record covers query instant");
            let room = &mut report.rooms[i];
            room.interval = Some(interval);
            room.raw_slot = Some(record.raw_slot.clone());
            room.verdict = verdict;
        }

        Ok(report)
    }

    /// [`Self::query`] over a loaded snapshot.
    pub fn query_snapshot(
        &self,
        day: &str,
        time_input: &str,
        snapshot: &TimetableSnapshot,
    ) -> std::result::Result<Report, QueryError> {
        self.query(day, time_input, snapshot.records())
    }
}

/// Query with default policies, inclusive boundaries and default free markers.
///
/// ```
/// use roomcheck_engine::availability::query;
/// use roomcheck_engine::record::TimetableRecord;
///
/// let records = vec![
///     TimetableRecord::new("CS", "101", "Monday", "8:50-9:40", "DBMS", "Rao"),
///     TimetableRecord::new("CS", "102", "Monday", "8:50-9:40", "", ""),
/// ];
/// let report = query("Monday", "9:00", &records).unwrap();
/// assert_eq!(report.room("CS", "101").unwrap().verdict.to_string(), "OCCUPIED (DBMS, Rao)");
/// assert!(report.room("CS", "102").unwrap().verdict.is_free());
/// ```
pub fn query(
    day: &str,
    time_input: &str,
    records: &[TimetableRecord],
) -> std::result::Result<Report, QueryError> {
    AvailabilityEngine::default().query(day, time_input, records)
}
