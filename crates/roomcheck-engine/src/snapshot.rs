//! Immutable record snapshots with atomic reload.
//!
//! Queries read a [`TimetableSnapshot`] and never mutate it. A
//! [`SnapshotStore`] hands out the current snapshot as an `Arc`; reloading
//! builds the replacement completely before swapping it in, so a query that
//! is already running keeps the dataset it started with.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::error::Result;
use crate::record::{ClassroomKey, TimetableRecord};

/// A read-only set of timetable records.
#[derive(Debug, Clone, Default)]
pub struct TimetableSnapshot {
    records: Arc<[TimetableRecord]>,
}

impl TimetableSnapshot {
    pub fn new(records: Vec<TimetableRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[TimetableRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct rooms in first-observed order.
    pub fn rooms(&self) -> Vec<ClassroomKey> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(TimetableRecord::key)
            .filter(|key| seen.insert(key.clone()))
            .collect()
    }

    /// Distinct day labels in first-observed order, compared case-insensitively.
    pub fn days(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.day.trim())
            .filter(|day| !day.is_empty() && seen.insert(day.to_lowercase()))
            .map(str::to_string)
            .collect()
    }
}

impl From<Vec<TimetableRecord>> for TimetableSnapshot {
    fn from(records: Vec<TimetableRecord>) -> Self {
        Self::new(records)
    }
}

/// Holds the current snapshot and swaps it atomically on reload.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Arc<TimetableSnapshot>>,
}

impl SnapshotStore {
    pub fn new(snapshot: TimetableSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The snapshot in effect now. Later swaps do not affect the returned value.
    pub fn current(&self) -> Arc<TimetableSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Install `snapshot` and return the one it replaced.
    pub fn swap(&self, snapshot: TimetableSnapshot) -> Arc<TimetableSnapshot> {
        let next = Arc::new(snapshot);
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Build a new snapshot with `load` and swap it in.
    ///
    /// # Errors
    ///
    /// If `load` fails the current snapshot stays in place and the error is returned.
    pub fn reload<F>(&self, load: F) -> Result<Arc<TimetableSnapshot>>
    where
        F: FnOnce() -> Result<Vec<TimetableRecord>>,
    {
        let next = Arc::new(TimetableSnapshot::new(load()?));
        info!(
            records = next.len(),
            rooms = next.rooms().len(),
            "timetable snapshot reloaded"
        );
        *self.current.write() = Arc::clone(&next);
        Ok(next)
    }
}
