//! Helpers for the write path: overlap checks and sparse day updates.
//!
//! The read-only service never calls these. They are public API for the
//! external editor that persists roster changes, so it keeps the invariants
//! the resolver relies on. Nothing here touches storage.

use chrono::NaiveDate;

use crate::models::{DayOverride, DayStatus, Hours, RosterTemplate};

/// Templates whose window intersects `[start, end]`, ignoring `exclude_id`
/// (the template being edited).
pub fn overlapping(
    templates: &[RosterTemplate],
    start: NaiveDate,
    end: NaiveDate,
    exclude_id: Option<i64>,
) -> Vec<&RosterTemplate> {
    templates
        .iter()
        .filter(|t| Some(t.id) != exclude_id)
        .filter(|t| t.overlaps(start, end))
        .collect()
}

/// Change to an optional field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Patch::Keep => current,
            Patch::Clear => None,
            Patch::Set(value) => Some(value),
        }
    }
}

/// Sparse update of a day override. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayUpdate {
    pub status: Option<DayStatus>,
    pub planned_hours: Patch<Hours>,
    pub actual_hours: Patch<Hours>,
    pub note: Option<String>,
}

impl DayUpdate {
    /// Apply to the stored record for `date`, or to a fresh one.
    pub fn apply(self, date: NaiveDate, existing: Option<DayOverride>) -> DayOverride {
        let mut record = existing.unwrap_or_else(|| DayOverride::new(date));
        if let Some(status) = self.status {
            record.status = status;
        }
        record.planned_hours = self.planned_hours.apply(record.planned_hours);
        record.actual_hours = self.actual_hours.apply(record.actual_hours);
        if let Some(note) = self.note {
            record.note = note;
        }
        record
    }

    pub fn is_empty(&self) -> bool {
        self == &DayUpdate::default()
    }
}

/// What to do with the allocation row for one (person, date, package).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationChange {
    Remove,
    Upsert(Hours),
}

impl AllocationChange {
    /// Absent or zero hours remove the row.
    pub fn from_hours(hours: Option<Hours>) -> Self {
        match hours {
            Some(h) if !h.is_zero() => AllocationChange::Upsert(h),
            _ => AllocationChange::Remove,
        }
    }

    /// Lenient form input: blank or unparsable text counts as absent.
    pub fn from_input(input: &str) -> Self {
        Self::from_hours(input.parse().ok())
    }
}
