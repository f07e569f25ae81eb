//! Roster templates: biweekly schedules valid over a date range.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::Hours;

/// Which half of the two-week cycle a date falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CycleWeek {
    A,
    B,
}

/// Scheduled hours for Monday through Sunday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekHours(pub [Hours; 7]);

impl WeekHours {
    pub fn for_weekday(&self, weekday: Weekday) -> Hours {
        self.0[weekday.num_days_from_monday() as usize]
    }
}

/// A recurring A/B schedule for one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterTemplate {
    pub id: i64,
    pub person_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Anchors week A. Falls back to `start_date` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_start_date: Option<NaiveDate>,
    pub week_a: WeekHours,
    pub week_b: WeekHours,
}

impl RosterTemplate {
    /// Whether the validity window contains `date`, both ends inclusive.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Whether the validity window intersects `[from, to]`.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_date <= to && self.end_date >= from
    }

    pub fn cycle_anchor(&self) -> NaiveDate {
        self.cycle_start_date.unwrap_or(self.start_date)
    }

    pub fn week(&self, cycle_week: CycleWeek) -> &WeekHours {
        match cycle_week {
            CycleWeek::A => &self.week_a,
            CycleWeek::B => &self.week_b,
        }
    }

    pub fn weekday_hours(&self, date: NaiveDate, cycle_week: CycleWeek) -> Hours {
        self.week(cycle_week).for_weekday(date.weekday())
    }
}
