//! Derived month view: calendar grid, totals and statistics.
//!
//! Nothing here is persisted; these are built per request by the aggregator.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::{DayStatus, GroupCode, Hours, YearMonth};

/// One work package line on a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub work_package_id: i64,
    pub code: String,
    pub title: String,
    pub hours: Hours,
    pub parent_code: GroupCode,
}

/// Effective state of one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub status: DayStatus,
    pub planned_hours: Hours,
    pub actual_hours: Hours,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    pub entries: Vec<DayEntry>,
    pub totals_by_parent: BTreeMap<GroupCode, Hours>,
}

/// A grid cell. Placeholders pad the grid to whole Monday-start weeks and
/// serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CalendarCell {
    Placeholder,
    Day(Box<CalendarDay>),
}

impl CalendarCell {
    pub fn day(&self) -> Option<&CalendarDay> {
        match self {
            CalendarCell::Placeholder => None,
            CalendarCell::Day(day) => Some(day),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, CalendarCell::Placeholder)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeTotal {
    pub code: String,
    pub total: Hours,
}

/// Month totals of allocated hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthTotals {
    pub by_work_package: BTreeMap<String, Hours>,
    pub by_parent_group: BTreeMap<GroupCode, Hours>,
    /// Work package totals per parent group, each list sorted by code.
    pub grouped: BTreeMap<GroupCode, Vec<CodeTotal>>,
    pub grand_total: Hours,
}

/// Month statistics over real days only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStats {
    pub workable_days: u32,
    pub planned_hours_total: Hours,
    pub actual_hours_total: Hours,
    pub status_counts: BTreeMap<DayStatus, u32>,
}

/// Everything the month view renders for one person.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRoster {
    pub person_id: i64,
    pub month: YearMonth,
    pub prev_month: Option<YearMonth>,
    pub next_month: Option<YearMonth>,
    pub active_template_id: Option<i64>,
    pub cells: Vec<CalendarCell>,
    pub totals: MonthTotals,
    pub stats: MonthStats,
}

impl MonthRoster {
    /// Real days in order, placeholders skipped.
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.cells.iter().filter_map(CalendarCell::day)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days().find(|day| day.date == date)
    }
}
