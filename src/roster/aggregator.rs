//! Builds the month calendar grid with totals and statistics.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};

use super::compositor::compose_day;
use super::resolver::TemplateSet;
use crate::models::{
    CalendarCell, CalendarDay, CodeTotal, DayEntry, DayOverride, GroupCode, Hours, MonthRoster,
    MonthStats, MonthTotals, WorkAllocation, YearMonth,
};

/// Resolve every day of `month` for one person.
///
/// Records dated outside the month are ignored, and allocations with zero
/// hours count as deleted. If two overrides share a date the later one wins.
pub fn build_month(
    person_id: i64,
    month: YearMonth,
    templates: &TemplateSet,
    overrides: &[DayOverride],
    allocations: &[WorkAllocation],
) -> MonthRoster {
    let overrides_by_date: HashMap<NaiveDate, &DayOverride> = overrides
        .iter()
        .filter(|o| month.contains(o.date))
        .map(|o| (o.date, o))
        .collect();

    let mut allocations_by_date: BTreeMap<NaiveDate, Vec<&WorkAllocation>> = BTreeMap::new();
    for allocation in allocations
        .iter()
        .filter(|a| month.contains(a.date) && !a.hours.is_zero())
    {
        allocations_by_date
            .entry(allocation.date)
            .or_default()
            .push(allocation);
    }
    for entries in allocations_by_date.values_mut() {
        entries.sort_by(|a, b| a.work_package.display_key().cmp(&b.work_package.display_key()));
    }

    let leading = month.first_weekday() as usize;
    let mut cells = Vec::with_capacity(42);
    cells.extend(std::iter::repeat_with(|| CalendarCell::Placeholder).take(leading));

    let mut totals = TotalsBuilder::default();
    for date in month.days() {
        let entries = allocations_by_date
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or_default();
        totals.add_all(entries);

        let day = build_day(
            date,
            templates,
            overrides_by_date.get(&date).copied(),
            entries,
        );
        cells.push(CalendarCell::Day(Box::new(day)));
    }

    while cells.len() % 7 != 0 {
        cells.push(CalendarCell::Placeholder);
    }

    let stats = month_stats(&cells);
    let totals = totals.finish();

    tracing::debug!(
        person_id,
        month = %month,
        templates = templates.len(),
        overrides = overrides_by_date.len(),
        grand_total = %totals.grand_total,
        "built month roster"
    );

    MonthRoster {
        person_id,
        month,
        prev_month: month.prev(),
        next_month: month.next(),
        active_template_id: templates
            .first_overlapping(month.first_day(), month.last_day())
            .map(|t| t.id),
        cells,
        totals,
        stats,
    }
}

fn build_day(
    date: NaiveDate,
    templates: &TemplateSet,
    day_override: Option<&DayOverride>,
    allocations: &[&WorkAllocation],
) -> CalendarDay {
    let baseline = templates.baseline(date);
    let state = compose_day(baseline.hours, day_override);

    let entries: Vec<DayEntry> = allocations
        .iter()
        .map(|a| DayEntry {
            work_package_id: a.work_package.id,
            code: a.work_package.code.clone(),
            title: a.work_package.title.clone(),
            hours: a.hours,
            parent_code: a.work_package.group_code(),
        })
        .collect();

    let mut totals_by_parent: BTreeMap<GroupCode, Hours> = BTreeMap::new();
    for entry in &entries {
        *totals_by_parent.entry(entry.parent_code.clone()).or_default() += entry.hours;
    }

    CalendarDay {
        date,
        day: date.day(),
        status: state.status,
        planned_hours: state.planned_hours,
        actual_hours: state.actual_hours,
        note: state.note,
        template_id: baseline.template_id,
        entries,
        totals_by_parent,
    }
}

/// Statistics over the real days of a grid.
pub fn month_stats(cells: &[CalendarCell]) -> MonthStats {
    let mut stats = MonthStats::default();
    for day in cells.iter().filter_map(CalendarCell::day) {
        *stats.status_counts.entry(day.status.clone()).or_default() += 1;
        stats.planned_hours_total += day.planned_hours;
        stats.actual_hours_total += day.actual_hours;
        if day.status.is_work() && day.planned_hours.is_positive() {
            stats.workable_days += 1;
        }
    }
    stats
}

#[derive(Default)]
struct TotalsBuilder {
    by_work_package: BTreeMap<String, Hours>,
    by_parent_group: BTreeMap<GroupCode, Hours>,
}

impl TotalsBuilder {
    fn add_all(&mut self, allocations: &[&WorkAllocation]) {
        for allocation in allocations {
            let package = &allocation.work_package;
            *self.by_work_package.entry(package.code.clone()).or_default() += allocation.hours;
            *self.by_parent_group.entry(package.group_code()).or_default() += allocation.hours;
        }
    }

    fn finish(self) -> MonthTotals {
        let grand_total = self.by_parent_group.values().sum();

        // by_work_package iterates in code order, so each list comes out sorted
        let mut grouped: BTreeMap<GroupCode, Vec<CodeTotal>> = BTreeMap::new();
        for (code, total) in &self.by_work_package {
            grouped.entry(GroupCode::of(code)).or_default().push(CodeTotal {
                code: code.clone(),
                total: *total,
            });
        }

        MonthTotals {
            by_work_package: self.by_work_package,
            by_parent_group: self.by_parent_group,
            grouped,
            grand_total,
        }
    }
}
