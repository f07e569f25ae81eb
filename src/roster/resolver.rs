//! Template resolution: which template applies to a date and what it schedules.

use chrono::NaiveDate;

use crate::models::{CycleWeek, Hours, RosterTemplate};

/// How to break ties when several templates cover the same date.
///
/// Templates of one person should never overlap, but storage does not
/// guarantee it for data written before the check existed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TemplatePriority {
    /// Latest `start_date` wins.
    #[default]
    MostRecentStart,
    /// First template in the caller's order wins.
    AsGiven,
}

/// Scheduled hours for a date, with the template and cycle week they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    pub template_id: Option<i64>,
    pub week: Option<CycleWeek>,
    pub hours: Hours,
}

impl Baseline {
    pub const NONE: Baseline = Baseline {
        template_id: None,
        week: None,
        hours: Hours::ZERO,
    };
}

/// Week index of `date` in the two-week cycle anchored at `anchor`.
///
/// Uses floor division so dates before the anchor keep alternating:
/// the seven days before the anchor are week 1, the seven before those week 0.
pub fn week_index(anchor: NaiveDate, date: NaiveDate) -> i64 {
    let days = (date - anchor).num_days();
    days.div_euclid(7).rem_euclid(2)
}

pub fn cycle_week(template: &RosterTemplate, date: NaiveDate) -> CycleWeek {
    match week_index(template.cycle_anchor(), date) {
        0 => CycleWeek::A,
        _ => CycleWeek::B,
    }
}

/// A person's templates in priority order.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    templates: Vec<RosterTemplate>,
}

impl TemplateSet {
    pub fn new(mut templates: Vec<RosterTemplate>, priority: TemplatePriority) -> Self {
        if priority == TemplatePriority::MostRecentStart {
            // stable, so equal start dates keep caller order
            templates.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        }
        Self { templates }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// First template, in priority order, whose window contains `date`.
    pub fn template_for(&self, date: NaiveDate) -> Option<&RosterTemplate> {
        self.templates.iter().find(|t| t.covers(date))
    }

    /// First template, in priority order, whose window intersects `[from, to]`.
    pub fn first_overlapping(&self, from: NaiveDate, to: NaiveDate) -> Option<&RosterTemplate> {
        self.templates.iter().find(|t| t.overlaps(from, to))
    }

    /// Scheduled hours for `date`; zero when no template covers it.
    pub fn baseline(&self, date: NaiveDate) -> Baseline {
        match self.template_for(date) {
            Some(template) => {
                let week = cycle_week(template, date);
                Baseline {
                    template_id: Some(template.id),
                    week: Some(week),
                    hours: template.weekday_hours(date, week),
                }
            }
            None => Baseline::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeekHours;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekdays(hours: i64) -> WeekHours {
        let h = Hours::whole(hours);
        WeekHours([h, h, h, h, h, Hours::ZERO, Hours::ZERO])
    }

    fn template(id: i64, start: NaiveDate, end: NaiveDate) -> RosterTemplate {
        RosterTemplate {
            id,
            person_id: 1,
            start_date: start,
            end_date: end,
            cycle_start_date: None,
            week_a: weekdays(8),
            week_b: WeekHours::default(),
        }
    }

    #[test]
    fn test_january_2024_alternates_weeks() {
        let mut t = template(1, date(2024, 1, 1), date(2024, 12, 31));
        t.cycle_start_date = Some(date(2024, 1, 1));
        let set = TemplateSet::new(vec![t], TemplatePriority::default());

        assert_eq!(set.baseline(date(2024, 1, 1)).hours, Hours::whole(8));
        assert_eq!(set.baseline(date(2024, 1, 1)).week, Some(CycleWeek::A));
        assert_eq!(set.baseline(date(2024, 1, 8)).hours, Hours::ZERO);
        assert_eq!(set.baseline(date(2024, 1, 8)).week, Some(CycleWeek::B));
        assert_eq!(set.baseline(date(2024, 1, 15)).hours, Hours::whole(8));
        // Saturday of week A
        assert_eq!(set.baseline(date(2024, 1, 6)).hours, Hours::ZERO);
    }

    #[test]
    fn test_anchor_day_is_week_a() {
        for offset in 0..30 {
            let anchor = date(2023, 5, 3) + Duration::days(offset);
            assert_eq!(week_index(anchor, anchor), 0);
        }
    }

    #[test]
    fn test_fourteen_day_periodicity() {
        let anchor = date(2024, 3, 6);
        let mut d = date(2023, 11, 1);
        while d < date(2024, 8, 1) {
            assert_eq!(week_index(anchor, d), week_index(anchor, d + Duration::days(14)));
            d += Duration::days(1);
        }
    }

    #[test]
    fn test_dates_before_anchor_alternate_backwards() {
        let anchor = date(2024, 1, 15);
        assert_eq!(week_index(anchor, date(2024, 1, 14)), 1);
        assert_eq!(week_index(anchor, date(2024, 1, 8)), 1);
        assert_eq!(week_index(anchor, date(2024, 1, 7)), 0);
        assert_eq!(week_index(anchor, date(2024, 1, 1)), 0);
        assert_eq!(week_index(anchor, date(2023, 12, 31)), 1);
    }

    #[test]
    fn test_cycle_start_after_start_shifts_weeks() {
        let mut t = template(1, date(2024, 1, 1), date(2024, 6, 30));
        t.cycle_start_date = Some(date(2024, 1, 8));
        assert_eq!(cycle_week(&t, date(2024, 1, 1)), CycleWeek::B);
        assert_eq!(cycle_week(&t, date(2024, 1, 8)), CycleWeek::A);
    }

    #[test]
    fn test_window_is_inclusive() {
        let set = TemplateSet::new(
            vec![template(1, date(2024, 1, 2), date(2024, 1, 4))],
            TemplatePriority::default(),
        );
        assert!(set.template_for(date(2024, 1, 1)).is_none());
        assert!(set.template_for(date(2024, 1, 2)).is_some());
        assert!(set.template_for(date(2024, 1, 4)).is_some());
        assert!(set.template_for(date(2024, 1, 5)).is_none());
        assert_eq!(set.baseline(date(2024, 1, 5)), Baseline::NONE);
    }

    #[test]
    fn test_overlap_resolves_by_priority() {
        let older = template(1, date(2024, 1, 1), date(2024, 12, 31));
        let mut newer = template(2, date(2024, 3, 1), date(2024, 12, 31));
        newer.week_a = weekdays(4);
        newer.week_b = weekdays(4);

        let recent = TemplateSet::new(
            vec![older.clone(), newer.clone()],
            TemplatePriority::MostRecentStart,
        );
        assert_eq!(recent.template_for(date(2024, 3, 4)).map(|t| t.id), Some(2));
        assert_eq!(recent.template_for(date(2024, 2, 5)).map(|t| t.id), Some(1));

        let given = TemplateSet::new(vec![older, newer], TemplatePriority::AsGiven);
        assert_eq!(given.template_for(date(2024, 3, 4)).map(|t| t.id), Some(1));
    }
}
