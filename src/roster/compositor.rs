//! Merges a template baseline with a day override.

use crate::models::{DayOverride, DayStatus, Hours};

/// Effective state of a date after applying its override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayState {
    pub status: DayStatus,
    pub planned_hours: Hours,
    pub actual_hours: Hours,
    pub note: String,
}

/// Resolve status, then planned, then actual. The actual default depends on
/// the resolved status.
pub fn compose_day(baseline: Hours, day_override: Option<&DayOverride>) -> DayState {
    let status = resolve_status(day_override);
    let planned_hours = resolve_planned(baseline, day_override);
    let actual_hours = resolve_actual(&status, planned_hours, day_override);
    let note = day_override.map(|o| o.note.clone()).unwrap_or_default();

    DayState {
        status,
        planned_hours,
        actual_hours,
        note,
    }
}

fn resolve_status(day_override: Option<&DayOverride>) -> DayStatus {
    day_override
        .map(|o| o.status.clone())
        .unwrap_or(DayStatus::Work)
}

fn resolve_planned(baseline: Hours, day_override: Option<&DayOverride>) -> Hours {
    day_override
        .and_then(|o| o.planned_hours)
        .unwrap_or(baseline)
}

fn resolve_actual(status: &DayStatus, planned: Hours, day_override: Option<&DayOverride>) -> Hours {
    match day_override.and_then(|o| o.actual_hours) {
        Some(actual) => actual,
        None if status.zeroes_actual() => Hours::ZERO,
        None => planned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn override_with(status: DayStatus) -> DayOverride {
        DayOverride {
            status,
            ..DayOverride::new(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap())
        }
    }

    #[test]
    fn test_no_override_is_work_at_baseline() {
        let state = compose_day(Hours::whole(8), None);
        assert_eq!(state.status, DayStatus::Work);
        assert_eq!(state.planned_hours, Hours::whole(8));
        assert_eq!(state.actual_hours, Hours::whole(8));
        assert_eq!(state.note, "");
    }

    #[test]
    fn test_no_template_no_override() {
        let state = compose_day(Hours::ZERO, None);
        assert_eq!(state.status, DayStatus::Work);
        assert_eq!(state.planned_hours, Hours::ZERO);
        assert_eq!(state.actual_hours, Hours::ZERO);
    }

    #[test]
    fn test_vacation_keeps_planned_and_zeroes_actual() {
        let o = override_with(DayStatus::Vacation);
        let state = compose_day(Hours::whole(8), Some(&o));
        assert_eq!(state.status, DayStatus::Vacation);
        assert_eq!(state.planned_hours, Hours::whole(8));
        assert_eq!(state.actual_hours, Hours::ZERO);
    }

    #[test]
    fn test_absence_statuses_default_actual_to_zero() {
        for status in [DayStatus::Sick, DayStatus::Vacation, DayStatus::Off] {
            let o = override_with(status);
            assert_eq!(compose_day(Hours::whole(6), Some(&o)).actual_hours, Hours::ZERO);
        }
    }

    #[test]
    fn test_work_like_statuses_default_actual_to_planned() {
        for status in [
            DayStatus::Work,
            DayStatus::Swapped,
            DayStatus::Absent,
            DayStatus::Other,
            DayStatus::Unknown("training".to_string()),
        ] {
            let mut o = override_with(status);
            o.planned_hours = Some(Hours::from_hundredths(550));
            let state = compose_day(Hours::whole(8), Some(&o));
            assert_eq!(state.planned_hours, Hours::from_hundredths(550));
            assert_eq!(state.actual_hours, state.planned_hours);
        }
    }

    #[test]
    fn test_explicit_values_win() {
        let mut o = override_with(DayStatus::Sick);
        o.planned_hours = Some(Hours::ZERO);
        o.actual_hours = Some(Hours::whole(2));
        o.note = "went home at 11".to_string();
        let state = compose_day(Hours::whole(8), Some(&o));
        assert_eq!(state.planned_hours, Hours::ZERO);
        assert_eq!(state.actual_hours, Hours::whole(2));
        assert_eq!(state.note, "went home at 11");
    }
}
