//! Read-only queries feeding the roster engine.

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    DayOverride, DayStatus, Hours, MonthRoster, RosterTemplate, WeekHours, WorkAllocation,
    WorkPackage, YearMonth,
};
use crate::roster::{build_month, TemplatePriority, TemplateSet};

const WEEKDAY_PREFIXES: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// Database repository for roster data.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Templates of a person whose window intersects `[from, to]`, latest start first.
    pub async fn list_templates_overlapping(
        &self,
        person_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RosterTemplate>, AppError> {
        let rows = sqlx::query(
            "SELECT * FROM roster_templates WHERE person_id = ? AND start_date <= ? AND end_date >= ? ORDER BY start_date DESC, id DESC",
        )
        .bind(person_id)
        .bind(to)
        .bind(from)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(template_from_row)
            .collect::<Result<_, _>>()
            .map_err(AppError::from)
    }

    /// Day overrides of a person within `[from, to]`.
    pub async fn list_overrides(
        &self,
        person_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DayOverride>, AppError> {
        let rows = sqlx::query(
            "SELECT date, status, planned_hours, actual_hours, note FROM roster_days WHERE person_id = ? AND date >= ? AND date <= ? ORDER BY date",
        )
        .bind(person_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(override_from_row)
            .collect::<Result<_, _>>()
            .map_err(AppError::from)
    }

    /// Work allocations of a person within `[from, to]`, with their packages.
    pub async fn list_allocations(
        &self,
        person_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<WorkAllocation>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT w.date, w.hours, p.id, p.code, p.title, p.parent_id, p.sort_order
            FROM roster_day_work w
            JOIN work_packages p ON p.id = w.work_package_id
            WHERE w.person_id = ? AND w.date >= ? AND w.date <= ?
            ORDER BY w.date, p.sort_order, p.code
            "#,
        )
        .bind(person_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        let mut allocations = Vec::with_capacity(rows.len());
        for row in &rows {
            allocations.push(WorkAllocation {
                date: row.try_get("date")?,
                work_package: package_from_row(row)?,
                hours: hours_column(row, "hours").unwrap_or(Hours::ZERO),
            });
        }
        Ok(allocations)
    }

    /// All work packages in display order.
    pub async fn list_work_packages(&self) -> Result<Vec<WorkPackage>, AppError> {
        let rows = sqlx::query(
            "SELECT id, code, title, parent_id, sort_order FROM work_packages ORDER BY sort_order, code",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(package_from_row)
            .collect::<Result<_, _>>()
            .map_err(AppError::from)
    }

    /// Fetch one person's month and resolve it.
    pub async fn load_month(
        &self,
        person_id: i64,
        month: YearMonth,
    ) -> Result<MonthRoster, AppError> {
        let (from, to) = (month.first_day(), month.last_day());

        let templates = self.list_templates_overlapping(person_id, from, to).await?;
        let overrides = self.list_overrides(person_id, from, to).await?;
        let allocations = self.list_allocations(person_id, from, to).await?;

        let templates = TemplateSet::new(templates, TemplatePriority::MostRecentStart);
        Ok(build_month(
            person_id,
            month,
            &templates,
            &overrides,
            &allocations,
        ))
    }
}

// ==================== ROW MAPPING ====================

fn template_from_row(row: &SqliteRow) -> Result<RosterTemplate, sqlx::Error> {
    Ok(RosterTemplate {
        id: row.try_get("id")?,
        person_id: row.try_get("person_id")?,
        start_date: row.try_get("start_date")?,
        end_date: row.try_get("end_date")?,
        cycle_start_date: row.try_get("cycle_start_date")?,
        week_a: week_from_row(row, "a"),
        week_b: week_from_row(row, "b"),
    })
}

fn week_from_row(row: &SqliteRow, week: &str) -> WeekHours {
    let mut hours = [Hours::ZERO; 7];
    for (slot, prefix) in hours.iter_mut().zip(WEEKDAY_PREFIXES) {
        let column = format!("{}_{}_hours", prefix, week);
        *slot = hours_column(row, &column).unwrap_or(Hours::ZERO);
    }
    WeekHours(hours)
}

fn override_from_row(row: &SqliteRow) -> Result<DayOverride, sqlx::Error> {
    let status: Option<String> = row.try_get("status")?;
    let note: Option<String> = row.try_get("note")?;

    Ok(DayOverride {
        date: row.try_get("date")?,
        status: status.map(DayStatus::from).unwrap_or_default(),
        planned_hours: hours_column(row, "planned_hours"),
        actual_hours: hours_column(row, "actual_hours"),
        note: note.unwrap_or_default(),
    })
}

fn package_from_row(row: &SqliteRow) -> Result<WorkPackage, sqlx::Error> {
    Ok(WorkPackage {
        id: row.try_get("id")?,
        code: row.try_get("code")?,
        title: row.try_get("title")?,
        parent_id: row.try_get("parent_id")?,
        sort_order: row.try_get("sort_order")?,
    })
}

/// Read an hours column. NULL and values that are not numbers read as `None`;
/// text such as `"7,5"` is parsed leniently.
fn hours_column(row: &SqliteRow, column: &str) -> Option<Hours> {
    if let Ok(Some(value)) = row.try_get::<Option<f64>, _>(column) {
        return Hours::from_f64(value);
    }
    row.try_get::<Option<String>, _>(column)
        .ok()
        .flatten()
        .and_then(|text| text.parse().ok())
}
