//! Per-day override records.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Hours;

/// Status of a roster day.
///
/// Values outside the known set are kept verbatim in `Unknown` so they can
/// still be displayed.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum DayStatus {
    #[default]
    Work,
    Sick,
    Vacation,
    Off,
    Swapped,
    Absent,
    Other,
    Unknown(String),
}

impl DayStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DayStatus::Work => "work",
            DayStatus::Sick => "sick",
            DayStatus::Vacation => "vacation",
            DayStatus::Off => "off",
            DayStatus::Swapped => "swapped",
            DayStatus::Absent => "absent",
            DayStatus::Other => "other",
            DayStatus::Unknown(raw) => raw,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "work" => DayStatus::Work,
            "sick" => DayStatus::Sick,
            "vacation" => DayStatus::Vacation,
            "off" => DayStatus::Off,
            "swapped" => DayStatus::Swapped,
            "absent" => DayStatus::Absent,
            "other" => DayStatus::Other,
            _ => DayStatus::Unknown(s.to_string()),
        }
    }

    /// Statuses for which an unset actual means nothing was worked.
    pub fn zeroes_actual(&self) -> bool {
        matches!(self, DayStatus::Sick | DayStatus::Vacation | DayStatus::Off)
    }

    pub fn is_work(&self) -> bool {
        matches!(self, DayStatus::Work)
    }

    /// False for statuses kept verbatim from storage; editors use this to
    /// refuse writing new unknown values.
    pub fn is_known(&self) -> bool {
        !matches!(self, DayStatus::Unknown(_))
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DayStatus {
    fn from(s: String) -> Self {
        match DayStatus::parse(&s) {
            DayStatus::Unknown(_) => DayStatus::Unknown(s),
            known => known,
        }
    }
}

impl From<DayStatus> for String {
    fn from(status: DayStatus) -> Self {
        match status {
            DayStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// An exception record for one person on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOverride {
    pub date: NaiveDate,
    pub status: DayStatus,
    #[serde(default)]
    pub planned_hours: Option<Hours>,
    #[serde(default)]
    pub actual_hours: Option<Hours>,
    #[serde(default)]
    pub note: String,
}

impl DayOverride {
    /// A fresh record: status work, no hours, empty note.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            status: DayStatus::Work,
            planned_hours: None,
            actual_hours: None,
            note: String::new(),
        }
    }
}
