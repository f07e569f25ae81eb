//! Work packages and the hours allocated to them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Hours;

/// Group used when a code yields no usable parent prefix.
pub const FALLBACK_GROUP: &str = "-";

/// Parent-group code of a work package, e.g. `"1"` for `"1.2"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupCode(String);

impl GroupCode {
    /// Text before the first `.`, taken verbatim; a code without `.` is its
    /// own group. An empty prefix maps to `"-"`.
    pub fn of(code: &str) -> Self {
        let prefix = code.split('.').next().unwrap_or_default();
        if prefix.is_empty() {
            GroupCode(FALLBACK_GROUP.to_string())
        } else {
            GroupCode(prefix.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupCode {
    fn from(code: &str) -> Self {
        GroupCode(code.to_string())
    }
}

/// A node in the two-level work package tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPackage {
    pub id: i64,
    pub code: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    pub sort_order: i64,
}

impl WorkPackage {
    pub fn group_code(&self) -> GroupCode {
        GroupCode::of(&self.code)
    }

    /// Display order: `sort_order`, then `code`.
    pub fn display_key(&self) -> (i64, &str) {
        (self.sort_order, self.code.as_str())
    }
}

/// Hours a person booked on one work package on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkAllocation {
    pub date: NaiveDate,
    pub work_package: WorkPackage,
    pub hours: Hours,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_code_takes_prefix_before_first_dot() {
        assert_eq!(GroupCode::of("1.1").as_str(), "1");
        assert_eq!(GroupCode::of("12.4").as_str(), "12");
        assert_eq!(GroupCode::of("1.1.1").as_str(), "1");
    }

    #[test]
    fn test_group_code_without_separator_is_own_group() {
        assert_eq!(GroupCode::of("3").as_str(), "3");
    }

    #[test]
    fn test_group_code_falls_back_for_malformed_codes() {
        assert_eq!(GroupCode::of("").as_str(), FALLBACK_GROUP);
        assert_eq!(GroupCode::of(".5").as_str(), FALLBACK_GROUP);
    }

    #[test]
    fn test_group_code_keeps_prefix_whitespace() {
        assert_eq!(GroupCode::of(" 1.1").as_str(), " 1");
        assert_ne!(GroupCode::of(" 1.1"), GroupCode::of("1.2"));
    }
}
