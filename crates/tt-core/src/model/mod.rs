//! Domain types shared by the catalog and the boards

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

mod day;
mod period;

pub use day::Day;
pub use period::{PeriodRange, MAX_PERIOD, MIN_PERIOD};

/// Markup fragment the catalog uses to join multiple values in one field
pub const MARKUP_SEPARATOR: &str = "<p>";

/// A catalog lecture record. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    pub id: String,
    pub grade: u32,
    pub title: String,
    /// Numeric-prefixed credit text, e.g. `"3"` or `"3(2)"`
    pub credits: String,
    /// Major name(s); cross-listed lectures join them with `<p>`
    pub major: String,
    /// Compact schedule encoding, e.g. `월1~2(401)<p>화3(402)`
    #[serde(rename = "schedule", alias = "scheduleEncoded", default)]
    pub schedule: String,
}

impl Lecture {
    /// Major text with embedded markup replaced by spaces
    pub fn major_label(&self) -> String {
        self.major.replace(MARKUP_SEPARATOR, " ")
    }

    /// Leading integer of the credit text, if any
    pub fn credit_value(&self) -> Option<u32> {
        let digits: String = self.credits.chars().take_while(|c| c.is_ascii_digit()).collect();
        digits.parse().ok()
    }
}

/// A lecture placed on one day of a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// Shared with the catalog and with every other slot of the same lecture
    pub lecture: Arc<Lecture>,
    pub day: Day,
    pub range: PeriodRange,
    /// Room text, empty when the encoding carries none
    pub room: String,
}

impl Schedule {
    /// Same lecture and room at a new position
    pub fn moved_to(&self, day: Day, range: PeriodRange) -> Self {
        Self {
            lecture: Arc::clone(&self.lecture),
            day,
            range,
            room: self.room.clone(),
        }
    }

    /// Whether this entry covers `period` on `day`
    pub fn occupies(&self, day: Day, period: u8) -> bool {
        self.day == day && self.range.contains(period)
    }
}

/// Identifier of one board
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableId(String);

impl TableId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TableId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TableId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Entries of one board in insertion (and z-) order
pub type Board = Arc<Vec<Arc<Schedule>>>;

/// All boards keyed by id, in creation order
pub type BoardSet = IndexMap<TableId, Board>;

#[cfg(test)]
mod tests {
    use super::*;

    fn lecture(major: &str, credits: &str) -> Lecture {
        Lecture {
            id: "502007".to_string(),
            grade: 2,
            title: "자료구조".to_string(),
            credits: credits.to_string(),
            major: major.to_string(),
            schedule: "월1~2(401)".to_string(),
        }
    }

    #[test]
    fn test_major_label_strips_markup() {
        let lec = lecture("컴퓨터공학과<p>소프트웨어학과", "3");
        assert_eq!(lec.major_label(), "컴퓨터공학과 소프트웨어학과");
    }

    #[test]
    fn test_credit_value_reads_prefix() {
        assert_eq!(lecture("x", "3(2)").credit_value(), Some(3));
        assert_eq!(lecture("x", "").credit_value(), None);
    }

    #[test]
    fn test_lecture_deserializes_catalog_fields() {
        let json = r#"{"id":"1","grade":3,"title":"운영체제","credits":"3","major":"컴퓨터공학과","schedule":"화3~4(402)"}"#;
        let lec: Lecture = serde_json::from_str(json).unwrap();
        assert_eq!(lec.schedule, "화3~4(402)");

        let json = r#"{"id":"1","grade":3,"title":"운영체제","credits":"3","major":"컴퓨터공학과","scheduleEncoded":"수5"}"#;
        let lec: Lecture = serde_json::from_str(json).unwrap();
        assert_eq!(lec.schedule, "수5");
    }
}
