//! Weekday alphabet used by schedule encodings and the grid columns

use serde::{Deserialize, Serialize};
use std::fmt;

/// One column of the weekly grid.
///
/// The alphabet is fixed at five days; the glyph is the single character the
/// catalog uses inside encoded schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
}

impl Day {
    /// All days in grid column order
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    /// Number of days in the alphabet
    pub const COUNT: usize = Self::ALL.len();

    /// Glyph used in encoded schedules
    pub fn glyph(self) -> char {
        match self {
            Day::Mon => '월',
            Day::Tue => '화',
            Day::Wed => '수',
            Day::Thu => '목',
            Day::Fri => '금',
        }
    }

    /// Parse a single glyph
    pub fn from_glyph(glyph: char) -> Option<Day> {
        Self::ALL.into_iter().find(|day| day.glyph() == glyph)
    }

    /// Zero-based column index
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day at `index`, or `None` outside the alphabet
    pub fn from_index(index: usize) -> Option<Day> {
        Self::ALL.get(index).copied()
    }

    /// Shift by `delta` columns, clamped to the first/last day
    pub fn offset_clamped(self, delta: i64) -> Day {
        let target = (self.index() as i64)
            .saturating_add(delta)
            .clamp(0, Self::COUNT as i64 - 1);
        Self::ALL[target as usize]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
