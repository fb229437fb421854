//! Stable display colors for the lectures on one board

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::model::Schedule;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Block colors, assigned in order of first appearance
pub const PALETTE: [Color; 6] = [
    Color::from_rgb(0xff, 0xdd, 0xdd), // Red
    Color::from_rgb(0xff, 0xff, 0xdd), // Yellow
    Color::from_rgb(0xdd, 0xff, 0xff), // Cyan
    Color::from_rgb(0xdd, 0xdd, 0xff), // Blue
    Color::from_rgb(0xff, 0xdd, 0xff), // Magenta
    Color::from_rgb(0xdd, 0xff, 0xdd), // Green
];

/// Palette color for a rank
pub fn palette_color(rank: usize) -> Color {
    PALETTE[rank % PALETTE.len()]
}

/// Map each distinct lecture id on a board to its color.
///
/// Ranks follow first-seen order in `schedules`, so the result depends on
/// entry order: the same list always yields the same colors, while a
/// reordered list may not.
pub fn colors_for(schedules: &[Arc<Schedule>]) -> IndexMap<String, Color> {
    let mut colors = IndexMap::new();
    for schedule in schedules {
        let rank = colors.len();
        colors
            .entry(schedule.lecture.id.clone())
            .or_insert_with(|| palette_color(rank));
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Day, Lecture, PeriodRange};

    fn entry(id: &str, day: Day) -> Arc<Schedule> {
        Arc::new(Schedule {
            lecture: Arc::new(Lecture {
                id: id.to_string(),
                grade: 1,
                title: format!("lecture {}", id),
                credits: "3".to_string(),
                major: "major".to_string(),
                schedule: String::new(),
            }),
            day,
            range: PeriodRange::single(1),
            room: String::new(),
        })
    }

    #[test]
    fn test_first_seen_order_sets_rank() {
        let schedules = vec![entry("b", Day::Mon), entry("a", Day::Tue), entry("b", Day::Wed)];
        let colors = colors_for(&schedules);

        assert_eq!(colors.len(), 2);
        assert_eq!(colors["b"], PALETTE[0]);
        assert_eq!(colors["a"], PALETTE[1]);
    }

    #[test]
    fn test_palette_wraps() {
        let schedules: Vec<_> = (0..8).map(|i| entry(&i.to_string(), Day::Mon)).collect();
        let colors = colors_for(&schedules);
        assert_eq!(colors["6"], PALETTE[0]);
        assert_eq!(colors["7"], PALETTE[1]);
    }

    #[test]
    fn test_repeatable_and_order_dependent() {
        let forward = vec![entry("a", Day::Mon), entry("b", Day::Mon)];
        assert_eq!(colors_for(&forward), colors_for(&forward));

        let reversed = vec![entry("b", Day::Mon), entry("a", Day::Mon)];
        assert_ne!(colors_for(&forward)["a"], colors_for(&reversed)["a"]);
    }

    #[test]
    fn test_color_hex_display() {
        assert_eq!(PALETTE[0].to_string(), "#ffdddd");
    }
}
