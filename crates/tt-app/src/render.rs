//! Plain-text rendering of boards and search results

use std::fmt::Write;
use std::sync::Arc;
use tt_core::{colors_for, Board, Day, Lecture, TableId, MAX_PERIOD};

/// One line per lecture
pub fn results_table(lectures: &[Arc<Lecture>]) -> String {
    let mut out = String::new();
    for lecture in lectures {
        let _ = writeln!(
            out,
            "{:<8} {:>2}학년 {:<24} {:>3}학점 {:<20} {}",
            lecture.id,
            lecture.grade,
            lecture.title,
            lecture.credits,
            lecture.major_label(),
            lecture.schedule.replace(tt_core::model::MARKUP_SEPARATOR, " "),
        );
    }
    out
}

/// Board listing followed by a period-by-day grid
pub fn board(id: &TableId, board: &Board, active_drag: Option<&TableId>) -> String {
    let mut out = String::new();
    let colors = colors_for(board);

    let marker = match active_drag {
        Some(active) if active != id => " (drag in progress elsewhere)",
        _ => "",
    };
    let _ = writeln!(out, "== {}{}", id, marker);

    for (index, entry) in board.iter().enumerate() {
        let color = colors
            .get(&entry.lecture.id)
            .map(|c| c.to_string())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "  [{}] {}{} {} {} {}",
            index, entry.day, entry.range, entry.lecture.title, entry.room, color
        );
    }

    let last = board
        .iter()
        .map(|entry| entry.range.end())
        .max()
        .unwrap_or(0)
        .min(MAX_PERIOD);
    if last == 0 {
        return out;
    }

    let _ = write!(out, "     ");
    for day in Day::ALL {
        let _ = write!(out, "{:^6}", day.to_string());
    }
    let _ = writeln!(out);

    for period in 1..=last {
        let _ = write!(out, "  {:>2} ", period);
        for day in Day::ALL {
            let cell = board
                .iter()
                .rposition(|entry| entry.occupies(day, period))
                .map(|index| format!("[{}]", index))
                .unwrap_or_else(|| ".".to_string());
            let _ = write!(out, "{:^6}", cell);
        }
        let _ = writeln!(out);
    }
    out
}
