//! Command line arguments

use std::path::PathBuf;
use clap::Parser;
use tt_core::{Day, DragId};
use tt_data::SearchOptions;

/// Search a course catalog and lay lectures out on weekly boards
#[derive(Debug, Parser)]
#[command(name = "timetable", version)]
pub struct Args {
    /// Directory holding the catalog JSON files
    #[arg(long, default_value = ".")]
    pub catalog: PathBuf,

    /// Catalog configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Title or id substring
    #[arg(long, short)]
    pub query: Option<String>,

    /// Grade to include (repeatable)
    #[arg(long = "grade")]
    pub grades: Vec<u32>,

    /// Major to include (repeatable)
    #[arg(long = "major")]
    pub majors: Vec<String>,

    /// Required credit value
    #[arg(long)]
    pub credits: Option<u32>,

    /// Day to include, as a glyph or English abbreviation (repeatable)
    #[arg(long = "day", value_parser = parse_day)]
    pub days: Vec<Day>,

    /// Period to include (repeatable)
    #[arg(long = "period", value_parser = clap::value_parser!(u8).range(1..=24))]
    pub periods: Vec<u8>,

    /// Number of result pages to reveal
    #[arg(long, default_value_t = 1)]
    pub pages: usize,

    /// Add the first N matching lectures to the first board
    #[arg(long, default_value_t = 0)]
    pub add: usize,

    /// Duplicate the first board after adding
    #[arg(long)]
    pub duplicate: bool,

    /// Entry to drag, as `<table>:<index>`
    #[arg(long, requires = "dx")]
    pub drag: Option<DragId>,

    /// Horizontal drop offset in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub dx: Option<f64>,

    /// Vertical drop offset in pixels
    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    pub dy: f64,
}

impl Args {
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            query: self.query.clone(),
            grades: self.grades.clone(),
            majors: self.majors.clone(),
            credits: self.credits,
            days: self.days.clone(),
            periods: self.periods.clone(),
        }
    }
}

fn parse_day(value: &str) -> Result<Day, String> {
    let mut chars = value.chars();
    if let (Some(glyph), None) = (chars.next(), chars.next()) {
        if let Some(day) = Day::from_glyph(glyph) {
            return Ok(day);
        }
    }
    match value.to_ascii_lowercase().as_str() {
        "mon" => Ok(Day::Mon),
        "tue" => Ok(Day::Tue),
        "wed" => Ok(Day::Wed),
        "thu" => Ok(Day::Thu),
        "fri" => Ok(Day::Fri),
        _ => Err(format!("unknown day {:?}", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_accepts_glyph_and_name() {
        assert_eq!(parse_day("수"), Ok(Day::Wed));
        assert_eq!(parse_day("FRI"), Ok(Day::Fri));
        assert!(parse_day("토").is_err());
    }

    #[test]
    fn test_args_build_search_options() {
        let args = Args::parse_from([
            "timetable", "--grade", "3", "--day", "월", "--period", "2", "--drag", "schedule-1:0", "--dx", "-80",
        ]);
        let options = args.search_options();
        assert_eq!(options.grades, vec![3]);
        assert_eq!(options.days, vec![Day::Mon]);
        assert_eq!(options.periods, vec![2]);
        assert_eq!(args.drag.map(|d| d.to_string()), Some("schedule-1:0".to_string()));
        assert_eq!(args.dx, Some(-80.0));
    }
}
