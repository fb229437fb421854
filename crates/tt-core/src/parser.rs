//! Decoder for the compact schedule encoding carried by catalog lectures
//!
//! Grammar, one segment per meeting day, segments joined by `<p>`:
//!
//! ```text
//! <day-glyph><start>[~<end>][(<room>)]
//! ```
//!
//! e.g. `월1~2(401)<p>화3(402)`. Catalog data is not trusted to be
//! well-formed, so decoding never fails: every segment that at least names a
//! day yields an entry, with missing or broken parts replaced by defaults.

use crate::model::{Day, PeriodRange, MARKUP_SEPARATOR, MIN_PERIOD};

/// One decoded segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSlot {
    pub day: Day,
    pub range: PeriodRange,
    pub room: String,
}

/// Decode a whole schedule string into its segments, in source order
pub fn parse_schedule(raw: &str) -> Vec<ParsedSlot> {
    raw.split(MARKUP_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(parse_segment)
        .collect()
}

/// Decode one segment; `None` only when no day glyph can be read
pub fn parse_segment(segment: &str) -> Option<ParsedSlot> {
    let mut chars = segment.chars();
    let glyph = chars.next()?;
    let Some(day) = Day::from_glyph(glyph) else {
        tracing::debug!("Skipping schedule segment without a day glyph: {:?}", segment);
        return None;
    };

    let rest = chars.as_str();
    let (times, room) = match rest.split_once('(') {
        Some((times, room)) => (times, room.trim_end_matches(')').trim()),
        None => (rest, ""),
    };

    let (start, end) = match times.split_once('~') {
        Some((start, end)) => (start, Some(end)),
        None => (times, None),
    };

    let start = match leading_number(start) {
        Some(start) => start,
        None => {
            tracing::debug!("Schedule segment {:?} has no start period, using {}", segment, MIN_PERIOD);
            MIN_PERIOD as i64
        }
    };

    let range = match end.and_then(leading_number) {
        Some(end) if end >= start => PeriodRange::clamped(start, end),
        _ => PeriodRange::single(start),
    };

    Some(ParsedSlot {
        day,
        range,
        room: room.to_string(),
    })
}

/// Integer made of the leading ASCII digits, ignoring surrounding whitespace
fn leading_number(text: &str) -> Option<i64> {
    let text = text.trim();
    let end = text
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].parse().ok()
}
