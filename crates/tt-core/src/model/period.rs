//! Contiguous period ranges

use std::fmt;

/// First period of the operating day
pub const MIN_PERIOD: u8 = 1;

/// Last period of the operating day
pub const MAX_PERIOD: u8 = 24;

/// A non-empty, ascending, gap-free run of periods within `MIN_PERIOD..=MAX_PERIOD`.
///
/// Stored as its endpoints so the invariant cannot be broken after
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeriodRange {
    start: u8,
    end: u8,
}

impl PeriodRange {
    /// Build a range, returning `None` if it is inverted or leaves the grid
    pub fn new(start: u8, end: u8) -> Option<Self> {
        if start < MIN_PERIOD || end > MAX_PERIOD || start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// Single-period range, clamped into the grid
    pub fn single(period: i64) -> Self {
        let period = clamp_period(period);
        Self { start: period, end: period }
    }

    /// Build a range from untrusted endpoints.
    ///
    /// Both ends are clamped into the grid; an inverted pair collapses to the
    /// start period.
    pub fn clamped(start: i64, end: i64) -> Self {
        let start = clamp_period(start);
        let end = clamp_period(end);
        if end < start {
            Self { start, end: start }
        } else {
            Self { start, end }
        }
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    /// Number of periods covered (always at least one)
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// Ranges are never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, period: u8) -> bool {
        (self.start..=self.end).contains(&period)
    }

    /// Periods in ascending order
    pub fn periods(&self) -> impl Iterator<Item = u8> {
        self.start..=self.end
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.periods().collect()
    }

    /// Shift every period by `delta`, keeping the length.
    ///
    /// The shift itself is clamped so the range stays on the grid.
    pub fn shifted_clamped(&self, delta: i64) -> Self {
        let lowest = MIN_PERIOD as i64 - self.start as i64;
        let highest = MAX_PERIOD as i64 - self.end as i64;
        let delta = delta.clamp(lowest, highest);
        Self {
            start: (self.start as i64 + delta) as u8,
            end: (self.end as i64 + delta) as u8,
        }
    }
}

impl fmt::Display for PeriodRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}~{}", self.start, self.end)
        }
    }
}

fn clamp_period(period: i64) -> u8 {
    period.clamp(MIN_PERIOD as i64, MAX_PERIOD as i64) as u8
}
