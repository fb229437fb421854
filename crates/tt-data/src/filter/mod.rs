//! Lecture search filtering
//!
//! Six independent criteria; an empty list or absent value leaves its
//! criterion unconstrained. Day and period criteria need decoded schedules,
//! which are memoized per raw schedule string for the life of the engine
//! because filtering reruns against the full catalog on every keystroke.

use std::collections::BTreeSet;
use std::sync::Arc;
use parking_lot::RwLock;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tt_core::{parse_schedule, Day, Lecture, ParsedSlot};

/// Search criteria from the search dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Case-insensitive substring of the title or id
    pub query: Option<String>,
    pub grades: Vec<u32>,
    pub majors: Vec<String>,
    /// Required leading credit value
    pub credits: Option<u32>,
    pub days: Vec<Day>,
    pub periods: Vec<u8>,
}

impl SearchOptions {
    /// Whether every criterion is unconstrained
    pub fn is_unconstrained(&self) -> bool {
        self.normalized_query().is_none()
            && self.grades.is_empty()
            && self.majors.is_empty()
            && self.credits.is_none()
            && self.days.is_empty()
            && self.periods.is_empty()
    }

    /// Lowercased query, `None` when empty
    fn normalized_query(&self) -> Option<String> {
        self.query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}

/// Filters lectures, memoizing decoded schedules across passes
pub struct ScheduleFilterEngine {
    parsed: RwLock<AHashMap<String, Arc<[ParsedSlot]>>>,
}

impl ScheduleFilterEngine {
    pub fn new() -> Self {
        Self {
            parsed: RwLock::new(AHashMap::new()),
        }
    }

    /// Lectures matching every criterion, in input order
    pub fn filter(&self, lectures: &[Arc<Lecture>], options: &SearchOptions) -> Vec<Arc<Lecture>> {
        if options.is_unconstrained() {
            return lectures.to_vec();
        }

        let query = options.normalized_query();
        let credits = options.credits.map(|c| c.to_string());

        let filtered: Vec<Arc<Lecture>> = lectures
            .iter()
            .filter(|lecture| {
                matches_query(lecture, query.as_deref())
                    && (options.grades.is_empty() || options.grades.contains(&lecture.grade))
                    && (options.majors.is_empty() || options.majors.contains(&lecture.major))
                    && credits
                        .as_deref()
                        .map_or(true, |c| lecture.credits.starts_with(c))
                    && self.matches_days(lecture, &options.days)
                    && self.matches_periods(lecture, &options.periods)
            })
            .cloned()
            .collect();

        tracing::debug!("Filtered {} lectures down to {}", lectures.len(), filtered.len());
        filtered
    }

    /// Decoded schedule for `raw`, computed once per distinct string
    pub fn parsed(&self, raw: &str) -> Arc<[ParsedSlot]> {
        if let Some(slots) = self.parsed.read().get(raw) {
            return Arc::clone(slots);
        }
        let slots: Arc<[ParsedSlot]> = parse_schedule(raw).into();
        self.parsed
            .write()
            .entry(raw.to_string())
            .or_insert(slots)
            .clone()
    }

    /// Number of memoized schedule strings
    pub fn cached_entries(&self) -> usize {
        self.parsed.read().len()
    }

    pub fn clear_cache(&self) {
        self.parsed.write().clear();
    }

    fn matches_days(&self, lecture: &Lecture, days: &[Day]) -> bool {
        if days.is_empty() {
            return true;
        }
        self.parsed(&lecture.schedule)
            .iter()
            .any(|slot| days.contains(&slot.day))
    }

    fn matches_periods(&self, lecture: &Lecture, periods: &[u8]) -> bool {
        if periods.is_empty() {
            return true;
        }
        self.parsed(&lecture.schedule)
            .iter()
            .any(|slot| slot.range.periods().any(|p| periods.contains(&p)))
    }
}

impl Default for ScheduleFilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_query(lecture: &Lecture, query: Option<&str>) -> bool {
    match query {
        None => true,
        Some(q) => lecture.title.to_lowercase().contains(q) || lecture.id.to_lowercase().contains(q),
    }
}

/// Sorted distinct majors, for the major checklist
pub fn distinct_majors(lectures: &[Arc<Lecture>]) -> Vec<String> {
    lectures
        .iter()
        .map(|lecture| lecture.major.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
