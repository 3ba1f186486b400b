//! Data structures for streak tracking.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Cached streak counter, updated one attempt at a time.
///
/// Fed attempts in log order it always agrees with a full recompute
/// over the same days (see `streak::streak_from_days`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    /// Length of the run ending at `last_active_day`.
    pub current: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active_day: Option<NaiveDate>,
}

impl StreakState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The state incremental updates would reach after seeing `days` in
    /// order.
    pub fn from_days(days: &BTreeSet<NaiveDate>) -> Self {
        match days.iter().next_back() {
            Some(&last) => Self {
                current: super::engine::streak_from_days(days.iter().copied(), last),
                last_active_day: Some(last),
            },
            None => Self::default(),
        }
    }

    /// Fold one active day into the counter and return the new run length.
    ///
    /// Same day: unchanged. The day after the last active day: +1.
    /// Any later day: reset to 1. A day before the last active day is
    /// ignored; repair that case with a full recompute.
    pub fn record_day(&mut self, day: NaiveDate) -> u32 {
        match self.last_active_day {
            None => {
                self.current = 1;
                self.last_active_day = Some(day);
            }
            Some(last) if day == last => {}
            Some(last) if day < last => {
                log::warn!("backdated activity on {day} (last active {last}) ignored by cached streak");
            }
            Some(last) => {
                if last.checked_add_days(Days::new(1)) == Some(day) {
                    self.current += 1;
                } else {
                    self.current = 1;
                }
                self.last_active_day = Some(day);
            }
        }
        self.current
    }

    /// The streak as shown on `today`: the cached run if it ended today or
    /// yesterday, otherwise zero.
    pub fn current_as_of(&self, today: NaiveDate) -> u32 {
        match self.last_active_day {
            Some(last) if super::engine::is_alive(last, today) => self.current,
            _ => 0,
        }
    }
}
