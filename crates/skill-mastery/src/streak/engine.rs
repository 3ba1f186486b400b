//! Streak engine — consecutive active calendar days.

use std::collections::BTreeSet;

use chrono::{Days, Local, NaiveDate, TimeZone};

use crate::time::day_key_in;

use super::types::StreakState;

/// A run ending on `last` still counts on `today` if `last` is today or
/// yesterday. The yesterday case is the grace day: the streak stays alive
/// until today fully elapses.
pub fn is_alive(last: NaiveDate, today: NaiveDate) -> bool {
    last == today || last.checked_add_days(Days::new(1)) == Some(today)
}

/// Streak length over a set of active days, measured on `today`.
pub fn streak_from_days<I>(days: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let days: BTreeSet<NaiveDate> = days.into_iter().collect();
    let Some(&last) = days.iter().next_back() else {
        return 0;
    };
    if !is_alive(last, today) {
        return 0;
    }

    let mut streak = 1;
    let mut cursor = last.checked_sub_days(Days::new(1));
    while let Some(day) = cursor.filter(|d| days.contains(d)) {
        streak += 1;
        cursor = day.checked_sub_days(Days::new(1));
    }
    streak
}

/// Streak over epoch-ms timestamps, days cut at midnight in `tz`.
///
/// Timestamps chrono cannot represent are skipped.
pub fn compute_streak_in<Tz: TimeZone>(timestamps: &[i64], today: NaiveDate, tz: &Tz) -> u32 {
    streak_from_days(timestamps.iter().filter_map(|&ts| day_key_in(ts, tz)), today)
}

/// Streak over epoch-ms timestamps, days cut at local midnight.
pub fn compute_streak(timestamps: &[i64], today: NaiveDate) -> u32 {
    compute_streak_in(timestamps, today, &Local)
}

/// Streak as of the current local day.
pub fn current_streak(timestamps: &[i64]) -> u32 {
    compute_streak(timestamps, crate::time::today_local())
}

/// Incremental update for one new attempt timestamp (local zone).
pub fn update_streak(state: &mut StreakState, timestamp: i64) -> u32 {
    update_streak_in(state, timestamp, &Local)
}

/// Incremental update for one new attempt timestamp in `tz`.
pub fn update_streak_in<Tz: TimeZone>(state: &mut StreakState, timestamp: i64, tz: &Tz) -> u32 {
    match day_key_in(timestamp, tz) {
        Some(day) => state.record_day(day),
        None => state.current,
    }
}
