//! Stress test: incremental streaks agree with full recomputes.
//!
//! Generates many pseudo-random activity histories and checks that the
//! cached `StreakState`, fed one attempt at a time in log order, always
//! reports what a full pass over the active days reports, and that merging
//! split snapshots lands on the same state.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate, TimeZone, Utc};

use skill_mastery::attempt::record_attempt_at;
use skill_mastery::streak::{compute_streak_in, streak_from_days, update_streak_in};
use skill_mastery::{QuestionId, SkillId, StreakState, StudentId, StudentStats};

/// Small deterministic generator so runs are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

/// Sorted attempt timestamps over `span` days, several per active day.
fn history(rng: &mut Lcg, span: u64) -> Vec<i64> {
    let density = 1 + rng.below(9);
    let mut out = Vec::new();
    for offset in 0..span {
        if rng.below(10) >= density {
            continue;
        }
        let day = epoch() + Days::new(offset);
        for _ in 0..=rng.below(3) {
            let hour = rng.below(24) as u32;
            let minute = rng.below(60) as u32;
            let ts = Utc
                .from_utc_datetime(&day.and_hms_opt(hour, minute, 0).unwrap())
                .timestamp_millis();
            out.push(ts);
        }
    }
    out.sort_unstable();
    out
}

fn day_of(ts: i64) -> NaiveDate {
    chrono::DateTime::<Utc>::from_timestamp_millis(ts)
        .unwrap()
        .date_naive()
}

#[test]
fn stress_incremental_matches_full_over_500_histories() {
    let mut rng = Lcg(0x5eed);

    for case in 0..500 {
        let stamps = history(&mut rng, 60);
        let mut state = StreakState::new();
        let mut seen = BTreeSet::new();

        for &ts in &stamps {
            update_streak_in(&mut state, ts, &Utc);
            seen.insert(day_of(ts));

            // After every attempt, measured on that attempt's own day
            let today = day_of(ts);
            assert_eq!(
                state.current_as_of(today),
                streak_from_days(seen.iter().copied(), today),
                "case {case}: diverged after attempt on {today}"
            );
        }

        // And on the following days, including past the grace day
        let last = stamps.last().map(|&ts| day_of(ts)).unwrap_or_else(epoch);
        for ahead in 0..4 {
            let today = last + Days::new(ahead);
            assert_eq!(
                state.current_as_of(today),
                compute_streak_in(&stamps, today, &Utc),
                "case {case}: diverged {ahead} day(s) after the last attempt"
            );
        }

        assert_eq!(state, StreakState::from_days(&seen), "case {case}");
    }
}

#[test]
fn stress_merge_of_split_snapshots_matches_whole() {
    let mut rng = Lcg(42);
    let student = StudentId::new("s1");
    let skill = SkillId::new("add");

    for case in 0..200 {
        let stamps = history(&mut rng, 45);
        let records: Vec<_> = stamps
            .iter()
            .enumerate()
            .map(|(i, &ts)| {
                record_attempt_at(
                    student.clone(),
                    skill.clone(),
                    (i % 7) as i64 - 1,
                    1,
                    Some(QuestionId::new(format!("q{i}"))),
                    ts,
                )
            })
            .collect();

        let mut whole = StudentStats::new(student.clone());
        for r in &records {
            whole.apply_in(r, &Utc);
        }

        // Interleaved split, each half applied in log order
        let mut left = StudentStats::new(student.clone());
        let mut right = StudentStats::new(student.clone());
        for (i, r) in records.iter().enumerate() {
            if rng.below(2) == 0 || i % 5 == 0 {
                left.apply_in(r, &Utc);
            } else {
                right.apply_in(r, &Utc);
            }
        }

        let mut lr = left.clone();
        lr.merge(&right);
        let mut rl = right.clone();
        rl.merge(&left);

        assert_eq!(lr, whole, "case {case}: left+right");
        assert_eq!(rl, whole, "case {case}: right+left");

        // Idempotent
        let mut again = lr.clone();
        again.merge(&right);
        assert_eq!(again, whole, "case {case}: merge twice");
    }
}

#[test]
fn stress_backdated_attempts_repaired_by_recompute() {
    let mut rng = Lcg(7);

    for case in 0..200 {
        let mut stamps = history(&mut rng, 30);
        if stamps.len() < 2 {
            continue;
        }
        // Shuffle so some attempts arrive after later days were seen
        for i in (1..stamps.len()).rev() {
            let j = rng.below(i as u64 + 1) as usize;
            stamps.swap(i, j);
        }

        let mut state = StreakState::new();
        let mut seen = BTreeSet::new();
        for &ts in &stamps {
            update_streak_in(&mut state, ts, &Utc);
            seen.insert(day_of(ts));
        }

        // The cache never overshoots, and a rebuild always lands on the truth
        let last = *seen.iter().next_back().unwrap();
        let truth = streak_from_days(seen.iter().copied(), last);
        assert!(state.current_as_of(last) <= truth, "case {case}");
        assert_eq!(StreakState::from_days(&seen).current_as_of(last), truth);
    }
}
