//! Integration test: full end-to-end workflow.
//!
//! Tests the complete lifecycle:
//! 1. Configure a skill, reward rules and a grade roster
//! 2. Log a week of practice, updating cached stats per attempt
//! 3. Reach mastery and the top rank
//! 4. Evaluate reward rules for the final attempt
//! 5. Check the cache against a full recompute
//! 6. Rank the grade
//! 7. Reset the skill and watch mastery drop

use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone, Utc};

use skill_mastery::attempt::record_attempt_at;
use skill_mastery::leaderboard::{rank, rank_cached};
use skill_mastery::mastery::evaluate;
use skill_mastery::reward::{context_for_attempt, evaluate_rules, total_adjustment};
use skill_mastery::stats::{recompute_stats_in, update_after_attempt_in};
use skill_mastery::{
    ConditionOperator, EffectType, LeaderboardScore, MemoryResultStore, QuestionId, RankLadder,
    ResultStore, RewardRule, RuleId, Skill, StudentProfile, StudentStats,
    SystemConfig, TriggerType,
};

fn at(day: u32, hour: u32) -> i64 {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0)
        .unwrap()
        .timestamp_millis()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

fn rule(
    id: &str,
    trigger: TriggerType,
    op: ConditionOperator,
    value: f64,
    effect: EffectType,
    points: u32,
) -> RewardRule {
    RewardRule {
        id: RuleId(id.to_string()),
        name: id.to_string(),
        trigger_type: trigger,
        condition_operator: op,
        condition_value: value,
        effect_type: effect,
        points,
        message: format!("{id} fired"),
    }
}

#[test]
fn full_workflow_practice_to_reset() {
    // ── Step 1: Configure ───────────────────────────────────────────────
    let config = SystemConfig::default();
    let ladder = RankLadder::default();
    let fractions = Skill::new("fractions", "Fractions").with_grade("3");
    let skills = vec![fractions.clone()];
    let rules = vec![
        rule("good-score", TriggerType::Score, ConditionOperator::GreaterThan, 5.0, EffectType::Reward, 10),
        rule("on-fire", TriggerType::Streak, ConditionOperator::GreaterThan, 2.0, EffectType::Reward, 25),
        rule("sloppy", TriggerType::Accuracy, ConditionOperator::LessThan, 50.0, EffectType::Penalty, 5),
    ];
    let alice = StudentProfile::new("alice", "Alice", "3");
    let bob = StudentProfile::new("bob", "Bob", "3");
    let students = vec![bob.clone(), alice.clone()];

    // ── Step 2: A week of practice ──────────────────────────────────────
    let mut store = MemoryResultStore::new();
    let mut stats = StudentStats::new(alice.id.clone());

    // One miss on day 1, then two new questions right every day
    let mut plan = vec![(at(1, 8), 0, "q-wrong".to_string())];
    for (i, day) in (1..=5).enumerate() {
        plan.push((at(day, 9), 10, format!("q{}", i * 2)));
        plan.push((at(day, 10), 10, format!("q{}", i * 2 + 1)));
    }

    let mut last = None;
    for (ts, score, question) in plan {
        let record = record_attempt_at(
            alice.id.clone(),
            fractions.id.clone(),
            score,
            1,
            Some(QuestionId::new(question)),
            ts,
        );
        store.append(&record).unwrap();
        let log = store.all().unwrap();
        let status = update_after_attempt_in(&mut stats, &record, &fractions, &log, &config, &ladder, &Utc);
        last = Some((record, status));
    }

    // ── Step 3: Mastery and rank ────────────────────────────────────────
    let (last_record, status) = last.unwrap();
    assert!(status.is_mastered);
    assert_eq!(status.correct_count, 10);
    assert_eq!(status.target, 10);
    assert_eq!(status.progress, 100.0);
    assert_eq!(status.progress_label, "10 / 10 Questions");
    assert_eq!(status.total_score, 100);
    assert_eq!(status.rank.name, "Master");
    let accuracy = status.accuracy.unwrap();
    assert!((accuracy - 1000.0 / 11.0).abs() < 1e-9);
    assert_eq!(status.completed_question_ids.len(), 10);
    assert!(!status.completed_question_ids.contains(&QuestionId::new("q-wrong")));

    // ── Step 4: Rewards for the final attempt ───────────────────────────
    let streak = stats.streak_as_of(date(5));
    assert_eq!(streak, 5);
    let log = store.all().unwrap();
    let context = context_for_attempt(&last_record, streak, Some(&fractions), &log);
    let triggered = evaluate_rules(&context, &rules);
    let fired: Vec<&str> = triggered.iter().map(|t| t.rule.id.0.as_str()).collect();
    assert_eq!(fired, vec!["good-score", "on-fire"]);
    assert_eq!(total_adjustment(&triggered), 35);

    // ── Step 5: Cache matches a full recompute ──────────────────────────
    let rebuilt = recompute_stats_in(&alice.id, &log, &skills, &config, &ladder, &Utc);
    assert_eq!(rebuilt, stats);
    assert_eq!(stats.total_xp(), 100);
    assert_eq!(stats.attempt_count(), 11);
    assert_eq!(stats.streak_as_of(date(6)), 5);
    assert_eq!(stats.streak_as_of(date(7)), 0);

    // ── Step 6: Leaderboard ─────────────────────────────────────────────
    for q in 0..3 {
        let record = record_attempt_at(
            bob.id.clone(),
            fractions.id.clone(),
            10,
            1,
            Some(QuestionId::new(format!("q{q}"))),
            at(2, 12),
        );
        store.append(&record).unwrap();
    }
    let log = store.all().unwrap();
    let board = rank(&students, "3", &skills, &config, &ladder, log.as_slice(), None);
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].user_id, alice.id);
    assert_eq!(board[0].score, LeaderboardScore::MasteredCount(1));
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[1].user_id, bob.id);
    assert_eq!(board[1].rank, 2);

    let per_skill = rank(
        &students,
        "3",
        &skills,
        &config,
        &ladder,
        log.as_slice(),
        Some(&fractions.id),
    );
    assert_eq!(per_skill[1].score, LeaderboardScore::ProgressPercent(30.0));

    let mut cache = HashMap::new();
    cache.insert(alice.id.clone(), stats.clone());
    let cached = rank_cached(&students, "3", &skills, &cache);
    assert_eq!(cached[0].user_id, alice.id);

    // ── Step 7: Reset ───────────────────────────────────────────────────
    let removed = store.delete_for(&alice.id, &fractions.id).unwrap();
    assert_eq!(removed, 11);
    let log = store.all().unwrap();
    let status = evaluate(&fractions, Some(&alice.id), &log, &config, &ladder);
    assert!(!status.is_mastered);
    assert_eq!(status.progress, 0.0);
    assert_eq!(status.rank.name, "Novice");

    let rebuilt = recompute_stats_in(&alice.id, &log, &skills, &config, &ladder, &Utc);
    assert_eq!(rebuilt.mastered_count(), 0);
    assert_eq!(rebuilt.attempt_count(), 0);

    // Bob is untouched by Alice's reset
    let bob_status = evaluate(&fractions, Some(&bob.id), &log, &config, &ladder);
    assert_eq!(bob_status.correct_count, 3);
}
