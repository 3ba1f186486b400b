//! Integration test: persistence across store instances.
//!
//! Everything written through one set of stores must read back the same
//! through a fresh set opened on the same directory, and evaluation over
//! the file-backed log must match evaluation over an in-memory copy.

use chrono::{TimeZone, Utc};

use skill_mastery::attempt::record_attempt_at;
use skill_mastery::mastery::{evaluate, evaluate_all};
use skill_mastery::stats::recompute_stats_in;
use skill_mastery::{
    ConditionOperator, ConfigStore, EffectType, FileResultStore, MasteryError, MasteryRequirement,
    MemoryResultStore, ProfileStore, QuestionId, RankLadder, RankTier, ResultStore, RewardRule,
    RuleId, Skill, SkillId, StudentId, StudentProfile, SystemConfig, TriggerType,
};

fn at(day: u32) -> i64 {
    Utc.with_ymd_and_hms(2026, 4, day, 15, 30, 0)
        .unwrap()
        .timestamp_millis()
}

#[test]
fn configuration_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let config = SystemConfig {
        default_mastery_requirements: MasteryRequirement::questions(5).with_min_accuracy(75.0),
    };
    let ladder = RankLadder::new(vec![
        RankTier::new("Bronze", 0),
        RankTier::new("Silver", 50),
        RankTier::new("Gold", 200),
    ])
    .unwrap();
    let skills = vec![
        Skill::new("add", "Addition").with_grade("1"),
        Skill::new("mul", "Multiplication")
            .with_grade("2")
            .with_requirement(MasteryRequirement::questions(50).as_percentage())
            .with_question_bank(30)
            .with_difficulty(3),
    ];
    let rule = RewardRule {
        id: RuleId("perfect".to_string()),
        name: "Perfect run".to_string(),
        trigger_type: TriggerType::Accuracy,
        condition_operator: ConditionOperator::Equals,
        condition_value: 100.0,
        effect_type: EffectType::Reward,
        points: 20,
        message: "Flawless!".to_string(),
    };

    {
        let store = ConfigStore::new(dir.path()).unwrap();
        store.save_system_config(&config).unwrap();
        store.save_ladder(&ladder).unwrap();
        store.save_skills(&skills).unwrap();
        store.upsert_rule(rule.clone()).unwrap();
    }

    let reopened = ConfigStore::new(dir.path()).unwrap();
    assert_eq!(reopened.load_system_config().unwrap(), config);
    assert_eq!(reopened.load_ladder().unwrap(), ladder);
    assert_eq!(reopened.load_skills().unwrap(), skills);
    assert_eq!(reopened.list_rules().unwrap(), vec![rule]);
}

#[test]
fn config_documents_use_versioned_wrapper() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::new(dir.path()).unwrap();
    store.save_system_config(&SystemConfig::default()).unwrap();

    let bytes = std::fs::read(dir.path().join("system_config.json")).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["version"], 1);
    let req = &value["document"]["defaultMasteryRequirements"];
    assert_eq!(req["type"], "QUESTIONS");
    assert_eq!(req["value"], 10);
    assert_eq!(req["minAccuracy"], 60.0);
}

#[test]
fn newer_document_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("skills.json"),
        br#"{"version":99,"document":[]}"#,
    )
    .unwrap();
    let store = ConfigStore::new(dir.path()).unwrap();
    assert!(matches!(
        store.load_skills(),
        Err(MasteryError::InvalidFileFormat(_))
    ));
    assert!(store.skills_or_default().is_empty());
}

#[test]
fn file_log_evaluates_like_memory_log() {
    let dir = tempfile::tempdir().unwrap();
    let student = StudentId::new("s1");
    let skills = vec![
        Skill::new("add", "Addition"),
        Skill::new("sub", "Subtraction").with_requirement(MasteryRequirement::score(40)),
    ];
    let config = SystemConfig::default();
    let ladder = RankLadder::default();

    let mut file_log = FileResultStore::new(dir.path().join("attempts")).unwrap();
    let mut memory_log = MemoryResultStore::new();
    for day in 1..=6 {
        for (skill, score) in [("add", 10), ("sub", if day % 3 == 0 { -5 } else { 15 })] {
            let record = record_attempt_at(
                student.clone(),
                SkillId::new(skill),
                score,
                1,
                Some(QuestionId::new(format!("{skill}-{day}"))),
                at(day),
            );
            file_log.append(&record).unwrap();
            memory_log.append(&record).unwrap();
        }
    }

    let reopened = FileResultStore::new(dir.path().join("attempts")).unwrap();
    let from_file = reopened.query(Some(&student), None).unwrap();
    let from_memory = memory_log.query(Some(&student), None).unwrap();
    assert_eq!(from_file, from_memory);

    let a = evaluate_all(&skills, &student, &from_file, &config, &ladder);
    let b = evaluate_all(&skills, &student, &from_memory, &config, &ladder);
    assert_eq!(a, b);

    // 4 x 15 - 2 x 5
    let sub = evaluate(&skills[1], Some(&student), &from_file, &config, &ladder);
    assert_eq!(sub.total_score, 50);
    assert!(sub.is_mastered);
}

#[test]
fn cached_stats_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let student = StudentProfile::new("s1", "Sam", "2");
    let skills = vec![Skill::new("add", "Addition")];
    let config = SystemConfig::default();
    let ladder = RankLadder::default();

    let log: Vec<_> = (1..=3)
        .map(|day| {
            record_attempt_at(
                student.id.clone(),
                SkillId::new("add"),
                10,
                1,
                Some(QuestionId::new(format!("q{day}"))),
                at(day),
            )
        })
        .collect();
    let stats = recompute_stats_in(&student.id, &log, &skills, &config, &ladder, &Utc);

    {
        let profiles = ProfileStore::new(dir.path()).unwrap();
        profiles.upsert_student(student.clone()).unwrap();
        profiles.save_stats(&stats).unwrap();
    }

    let profiles = ProfileStore::new(dir.path()).unwrap();
    assert_eq!(profiles.get_student(&student.id).unwrap(), student);
    let loaded = profiles.load_stats(&student.id).unwrap().unwrap();
    assert_eq!(loaded, stats);
    assert_eq!(loaded.streak.current, 3);
    assert_eq!(loaded.total_xp(), 30);
}
