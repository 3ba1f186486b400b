//! SkillMastery CLI — `mastery` command.
//!
//! Provides a command-line interface for recording practice attempts and
//! inspecting mastery, streaks, reward rules and grade leaderboards.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use skill_mastery::attempt::record_attempt;
use skill_mastery::leaderboard;
use skill_mastery::mastery;
use skill_mastery::reward::{context_for_attempt, evaluate_rules, total_adjustment};
use skill_mastery::stats::{recompute_stats, update_after_attempt};
use skill_mastery::streak::compute_streak;
use skill_mastery::storage::{ConfigStore, FileResultStore, ProfileStore, ResultStore};
use skill_mastery::time::{millis_to_rfc3339, today_local};
use skill_mastery::{
    ConditionOperator, EffectType, LeaderboardScore, MasteryRequirement, MasteryStatus,
    MasteryStrategy, QuestionId, RewardContext, RewardRule, RuleId, Skill, SkillId, StudentId,
    StudentProfile, StudentStats, TriggerType,
};

// ── Directory helpers ─────────────────────────────────────────────────────────

fn data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    let home = std::env::var("HOME").context("HOME not set; pass --data-dir")?;
    Ok(PathBuf::from(home).join(".mastery"))
}

/// The three stores under one data directory.
struct Stores {
    results: FileResultStore,
    config: ConfigStore,
    profiles: ProfileStore,
}

impl Stores {
    fn open(root: &Path) -> Result<Self> {
        Ok(Self {
            results: FileResultStore::new(root.join("attempts"))
                .context("failed to open attempt log")?,
            config: ConfigStore::new(root.join("config")).context("failed to open config")?,
            profiles: ProfileStore::new(root.join("students"))
                .context("failed to open student records")?,
        })
    }
}

// ── Parsing helpers ───────────────────────────────────────────────────────────

/// Parse an upper-snake-case wire name (`score`, `GREATER_THAN`, ...) into
/// one of the rule enums.
fn parse_wire<T: serde::de::DeserializeOwned>(kind: &str, s: &str) -> Result<T> {
    let wire = s.trim().to_ascii_uppercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(wire))
        .map_err(|_| anyhow!("unknown {kind}: {s}"))
}

fn parse_operator(s: &str) -> Result<ConditionOperator> {
    match s.trim() {
        ">" | "gt" => Ok(ConditionOperator::GreaterThan),
        "<" | "lt" => Ok(ConditionOperator::LessThan),
        "=" | "==" | "eq" => Ok(ConditionOperator::Equals),
        other => parse_wire("condition operator", other),
    }
}

fn print_status(status: &MasteryStatus) {
    let strategy = match status.strategy {
        MasteryStrategy::Questions => "QUESTIONS",
        MasteryStrategy::Score => "SCORE",
    };
    println!(
        "{:<16} {:<10} {:>6.1}%  {:<22} {:<12} {}",
        status.skill_id,
        strategy,
        status.progress,
        status.progress_label,
        status.rank.name,
        if status.is_mastered { "mastered" } else { "" }
    );
}

#[allow(clippy::too_many_arguments)]
fn build_skill(
    id: String,
    name: String,
    grade: Option<String>,
    questions: Option<u32>,
    percentage: bool,
    score_target: Option<i64>,
    min_accuracy: Option<f64>,
    bank: Option<u32>,
    difficulty: Option<u32>,
) -> Result<Skill> {
    let requirement = match (questions, score_target) {
        (Some(q), _) if percentage => Some(MasteryRequirement::questions(q).as_percentage()),
        (Some(q), _) => Some(MasteryRequirement::questions(q)),
        (None, Some(s)) => Some(MasteryRequirement::score(s)),
        (None, None) => None,
    };
    let requirement = match (requirement, min_accuracy) {
        (Some(r), Some(acc)) => Some(r.with_min_accuracy(acc)),
        (None, Some(_)) => return Err(anyhow!("--min-accuracy needs --questions or --score-target")),
        (r, None) => r,
    };

    let mut skill = Skill::new(id, name);
    skill.grade = grade;
    skill.mastery_requirements = requirement;
    skill.question_bank_size = bank;
    skill.difficulty = difficulty;
    Ok(skill)
}

#[allow(clippy::too_many_arguments)]
fn build_rule(
    id: String,
    name: String,
    trigger: &str,
    operator: &str,
    value: f64,
    effect: &str,
    points: u32,
    message: String,
) -> Result<RewardRule> {
    Ok(RewardRule {
        id: RuleId(id),
        name,
        trigger_type: parse_wire::<TriggerType>("trigger type", trigger)?,
        condition_operator: parse_operator(operator)?,
        condition_value: value,
        effect_type: parse_wire::<EffectType>("effect type", effect)?,
        points,
        message,
    })
}

// ── CLI structure ─────────────────────────────────────────────────────────────

/// SkillMastery CLI — record practice attempts and track mastery, streaks,
/// rewards and leaderboards.
#[derive(Parser, Debug)]
#[command(
    name = "mastery",
    about = "SkillMastery CLI",
    version,
    long_about = "mastery — SkillMastery CLI\n\nRecord practice attempts, inspect per-skill mastery and rank,\ndaily streaks, reward rules and grade leaderboards."
)]
struct Cli {
    /// Data directory (default: ~/.mastery)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the data directory and write default configuration
    Init,

    /// Manage students
    Student {
        #[command(subcommand)]
        subcommand: StudentCommands,
    },

    /// Manage the skill catalog
    Skill {
        #[command(subcommand)]
        subcommand: SkillCommands,
    },

    /// Record a practice attempt
    Record {
        #[arg(long)]
        student: String,

        #[arg(long)]
        skill: String,

        /// Points awarded; zero or negative means incorrect
        #[arg(long, allow_hyphen_values = true)]
        score: i64,

        /// Tries the student needed
        #[arg(long, default_value_t = 1)]
        attempts: u32,

        /// Question answered, if any
        #[arg(long)]
        question: Option<String>,
    },

    /// Show mastery status for a student
    Status {
        #[arg(long)]
        student: String,

        /// Only this skill (default: every skill)
        #[arg(long)]
        skill: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a student's current daily streak
    Streak {
        #[arg(long)]
        student: String,
    },

    /// Preview which reward rules fire for an outcome
    Rewards {
        #[arg(long, allow_hyphen_values = true)]
        score: i64,

        #[arg(long, default_value_t = 0)]
        streak: u32,

        #[arg(long)]
        difficulty: Option<u32>,

        #[arg(long)]
        accuracy: Option<f64>,
    },

    /// Manage reward rules
    Rules {
        #[command(subcommand)]
        subcommand: RulesCommands,
    },

    /// Rank the students of a grade
    Leaderboard {
        #[arg(long)]
        grade: String,

        /// Rank by progress on one skill instead of mastered count
        #[arg(long)]
        skill: Option<String>,

        /// Use cached stats instead of evaluating the attempt log
        #[arg(long, conflicts_with = "skill")]
        cached: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete every attempt of a student on a skill
    Reset {
        #[arg(long)]
        student: String,

        #[arg(long)]
        skill: String,
    },

    /// Rebuild cached stats from the attempt log
    Recalc {
        /// Only this student (default: every student)
        #[arg(long)]
        student: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum StudentCommands {
    /// Add or update a student
    Add {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        grade: String,

        #[arg(long)]
        avatar: Option<String>,
    },

    /// List students
    List {
        /// Only students in this grade
        #[arg(long)]
        grade: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum SkillCommands {
    /// Add or update a skill
    Add {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,

        /// Grade the skill belongs to (default: every grade)
        #[arg(long)]
        grade: Option<String>,

        /// Override: master after this many distinct correct questions
        #[arg(long, conflicts_with = "score_target")]
        questions: Option<u32>,

        /// Treat --questions as a percentage of the question bank
        #[arg(long, requires = "questions")]
        percentage: bool,

        /// Override: master after this many cumulative points
        #[arg(long = "score-target", allow_hyphen_values = true)]
        score_target: Option<i64>,

        /// Accuracy gate (0-100) for the override
        #[arg(long)]
        min_accuracy: Option<f64>,

        /// Number of questions in the skill's bank
        #[arg(long)]
        bank: Option<u32>,

        #[arg(long)]
        difficulty: Option<u32>,
    },

    /// List skills
    List,
}

#[derive(Subcommand, Debug)]
enum RulesCommands {
    /// List reward rules
    List,

    /// Add or update a reward rule
    Add {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,

        /// SCORE, STREAK, DIFFICULTY or ACCURACY
        #[arg(long)]
        trigger: String,

        /// GREATER_THAN, LESS_THAN or EQUALS (also >, <, =)
        #[arg(long, default_value = "GREATER_THAN")]
        operator: String,

        #[arg(long, allow_hyphen_values = true)]
        value: f64,

        /// REWARD or PENALTY
        #[arg(long, default_value = "REWARD")]
        effect: String,

        #[arg(long)]
        points: u32,

        #[arg(long, default_value = "")]
        message: String,
    },

    /// Remove a reward rule
    Remove {
        #[arg(long)]
        id: String,
    },
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let verbose = cli.verbose;

    let result = data_dir(cli.data_dir.as_deref()).and_then(|root| match cli.command {
        Commands::Init => cmd_init(&root, verbose),
        Commands::Student { subcommand } => match subcommand {
            StudentCommands::Add {
                id,
                name,
                grade,
                avatar,
            } => cmd_student_add(&root, &id, &name, &grade, avatar),
            StudentCommands::List { grade } => cmd_student_list(&root, grade.as_deref()),
        },
        Commands::Skill { subcommand } => match subcommand {
            SkillCommands::Add {
                id,
                name,
                grade,
                questions,
                percentage,
                score_target,
                min_accuracy,
                bank,
                difficulty,
            } => build_skill(
                id,
                name,
                grade,
                questions,
                percentage,
                score_target,
                min_accuracy,
                bank,
                difficulty,
            )
            .and_then(|skill| cmd_skill_add(&root, skill)),
            SkillCommands::List => cmd_skill_list(&root),
        },
        Commands::Record {
            student,
            skill,
            score,
            attempts,
            question,
        } => cmd_record(&root, &student, &skill, score, attempts, question, verbose),
        Commands::Status {
            student,
            skill,
            json,
        } => cmd_status(&root, &student, skill.as_deref(), json),
        Commands::Streak { student } => cmd_streak(&root, &student),
        Commands::Rewards {
            score,
            streak,
            difficulty,
            accuracy,
        } => cmd_rewards(
            &root,
            RewardContext {
                score,
                streak,
                difficulty,
                accuracy,
            },
        ),
        Commands::Rules { subcommand } => match subcommand {
            RulesCommands::List => cmd_rules_list(&root),
            RulesCommands::Add {
                id,
                name,
                trigger,
                operator,
                value,
                effect,
                points,
                message,
            } => build_rule(id, name, &trigger, &operator, value, &effect, points, message)
                .and_then(|rule| cmd_rules_add(&root, rule)),
            RulesCommands::Remove { id } => cmd_rules_remove(&root, &id),
        },
        Commands::Leaderboard {
            grade,
            skill,
            cached,
            json,
        } => cmd_leaderboard(&root, &grade, skill.as_deref(), cached, json),
        Commands::Reset { student, skill } => cmd_reset(&root, &student, &skill),
        Commands::Recalc { student } => cmd_recalc(&root, student.as_deref(), verbose),
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

// ── Command implementations ───────────────────────────────────────────────────

/// `mastery init`
fn cmd_init(root: &Path, verbose: bool) -> Result<()> {
    let stores = Stores::open(root)?;

    // Materialize defaults only where nothing is configured yet
    let config = stores.config.load_system_config()?;
    stores.config.save_system_config(&config)?;
    let ladder = stores.config.load_ladder()?;
    stores.config.save_ladder(&ladder)?;

    println!("Initialized {}", root.display());
    if verbose {
        println!(
            "  Default requirement: {}",
            config.default_mastery_requirements.strategy_name()
        );
        for tier in ladder.tiers() {
            println!("  Rank: {:<12} {}", tier.name, tier.threshold);
        }
    }
    Ok(())
}

/// `mastery student add --id ID --name NAME --grade GRADE [--avatar URL]`
fn cmd_student_add(
    root: &Path,
    id: &str,
    name: &str,
    grade: &str,
    avatar: Option<String>,
) -> Result<()> {
    let stores = Stores::open(root)?;
    let mut profile = StudentProfile::new(id, name, grade);
    profile.avatar = avatar;
    stores
        .profiles
        .upsert_student(profile)
        .context("failed to save student")?;
    println!("Saved student '{id}' ({name}, grade {grade})");
    Ok(())
}

/// `mastery student list [--grade GRADE]`
fn cmd_student_list(root: &Path, grade: Option<&str>) -> Result<()> {
    let stores = Stores::open(root)?;
    let students: Vec<StudentProfile> = stores
        .profiles
        .list_students()?
        .into_iter()
        .filter(|s| grade.map_or(true, |g| s.grade == g))
        .collect();

    if students.is_empty() {
        println!("No students found");
        return Ok(());
    }

    println!("{:<16} {:<24} GRADE", "ID", "NAME");
    println!("{}", "-".repeat(48));
    for s in &students {
        println!("{:<16} {:<24} {}", s.id, s.display_name, s.grade);
    }
    Ok(())
}

/// `mastery skill add --id ID --name NAME [...]`
fn cmd_skill_add(root: &Path, skill: Skill) -> Result<()> {
    let stores = Stores::open(root)?;
    let id = skill.id.clone();
    stores.config.upsert_skill(skill)?;
    println!("Saved skill '{id}'");
    Ok(())
}

/// `mastery skill list`
fn cmd_skill_list(root: &Path) -> Result<()> {
    let stores = Stores::open(root)?;
    let config = stores.config.system_config_or_default();
    let skills = stores.config.load_skills()?;

    if skills.is_empty() {
        println!("No skills found");
        return Ok(());
    }

    println!("{:<16} {:<24} {:<8} REQUIREMENT", "ID", "NAME", "GRADE");
    println!("{}", "-".repeat(64));
    for skill in &skills {
        let requirement = mastery::resolve_requirement(Some(skill), &config);
        let source = if skill.mastery_requirements.is_some() {
            ""
        } else {
            " (default)"
        };
        println!(
            "{:<16} {:<24} {:<8} {}{}",
            skill.id,
            skill.name,
            skill.grade.as_deref().unwrap_or("*"),
            requirement.strategy_name(),
            source
        );
    }
    Ok(())
}

/// `mastery record --student ID --skill ID --score N [--attempts N] [--question ID]`
fn cmd_record(
    root: &Path,
    student: &str,
    skill_id: &str,
    score: i64,
    attempts: u32,
    question: Option<String>,
    verbose: bool,
) -> Result<()> {
    let mut stores = Stores::open(root)?;
    let student_id = StudentId::new(student);
    stores.profiles.get_student(&student_id)?;

    let config = stores.config.system_config_or_default();
    let ladder = stores.config.ladder_or_default();
    let skills = stores.config.skills_or_default();
    let rules = stores.config.rules_or_default();

    let skill = match skills.iter().find(|s| s.id.as_str() == skill_id) {
        Some(s) => s.clone(),
        None => {
            log::warn!("skill {skill_id} not in catalog; using the default requirement");
            Skill::new(skill_id, skill_id)
        }
    };

    let mut results = stores.results.query(Some(&student_id), None)?;
    let record = record_attempt(
        student_id.clone(),
        skill.id.clone(),
        score,
        attempts,
        question.map(QuestionId::new),
    );
    stores
        .results
        .append(&record)
        .context("failed to append attempt")?;

    // A missing cache is rebuilt from the prior log before folding in
    let mut stats = match stores.profiles.load_stats(&student_id)? {
        Some(stats) => stats,
        None => recompute_stats(&student_id, &results, &skills, &config, &ladder),
    };
    results.push(record.clone());
    let status = update_after_attempt(&mut stats, &record, &skill, &results, &config, &ladder);
    stores.profiles.save_stats(&stats)?;

    let streak = stats.streak_as_of(today_local());
    let context = context_for_attempt(&record, streak, Some(&skill), &results);
    let triggered = evaluate_rules(&context, &rules);

    println!("Recorded attempt {}", record.id);
    if verbose {
        println!("  At:     {}", millis_to_rfc3339(record.timestamp));
    }
    print_status(&status);
    println!("  Streak: {streak} day(s)");
    for t in &triggered {
        println!("  {:+} {}: {}", t.effect_points, t.rule.name, t.rule.message);
    }
    if !triggered.is_empty() {
        println!("  Net adjustment: {:+}", total_adjustment(&triggered));
    }
    Ok(())
}

/// `mastery status --student ID [--skill ID] [--json]`
fn cmd_status(root: &Path, student: &str, skill_id: Option<&str>, json: bool) -> Result<()> {
    let stores = Stores::open(root)?;
    let student_id = StudentId::new(student);
    let config = stores.config.system_config_or_default();
    let ladder = stores.config.ladder_or_default();
    let mut skills = stores.config.skills_or_default();
    let results = stores.results.query(Some(&student_id), None)?;

    if let Some(id) = skill_id {
        let id = SkillId::new(id);
        skills.retain(|s| s.id == id);
        if skills.is_empty() {
            skills.push(Skill::new(id.0.clone(), id.0));
        }
    }

    let statuses = mastery::evaluate_all(&skills, &student_id, &results, &config, &ladder);

    if json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }
    if statuses.is_empty() {
        println!("No skills configured");
        return Ok(());
    }
    for status in &statuses {
        print_status(status);
    }
    Ok(())
}

/// `mastery streak --student ID`
fn cmd_streak(root: &Path, student: &str) -> Result<()> {
    let stores = Stores::open(root)?;
    let student_id = StudentId::new(student);
    let today = today_local();

    let current = match stores.profiles.load_stats(&student_id)? {
        Some(stats) => stats.streak_as_of(today),
        None => {
            let timestamps: Vec<i64> = stores
                .results
                .query(Some(&student_id), None)?
                .iter()
                .map(|r| r.timestamp)
                .collect();
            compute_streak(&timestamps, today)
        }
    };
    println!("{student}: {current} day streak");
    Ok(())
}

/// `mastery rewards --score N [--streak N] [--difficulty N] [--accuracy X]`
fn cmd_rewards(root: &Path, context: RewardContext) -> Result<()> {
    let stores = Stores::open(root)?;
    let rules = stores.config.list_rules()?;
    let triggered = evaluate_rules(&context, &rules);

    if triggered.is_empty() {
        println!("No rules fire");
        return Ok(());
    }
    for t in &triggered {
        println!("{:+} {} ({}): {}", t.effect_points, t.rule.name, t.rule.id, t.rule.message);
    }
    println!("Net adjustment: {:+}", total_adjustment(&triggered));
    Ok(())
}

/// `mastery rules list`
fn cmd_rules_list(root: &Path) -> Result<()> {
    let stores = Stores::open(root)?;
    let rules = stores.config.list_rules()?;
    if rules.is_empty() {
        println!("No reward rules");
        return Ok(());
    }
    println!("{:<12} {:<20} {:<11} {:<13} {:>8} EFFECT", "ID", "NAME", "TRIGGER", "OPERATOR", "VALUE");
    println!("{}", "-".repeat(80));
    for rule in &rules {
        println!(
            "{:<12} {:<20} {:<11} {:<13} {:>8} {:+}",
            rule.id,
            rule.name,
            format!("{:?}", rule.trigger_type),
            format!("{:?}", rule.effective_operator()),
            rule.condition_value,
            rule.effect_points()
        );
    }
    Ok(())
}

/// `mastery rules add --id ID --name NAME --trigger T --value V --points N [...]`
fn cmd_rules_add(root: &Path, rule: RewardRule) -> Result<()> {
    let stores = Stores::open(root)?;
    let stored = stores.config.upsert_rule(rule)?;
    println!("Saved rule '{}' ({:+} points)", stored.id, stored.effect_points());
    Ok(())
}

/// `mastery rules remove --id ID`
fn cmd_rules_remove(root: &Path, id: &str) -> Result<()> {
    let stores = Stores::open(root)?;
    if !stores.config.delete_rule(&RuleId(id.to_string()))? {
        return Err(anyhow!("reward rule not found: {id}"));
    }
    println!("Removed rule '{id}'");
    Ok(())
}

/// `mastery leaderboard --grade GRADE [--skill ID | --cached] [--json]`
fn cmd_leaderboard(
    root: &Path,
    grade: &str,
    skill_id: Option<&str>,
    cached: bool,
    json: bool,
) -> Result<()> {
    let stores = Stores::open(root)?;
    let students = stores.profiles.list_students()?;

    let entries = if cached {
        let skills = stores.config.skills_or_default();
        let stats = stores.profiles.stats_for(&students);
        leaderboard::rank_cached(&students, grade, &skills, &stats)
    } else {
        let config = stores.config.system_config_or_default();
        let ladder = stores.config.ladder_or_default();
        let skills = stores.config.skills_or_default();
        let mut by_student: HashMap<StudentId, Vec<_>> = HashMap::new();
        for record in stores.results.all()? {
            by_student
                .entry(record.student_id.clone())
                .or_default()
                .push(record);
        }
        let skill_id = skill_id.map(SkillId::new);
        leaderboard::rank(
            &students,
            grade,
            &skills,
            &config,
            &ladder,
            &by_student,
            skill_id.as_ref(),
        )
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No students in grade {grade}");
        return Ok(());
    }
    println!("{:<6} {:<16} {:<24} SCORE", "RANK", "ID", "NAME");
    println!("{}", "-".repeat(56));
    for e in &entries {
        let score = match e.score {
            LeaderboardScore::MasteredCount(n) => format!("{n} mastered"),
            LeaderboardScore::ProgressPercent(p) => format!("{p:.1}%"),
        };
        println!("{:<6} {:<16} {:<24} {}", e.rank, e.user_id, e.display_name, score);
    }
    Ok(())
}

/// `mastery reset --student ID --skill ID`
fn cmd_reset(root: &Path, student: &str, skill: &str) -> Result<()> {
    let mut stores = Stores::open(root)?;
    let student_id = StudentId::new(student);
    let removed = stores
        .results
        .delete_for(&student_id, &SkillId::new(skill))?;

    // Removal can demote, which only a full rebuild reflects
    rebuild_stats(&stores, &student_id)?;
    println!("Removed {removed} attempt(s) for {student} on {skill}");
    Ok(())
}

/// `mastery recalc [--student ID]`
fn cmd_recalc(root: &Path, student: Option<&str>, verbose: bool) -> Result<()> {
    let stores = Stores::open(root)?;
    let ids: Vec<StudentId> = match student {
        Some(id) => vec![StudentId::new(id)],
        None => stores
            .profiles
            .list_students()?
            .into_iter()
            .map(|s| s.id)
            .collect(),
    };
    for id in &ids {
        let stats = rebuild_stats(&stores, id)?;
        if verbose {
            println!(
                "  {id}: {} attempts, {} XP, {} mastered",
                stats.attempt_count(),
                stats.total_xp(),
                stats.mastered_count()
            );
        }
    }
    println!("Recalculated stats for {} student(s)", ids.len());
    Ok(())
}

fn rebuild_stats(stores: &Stores, student: &StudentId) -> Result<StudentStats> {
    let config = stores.config.system_config_or_default();
    let ladder = stores.config.ladder_or_default();
    let skills = stores.config.skills_or_default();
    let results = stores.results.query(Some(student), None)?;
    let stats = recompute_stats(student, &results, &skills, &config, &ladder);
    stores.profiles.save_stats(&stats)?;
    Ok(stats)
}
