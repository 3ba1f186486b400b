//! Leaderboard engine — ranking a grade by mastery.

use std::collections::{HashMap, HashSet};

use crate::attempt::{SkillId, StudentId};
use crate::config::{RankLadder, Skill, SystemConfig};
use crate::mastery;
use crate::stats::{StudentProfile, StudentStats};

use super::types::*;

// ---------------------------------------------------------------------------
// Live ranking
// ---------------------------------------------------------------------------

/// Rank the students enrolled in `grade`.
///
/// Without `skill_id`, every skill of the grade is evaluated per student
/// and students are ordered by mastered count. With `skill_id`, students
/// are ordered by progress on that skill. The sort is stable, so equal
/// scores keep input order, and ranks are positions: `[5, 5, 2]` ranks
/// `[1, 2, 3]`.
pub fn rank<P>(
    students: &[StudentProfile],
    grade: &str,
    skills: &[Skill],
    config: &SystemConfig,
    ladder: &RankLadder,
    results: &P,
    skill_id: Option<&SkillId>,
) -> Vec<LeaderboardEntry>
where
    P: ResultsProvider + ?Sized,
{
    let enrolled = students.iter().filter(|s| s.grade == grade);

    let scored: Vec<(&StudentProfile, LeaderboardScore)> = match skill_id {
        None => {
            let grade_skills: Vec<Skill> =
                skills.iter().filter(|s| s.in_grade(grade)).cloned().collect();
            enrolled
                .map(|student| {
                    let log = results.results_for(&student.id);
                    let count =
                        mastery::mastered_count(&grade_skills, &student.id, &log, config, ladder);
                    (student, LeaderboardScore::MasteredCount(count))
                })
                .collect()
        }
        Some(id) => {
            let skill = skills.iter().find(|s| &s.id == id).cloned().unwrap_or_else(|| {
                log::debug!("skill {id} not in catalog; ranking with default requirement");
                Skill::new(id.0.clone(), id.0.clone())
            });
            enrolled
                .map(|student| {
                    let log = results.results_for(&student.id);
                    let status = mastery::evaluate(&skill, Some(&student.id), &log, config, ladder);
                    (student, LeaderboardScore::ProgressPercent(status.progress))
                })
                .collect()
        }
    };

    assign_ranks(scored)
}

// ---------------------------------------------------------------------------
// Cached ranking
// ---------------------------------------------------------------------------

/// Aggregate-mode ranking from cached stats instead of the full log.
///
/// Only cached masteries of catalog skills in `grade` count, the same set
/// `rank` evaluates live. Students without cached stats count as zero
/// mastered skills.
pub fn rank_cached(
    students: &[StudentProfile],
    grade: &str,
    skills: &[Skill],
    stats: &HashMap<StudentId, StudentStats>,
) -> Vec<LeaderboardEntry> {
    let grade_skills: HashSet<&SkillId> = skills
        .iter()
        .filter(|s| s.in_grade(grade))
        .map(|s| &s.id)
        .collect();
    let scored = students
        .iter()
        .filter(|s| s.grade == grade)
        .map(|student| {
            let count = stats.get(&student.id).map_or(0, |cached| {
                cached
                    .mastered_skills
                    .iter()
                    .filter(|id| grade_skills.contains(id))
                    .count()
            });
            (student, LeaderboardScore::MasteredCount(count))
        })
        .collect();
    assign_ranks(scored)
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

fn compare_desc(a: &LeaderboardScore, b: &LeaderboardScore) -> std::cmp::Ordering {
    use LeaderboardScore::*;
    match (a, b) {
        (MasteredCount(a), MasteredCount(b)) => b.cmp(a),
        (ProgressPercent(a), ProgressPercent(b)) => b.total_cmp(a),
        (MasteredCount(_), ProgressPercent(_)) => std::cmp::Ordering::Less,
        (ProgressPercent(_), MasteredCount(_)) => std::cmp::Ordering::Greater,
    }
}

fn assign_ranks(mut scored: Vec<(&StudentProfile, LeaderboardScore)>) -> Vec<LeaderboardEntry> {
    scored.sort_by(|(_, a), (_, b)| compare_desc(a, b));
    scored
        .into_iter()
        .enumerate()
        .map(|(i, (student, score))| LeaderboardEntry {
            user_id: student.id.clone(),
            display_name: student.display_name.clone(),
            avatar: student.avatar.clone(),
            score,
            rank: i + 1,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
