// summary.rs — Whole-snapshot counts and progress statistics.

use serde::Serialize;

use gt_goal::{Department, Goal, GoalStatus};

/// Progress below which an active goal needs attention.
pub const ATTENTION_THRESHOLD: u8 = 50;

/// Progress at or above which a goal is highlighted.
pub const HIGHLIGHT_THRESHOLD: u8 = 80;

/// One bucket of a count breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
    /// Share of the snapshot, one decimal place.
    pub percent: f64,
}

/// Mean/min/max of `progress` over a non-empty snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSummary {
    /// One decimal place.
    pub mean: f64,
    pub min: u8,
    pub max: u8,
}

/// Headline numbers for a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub not_completed: usize,
    pub delayed: usize,
    /// Completed / total × 100, one decimal place; 0 for an empty snapshot.
    pub completion_rate: f64,
    pub progress: Option<ProgressSummary>,
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(part as f64 / total as f64 * 100.0)
}

/// Goal count per status, in status declaration order. Statuses with no
/// goals are omitted.
pub fn count_by_status(goals: &[Goal]) -> Vec<CategoryCount> {
    GoalStatus::ALL
        .into_iter()
        .map(|s| (s.label(), goals.iter().filter(|g| g.status == s).count()))
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| CategoryCount {
            label: label.to_string(),
            count,
            percent: percent(count, goals.len()),
        })
        .collect()
}

/// Goal count per department, in department declaration order. Departments
/// with no goals are omitted.
pub fn count_by_department(goals: &[Goal]) -> Vec<CategoryCount> {
    Department::ALL
        .into_iter()
        .map(|d| (d.label(), goals.iter().filter(|g| g.department == d).count()))
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| CategoryCount {
            label: label.to_string(),
            count,
            percent: percent(count, goals.len()),
        })
        .collect()
}

/// Progress statistics, or `None` when there are no goals.
pub fn progress_summary<'a, I>(goals: I) -> Option<ProgressSummary>
where
    I: IntoIterator<Item = &'a Goal>,
{
    let mut count = 0usize;
    let mut sum = 0u64;
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    for g in goals {
        count += 1;
        sum += u64::from(g.progress);
        min = min.min(g.progress);
        max = max.max(g.progress);
    }
    if count == 0 {
        return None;
    }
    Some(ProgressSummary {
        mean: round1(sum as f64 / count as f64),
        min,
        max,
    })
}

/// Active goals (In Progress or Delayed) below 50% progress.
pub fn needs_attention(goals: &[Goal]) -> Vec<&Goal> {
    goals
        .iter()
        .filter(|g| matches!(g.status, GoalStatus::InProgress | GoalStatus::Delayed))
        .filter(|g| g.progress < ATTENTION_THRESHOLD)
        .collect()
}

/// Goals at 80% progress or more, whatever their status.
pub fn highlights(goals: &[Goal]) -> Vec<&Goal> {
    goals
        .iter()
        .filter(|g| g.progress >= HIGHLIGHT_THRESHOLD)
        .collect()
}

pub fn overview(goals: &[Goal]) -> Overview {
    let count = |s: GoalStatus| goals.iter().filter(|g| g.status == s).count();
    let completed = count(GoalStatus::Completed);
    Overview {
        total: goals.len(),
        in_progress: count(GoalStatus::InProgress),
        completed,
        not_completed: count(GoalStatus::NotCompleted),
        delayed: count(GoalStatus::Delayed),
        completion_rate: percent(completed, goals.len()),
        progress: progress_summary(goals),
    }
}
