// groups.rs — Per-department, per-status and per-employee report tables.
//
// Each row aggregates the goals sharing one key. Row order is deterministic:
// departments and statuses follow their declaration order, employees sort
// by name.

use std::collections::BTreeMap;

use serde::Serialize;

use gt_goal::{Department, Goal, GoalStatus};

use crate::summary::{percent, progress_summary, round1, ProgressSummary};

/// One row of a grouped report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    pub key: String,
    pub count: usize,
    pub mean_progress: f64,
    pub min_progress: u8,
    pub max_progress: u8,
    pub completed: usize,
    /// Completed / count × 100, one decimal place.
    pub success_rate: f64,
}

impl GroupRow {
    fn from_members(key: &str, members: &[&Goal]) -> Option<Self> {
        let ProgressSummary { mean, min, max } = progress_summary(members.iter().copied())?;
        let completed = members
            .iter()
            .filter(|g| g.status == GoalStatus::Completed)
            .count();
        Some(Self {
            key: key.to_string(),
            count: members.len(),
            mean_progress: mean,
            min_progress: min,
            max_progress: max,
            completed,
            success_rate: percent(completed, members.len()),
        })
    }
}

fn rows_for<K, F>(
    goals: &[Goal],
    keys: impl IntoIterator<Item = (K, &'static str)>,
    key_of: F,
) -> Vec<GroupRow>
where
    K: PartialEq + Copy,
    F: Fn(&Goal) -> K,
{
    keys.into_iter()
        .filter_map(|(key, label)| {
            let members: Vec<&Goal> = goals.iter().filter(|g| key_of(g) == key).collect();
            GroupRow::from_members(label, &members)
        })
        .collect()
}

pub fn by_department(goals: &[Goal]) -> Vec<GroupRow> {
    rows_for(goals, Department::ALL.map(|d| (d, d.label())), |g| g.department)
}

pub fn by_status(goals: &[Goal]) -> Vec<GroupRow> {
    rows_for(goals, GoalStatus::ALL.map(|s| (s, s.label())), |g| g.status)
}

pub fn by_employee(goals: &[Goal]) -> Vec<GroupRow> {
    let mut groups: BTreeMap<&str, Vec<&Goal>> = BTreeMap::new();
    for g in goals {
        groups.entry(g.employee_name.as_str()).or_default().push(g);
    }
    groups
        .into_iter()
        .filter_map(|(name, members)| GroupRow::from_members(name, &members))
        .collect()
}

/// The department with the highest mean progress, with that mean rounded to
/// one decimal place.
///
/// Means are compared unrounded. Exact ties go to the department declared
/// first in [`Department::ALL`].
pub fn best_department(goals: &[Goal]) -> Option<(Department, f64)> {
    let mut best: Option<(Department, f64)> = None;
    for d in Department::ALL {
        let (count, sum) = goals
            .iter()
            .filter(|g| g.department == d)
            .fold((0usize, 0u64), |(n, sum), g| (n + 1, sum + u64::from(g.progress)));
        if count == 0 {
            continue;
        }
        let mean = sum as f64 / count as f64;
        if best.map_or(true, |(_, top)| mean > top) {
            best = Some((d, mean));
        }
    }
    best.map(|(d, mean)| (d, round1(mean)))
}
