//! # gt-report
//!
//! Descriptive statistics over a goal snapshot.
//!
//! Nothing here is persisted: callers fetch goals once (optionally through a
//! [`gt_goal::GoalFilter`]) and every view is derived from that slice.
//!
//! - [`summary`] — status/department counts, progress mean/min/max, the
//!   needs-attention and highlight sets
//! - [`groups`] — per-department, per-status and per-employee tables and the
//!   best department

pub mod groups;
pub mod summary;

use serde::Serialize;

use gt_goal::{Department, Goal};

pub use groups::{best_department, by_department, by_employee, by_status, GroupRow};
pub use summary::{
    count_by_department, count_by_status, highlights, needs_attention, overview,
    progress_summary, round1, CategoryCount, Overview, ProgressSummary, ATTENTION_THRESHOLD,
    HIGHLIGHT_THRESHOLD,
};

/// Every snapshot-wide view in one serializable value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotReport {
    pub overview: Overview,
    pub by_status: Vec<CategoryCount>,
    pub by_department: Vec<CategoryCount>,
    pub needs_attention: Vec<i64>,
    pub highlights: Vec<i64>,
    pub best_department: Option<BestDepartment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestDepartment {
    pub department: Department,
    pub mean_progress: f64,
}

impl SnapshotReport {
    pub fn build(goals: &[Goal]) -> Self {
        Self {
            overview: overview(goals),
            by_status: count_by_status(goals),
            by_department: count_by_department(goals),
            needs_attention: needs_attention(goals).iter().map(|g| g.id).collect(),
            highlights: highlights(goals).iter().map(|g| g.id).collect(),
            best_department: best_department(goals).map(|(department, mean_progress)| {
                BestDepartment {
                    department,
                    mean_progress,
                }
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use gt_goal::{Department, Goal, GoalStatus, NewGoal};

    pub fn goal(
        id: i64,
        employee: &str,
        department: Department,
        status: GoalStatus,
        progress: u8,
    ) -> Goal {
        NewGoal::new(
            employee,
            department,
            "Quarterly objective",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        )
        .with_status(status)
        .with_progress(progress)
        .into_goal(id)
    }
}
