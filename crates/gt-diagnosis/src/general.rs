// general.rs — Diagnosis of a stored goal from its status and progress.
//
// Status decides first:
//   Completed      → success, nothing else checked
//   Not Completed  → failure, nothing else checked
//   Delayed        → warning, plus an urgent flag below 50%
//   In Progress    → tiered by progress, first match wins:
//                    ≥80 excellent, ≥60 good, ≥40 moderate, else low
//
// Recommendations are a separate lookup keyed on progress alone.

use std::fmt;

use serde::Serialize;

use gt_goal::{Goal, GoalStatus, MAX_PROGRESS};

use crate::report::{DiagnosisReport, Finding, Severity};

/// Outcome of the status/progress check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalOutcome {
    Achieved,
    Missed,
    Delayed,
    Excellent,
    Good,
    Moderate,
    Low,
}

impl fmt::Display for GoalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalOutcome::Achieved => write!(f, "achieved"),
            GoalOutcome::Missed => write!(f, "missed"),
            GoalOutcome::Delayed => write!(f, "delayed"),
            GoalOutcome::Excellent => write!(f, "excellent"),
            GoalOutcome::Good => write!(f, "good"),
            GoalOutcome::Moderate => write!(f, "moderate"),
            GoalOutcome::Low => write!(f, "low"),
        }
    }
}

/// Tier of an in-progress goal. Lower bounds are inclusive.
pub fn progress_tier(progress: u8) -> GoalOutcome {
    match progress {
        80.. => GoalOutcome::Excellent,
        60..=79 => GoalOutcome::Good,
        40..=59 => GoalOutcome::Moderate,
        _ => GoalOutcome::Low,
    }
}

/// Progress bands used to pick recommendation copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationBand {
    /// Below 25%.
    Critical,
    /// 25% up to 50%.
    Behind,
    /// 50% up to 80%.
    OnTrack,
    /// 80% and above.
    NearlyDone,
}

impl RecommendationBand {
    pub fn for_progress(progress: u8) -> Self {
        match progress {
            0..=24 => RecommendationBand::Critical,
            25..=49 => RecommendationBand::Behind,
            50..=79 => RecommendationBand::OnTrack,
            _ => RecommendationBand::NearlyDone,
        }
    }

    pub fn recommendations(self) -> &'static [&'static str] {
        match self {
            RecommendationBand::Critical => &[
                "Hold an immediate meeting to review the goal and its obstacles",
                "Break the goal into smaller weekly milestones",
                "Check whether the goal needs more resources or a new deadline",
                "Set up daily follow-up until progress recovers",
            ],
            RecommendationBand::Behind => &[
                "Review priorities and remove tasks that compete with the goal",
                "Schedule weekly check-ins with the manager",
                "Identify the main blocker and agree on a plan to remove it",
            ],
            RecommendationBand::OnTrack => &[
                "Keep the current pace and follow-up routine",
                "Anticipate risks that could slow the final stretch",
                "Share partial results with the team",
            ],
            RecommendationBand::NearlyDone => &[
                "Plan the closing steps and confirm the delivery criteria",
                "Document lessons learned for future goals",
                "Recognize the employee's performance",
            ],
        }
    }
}

/// Recommendation copy for a progress value.
pub fn recommendations_for(progress: u8) -> &'static [&'static str] {
    RecommendationBand::for_progress(progress).recommendations()
}

/// Diagnose a goal from its status and progress.
pub fn evaluate_progress(status: GoalStatus, progress: u8) -> DiagnosisReport<GoalOutcome> {
    let mut findings = Vec::new();
    let outcome = match status {
        GoalStatus::Completed => {
            findings.push(Finding::new(
                Severity::Success,
                "Goal completed successfully.",
            ));
            GoalOutcome::Achieved
        }
        GoalStatus::NotCompleted => {
            findings.push(Finding::new(
                Severity::Error,
                "Goal was not completed within its period.",
            ));
            GoalOutcome::Missed
        }
        GoalStatus::Delayed => {
            findings.push(Finding::new(
                Severity::Warning,
                format!("Goal is delayed with {}% progress.", progress),
            ));
            if progress < 50 {
                findings.push(Finding::new(
                    Severity::Error,
                    "Delayed goal below 50% progress: urgent intervention required.",
                ));
            }
            GoalOutcome::Delayed
        }
        GoalStatus::InProgress => {
            let tier = progress_tier(progress);
            let finding = match tier {
                GoalOutcome::Excellent => Finding::new(
                    Severity::Success,
                    format!("Excellent progress ({}%): the goal is close to completion.", progress),
                ),
                GoalOutcome::Good => Finding::new(
                    Severity::Info,
                    format!("Good progress ({}%): the goal is on track.", progress),
                ),
                GoalOutcome::Moderate => Finding::new(
                    Severity::Warning,
                    format!("Moderate progress ({}%): the pace needs to accelerate.", progress),
                ),
                _ => Finding::new(
                    Severity::Error,
                    format!("Low progress ({}%): the goal needs an urgent review.", progress),
                ),
            };
            findings.push(finding);
            tier
        }
    };

    let suggestions = recommendations_for(progress)
        .iter()
        .map(|s| s.to_string())
        .collect();

    DiagnosisReport::new(
        findings,
        suggestions,
        u32::from(progress.min(MAX_PROGRESS)),
        u32::from(MAX_PROGRESS),
        outcome,
    )
}

/// Diagnose a stored goal.
pub fn evaluate_goal(goal: &Goal) -> DiagnosisReport<GoalOutcome> {
    evaluate_progress(goal.status, goal.progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_progress_tiers_at_boundaries() {
        let cases = [
            (0, GoalOutcome::Low),
            (39, GoalOutcome::Low),
            (40, GoalOutcome::Moderate),
            (59, GoalOutcome::Moderate),
            (60, GoalOutcome::Good),
            (79, GoalOutcome::Good),
            (80, GoalOutcome::Excellent),
            (100, GoalOutcome::Excellent),
        ];
        for (progress, expected) in cases {
            let report = evaluate_progress(GoalStatus::InProgress, progress);
            assert_eq!(report.band, expected, "progress {}", progress);
            assert_eq!(report.findings.len(), 1);
        }
    }

    #[test]
    fn completed_is_terminal_success() {
        let report = evaluate_progress(GoalStatus::Completed, 30);
        assert_eq!(report.band, GoalOutcome::Achieved);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].severity, Severity::Success);
    }

    #[test]
    fn not_completed_is_terminal_failure() {
        let report = evaluate_progress(GoalStatus::NotCompleted, 90);
        assert_eq!(report.band, GoalOutcome::Missed);
        assert_eq!(report.findings.len(), 1);
        assert!(report.has(Severity::Error));
    }

    #[test]
    fn delayed_adds_urgent_flag_below_fifty() {
        let report = evaluate_progress(GoalStatus::Delayed, 49);
        assert_eq!(report.findings.len(), 2);
        assert!(report.findings[0].message.contains("49%"));
        assert_eq!(report.findings[1].severity, Severity::Error);

        let report = evaluate_progress(GoalStatus::Delayed, 50);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.band, GoalOutcome::Delayed);
    }

    #[test]
    fn recommendation_bands_at_boundaries() {
        assert_eq!(RecommendationBand::for_progress(0), RecommendationBand::Critical);
        assert_eq!(RecommendationBand::for_progress(24), RecommendationBand::Critical);
        assert_eq!(RecommendationBand::for_progress(25), RecommendationBand::Behind);
        assert_eq!(RecommendationBand::for_progress(49), RecommendationBand::Behind);
        assert_eq!(RecommendationBand::for_progress(50), RecommendationBand::OnTrack);
        assert_eq!(RecommendationBand::for_progress(79), RecommendationBand::OnTrack);
        assert_eq!(RecommendationBand::for_progress(80), RecommendationBand::NearlyDone);
    }

    #[test]
    fn report_score_is_progress_over_hundred() {
        let report = evaluate_progress(GoalStatus::InProgress, 65);
        assert_eq!((report.points, report.out_of), (65, 100));
        assert_eq!(report.score, 65.0);
        assert_eq!(
            report.suggestions,
            recommendations_for(65)
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
        );
    }
}
