// org.rs — Organizational questionnaire: rule firings plus a health score.
//
// Two independent computations over the same answers:
//
// 1. Rules. An ordered table; every rule whose predicate holds contributes
//    one finding and one suggestion. Rules are not exclusive.
// 2. Score. Of the six scored questions, how many were answered with that
//    question's ideal option, as a percentage of six. Banded:
//      ≥80 excellent, ≥60 good, ≥40 attention needed, else critical
//
// The score never looks at which rules fired.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::choice::choice_enum;
use crate::report::{DiagnosisReport, Finding, Severity};

choice_enum! {
    /// Are the resources needed for the goals available?
    ResourceAdequacy, "resources" {
        Full => "Yes, fully",
        Partial => "Partially",
        Lacking => "None, lacking resources",
    }
}

choice_enum! {
    /// How clearly are goals communicated?
    CommunicationClarity, "communication" {
        VeryClear => "Very clear",
        Clear => "Clear",
        Unclear => "Unclear",
        Confusing => "Confusing",
    }
}

choice_enum! {
    /// Are the deadlines realistic?
    DeadlineRealism, "deadlines" {
        Realistic => "Realistic",
        Tight => "Tight",
        VeryTight => "Very tight",
        Impossible => "Impossible",
    }
}

choice_enum! {
    /// How much support does management give?
    ManagementSupport, "management" {
        Full => "Full support",
        Partial => "Partial support",
        Little => "Little support",
        NoSupport => "No support",
    }
}

choice_enum! {
    /// Did the team receive the training the goals require?
    TrainingCompleteness, "training" {
        Complete => "Complete",
        Partial => "Partial",
        Insufficient => "Insufficient",
        NoTraining => "None",
    }
}

choice_enum! {
    /// How motivated is the team?
    TeamMotivation, "motivation" {
        VeryHigh => "Very high",
        High => "High",
        Moderate => "Moderate",
        Low => "Low",
        VeryLow => "Very low",
    }
}

choice_enum! {
    /// How often are results acknowledged?
    RecognitionFrequency, "recognition" {
        Frequently => "Frequently",
        Occasionally => "Occasionally",
        Rarely => "Rarely",
    }
}

/// Answers to the organizational questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgQuestionnaire {
    pub resources: ResourceAdequacy,
    pub communication: CommunicationClarity,
    pub deadlines: DeadlineRealism,
    pub management: ManagementSupport,
    pub training: TrainingCompleteness,
    pub motivation: TeamMotivation,
    /// Asked alongside the scored questions but not part of the score.
    pub recognition: RecognitionFrequency,
    #[serde(default)]
    pub obstacles: Vec<String>,
    #[serde(default)]
    pub improvement_areas: Vec<String>,
    #[serde(default)]
    pub comments: String,
}

impl OrgQuestionnaire {
    /// Every scored question answered with its ideal option.
    pub fn ideal() -> Self {
        Self {
            resources: ResourceAdequacy::Full,
            communication: CommunicationClarity::VeryClear,
            deadlines: DeadlineRealism::Realistic,
            management: ManagementSupport::Full,
            training: TrainingCompleteness::Complete,
            motivation: TeamMotivation::VeryHigh,
            recognition: RecognitionFrequency::Frequently,
            obstacles: Vec::new(),
            improvement_areas: Vec::new(),
            comments: String::new(),
        }
    }

    /// Number of scored questions (out of [`SCORED_QUESTIONS`]) answered ideally.
    pub fn ideal_answers(&self) -> u32 {
        [
            self.resources == ResourceAdequacy::Full,
            self.communication == CommunicationClarity::VeryClear,
            self.deadlines == DeadlineRealism::Realistic,
            self.management == ManagementSupport::Full,
            self.training == TrainingCompleteness::Complete,
            self.motivation == TeamMotivation::VeryHigh,
        ]
        .into_iter()
        .filter(|ideal| *ideal)
        .count() as u32
    }
}

/// Denominator of the organizational score.
pub const SCORED_QUESTIONS: u32 = 6;

/// Health band of the organizational score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Excellent,
    Good,
    AttentionNeeded,
    Critical,
}

impl HealthBand {
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            HealthBand::Excellent
        } else if score >= 60.0 {
            HealthBand::Good
        } else if score >= 40.0 {
            HealthBand::AttentionNeeded
        } else {
            HealthBand::Critical
        }
    }
}

impl fmt::Display for HealthBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthBand::Excellent => write!(f, "excellent"),
            HealthBand::Good => write!(f, "good"),
            HealthBand::AttentionNeeded => write!(f, "attention needed"),
            HealthBand::Critical => write!(f, "critical"),
        }
    }
}

/// One row of the rule table.
pub struct OrgRule {
    pub name: &'static str,
    pub applies: fn(&OrgQuestionnaire) -> bool,
    pub severity: Severity,
    pub finding: fn(&OrgQuestionnaire) -> String,
    pub suggestion: &'static str,
}

/// The rule table, in evaluation order.
pub const ORG_RULES: &[OrgRule] = &[
    OrgRule {
        name: "resources",
        applies: |q| matches!(q.resources, ResourceAdequacy::Lacking | ResourceAdequacy::Partial),
        severity: Severity::Warning,
        finding: |_| "Resource deficiency: the team lacks what it needs to reach its goals.".into(),
        suggestion: "Review the budget and reallocate resources to the priority goals.",
    },
    OrgRule {
        name: "communication",
        applies: |q| {
            matches!(
                q.communication,
                CommunicationClarity::Unclear | CommunicationClarity::Confusing
            )
        },
        severity: Severity::Error,
        finding: |_| "Communication problem: goals are not understood by the team.".into(),
        suggestion: "Rewrite goals in SMART form and present them in a team meeting.",
    },
    OrgRule {
        name: "deadlines",
        applies: |q| matches!(q.deadlines, DeadlineRealism::VeryTight | DeadlineRealism::Impossible),
        severity: Severity::Error,
        finding: |_| "Unrealistic deadlines: the schedule cannot be met as planned.".into(),
        suggestion: "Renegotiate deadlines based on the team's actual capacity.",
    },
    OrgRule {
        name: "management",
        applies: |q| matches!(q.management, ManagementSupport::Little | ManagementSupport::NoSupport),
        severity: Severity::Error,
        finding: |_| "Insufficient management support for the goals.".into(),
        suggestion: "Set up regular one-on-ones between managers and their teams.",
    },
    OrgRule {
        name: "motivation",
        applies: |q| matches!(q.motivation, TeamMotivation::Low | TeamMotivation::VeryLow),
        severity: Severity::Warning,
        finding: |_| "Low team motivation.".into(),
        suggestion: "Introduce recognition and incentive actions tied to goal progress.",
    },
    OrgRule {
        name: "obstacles",
        applies: |q| !q.obstacles.is_empty(),
        severity: Severity::Info,
        finding: |q| format!("Reported obstacles: {}.", q.obstacles.join(", ")),
        suggestion: "Build an action plan that addresses each reported obstacle.",
    },
    OrgRule {
        name: "recognition",
        applies: |q| q.recognition == RecognitionFrequency::Rarely,
        severity: Severity::Warning,
        finding: |_| "Results are rarely acknowledged.".into(),
        suggestion: "Create a regular ritual for recognizing achieved results.",
    },
];

/// Org questionnaire result: the report plus the echoed free-form inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrgDiagnosis {
    pub report: DiagnosisReport<HealthBand>,
    /// Names of the rules that fired, in table order.
    pub fired: Vec<&'static str>,
    pub improvement_areas: Vec<String>,
    pub comments: String,
}

/// Run every rule and compute the health score.
pub fn evaluate_org(answers: &OrgQuestionnaire) -> OrgDiagnosis {
    let mut findings = Vec::new();
    let mut suggestions = Vec::new();
    let mut fired = Vec::new();

    for rule in ORG_RULES {
        if (rule.applies)(answers) {
            findings.push(Finding::new(rule.severity, (rule.finding)(answers)));
            suggestions.push(rule.suggestion.to_string());
            fired.push(rule.name);
        }
    }

    let points = answers.ideal_answers();
    let score = crate::report::percentage(points, SCORED_QUESTIONS);
    let band = HealthBand::for_score(score);
    tracing::debug!(points, ?band, rules = fired.len(), "org questionnaire evaluated");

    OrgDiagnosis {
        report: DiagnosisReport::new(findings, suggestions, points, SCORED_QUESTIONS, band),
        fired,
        improvement_areas: answers.improvement_areas.clone(),
        comments: answers.comments.clone(),
    }
}
