// individual.rs — Yes/No questionnaire about a single goal.
//
// Eight questions, each with a trigger answer. A question whose answer equals
// its trigger contributes a diagnosis label and a suggestion. Matches are
// joined in question order into two bullet lists; with no match a fixed
// "no critical problem" pair is used instead.
//
// Risk score = matches / 8 × 100:
//   0 low, (0,25] moderate, (25,50] high, >50 critical
//
// `record_individual_diagnosis` writes the two lists back into the goal's
// diagnosis/suggestions columns.

use std::fmt;

use serde::{Deserialize, Serialize};

use gt_goal::{GoalPatch, GoalStore};

use crate::choice::choice_enum;
use crate::error::DiagnosisError;
use crate::report::{bullet_list, DiagnosisReport, Finding, Severity};

choice_enum! {
    /// Answer to an individual-goal question.
    YesNo, "individual" {
        Yes => "Yes",
        No => "No",
    }
}

impl YesNo {
    /// Lenient parse for command-line input: `y`/`yes`/`n`/`no`, any case.
    pub fn parse_flag(s: &str) -> Result<Self, DiagnosisError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(YesNo::Yes),
            "n" | "no" => Ok(YesNo::No),
            _ => Err(DiagnosisError::InvalidAnswer {
                question: YesNo::QUESTION,
                value: s.to_string(),
                expected: "Yes, No".to_string(),
            }),
        }
    }
}

/// Number of questions in the individual questionnaire.
pub const QUESTION_COUNT: usize = 8;

/// One row of the individual rule table.
#[derive(Debug, Clone, Copy)]
pub struct IndividualRule {
    pub question: &'static str,
    pub trigger: YesNo,
    pub diagnosis: &'static str,
    pub suggestion: &'static str,
}

/// The rule table, in question order.
pub const INDIVIDUAL_RULES: [IndividualRule; QUESTION_COUNT] = [
    IndividualRule {
        question: "Is the goal realistic?",
        trigger: YesNo::No,
        diagnosis: "Possibly unrealistic goal",
        suggestion: "Revisit the goal's scope and deadline with the employee",
    },
    IndividualRule {
        question: "Are the available resources sufficient?",
        trigger: YesNo::No,
        diagnosis: "Resource shortage",
        suggestion: "Provide the tools, budget or people the goal requires",
    },
    IndividualRule {
        question: "Does the employee show signs of engagement?",
        trigger: YesNo::No,
        diagnosis: "Low motivation",
        suggestion: "Talk with the employee about what drives them and connect the goal to it",
    },
    IndividualRule {
        question: "Are there signs of overload or burnout?",
        trigger: YesNo::Yes,
        diagnosis: "Possible burnout",
        suggestion: "Redistribute workload and check on the employee's well-being",
    },
    IndividualRule {
        question: "Does the employee receive regular feedback?",
        trigger: YesNo::No,
        diagnosis: "Lack of feedback",
        suggestion: "Schedule periodic feedback sessions",
    },
    IndividualRule {
        question: "Are expectations clear?",
        trigger: YesNo::No,
        diagnosis: "Lack of clarity",
        suggestion: "Restate the expected results and how they will be measured",
    },
    IndividualRule {
        question: "Did unexpected changes occur during the period?",
        trigger: YesNo::Yes,
        diagnosis: "Unexpected disruptions",
        suggestion: "Adjust the goal to reflect the changes that occurred",
    },
    IndividualRule {
        question: "Did the employee take part in setting the goal?",
        trigger: YesNo::No,
        diagnosis: "Imposed goal",
        suggestion: "Involve the employee in defining the next goals",
    },
];

/// Diagnosis text used when no rule matches.
pub const NO_PROBLEM_DIAGNOSIS: &str = "No critical problem identified";

/// Suggestion text used when no rule matches.
pub const NO_PROBLEM_SUGGESTION: &str = "Keep the current follow-up routine";

/// Answers to the eight questions, in question order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndividualAnswers(pub [YesNo; QUESTION_COUNT]);

impl IndividualAnswers {
    /// Parse a comma-separated list such as `y,n,yes,no,...`.
    pub fn parse_list(s: &str) -> Result<Self, DiagnosisError> {
        let answers = s
            .split(',')
            .map(YesNo::parse_flag)
            .collect::<Result<Vec<_>, _>>()?;
        let actual = answers.len();
        let answers: [YesNo; QUESTION_COUNT] =
            answers.try_into().map_err(|_| DiagnosisError::AnswerCount {
                expected: QUESTION_COUNT,
                actual,
            })?;
        Ok(Self(answers))
    }
}

/// Risk band of the individual questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskBand {
    pub fn for_score(score: f64) -> Self {
        if score <= 0.0 {
            RiskBand::Low
        } else if score <= 25.0 {
            RiskBand::Moderate
        } else if score <= 50.0 {
            RiskBand::High
        } else {
            RiskBand::Critical
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskBand::Low => write!(f, "low"),
            RiskBand::Moderate => write!(f, "moderate"),
            RiskBand::High => write!(f, "high"),
            RiskBand::Critical => write!(f, "critical"),
        }
    }
}

/// Result of the individual questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndividualDiagnosis {
    pub report: DiagnosisReport<RiskBand>,
    /// Matched diagnosis labels, in question order.
    pub diagnoses: Vec<&'static str>,
    /// Bullet list stored in the goal's `diagnosis` column.
    pub diagnosis_text: String,
    /// Bullet list stored in the goal's `suggestions` column.
    pub suggestions_text: String,
}

/// Evaluate the eight answers. Pure; touches no store.
pub fn evaluate_individual(answers: &IndividualAnswers) -> IndividualDiagnosis {
    let matched: Vec<&IndividualRule> = INDIVIDUAL_RULES
        .iter()
        .zip(answers.0)
        .filter(|(rule, answer)| rule.trigger == *answer)
        .map(|(rule, _)| rule)
        .collect();

    let diagnoses: Vec<&'static str> = matched.iter().map(|r| r.diagnosis).collect();
    let suggestions: Vec<&'static str> = matched.iter().map(|r| r.suggestion).collect();

    let (findings, diagnosis_text, suggestions_text) = if matched.is_empty() {
        (
            vec![Finding::new(Severity::Success, NO_PROBLEM_DIAGNOSIS)],
            bullet_list(&[NO_PROBLEM_DIAGNOSIS]),
            bullet_list(&[NO_PROBLEM_SUGGESTION]),
        )
    } else {
        (
            diagnoses
                .iter()
                .map(|d| Finding::new(Severity::Warning, *d))
                .collect(),
            bullet_list(&diagnoses),
            bullet_list(&suggestions),
        )
    };

    let report_suggestions = if matched.is_empty() {
        vec![NO_PROBLEM_SUGGESTION.to_string()]
    } else {
        suggestions.iter().map(|s| s.to_string()).collect()
    };

    let points = matched.len() as u32;
    let score = crate::report::percentage(points, QUESTION_COUNT as u32);
    let band = RiskBand::for_score(score);

    IndividualDiagnosis {
        report: DiagnosisReport::new(
            findings,
            report_suggestions,
            points,
            QUESTION_COUNT as u32,
            band,
        ),
        diagnoses,
        diagnosis_text,
        suggestions_text,
    }
}

/// Evaluate the answers and store the result on goal `id`.
///
/// Fails with [`gt_goal::GoalError::NotFound`] (wrapped) when the goal does
/// not exist; nothing is written in that case.
pub fn record_individual_diagnosis<S: GoalStore + ?Sized>(
    store: &S,
    id: i64,
    answers: &IndividualAnswers,
) -> Result<IndividualDiagnosis, DiagnosisError> {
    let result = evaluate_individual(answers);
    store.update(
        id,
        &GoalPatch::diagnosis(&result.diagnosis_text, &result.suggestions_text),
    )?;
    tracing::info!(
        id,
        band = %result.report.band,
        matches = result.diagnoses.len(),
        "diagnosis recorded"
    );
    Ok(result)
}
