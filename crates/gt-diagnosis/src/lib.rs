//! # gt-diagnosis
//!
//! Rule-based diagnosis for Goal Tracker.
//!
//! Every evaluator is a decision table, not a model: the same answers always
//! produce the same [`DiagnosisReport`] (ordered findings, ordered
//! suggestions, a score over a fixed denominator and a band).
//!
//! ## Evaluators
//!
//! - [`evaluate_goal`] / [`evaluate_progress`] — a stored goal's status and
//!   progress
//! - [`evaluate_org`] — the organizational questionnaire (7 ordered rules,
//!   score over 6 ideal answers)
//! - [`evaluate_individual`] — the 8-question Yes/No questionnaire about one
//!   goal; [`record_individual_diagnosis`] also writes the result back
//!   through a [`gt_goal::GoalStore`]

mod choice;
pub mod error;
pub mod general;
pub mod individual;
pub mod org;
pub mod report;

pub use error::DiagnosisError;
pub use general::{
    evaluate_goal, evaluate_progress, progress_tier, recommendations_for, GoalOutcome,
    RecommendationBand,
};
pub use individual::{
    evaluate_individual, record_individual_diagnosis, IndividualAnswers, IndividualDiagnosis,
    IndividualRule, RiskBand, YesNo, INDIVIDUAL_RULES,
};
pub use org::{
    evaluate_org, CommunicationClarity, DeadlineRealism, HealthBand, ManagementSupport,
    OrgDiagnosis, OrgQuestionnaire, OrgRule, RecognitionFrequency, ResourceAdequacy,
    TeamMotivation, TrainingCompleteness, ORG_RULES,
};
pub use report::{bullet_list, DiagnosisReport, Finding, Severity};
