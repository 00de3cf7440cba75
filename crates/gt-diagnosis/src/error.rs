// error.rs — Error types for diagnosis input and write-back.

use gt_goal::GoalError;
use thiserror::Error;

/// Errors that can occur while reading answers or recording a diagnosis.
#[derive(Debug, Error)]
pub enum DiagnosisError {
    /// An answer is not one of the options its question offers.
    #[error("invalid answer for {question}: '{value}' (expected one of: {expected})")]
    InvalidAnswer {
        question: &'static str,
        value: String,
        expected: String,
    },

    /// The individual questionnaire needs exactly one answer per question.
    #[error("expected {expected} answers, got {actual}")]
    AnswerCount { expected: usize, actual: usize },

    /// Writing the diagnosis back to the goal failed.
    #[error(transparent)]
    Store(#[from] GoalError),
}
