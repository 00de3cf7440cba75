// report.rs — DiagnosisReport: what every evaluator returns.
//
// A report is plain data: ordered findings, ordered suggestions, a score
// expressed both as points over a fixed denominator and as a percentage, and
// a band label. Rendering is left to the caller.

use std::fmt;

use serde::Serialize;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One flagged condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Structured output of an evaluator, generic over its band type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisReport<B> {
    pub findings: Vec<Finding>,
    pub suggestions: Vec<String>,
    /// Points scored.
    pub points: u32,
    /// Fixed denominator for `points`.
    pub out_of: u32,
    /// `points / out_of × 100`, one decimal place.
    pub score: f64,
    pub band: B,
}

impl<B> DiagnosisReport<B> {
    pub(crate) fn new(
        findings: Vec<Finding>,
        suggestions: Vec<String>,
        points: u32,
        out_of: u32,
        band: B,
    ) -> Self {
        Self {
            findings,
            suggestions,
            points,
            out_of,
            score: percentage(points, out_of),
            band,
        }
    }

    /// Whether any finding has the given severity.
    pub fn has(&self, severity: Severity) -> bool {
        self.findings.iter().any(|f| f.severity == severity)
    }
}

pub(crate) fn percentage(points: u32, out_of: u32) -> f64 {
    if out_of == 0 {
        return 0.0;
    }
    (f64::from(points) / f64::from(out_of) * 1000.0).round() / 10.0
}

/// Join lines into a bullet list, one item per line.
pub fn bullet_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|s| format!("• {}", s.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(percentage(4, 6), 66.7);
        assert_eq!(percentage(6, 6), 100.0);
        assert_eq!(percentage(0, 8), 0.0);
        assert_eq!(percentage(1, 0), 0.0);
    }

    #[test]
    fn bullet_list_keeps_order() {
        assert_eq!(bullet_list(&["b", "a"]), "• b\n• a");
        assert_eq!(bullet_list::<&str>(&[]), "");
    }

    #[test]
    fn severity_serializes_snake_case() {
        let json = serde_json::to_string(&Finding::new(Severity::Warning, "x")).unwrap();
        assert_eq!(json, r#"{"severity":"warning","message":"x"}"#);
    }
}
