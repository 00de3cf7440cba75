// goal.rs — Goal: one employee performance-goal record.
//
// A Goal is the only entity in the tracker. Department and status are closed
// enumerations whose canonical labels are what gets stored and compared:
// matching is exact and case-sensitive, never normalized.
//
// Writes go through two typed inputs instead of free-form field maps:
// - NewGoal   — everything needed to insert a row
// - GoalPatch — the optional subset of fields an update may change

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// Highest value the progress percentage may take.
pub const MAX_PROGRESS: u8 = 100;

/// The nine departments a goal can belong to.
///
/// Declaration order is the canonical ordering used by reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    Sales,
    Marketing,
    #[serde(rename = "HR")]
    Hr,
    Finance,
    #[serde(rename = "IT")]
    It,
    Operations,
    Administrative,
    Production,
    Logistics,
}

impl Department {
    pub const ALL: [Department; 9] = [
        Department::Sales,
        Department::Marketing,
        Department::Hr,
        Department::Finance,
        Department::It,
        Department::Operations,
        Department::Administrative,
        Department::Production,
        Department::Logistics,
    ];

    /// The canonical label stored in the `department` column.
    pub fn label(self) -> &'static str {
        match self {
            Department::Sales => "Sales",
            Department::Marketing => "Marketing",
            Department::Hr => "HR",
            Department::Finance => "Finance",
            Department::It => "IT",
            Department::Operations => "Operations",
            Department::Administrative => "Administrative",
            Department::Production => "Production",
            Department::Logistics => "Logistics",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.label() == s)
            .ok_or_else(|| {
                let valid: Vec<&str> = Department::ALL.iter().map(|d| d.label()).collect();
                format!("Invalid department: '{}'. Valid departments: {}", s, valid.join(", "))
            })
    }
}

/// Where a goal stands.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum GoalStatus {
    #[default]
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "Not Completed")]
    NotCompleted,
    Delayed,
}

impl GoalStatus {
    pub const ALL: [GoalStatus; 4] = [
        GoalStatus::InProgress,
        GoalStatus::Completed,
        GoalStatus::NotCompleted,
        GoalStatus::Delayed,
    ];

    /// The canonical label stored in the `status` column.
    pub fn label(self) -> &'static str {
        match self {
            GoalStatus::InProgress => "In Progress",
            GoalStatus::Completed => "Completed",
            GoalStatus::NotCompleted => "Not Completed",
            GoalStatus::Delayed => "Delayed",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GoalStatus::ALL
            .into_iter()
            .find(|st| st.label() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid status: '{}'. Valid statuses: In Progress, Completed, Not Completed, Delayed",
                    s
                )
            })
    }
}

/// A stored goal record.
///
/// Field order matches the `metas` column order, which is also the column
/// order of the delimited export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Assigned on insert, never changes.
    pub id: i64,
    pub employee_name: String,
    pub department: Department,
    pub goal_description: String,
    pub start_date: NaiveDate,
    /// Not required to fall on or after `start_date`.
    pub end_date: NaiveDate,
    pub status: GoalStatus,
    /// Completion percentage, 0–100.
    pub progress: u8,
    /// Reserved column; nothing writes it.
    pub completion_date: Option<NaiveDate>,
    /// Bullet list written by the individual-goal diagnosis.
    pub diagnosis: Option<String>,
    pub suggestions: Option<String>,
}

/// Everything needed to insert a goal. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGoal {
    pub employee_name: String,
    pub department: Department,
    pub goal_description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub progress: u8,
}

impl NewGoal {
    /// A new goal with the default status (In Progress) and 0% progress.
    pub fn new(
        employee_name: impl Into<String>,
        department: Department,
        goal_description: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            employee_name: employee_name.into(),
            department,
            goal_description: goal_description.into(),
            start_date,
            end_date,
            status: GoalStatus::default(),
            progress: 0,
        }
    }

    pub fn with_status(mut self, status: GoalStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress;
        self
    }

    /// Reject blank text fields and out-of-range progress.
    pub fn validate(&self) -> Result<(), GoalError> {
        require_text("employee_name", &self.employee_name)?;
        require_text("goal_description", &self.goal_description)?;
        require_progress(self.progress)
    }

    /// Materialize the stored record once an id has been assigned.
    pub fn into_goal(self, id: i64) -> Goal {
        Goal {
            id,
            employee_name: self.employee_name,
            department: self.department,
            goal_description: self.goal_description,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            progress: self.progress,
            completion_date: None,
            diagnosis: None,
            suggestions: None,
        }
    }
}

/// The fields an update may change. `None` leaves the column untouched.
///
/// `id` and `completion_date` are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalPatch {
    pub employee_name: Option<String>,
    pub department: Option<Department>,
    pub goal_description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<GoalStatus>,
    pub progress: Option<u8>,
    pub diagnosis: Option<String>,
    pub suggestions: Option<String>,
}

impl GoalPatch {
    /// Patch that only moves the progress.
    pub fn progress(progress: u8) -> Self {
        Self {
            progress: Some(progress),
            ..Self::default()
        }
    }

    /// Patch that records a diagnosis/suggestions pair.
    pub fn diagnosis(diagnosis: impl Into<String>, suggestions: impl Into<String>) -> Self {
        Self {
            diagnosis: Some(diagnosis.into()),
            suggestions: Some(suggestions.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Same rules as [`NewGoal::validate`], applied to the supplied fields only.
    pub fn validate(&self) -> Result<(), GoalError> {
        if let Some(ref name) = self.employee_name {
            require_text("employee_name", name)?;
        }
        if let Some(ref description) = self.goal_description {
            require_text("goal_description", description)?;
        }
        if let Some(progress) = self.progress {
            require_progress(progress)?;
        }
        if let Some(ref diagnosis) = self.diagnosis {
            require_text("diagnosis", diagnosis)?;
        }
        if let Some(ref suggestions) = self.suggestions {
            require_text("suggestions", suggestions)?;
        }
        Ok(())
    }

    /// Apply the supplied fields to an in-memory record.
    pub fn apply_to(&self, goal: &mut Goal) {
        if let Some(ref v) = self.employee_name {
            goal.employee_name = v.clone();
        }
        if let Some(v) = self.department {
            goal.department = v;
        }
        if let Some(ref v) = self.goal_description {
            goal.goal_description = v.clone();
        }
        if let Some(v) = self.start_date {
            goal.start_date = v;
        }
        if let Some(v) = self.end_date {
            goal.end_date = v;
        }
        if let Some(v) = self.status {
            goal.status = v;
        }
        if let Some(v) = self.progress {
            goal.progress = v;
        }
        if let Some(ref v) = self.diagnosis {
            goal.diagnosis = Some(v.clone());
        }
        if let Some(ref v) = self.suggestions {
            goal.suggestions = Some(v.clone());
        }
    }
}

/// Exact-match filter over department and/or status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoalFilter {
    pub department: Option<Department>,
    pub status: Option<GoalStatus>,
}

impl GoalFilter {
    pub fn matches(&self, goal: &Goal) -> bool {
        self.department.map_or(true, |d| d == goal.department)
            && self.status.map_or(true, |s| s == goal.status)
    }

    /// Keep only the goals this filter accepts.
    pub fn apply(&self, goals: Vec<Goal>) -> Vec<Goal> {
        goals.into_iter().filter(|g| self.matches(g)).collect()
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), GoalError> {
    if value.trim().is_empty() {
        return Err(GoalError::validation(field, "must not be empty"));
    }
    Ok(())
}

fn require_progress(progress: u8) -> Result<(), GoalError> {
    if progress > MAX_PROGRESS {
        return Err(GoalError::validation(
            "progress",
            format!("{} is outside 0-{}", progress, MAX_PROGRESS),
        ));
    }
    Ok(())
}
