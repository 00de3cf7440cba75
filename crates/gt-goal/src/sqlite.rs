// sqlite.rs — SqliteGoalStore: the durable `metas` table.
//
// Every call opens its own connection, runs a single statement and drops the
// connection on return (including the error path). There is no transaction
// spanning calls, so concurrent writers to the same id are last-write-wins.
//
// Dates are stored as `YYYY-MM-DD` text; department and status as their
// canonical labels.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use crate::error::GoalError;
use crate::goal::{Goal, GoalPatch, NewGoal};
use crate::store::GoalStore;

const DATE_FORMAT: &str = "%Y-%m-%d";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS metas (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_name TEXT NOT NULL,
        department TEXT NOT NULL,
        goal_description TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        status TEXT NOT NULL,
        progress INTEGER NOT NULL,
        completion_date TEXT,
        diagnosis TEXT,
        suggestions TEXT
    )
";

const SELECT_COLUMNS: &str = "SELECT id, employee_name, department, goal_description, \
     start_date, end_date, status, progress, completion_date, diagnosis, suggestions FROM metas";

/// Goal store backed by a SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteGoalStore {
    db_path: PathBuf,
}

impl SqliteGoalStore {
    /// Open (or create) the database at `db_path` and make sure the `metas`
    /// table exists. Creates the parent directory if needed.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, GoalError> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let store = Self { db_path };
        store.connect()?.execute_batch(SCHEMA)?;
        tracing::debug!(path = %store.db_path.display(), "goal table ready");
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, GoalError> {
        Ok(Connection::open(&self.db_path)?)
    }
}

impl GoalStore for SqliteGoalStore {
    fn create(&self, goal: NewGoal) -> Result<i64, GoalError> {
        goal.validate()?;
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO metas (employee_name, department, goal_description, start_date, \
             end_date, status, progress) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                goal.employee_name,
                goal.department.label(),
                goal.goal_description,
                format_date(goal.start_date),
                format_date(goal.end_date),
                goal.status.label(),
                i64::from(goal.progress),
            ],
        )?;
        let id = conn.last_insert_rowid();
        tracing::info!(id, employee = %goal.employee_name, "goal created");
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<Goal>, GoalError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))?;
        let rows = stmt
            .query_map([], RawGoal::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = rows.len(), "listed goals");
        rows.into_iter().map(RawGoal::into_goal).collect()
    }

    fn get(&self, id: i64) -> Result<Goal, GoalError> {
        let conn = self.connect()?;
        let raw = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                RawGoal::from_row,
            )
            .optional()?;
        raw.ok_or(GoalError::NotFound(id))?.into_goal()
    }

    fn update(&self, id: i64, patch: &GoalPatch) -> Result<(), GoalError> {
        patch.validate()?;
        let assignments = patch_assignments(patch);
        if assignments.is_empty() {
            // Nothing to write, but the id must still exist.
            self.get(id)?;
            return Ok(());
        }

        let set_clause: Vec<String> = assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ?{}", column, i + 1))
            .collect();
        let sql = format!(
            "UPDATE metas SET {} WHERE id = ?{}",
            set_clause.join(", "),
            assignments.len() + 1
        );
        let values = assignments
            .into_iter()
            .map(|(_, value)| value)
            .chain(std::iter::once(Value::Integer(id)));

        let conn = self.connect()?;
        let changed = conn.execute(&sql, params_from_iter(values))?;
        if changed == 0 {
            tracing::warn!(id, "update matched no goal");
            return Err(GoalError::NotFound(id));
        }
        tracing::info!(id, "goal updated");
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), GoalError> {
        let conn = self.connect()?;
        let changed = conn.execute("DELETE FROM metas WHERE id = ?1", params![id])?;
        if changed == 0 {
            tracing::warn!(id, "delete matched no goal");
            return Err(GoalError::NotFound(id));
        }
        tracing::info!(id, "goal deleted");
        Ok(())
    }
}

/// Column/value pairs for the fields present in a patch, in schema order.
/// Column names come from this fixed list only; values are always bound.
fn patch_assignments(patch: &GoalPatch) -> Vec<(&'static str, Value)> {
    let mut out = Vec::new();
    if let Some(ref v) = patch.employee_name {
        out.push(("employee_name", Value::Text(v.clone())));
    }
    if let Some(v) = patch.department {
        out.push(("department", Value::Text(v.label().to_string())));
    }
    if let Some(ref v) = patch.goal_description {
        out.push(("goal_description", Value::Text(v.clone())));
    }
    if let Some(v) = patch.start_date {
        out.push(("start_date", Value::Text(format_date(v))));
    }
    if let Some(v) = patch.end_date {
        out.push(("end_date", Value::Text(format_date(v))));
    }
    if let Some(v) = patch.status {
        out.push(("status", Value::Text(v.label().to_string())));
    }
    if let Some(v) = patch.progress {
        out.push(("progress", Value::Integer(i64::from(v))));
    }
    if let Some(ref v) = patch.diagnosis {
        out.push(("diagnosis", Value::Text(v.clone())));
    }
    if let Some(ref v) = patch.suggestions {
        out.push(("suggestions", Value::Text(v.clone())));
    }
    out
}

/// A row as SQLite returns it, before labels and dates are parsed.
struct RawGoal {
    id: i64,
    employee_name: String,
    department: String,
    goal_description: String,
    start_date: String,
    end_date: String,
    status: String,
    progress: i64,
    completion_date: Option<String>,
    diagnosis: Option<String>,
    suggestions: Option<String>,
}

impl RawGoal {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            employee_name: row.get(1)?,
            department: row.get(2)?,
            goal_description: row.get(3)?,
            start_date: row.get(4)?,
            end_date: row.get(5)?,
            status: row.get(6)?,
            progress: row.get(7)?,
            completion_date: row.get(8)?,
            diagnosis: row.get(9)?,
            suggestions: row.get(10)?,
        })
    }

    fn into_goal(self) -> Result<Goal, GoalError> {
        let id = self.id;
        let corrupt = |reason: String| GoalError::Corrupt { id, reason };

        let progress = u8::try_from(self.progress)
            .map_err(|_| corrupt(format!("progress {} out of range", self.progress)))?;
        let completion_date = self
            .completion_date
            .as_deref()
            .map(|s| parse_date(id, s))
            .transpose()?;

        Ok(Goal {
            id,
            employee_name: self.employee_name,
            department: self.department.parse().map_err(corrupt)?,
            goal_description: self.goal_description,
            start_date: parse_date(id, &self.start_date)?,
            end_date: parse_date(id, &self.end_date)?,
            status: self.status.parse().map_err(corrupt)?,
            progress,
            completion_date,
            diagnosis: self.diagnosis,
            suggestions: self.suggestions,
        })
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(id: i64, s: &str) -> Result<NaiveDate, GoalError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| GoalError::Corrupt {
        id,
        reason: format!("date '{}': {}", s, e),
    })
}
