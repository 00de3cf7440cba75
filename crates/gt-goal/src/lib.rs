//! # gt-goal
//!
//! Goal records and their persistence for Goal Tracker.
//!
//! A [`Goal`] is one employee performance goal: owner, department,
//! description, date range, status and completion percentage, plus the
//! diagnosis text written back by the individual-goal evaluator.
//!
//! ## Key components
//!
//! - [`Goal`], [`NewGoal`], [`GoalPatch`] — the record, its insert form and
//!   its typed partial update
//! - [`GoalStore`] — the CRUD seam every other crate depends on
//! - [`SqliteGoalStore`] — the `metas` table, one connection per call
//! - [`MemoryGoalStore`] — an in-memory fake for tests
//! - [`export_csv`] / [`import_csv`] — delimited snapshot of the table

pub mod error;
pub mod export;
pub mod goal;
pub mod sqlite;
pub mod store;

pub use error::GoalError;
pub use export::{export_csv, export_csv_string, import_csv};
pub use goal::{Department, Goal, GoalFilter, GoalPatch, GoalStatus, NewGoal, MAX_PROGRESS};
pub use sqlite::SqliteGoalStore;
pub use store::{GoalStore, MemoryGoalStore};
