// store.rs — GoalStore: the data-access seam for goal records.
//
// Everything above the store (reports, diagnosis, the CLI) talks to this
// trait, never to SQLite directly. Two implementations ship:
// - SqliteGoalStore (sqlite.rs) — the durable `metas` table
// - MemoryGoalStore (below)      — a Vec-backed fake for tests
//
// Contract shared by both:
// - ids are assigned on insert, ascending, never reused
// - list_all is ordered by ascending id
// - get/update/delete on a missing id return GoalError::NotFound

use std::sync::Mutex;

use crate::error::GoalError;
use crate::goal::{Goal, GoalFilter, GoalPatch, NewGoal};

/// CRUD access to goal records.
pub trait GoalStore {
    /// Insert a goal and return its assigned id.
    fn create(&self, goal: NewGoal) -> Result<i64, GoalError>;

    /// All goals, ordered by ascending id. Empty when none exist.
    fn list_all(&self) -> Result<Vec<Goal>, GoalError>;

    /// Fetch a single goal.
    fn get(&self, id: i64) -> Result<Goal, GoalError>;

    /// Change only the fields present in `patch`.
    fn update(&self, id: i64, patch: &GoalPatch) -> Result<(), GoalError>;

    /// Hard-delete a goal.
    fn delete(&self, id: i64) -> Result<(), GoalError>;

    /// List-all followed by an exact-match department/status filter.
    fn list_filtered(&self, filter: GoalFilter) -> Result<Vec<Goal>, GoalError> {
        Ok(filter.apply(self.list_all()?))
    }
}

/// In-memory goal store.
///
/// Behaves like the SQLite store (validation, id assignment, NotFound) but
/// keeps rows in a `Vec`, so higher layers can be tested without a database.
#[derive(Debug, Default)]
pub struct MemoryGoalStore {
    inner: Mutex<MemoryTable>,
}

#[derive(Debug, Default)]
struct MemoryTable {
    rows: Vec<Goal>,
    last_id: i64,
}

impl MemoryGoalStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> std::sync::MutexGuard<'_, MemoryTable> {
        // A poisoned lock only means a test panicked mid-write; the rows are still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl GoalStore for MemoryGoalStore {
    fn create(&self, goal: NewGoal) -> Result<i64, GoalError> {
        goal.validate()?;
        let mut table = self.table();
        table.last_id += 1;
        let id = table.last_id;
        table.rows.push(goal.into_goal(id));
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<Goal>, GoalError> {
        // Rows are pushed with increasing ids, so insertion order is id order.
        Ok(self.table().rows.clone())
    }

    fn get(&self, id: i64) -> Result<Goal, GoalError> {
        self.table()
            .rows
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or(GoalError::NotFound(id))
    }

    fn update(&self, id: i64, patch: &GoalPatch) -> Result<(), GoalError> {
        patch.validate()?;
        let mut table = self.table();
        let goal = table
            .rows
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(GoalError::NotFound(id))?;
        patch.apply_to(goal);
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), GoalError> {
        let mut table = self.table();
        let before = table.rows.len();
        table.rows.retain(|g| g.id != id);
        if table.rows.len() == before {
            return Err(GoalError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::{Department, GoalStatus};
    use chrono::NaiveDate;

    fn make_goal(name: &str, department: Department) -> NewGoal {
        NewGoal::new(
            name,
            department,
            "Improve onboarding",
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        )
    }

    #[test]
    fn create_then_get_round_trip() {
        let store = MemoryGoalStore::new();
        let input = make_goal("Bruno", Department::Hr).with_progress(30);
        let id = store.create(input.clone()).unwrap();

        let found = store.get(id).unwrap();
        assert_eq!(found, input.into_goal(id));
    }

    #[test]
    fn ids_keep_ascending_after_delete() {
        let store = MemoryGoalStore::new();
        let a = store.create(make_goal("A", Department::It)).unwrap();
        let b = store.create(make_goal("B", Department::It)).unwrap();
        store.delete(b).unwrap();
        let c = store.create(make_goal("C", Department::It)).unwrap();
        assert!(c > b && b > a);

        let ids: Vec<i64> = store.list_all().unwrap().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn missing_ids_report_not_found() {
        let store = MemoryGoalStore::new();
        assert!(matches!(store.get(42), Err(GoalError::NotFound(42))));
        assert!(matches!(
            store.update(42, &GoalPatch::progress(10)),
            Err(GoalError::NotFound(42))
        ));
        assert!(matches!(store.delete(42), Err(GoalError::NotFound(42))));
    }

    #[test]
    fn invalid_create_leaves_store_empty() {
        let store = MemoryGoalStore::new();
        let result = store.create(make_goal("", Department::Sales));
        assert!(matches!(result, Err(GoalError::Validation { .. })));
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn list_filtered_matches_exactly() {
        let store = MemoryGoalStore::new();
        store.create(make_goal("A", Department::Sales)).unwrap();
        store
            .create(make_goal("B", Department::Sales).with_status(GoalStatus::Delayed))
            .unwrap();
        store.create(make_goal("C", Department::Finance)).unwrap();

        let sales = store
            .list_filtered(GoalFilter {
                department: Some(Department::Sales),
                status: None,
            })
            .unwrap();
        assert_eq!(sales.len(), 2);

        let delayed_sales = store
            .list_filtered(GoalFilter {
                department: Some(Department::Sales),
                status: Some(GoalStatus::Delayed),
            })
            .unwrap();
        assert_eq!(delayed_sales.len(), 1);
        assert_eq!(delayed_sales[0].employee_name, "B");
    }
}
