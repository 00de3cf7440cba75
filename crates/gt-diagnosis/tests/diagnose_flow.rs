// diagnose_flow.rs — Diagnosis against a real goal table.
//
// Flow:
//   1. create goals in a SQLite store
//   2. run the general evaluator over the snapshot
//   3. run the individual questionnaire and record it on one goal
//   4. try to record on a deleted goal
//
// VERIFY: the recorded text lands in the goal's columns, the other fields
// are untouched, and a missing goal is reported as not found.

use chrono::NaiveDate;
use tempfile::tempdir;

use gt_diagnosis::{
    evaluate_goal, record_individual_diagnosis, DiagnosisError, GoalOutcome, IndividualAnswers,
    RiskBand, YesNo,
};
use gt_goal::{Department, GoalError, GoalStatus, GoalStore, NewGoal, SqliteGoalStore};

#[test]
fn diagnose_and_record_against_sqlite() {
    let dir = tempdir().unwrap();
    let store = SqliteGoalStore::open(dir.path().join("metas.db")).unwrap();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

    let slow = store
        .create(
            NewGoal::new("Davi", Department::Operations, "Cut lead time", start, end)
                .with_status(GoalStatus::Delayed)
                .with_progress(20),
        )
        .unwrap();
    let fast = store
        .create(
            NewGoal::new("Eva", Department::Marketing, "Grow leads 30%", start, end)
                .with_progress(85),
        )
        .unwrap();

    // General evaluator over the snapshot.
    let snapshot = store.list_all().unwrap();
    let outcomes: Vec<GoalOutcome> = snapshot.iter().map(|g| evaluate_goal(g).band).collect();
    assert_eq!(outcomes, vec![GoalOutcome::Delayed, GoalOutcome::Excellent]);
    assert_eq!(evaluate_goal(&snapshot[0]).findings.len(), 2);

    // Individual questionnaire, recorded on the slow goal.
    let answers = IndividualAnswers::parse_list("n,n,y,y,y,y,n,y").unwrap();
    let result = record_individual_diagnosis(&store, slow, &answers).unwrap();
    assert_eq!(result.report.band, RiskBand::High);
    assert_eq!(answers.0[3], YesNo::Yes);

    let recorded = store.get(slow).unwrap();
    assert_eq!(
        recorded.diagnosis.as_deref(),
        Some("• Possibly unrealistic goal\n• Resource shortage\n• Possible burnout")
    );
    assert_eq!(recorded.suggestions.as_deref(), Some(result.suggestions_text.as_str()));
    assert_eq!(recorded.progress, 20);
    assert_eq!(recorded.status, GoalStatus::Delayed);
    assert!(store.get(fast).unwrap().diagnosis.is_none());

    // Recording on a deleted goal fails without side effects.
    store.delete(fast).unwrap();
    let missing = record_individual_diagnosis(&store, fast, &answers);
    assert!(matches!(
        missing,
        Err(DiagnosisError::Store(GoalError::NotFound(id))) if id == fast
    ));
    assert_eq!(store.list_all().unwrap().len(), 1);
}
