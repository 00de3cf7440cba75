// export.rs — Delimited snapshot of the goal table.
//
// One header row with the `metas` column names, then one row per goal in the
// order given. Fields are quoted only when they contain the delimiter, quotes
// or newlines (diagnosis text is multi-line). Optional columns are written as
// empty fields and read back as `None`.

use std::io::{Read, Write};

use crate::error::GoalError;
use crate::goal::Goal;

/// Column header, in schema order.
pub const COLUMNS: [&str; 11] = [
    "id",
    "employee_name",
    "department",
    "goal_description",
    "start_date",
    "end_date",
    "status",
    "progress",
    "completion_date",
    "diagnosis",
    "suggestions",
];

/// Write `goals` as delimited text to `writer`.
pub fn export_csv<W: Write>(goals: &[Goal], writer: W, delimiter: u8) -> Result<(), GoalError> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .from_writer(writer);
    // Written explicitly so an empty table still gets a header.
    out.write_record(COLUMNS)?;
    for goal in goals {
        out.serialize(goal)?;
    }
    out.flush()?;
    tracing::debug!(count = goals.len(), "exported goals");
    Ok(())
}

/// Parse text produced by [`export_csv`] back into records.
pub fn import_csv<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Goal>, GoalError> {
    let mut input = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);
    let goals = input.deserialize().collect::<Result<Vec<Goal>, _>>()?;
    Ok(goals)
}

/// Convenience wrapper returning the export as a `String`.
pub fn export_csv_string(goals: &[Goal], delimiter: u8) -> Result<String, GoalError> {
    let mut buf = Vec::new();
    export_csv(goals, &mut buf, delimiter)?;
    String::from_utf8(buf).map_err(|e| {
        GoalError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::{Department, GoalStatus, NewGoal};
    use chrono::NaiveDate;

    fn sample_goals() -> Vec<Goal> {
        let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
        let first = NewGoal::new("Ana", Department::Sales, "Close 20 deals", d(1, 1), d(6, 30))
            .with_progress(90)
            .into_goal(1);
        let mut second = NewGoal::new(
            "Rui, Jr.",
            Department::It,
            "Migrate the \"legacy\" servers",
            d(2, 1),
            d(1, 15),
        )
        .with_status(GoalStatus::Delayed)
        .with_progress(20)
        .into_goal(3);
        second.diagnosis = Some("• Resource shortage\n• Possible burnout".to_string());
        second.suggestions = Some("• Reallocate budget\n• Redistribute work".to_string());
        vec![first, second]
    }

    #[test]
    fn header_row_comes_first() {
        let text = export_csv_string(&sample_goals(), b',').unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, COLUMNS.join(","));
    }

    #[test]
    fn empty_table_still_has_header() {
        let text = export_csv_string(&[], b',').unwrap();
        assert_eq!(text.trim_end(), COLUMNS.join(","));
        assert!(import_csv(text.as_bytes(), b',').unwrap().is_empty());
    }

    #[test]
    fn export_then_import_preserves_records() {
        let goals = sample_goals();
        let text = export_csv_string(&goals, b',').unwrap();
        let parsed = import_csv(text.as_bytes(), b',').unwrap();
        assert_eq!(parsed, goals);
    }

    #[test]
    fn alternate_delimiter_round_trips() {
        let goals = sample_goals();
        let text = export_csv_string(&goals, b';').unwrap();
        assert!(text.starts_with("id;employee_name;"));
        let parsed = import_csv(text.as_bytes(), b';').unwrap();
        assert_eq!(parsed, goals);
    }

    #[test]
    fn labels_are_written_verbatim() {
        let text = export_csv_string(&sample_goals(), b',').unwrap();
        assert!(text.contains(",Delayed,"));
        assert!(text.contains(",IT,"));
        assert!(text.contains("2024-02-01"));
    }
}
