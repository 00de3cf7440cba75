// diagnose.rs — Diagnose subcommands: goal, org, individual, questions.

use std::fmt::Display;

use anyhow::Context;
use clap::Subcommand;
use gt_diagnosis::{
    evaluate_goal, evaluate_individual, evaluate_org, record_individual_diagnosis,
    CommunicationClarity, DeadlineRealism, DiagnosisReport, IndividualAnswers,
    IndividualDiagnosis, ManagementSupport, OrgDiagnosis, OrgQuestionnaire, RecognitionFrequency,
    ResourceAdequacy, TeamMotivation, TrainingCompleteness, INDIVIDUAL_RULES,
};
use gt_goal::{GoalStore, SqliteGoalStore};

use crate::config::TrackerConfig;

#[derive(Subcommand)]
pub enum DiagnoseCommands {
    /// Evaluate a stored goal's status and progress.
    Goal {
        /// Goal ID.
        id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Evaluate the organizational questionnaire (not stored).
    Org {
        /// Are resources sufficient? ("Yes, fully", "Partially", "None, lacking resources")
        #[arg(long)]
        resources: ResourceAdequacy,
        /// How clear is communication? ("Very clear", "Clear", "Unclear", "Confusing")
        #[arg(long)]
        communication: CommunicationClarity,
        /// Are deadlines realistic? ("Realistic", "Tight", "Very tight", "Impossible")
        #[arg(long)]
        deadlines: DeadlineRealism,
        /// Management support ("Full support", "Partial support", "Little support", "No support")
        #[arg(long)]
        management: ManagementSupport,
        /// Training received ("Complete", "Partial", "Insufficient", "None")
        #[arg(long)]
        training: TrainingCompleteness,
        /// Team motivation ("Very high", "High", "Moderate", "Low", "Very low")
        #[arg(long)]
        motivation: TeamMotivation,
        /// Recognition of results ("Frequently", "Occasionally", "Rarely")
        #[arg(long)]
        recognition: RecognitionFrequency,
        /// An obstacle the team faces (repeatable).
        #[arg(long = "obstacle")]
        obstacles: Vec<String>,
        /// An area to improve (repeatable).
        #[arg(long = "improvement")]
        improvement_areas: Vec<String>,
        /// Free-form comments.
        #[arg(long, default_value = "")]
        comments: String,
        #[arg(long)]
        json: bool,
    },
    /// Answer the 8 Yes/No questions about a goal and record the result on it.
    Individual {
        /// Goal ID.
        id: i64,
        /// Eight comma-separated answers in question order (e.g., "y,n,y,y,n,n,y,y").
        #[arg(long)]
        answers: String,
        /// Evaluate without writing to the goal.
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        json: bool,
    },
    /// List the individual questionnaire in answer order.
    Questions,
}

pub fn execute(cmd: &DiagnoseCommands, config: &TrackerConfig) -> anyhow::Result<()> {
    match cmd {
        DiagnoseCommands::Goal { id, json } => {
            let store = open_store(config)?;
            diagnose_goal(&store, *id, *json)
        }
        DiagnoseCommands::Org {
            resources,
            communication,
            deadlines,
            management,
            training,
            motivation,
            recognition,
            obstacles,
            improvement_areas,
            comments,
            json,
        } => {
            let answers = OrgQuestionnaire {
                resources: *resources,
                communication: *communication,
                deadlines: *deadlines,
                management: *management,
                training: *training,
                motivation: *motivation,
                recognition: *recognition,
                obstacles: obstacles.clone(),
                improvement_areas: improvement_areas.clone(),
                comments: comments.clone(),
            };
            diagnose_org(&answers, *json)
        }
        DiagnoseCommands::Individual {
            id,
            answers,
            dry_run,
            json,
        } => {
            let store = open_store(config)?;
            diagnose_individual(&store, *id, answers, *dry_run, *json).map(|_| ())
        }
        DiagnoseCommands::Questions => {
            list_questions();
            Ok(())
        }
    }
}

fn open_store(config: &TrackerConfig) -> anyhow::Result<SqliteGoalStore> {
    SqliteGoalStore::open(&config.db_path)
        .with_context(|| format!("opening goal table at {}", config.db_path.display()))
}

fn diagnose_goal(store: &impl GoalStore, id: i64, json: bool) -> anyhow::Result<()> {
    let goal = store.get(id)?;
    let report = evaluate_goal(&goal);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Goal {}: {} ({}, {}%)",
        goal.id, goal.employee_name, goal.status, goal.progress
    );
    print_report(&report, "progress");
    Ok(())
}

fn diagnose_org(answers: &OrgQuestionnaire, json: bool) -> anyhow::Result<()> {
    let result = evaluate_org(answers);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_org(&result);
    Ok(())
}

fn print_org(result: &OrgDiagnosis) {
    print_report(&result.report, "organizational health");
    if !result.improvement_areas.is_empty() {
        println!("\nImprovement areas:");
        for area in &result.improvement_areas {
            println!("  - {}", area);
        }
    }
    if !result.comments.trim().is_empty() {
        println!("\nComments:\n  {}", result.comments.trim());
    }
}

fn diagnose_individual(
    store: &impl GoalStore,
    id: i64,
    answers: &str,
    dry_run: bool,
    json: bool,
) -> anyhow::Result<IndividualDiagnosis> {
    let answers = IndividualAnswers::parse_list(answers)?;

    let result = if dry_run {
        store.get(id)?;
        evaluate_individual(&answers)
    } else {
        record_individual_diagnosis(store, id, &answers)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(result);
    }

    println!("Answers:");
    for (rule, answer) in INDIVIDUAL_RULES.iter().zip(answers.0) {
        println!("  {:<50} {}", rule.question, answer);
    }
    println!(
        "\nRisk: {} ({} of {} questions flagged, {:.1}%)",
        result.report.band, result.report.points, result.report.out_of, result.report.score
    );
    println!("\nDiagnosis:\n{}", result.diagnosis_text);
    println!("\nSuggestions:\n{}", result.suggestions_text);
    if dry_run {
        println!("\n(dry run: goal {} not modified)", id);
    } else {
        println!("\nRecorded on goal {}.", id);
    }
    Ok(result)
}

fn print_report<B: Display>(report: &DiagnosisReport<B>, score_name: &str) {
    println!(
        "Result: {} ({} {:.1}%, {}/{})",
        report.band, score_name, report.score, report.points, report.out_of
    );

    if !report.findings.is_empty() {
        println!("\nFindings:");
        for f in &report.findings {
            println!("  [{}] {}", f.severity, f.message);
        }
    }
    if !report.suggestions.is_empty() {
        println!("\nSuggestions:");
        for s in &report.suggestions {
            println!("  - {}", s);
        }
    }
}

fn list_questions() {
    for (i, rule) in INDIVIDUAL_RULES.iter().enumerate() {
        println!("{}. {} (flags on \"{}\")", i + 1, rule.question, rule.trigger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gt_diagnosis::{DiagnosisError, RiskBand};
    use gt_goal::{Department, GoalError, GoalStatus, MemoryGoalStore, NewGoal};

    fn store_with_goal() -> (MemoryGoalStore, i64) {
        let store = MemoryGoalStore::new();
        let id = store
            .create(
                NewGoal::new(
                    "Ana",
                    Department::Hr,
                    "Reduce onboarding time",
                    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                    NaiveDate::from_ymd_opt(2024, 8, 31).unwrap(),
                )
                .with_status(GoalStatus::Delayed)
                .with_progress(35),
            )
            .unwrap();
        (store, id)
    }

    #[test]
    fn individual_records_on_the_goal() {
        let (store, id) = store_with_goal();
        let result = diagnose_individual(&store, id, "y,y,y,n,y,y,n,y", false, false).unwrap();
        assert_eq!(result.report.band, RiskBand::Low);

        let goal = store.get(id).unwrap();
        assert_eq!(goal.diagnosis.as_deref(), Some(result.diagnosis_text.as_str()));
        assert_eq!(goal.suggestions.as_deref(), Some(result.suggestions_text.as_str()));
    }

    #[test]
    fn dry_run_leaves_the_goal_untouched() {
        let (store, id) = store_with_goal();
        let result = diagnose_individual(&store, id, "n,n,n,n,n,n,n,n", true, true).unwrap();
        assert_eq!(result.diagnoses.len(), 6);
        assert!(store.get(id).unwrap().diagnosis.is_none());
    }

    #[test]
    fn dry_run_still_requires_the_goal() {
        let (store, _) = store_with_goal();
        let err = diagnose_individual(&store, 99, "y,y,y,y,y,y,y,y", true, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GoalError>(),
            Some(GoalError::NotFound(99))
        ));
    }

    #[test]
    fn individual_rejects_short_answer_lists() {
        let (store, id) = store_with_goal();
        let err = diagnose_individual(&store, id, "y,n,y", false, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiagnosisError>(),
            Some(DiagnosisError::AnswerCount { .. })
        ));
        assert!(store.get(id).unwrap().diagnosis.is_none());
    }

    #[test]
    fn goal_and_org_reports_run() {
        let (store, id) = store_with_goal();
        diagnose_goal(&store, id, false).unwrap();
        diagnose_goal(&store, id, true).unwrap();
        assert!(diagnose_goal(&store, id + 1, false).is_err());

        let mut answers = OrgQuestionnaire::ideal();
        answers.obstacles.push("Legacy tooling".to_string());
        answers.comments = "Mostly fine".to_string();
        diagnose_org(&answers, false).unwrap();
        diagnose_org(&answers, true).unwrap();
    }
}
