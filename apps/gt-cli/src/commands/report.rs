// report.rs — Report subcommands over a (filtered) goal snapshot.

use anyhow::Context;
use clap::{Args, Subcommand};
use gt_goal::{Department, Goal, GoalFilter, GoalStatus, GoalStore, SqliteGoalStore};
use gt_report::{
    by_department, by_employee, by_status, highlights, needs_attention, GroupRow, SnapshotReport,
    ATTENTION_THRESHOLD, HIGHLIGHT_THRESHOLD,
};

use crate::commands::goal::print_goal_table;
use crate::config::TrackerConfig;

/// Snapshot selection and output format shared by every report.
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Only goals of this department.
    #[arg(long)]
    department: Option<Department>,
    /// Only goals with this status.
    #[arg(long)]
    status: Option<GoalStatus>,
    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

impl ReportArgs {
    fn filter(&self) -> GoalFilter {
        GoalFilter {
            department: self.department,
            status: self.status,
        }
    }
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Totals, completion rate, progress statistics and best department.
    Summary(ReportArgs),
    /// Statistics per department.
    Departments(ReportArgs),
    /// Statistics per status.
    Statuses(ReportArgs),
    /// Statistics per employee.
    Employees(ReportArgs),
    /// Active goals below 50% progress.
    Attention(ReportArgs),
    /// Goals at or above 80% progress.
    Highlights(ReportArgs),
}

pub fn execute(cmd: &ReportCommands, config: &TrackerConfig) -> anyhow::Result<()> {
    let store = SqliteGoalStore::open(&config.db_path)
        .with_context(|| format!("opening goal table at {}", config.db_path.display()))?;
    run(&store, cmd)
}

fn run(store: &impl GoalStore, cmd: &ReportCommands) -> anyhow::Result<()> {
    match cmd {
        ReportCommands::Summary(args) => {
            let goals = snapshot(store, args)?;
            let report = SnapshotReport::build(&goals);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&report);
            }
            Ok(())
        }
        ReportCommands::Departments(args) => {
            group_report(store, args, "DEPARTMENT", by_department)
        }
        ReportCommands::Statuses(args) => group_report(store, args, "STATUS", by_status),
        ReportCommands::Employees(args) => group_report(store, args, "EMPLOYEE", by_employee),
        ReportCommands::Attention(args) => {
            let goals = snapshot(store, args)?;
            let selected = needs_attention(&goals);
            list_report(
                &selected,
                args.json,
                &format!("No active goals below {}% progress.", ATTENTION_THRESHOLD),
            )
        }
        ReportCommands::Highlights(args) => {
            let goals = snapshot(store, args)?;
            let selected = highlights(&goals);
            list_report(
                &selected,
                args.json,
                &format!("No goals at or above {}% progress.", HIGHLIGHT_THRESHOLD),
            )
        }
    }
}

fn snapshot(store: &impl GoalStore, args: &ReportArgs) -> anyhow::Result<Vec<Goal>> {
    let goals = store.list_filtered(args.filter())?;
    tracing::debug!(count = goals.len(), "loaded report snapshot");
    Ok(goals)
}

fn print_summary(report: &SnapshotReport) {
    let o = &report.overview;
    println!("Total goals:     {}", o.total);
    println!("In progress:     {}", o.in_progress);
    println!("Completed:       {}", o.completed);
    println!("Not completed:   {}", o.not_completed);
    println!("Delayed:         {}", o.delayed);
    println!("Completion rate: {:.1}%", o.completion_rate);
    match o.progress {
        Some(p) => println!(
            "Progress:        mean {:.1}%, min {}%, max {}%",
            p.mean, p.min, p.max
        ),
        None => println!("Progress:        n/a"),
    }

    if !report.by_status.is_empty() {
        println!("\nBy status:");
        for c in &report.by_status {
            println!("  {:<15} {:>4}  ({:.1}%)", c.label, c.count, c.percent);
        }
    }
    if !report.by_department.is_empty() {
        println!("\nBy department:");
        for c in &report.by_department {
            println!("  {:<15} {:>4}  ({:.1}%)", c.label, c.count, c.percent);
        }
    }

    println!("\nNeeds attention: {}", report.needs_attention.len());
    println!("Highlights:      {}", report.highlights.len());
    if let Some(ref best) = report.best_department {
        println!(
            "Best department: {} ({:.1}% mean progress)",
            best.department, best.mean_progress
        );
    }
}

fn group_report(
    store: &impl GoalStore,
    args: &ReportArgs,
    heading: &str,
    group: fn(&[Goal]) -> Vec<GroupRow>,
) -> anyhow::Result<()> {
    let goals = snapshot(store, args)?;
    let rows = group(&goals);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No goals found.");
        return Ok(());
    }

    println!(
        "{:<22} {:>6} {:>8} {:>5} {:>5} {:>10} {:>9}",
        heading, "GOALS", "MEAN %", "MIN", "MAX", "COMPLETED", "SUCCESS %"
    );
    println!("{}", "-".repeat(71));
    for r in &rows {
        println!(
            "{:<22} {:>6} {:>8.1} {:>5} {:>5} {:>10} {:>9.1}",
            r.key,
            r.count,
            r.mean_progress,
            r.min_progress,
            r.max_progress,
            r.completed,
            r.success_rate
        );
    }
    Ok(())
}

fn list_report(goals: &[&Goal], json: bool, empty_message: &str) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(goals)?);
        return Ok(());
    }

    if goals.is_empty() {
        println!("{}", empty_message);
        return Ok(());
    }

    print_goal_table(goals.iter().copied());
    println!("\n{} goal(s).", goals.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gt_goal::{MemoryGoalStore, NewGoal};

    fn seeded() -> MemoryGoalStore {
        let store = MemoryGoalStore::new();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        for (name, dept, status, progress) in [
            ("Ana", Department::Sales, GoalStatus::InProgress, 30),
            ("Bia", Department::Sales, GoalStatus::Completed, 100),
            ("Caio", Department::It, GoalStatus::Delayed, 45),
        ] {
            store
                .create(
                    NewGoal::new(name, dept, "Quarterly target", start, end)
                        .with_status(status)
                        .with_progress(progress),
                )
                .unwrap();
        }
        store
    }

    #[test]
    fn every_report_runs_on_a_seeded_store() {
        let store = seeded();
        for cmd in [
            ReportCommands::Summary(ReportArgs::default()),
            ReportCommands::Departments(ReportArgs::default()),
            ReportCommands::Statuses(ReportArgs::default()),
            ReportCommands::Employees(ReportArgs::default()),
            ReportCommands::Attention(ReportArgs::default()),
            ReportCommands::Highlights(ReportArgs::default()),
        ] {
            run(&store, &cmd).unwrap();
        }
    }

    #[test]
    fn reports_handle_an_empty_table() {
        let store = MemoryGoalStore::new();
        let json = ReportArgs {
            json: true,
            ..ReportArgs::default()
        };
        run(&store, &ReportCommands::Summary(json.clone())).unwrap();
        run(&store, &ReportCommands::Departments(ReportArgs::default())).unwrap();
        run(&store, &ReportCommands::Attention(json)).unwrap();
    }

    #[test]
    fn snapshot_applies_the_filter() {
        let store = seeded();
        let args = ReportArgs {
            department: Some(Department::Sales),
            status: None,
            json: false,
        };
        let goals = snapshot(&store, &args).unwrap();
        assert_eq!(goals.len(), 2);
        assert!(goals.iter().all(|g| g.department == Department::Sales));

        let args = ReportArgs {
            department: Some(Department::Sales),
            status: Some(GoalStatus::Completed),
            json: false,
        };
        assert_eq!(snapshot(&store, &args).unwrap().len(), 1);
    }
}
