// goal.rs — Goal subcommands: add, list, show, update, delete, export.

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::Subcommand;
use gt_goal::{
    export_csv, Department, Goal, GoalFilter, GoalPatch, GoalStatus, GoalStore, NewGoal,
    SqliteGoalStore,
};

use crate::config::TrackerConfig;

#[derive(Subcommand)]
pub enum GoalCommands {
    /// Record a new goal.
    Add {
        /// Employee who owns the goal.
        #[arg(long)]
        employee: String,
        /// Department (e.g., "Sales", "HR", "IT").
        #[arg(long)]
        department: Department,
        /// What the goal is.
        #[arg(long)]
        description: String,
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,
        /// End date (YYYY-MM-DD).
        #[arg(long)]
        end: NaiveDate,
        /// Initial status.
        #[arg(long, default_value = "In Progress")]
        status: GoalStatus,
        /// Initial progress percentage.
        #[arg(long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: u8,
    },
    /// List goals, optionally filtered.
    List {
        /// Only goals of this department.
        #[arg(long)]
        department: Option<Department>,
        /// Only goals with this status.
        #[arg(long)]
        status: Option<GoalStatus>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show every field of one goal.
    Show {
        /// Goal ID.
        id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Change some fields of a goal.
    Update {
        /// Goal ID.
        id: i64,
        #[arg(long)]
        employee: Option<String>,
        #[arg(long)]
        department: Option<Department>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        #[arg(long)]
        status: Option<GoalStatus>,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: Option<u8>,
    },
    /// Permanently delete a goal.
    Delete {
        /// Goal ID.
        id: i64,
    },
    /// Write every goal as delimited text.
    Export {
        /// Output file (defaults to stdout).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

pub fn execute(cmd: &GoalCommands, config: &TrackerConfig) -> anyhow::Result<()> {
    let store = SqliteGoalStore::open(&config.db_path)
        .with_context(|| format!("opening goal table at {}", config.db_path.display()))?;

    match cmd {
        GoalCommands::Add {
            employee,
            department,
            description,
            start,
            end,
            status,
            progress,
        } => {
            let goal = NewGoal::new(
                employee.as_str(),
                *department,
                description.as_str(),
                *start,
                *end,
            )
            .with_status(*status)
            .with_progress(*progress);
            add_goal(&store, goal).map(|_| ())
        }
        GoalCommands::List {
            department,
            status,
            json,
        } => list_goals(
            &store,
            GoalFilter {
                department: *department,
                status: *status,
            },
            *json,
        ),
        GoalCommands::Show { id, json } => show_goal(&store, *id, *json),
        GoalCommands::Update {
            id,
            employee,
            department,
            description,
            start,
            end,
            status,
            progress,
        } => {
            let patch = GoalPatch {
                employee_name: employee.clone(),
                department: *department,
                goal_description: description.clone(),
                start_date: *start,
                end_date: *end,
                status: *status,
                progress: *progress,
                ..GoalPatch::default()
            };
            update_goal(&store, *id, &patch)
        }
        GoalCommands::Delete { id } => delete_goal(&store, *id),
        GoalCommands::Export { out } => {
            export_goals(&store, out.as_deref(), config.export_delimiter)
        }
    }
}

fn add_goal(store: &impl GoalStore, goal: NewGoal) -> anyhow::Result<i64> {
    let employee = goal.employee_name.clone();
    let id = store.create(goal)?;
    println!("Goal added: {} ({})", id, employee);
    Ok(id)
}

fn list_goals(store: &impl GoalStore, filter: GoalFilter, json: bool) -> anyhow::Result<()> {
    let goals = store.list_filtered(filter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&goals)?);
        return Ok(());
    }

    if goals.is_empty() {
        println!("No goals found.");
        return Ok(());
    }

    print_goal_table(&goals);
    println!("\n{} goal(s) total.", goals.len());
    Ok(())
}

pub(crate) fn print_goal_table<'a>(goals: impl IntoIterator<Item = &'a Goal>) {
    println!(
        "{:<6} {:<20} {:<15} {:<30} {:<14} {:>8}",
        "ID", "EMPLOYEE", "DEPARTMENT", "GOAL", "STATUS", "PROGRESS"
    );
    println!("{}", "-".repeat(98));

    for g in goals {
        println!(
            "{:<6} {:<20} {:<15} {:<30} {:<14} {:>7}%",
            g.id,
            truncate(&g.employee_name, 18),
            g.department,
            truncate(&g.goal_description, 28),
            g.status,
            g.progress,
        );
    }
}

fn show_goal(store: &impl GoalStore, id: i64, json: bool) -> anyhow::Result<()> {
    let g = store.get(id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&g)?);
        return Ok(());
    }

    println!("Goal:        {}", g.id);
    println!("Employee:    {}", g.employee_name);
    println!("Department:  {}", g.department);
    println!("Description: {}", g.goal_description);
    println!("Period:      {} → {}", g.start_date, g.end_date);
    println!("Status:      {}", g.status);
    println!("Progress:    {}%", g.progress);
    if let Some(ref diagnosis) = g.diagnosis {
        println!("\nDiagnosis:\n{}", diagnosis);
    }
    if let Some(ref suggestions) = g.suggestions {
        println!("\nSuggestions:\n{}", suggestions);
    }
    Ok(())
}

fn update_goal(store: &impl GoalStore, id: i64, patch: &GoalPatch) -> anyhow::Result<()> {
    if patch.is_empty() {
        bail!("Nothing to update: pass at least one field (e.g., --progress 60)");
    }
    store.update(id, patch)?;
    println!("Goal updated: {}", id);
    Ok(())
}

fn delete_goal(store: &impl GoalStore, id: i64) -> anyhow::Result<()> {
    store.delete(id)?;
    println!("Deleted goal: {}", id);
    Ok(())
}

fn export_goals(
    store: &impl GoalStore,
    out: Option<&std::path::Path>,
    delimiter: u8,
) -> anyhow::Result<()> {
    let goals = store.list_all()?;
    match out {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            export_csv(&goals, file, delimiter)?;
            eprintln!("Exported {} goal(s) to {}", goals.len(), path.display());
        }
        None => export_csv(&goals, std::io::stdout().lock(), delimiter)?,
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max - 3).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}
