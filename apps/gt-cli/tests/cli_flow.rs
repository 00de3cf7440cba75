// cli_flow.rs — End-to-end test of the `gt` binary against a temp project.
//
// Flow:
//   1. gt goal add (x2) → rows in .gt/metas.db
//   2. gt goal update → progress changed
//   3. gt report summary --json → counts over the table
//   4. gt diagnose individual → diagnosis recorded on the goal
//   5. gt goal export --out → delimited file honoring tracker.toml
//   6. gt goal delete on a missing id → non-zero exit

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn gt(project: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gt"))
        .arg("--project-root")
        .arg(project)
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "gt failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn goal_lifecycle_through_the_binary() {
    let project = TempDir::new().unwrap();
    std::fs::create_dir_all(project.path().join(".gt")).unwrap();
    std::fs::write(
        project.path().join(".gt/tracker.toml"),
        "[export]\ndelimiter = \";\"\n",
    )
    .unwrap();

    // 1. Two goals.
    for (employee, department) in [("Ana", "Sales"), ("Bruno", "IT")] {
        stdout(&gt(
            project.path(),
            &[
                "goal",
                "add",
                "--employee",
                employee,
                "--department",
                department,
                "--description",
                "Quarterly target",
                "--start",
                "2024-01-01",
                "--end",
                "2024-03-31",
            ],
        ));
    }
    assert!(project.path().join(".gt/metas.db").exists());

    // 2. Progress update, and an out-of-range value rejected by the parser.
    stdout(&gt(project.path(), &["goal", "update", "1", "--progress", "85"]));
    assert!(!gt(project.path(), &["goal", "update", "1", "--progress", "101"])
        .status
        .success());

    // 3. Summary as JSON.
    let summary: serde_json::Value =
        serde_json::from_str(&stdout(&gt(project.path(), &["report", "summary", "--json"])))
            .unwrap();
    assert_eq!(summary["overview"]["total"], 2);
    assert_eq!(summary["highlights"], serde_json::json!([1]));
    assert_eq!(summary["needs_attention"], serde_json::json!([2]));

    // 4. Individual diagnosis recorded on goal 2.
    stdout(&gt(
        project.path(),
        &["diagnose", "individual", "2", "--answers", "n,y,y,n,y,y,n,y"],
    ));
    let shown: serde_json::Value =
        serde_json::from_str(&stdout(&gt(project.path(), &["goal", "show", "2", "--json"])))
            .unwrap();
    assert_eq!(shown["diagnosis"], "• Possibly unrealistic goal");

    // 5. Export honors the configured delimiter.
    let out = project.path().join("goals.csv");
    stdout(&gt(
        project.path(),
        &["goal", "export", "--out", out.to_str().unwrap()],
    ));
    let exported = std::fs::read_to_string(&out).unwrap();
    assert!(exported.starts_with("id;employee_name;department"));
    assert_eq!(exported.lines().count(), 3);

    // 6. Deleting a missing goal fails.
    assert!(!gt(project.path(), &["goal", "delete", "42"]).status.success());
}

#[test]
fn rust_log_overrides_default_filter() {
    let project = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_gt"))
        .arg("--project-root")
        .arg(project.path())
        .args(["goal", "list"])
        .env("RUST_LOG", "gt_goal=debug")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("goal table ready"), "stderr: {}", stderr);
    assert!(stderr.contains("listed goals"), "stderr: {}", stderr);

    let quiet = Command::new(env!("CARGO_BIN_EXE_gt"))
        .arg("--project-root")
        .arg(project.path())
        .args(["goal", "list"])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(!String::from_utf8_lossy(&quiet.stderr).contains("goal table ready"));
}
