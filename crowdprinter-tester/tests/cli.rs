use std::path::PathBuf;
use std::process::{Command, Output};

/// Run the tester with `--output <tmp>` appended; returns the process output
/// and the report written to the file.
fn run_cli(label: &str, args: &[&str]) -> (Output, String) {
    let report_path: PathBuf = std::env::temp_dir().join(format!(
        "crowdprinter-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ));
    let output = Command::new(env!("CARGO_BIN_EXE_crowdprinter-tester"))
        .args(args)
        .arg("--output")
        .arg(&report_path)
        .output()
        .expect("spawn crowdprinter-tester");
    let report = std::fs::read_to_string(&report_path).unwrap_or_default();
    (output, report)
}

#[test]
fn listing_scenarios_names_every_key() {
    let (output, report) = run_cli("list", &["--list-scenarios"]);
    assert!(output.status.success());
    assert!(report.starts_with("Available scenarios"));
    for key in ["default-hydration", "menu-toggle", "background-reload"] {
        assert!(report.contains(key), "missing {key} in {report}");
    }
}

#[test]
fn logic_mode_reports_all_scenarios_passing() {
    let (output, report) = run_cli("logic", &["--report", "json", "--iterations", "2"]);
    assert!(output.status.success());
    let entries: Vec<serde_json::Value> = serde_json::from_str(&report).expect("json report");
    assert_eq!(entries.len(), 6);
    assert!(entries.iter().all(|e| e["passed"] == true));
    assert!(entries.iter().all(|e| e["iterations_run"] == 2));
}

#[test]
fn unknown_browser_is_skipped_not_fatal() {
    let (output, report) = run_cli(
        "browser",
        &["--mode", "browser", "--browsers", "netscape", "--report", "json"],
    );
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown browser"));
    assert_eq!(report.trim(), "[]");
}

#[test]
fn markdown_report_covers_selected_scenario_only() {
    let (output, report) = run_cli(
        "markdown",
        &["--report", "markdown", "--scenarios", "menu-toggle", "--iterations", "1"],
    );
    assert!(output.status.success());
    assert!(report.contains("## Summary"));
    assert!(report.contains("- **Total scenarios**: 1"));
    assert!(report.contains("Menu Toggle"));
}
