use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::browser::BrowserConfig;
use crate::common::split_csv;
use crate::scenario::list_scenarios;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestMode {
    /// In-memory page and store; no browser needed
    Logic,
    /// Drive a live page over WebDriver
    Browser,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HeadlessMode {
    Headless,
    Windowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "crowdprinter-tester", version)]
#[command(about = "Checks the crowdprinter accessibility menu against its expected behaviour")]
pub struct Args {
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    pub mode: TestMode,

    /// Comma-separated scenario keys; `all` expands to the whole catalog
    #[arg(long, default_value = "all")]
    pub scenarios: String,

    /// Print the scenario catalog and exit
    #[arg(long)]
    pub list_scenarios: bool,

    /// Repetitions per scenario in logic mode
    #[arg(long, default_value_t = 10)]
    pub iterations: usize,

    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    pub report: ReportFormat,

    #[arg(short, long)]
    pub verbose: bool,

    /// Write the report here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Comma-separated browsers (chrome, edge, firefox, safari)
    #[arg(long, default_value = "chrome")]
    pub browsers: String,

    /// Page hosting the accessibility menu
    #[arg(long, default_value = "http://localhost:8000/")]
    pub base_url: String,

    /// Where failing browser scenarios leave screenshots and state dumps
    #[arg(long, default_value = "target/test-artifacts")]
    pub artifacts_dir: String,

    /// Selenium Grid / Appium hub URL used instead of local drivers
    #[arg(long)]
    pub hub: Option<String>,

    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    pub headless: HeadlessMode,
}

impl Args {
    pub const fn runs_logic(&self) -> bool {
        matches!(self.mode, TestMode::Logic | TestMode::Both)
    }

    pub const fn runs_browser(&self) -> bool {
        matches!(self.mode, TestMode::Browser | TestMode::Both)
    }

    pub fn browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            headless: self.headless == HeadlessMode::Headless,
            remote_hub: self.hub.clone(),
            ..BrowserConfig::default()
        }
    }

    /// Requested scenario keys in order, with `all` replaced by every catalog
    /// key not already named.
    pub fn scenario_keys(&self) -> Vec<String> {
        let mut keys = split_csv(&self.scenarios);
        let Some(pos) = keys.iter().position(|key| key == "all") else {
            return keys;
        };
        keys.retain(|key| key != "all");
        let missing: Vec<String> = list_scenarios()
            .into_iter()
            .map(|(key, _)| key.to_string())
            .filter(|key| !keys.contains(key))
            .collect();
        let mut expanded = keys[..pos].to_vec();
        expanded.extend(missing);
        expanded.extend_from_slice(&keys[pos..]);
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("crowdprinter-tester").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn defaults_run_logic_only() {
        let args = parse(&[]);
        assert!(args.runs_logic());
        assert!(!args.runs_browser());
        assert_eq!(args.report, ReportFormat::Console);
        assert_eq!(args.iterations, 10);
    }

    #[test]
    fn both_mode_runs_everything() {
        let args = parse(&["--mode", "both"]);
        assert!(args.runs_logic() && args.runs_browser());
    }

    #[test]
    fn all_expands_in_place() {
        let args = parse(&["--scenarios", "menu-toggle,all"]);
        let keys = args.scenario_keys();
        assert_eq!(keys.first().map(String::as_str), Some("menu-toggle"));
        assert_eq!(keys.len(), list_scenarios().len());
    }

    #[test]
    fn explicit_scenarios_keep_order() {
        let args = parse(&["--scenarios", "grid-uncheck,serif-selection"]);
        assert_eq!(args.scenario_keys(), vec!["grid-uncheck", "serif-selection"]);
    }

    #[test]
    fn windowed_hub_reaches_browser_config() {
        let args = parse(&["--headless", "windowed", "--hub", "http://grid:4444"]);
        let cfg = args.browser_config();
        assert!(!cfg.headless);
        assert_eq!(cfg.remote_hub.as_deref(), Some("http://grid:4444"));
    }

    #[test]
    fn unknown_report_format_is_rejected() {
        let parsed = Args::try_parse_from(["crowdprinter-tester", "--report", "html"]);
        assert!(parsed.is_err());
    }
}
