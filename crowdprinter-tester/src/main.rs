mod browser;
mod cli;
mod common;
mod logic;
mod scenario;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::io::Write;
use std::time::{Duration, Instant};
use thirtyfour::WebDriver;

use browser::{BrowserKind, LivePage, new_session};
use cli::{Args, ReportFormat};
use common::{ReportSink, artifacts_dir, capture_artifacts, split_csv};
use logic::{LogicTester, ScenarioResult, reports};
use scenario::{ScenarioCtx, get_scenario, list_scenarios};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        let mut sink = ReportSink::open(args.output.as_deref())?;
        write_catalog(&mut sink)?;
        sink.flush()?;
        return Ok(());
    }

    println!("{}", "♿ Crowdprinter Accessibility Tester".bright_cyan().bold());
    println!("{}", "=".repeat(36).cyan());

    let started = Instant::now();
    let keys = args.scenario_keys();
    let mut results = Vec::new();
    if args.runs_logic() {
        results.extend(run_logic(&args, &keys));
    }
    if args.runs_browser() {
        results.extend(run_browsers(&args, &keys).await);
    }

    let mut sink = ReportSink::open(args.output.as_deref())?;
    write_report(&mut sink, args.report, &results, started.elapsed())?;
    sink.flush()?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn write_catalog(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Available scenarios:")?;
    for (key, name) in list_scenarios() {
        writeln!(out, "  {key:25} - {name}")?;
    }
    Ok(())
}

fn run_logic(args: &Args, keys: &[String]) -> Vec<ScenarioResult> {
    println!("{}", "🧠 Logic scenarios".bright_yellow().bold());
    let tester = LogicTester::new(args.verbose);
    keys.iter()
        .filter_map(|key| {
            let scenario = get_scenario(key);
            if scenario.is_none() {
                eprintln!("⚠️  Unknown scenario: {}", key.yellow());
            }
            scenario
        })
        .map(|scenario| tester.run_scenario(scenario.as_ref(), args.iterations))
        .collect()
}

async fn run_browsers(args: &Args, keys: &[String]) -> Vec<ScenarioResult> {
    println!("{}", "🌐 Browser scenarios".bright_blue().bold());
    let config = args.browser_config();
    let mut results = Vec::new();

    for name in split_csv(&args.browsers) {
        let Some(kind) = BrowserKind::parse(&name) else {
            eprintln!("⚠️  Unknown browser: {}", name.yellow());
            continue;
        };
        match new_session(kind, &config).await {
            Ok(driver) => {
                results.extend(run_on_driver(args, keys, kind, &driver).await);
                if let Err(err) = driver.quit().await {
                    log::warn!("closing {} session failed: {err}", kind.label());
                }
            }
            Err(err) => eprintln!("❌ Could not start {}: {err}", kind.label()),
        }
    }
    results
}

async fn run_on_driver(
    args: &Args,
    keys: &[String],
    kind: BrowserKind,
    driver: &WebDriver,
) -> Vec<ScenarioResult> {
    let label = kind.label();
    let mut results = Vec::new();

    for key in keys {
        let Some(scenario) = get_scenario(key) else {
            continue;
        };
        let ctx = ScenarioCtx {
            base_url: args.base_url.clone(),
            page: LivePage::new(driver),
            verbose: args.verbose,
        };

        let started = Instant::now();
        let outcome = scenario.run_browser(driver, &ctx).await;
        let elapsed = started.elapsed();

        if let Err(err) = &outcome {
            eprintln!("❌ [{}] {key} ({elapsed:?}): {err:#}", label.red());
            let dir = artifacts_dir(&args.artifacts_dir, label, key);
            if let Err(capture_err) = capture_artifacts(driver, &dir, err).await {
                log::warn!("could not capture artifacts in {dir}: {capture_err:#}");
            }
        } else {
            println!("✅ [{}] {key} ({elapsed:?})", label.green());
        }
        results.push(ScenarioResult::single(
            format!("{} [{label}]", scenario.name()),
            &outcome,
            elapsed,
        ));
    }
    results
}

fn write_report(
    out: &mut dyn Write,
    format: ReportFormat,
    results: &[ScenarioResult],
    elapsed: Duration,
) -> Result<()> {
    match format {
        ReportFormat::Json => reports::generate_json_report(out, results),
        ReportFormat::Markdown => reports::generate_markdown_report(out, results),
        ReportFormat::Console if results.is_empty() => {
            writeln!(out, "No scenarios executed.")?;
            Ok(())
        }
        ReportFormat::Console => reports::generate_console_report(out, results, elapsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logic_args(scenarios: &str) -> Args {
        Args::try_parse_from([
            "crowdprinter-tester",
            "--scenarios",
            scenarios,
            "--iterations",
            "1",
        ])
        .expect("valid arguments")
    }

    #[test]
    fn every_logic_scenario_passes() {
        let args = logic_args("all");
        let results = run_logic(&args, &args.scenario_keys());
        assert_eq!(results.len(), list_scenarios().len());
        assert!(results.iter().all(|r| r.passed), "{results:?}");
    }

    #[test]
    fn unknown_scenarios_are_skipped() {
        let args = logic_args("does-not-exist,menu-toggle");
        let results = run_logic(&args, &args.scenario_keys());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].scenario_name, "Menu Toggle");
    }

    #[test]
    fn empty_console_report_says_so() {
        let mut buf = Vec::new();
        write_report(&mut buf, ReportFormat::Console, &[], Duration::ZERO).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No scenarios executed.\n");
    }

    #[test]
    fn empty_json_report_is_empty_array() {
        let mut buf = Vec::new();
        write_report(&mut buf, ReportFormat::Json, &[], Duration::ZERO).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().trim(), "[]");
    }

    #[test]
    fn catalog_lists_every_key() {
        let mut buf = Vec::new();
        write_catalog(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        for (key, _) in list_scenarios() {
            assert!(text.contains(key));
        }
    }
}
