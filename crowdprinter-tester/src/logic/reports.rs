use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;

/// Pass/fail counts shared by the console and Markdown reports.
struct Tally {
    total: usize,
    passed: usize,
}

impl Tally {
    fn of(results: &[ScenarioResult]) -> Self {
        Self {
            total: results.len(),
            passed: results.iter().filter(|r| r.passed).count(),
        }
    }

    const fn failed(&self) -> usize {
        self.total - self.passed
    }

    #[allow(clippy::cast_precision_loss)]
    fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 * 100.0 / self.total as f64
        }
    }
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    let tally = Tally::of(results);
    writeln!(out)?;
    writeln!(out, "{}", "📊 Accessibility scenario results".bright_cyan().bold())?;
    writeln!(
        out,
        "{} scenarios, {} passed, {} failed ({:.1}%) in {total_duration:?}",
        tally.total,
        tally.passed.to_string().green(),
        tally.failed().to_string().red(),
        tally.success_rate()
    )?;
    writeln!(out)?;

    for result in results {
        let mark = if result.passed {
            "✅".normal()
        } else {
            "❌".red()
        };
        writeln!(
            out,
            "{mark} {} {}/{} ok, avg {:?}",
            format!("{:<40}", result.scenario_name).bold(),
            result.successful_iterations,
            result.iterations_run,
            result.average_duration
        )?;
    }

    let failing: Vec<&ScenarioResult> = results.iter().filter(|r| !r.passed).collect();
    if !failing.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Failures".red().bold())?;
        for result in failing {
            writeln!(out, "  {}", result.scenario_name)?;
            for failure in &result.failures {
                writeln!(out, "    • {}", failure.red())?;
            }
        }
    }

    if let Some(slowest) = results.iter().max_by_key(|r| r.average_duration) {
        writeln!(out)?;
        writeln!(
            out,
            "🐢 Slowest: {} ({:?})",
            slowest.scenario_name.yellow(),
            slowest.average_duration
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    let tally = Tally::of(results);
    writeln!(out, "# Crowdprinter Accessibility Results\n")?;
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {}", tally.total)?;
    writeln!(out, "- **Passed**: {}", tally.passed)?;
    writeln!(out, "- **Failed**: {}", tally.failed())?;
    writeln!(out, "- **Success rate**: {:.1}%\n", tally.success_rate())?;

    writeln!(out, "| Scenario | Result | Iterations | Average |")?;
    writeln!(out, "|---|---|---|---|")?;
    for result in results {
        writeln!(
            out,
            "| {} | {} | {}/{} | {:?} |",
            result.scenario_name,
            if result.passed { "✅" } else { "❌" },
            result.successful_iterations,
            result.iterations_run,
            result.average_duration
        )?;
    }

    if tally.failed() > 0 {
        writeln!(out, "\n## Failures\n")?;
        for result in results.iter().filter(|r| !r.passed) {
            writeln!(out, "### {}\n", result.scenario_name)?;
            for failure in &result.failures {
                writeln!(out, "- {failure}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str, passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: name.to_string(),
            passed,
            iterations_run: 2,
            successful_iterations: if passed { 2 } else { 1 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["Iteration 2: panels stayed hidden".to_string()]
            },
            average_duration: Duration::from_millis(if passed { 1 } else { 5 }),
            performance_data: vec![Duration::from_millis(1); 2],
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn markdown_tabulates_and_lists_failures() {
        let results = [sample("Grid Uncheck", true), sample("Menu Toggle", false)];
        let text = render(|buf| generate_markdown_report(buf, &results));
        assert!(text.contains("- **Failed**: 1"));
        assert!(text.contains("- **Success rate**: 50.0%"));
        assert!(text.contains("| Grid Uncheck | ✅ | 2/2 |"));
        assert!(text.contains("### Menu Toggle"));
        assert!(text.contains("- Iteration 2: panels stayed hidden"));
    }

    #[test]
    fn markdown_omits_failure_section_when_green() {
        let text = render(|buf| generate_markdown_report(buf, &[sample("Grid Uncheck", true)]));
        assert!(!text.contains("## Failures"));
    }

    #[test]
    fn json_report_is_an_array() {
        let text = render(|buf| generate_json_report(buf, &[sample("Menu Toggle", true)]));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn console_report_names_the_slowest_scenario() {
        colored::control::set_override(false);
        let results = [sample("Grid Uncheck", true), sample("Menu Toggle", false)];
        let text = render(|buf| generate_console_report(buf, &results, Duration::from_secs(1)));
        assert!(text.contains("2 scenarios, 1 passed, 1 failed (50.0%)"));
        assert!(text.contains("Slowest: Menu Toggle"));
        assert!(text.contains("• Iteration 2: panels stayed hidden"));
    }

    #[test]
    fn console_report_handles_empty_results() {
        let text = render(|buf| generate_console_report(buf, &[], Duration::ZERO));
        assert!(text.contains("0 scenarios"));
        assert!(!text.contains("Slowest"));
    }
}
