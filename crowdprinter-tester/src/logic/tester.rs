use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::scenario::CombinedScenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "micros")]
    pub average_duration: Duration,
    #[serde(with = "micros::seq")]
    pub performance_data: Vec<Duration>,
}

impl ScenarioResult {
    /// Summarise timed runs; failures are numbered from 1.
    fn from_runs(scenario_name: String, runs: Vec<(Duration, anyhow::Result<()>)>) -> Self {
        let mut failures = Vec::new();
        let mut performance_data = Vec::with_capacity(runs.len());
        for (idx, (elapsed, outcome)) in runs.into_iter().enumerate() {
            performance_data.push(elapsed);
            if let Err(err) = outcome {
                failures.push(format!("Iteration {}: {err:#}", idx + 1));
            }
        }
        let iterations_run = performance_data.len();
        let average_duration = u32::try_from(iterations_run)
            .ok()
            .filter(|n| *n > 0)
            .map_or(Duration::ZERO, |n| performance_data.iter().sum::<Duration>() / n);
        Self {
            scenario_name,
            passed: failures.is_empty(),
            iterations_run,
            successful_iterations: iterations_run - failures.len(),
            failures,
            average_duration,
            performance_data,
        }
    }

    /// One browser run. The failure keeps the full error chain, unnumbered.
    pub fn single(scenario_name: String, outcome: &anyhow::Result<()>, duration: Duration) -> Self {
        let mut result = Self::from_runs(scenario_name, vec![(duration, Ok(()))]);
        if let Err(err) = outcome {
            result.passed = false;
            result.successful_iterations = 0;
            result.failures.push(format!("{err:#}"));
        }
        result
    }
}

/// Repeats a scenario's logic check against fresh in-memory state.
pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_scenario(
        &self,
        scenario: &dyn CombinedScenario,
        iterations: usize,
    ) -> ScenarioResult {
        if self.verbose {
            println!("🧪 {} x{iterations}", scenario.name().bright_white());
        }
        let runs = (0..iterations)
            .map(|_| {
                let started = Instant::now();
                let outcome = scenario.run_logic();
                (started.elapsed(), outcome)
            })
            .collect();
        let result = ScenarioResult::from_runs(scenario.name().to_string(), runs);
        if self.verbose {
            for failure in &result.failures {
                println!("   {}", failure.red());
            }
        }
        result
    }
}

/// Durations travel as whole microseconds.
mod micros {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    fn to_micros(duration: Duration) -> u64 {
        u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
    }

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(to_micros(*duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_micros)
    }

    pub mod seq {
        use serde::{Deserialize, Deserializer, Serializer};
        use std::time::Duration;

        pub fn serialize<S: Serializer>(
            durations: &[Duration],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(durations.iter().map(|d| super::to_micros(*d)))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Vec<Duration>, D::Error> {
            let values = Vec::<u64>::deserialize(deserializer)?;
            Ok(values.into_iter().map(Duration::from_micros).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::get_scenario;

    #[test]
    fn every_iteration_is_timed_and_counted() {
        let scenario = get_scenario("serif-selection").expect("scenario");
        let result = LogicTester::new(false).run_scenario(scenario.as_ref(), 3);
        assert!(result.passed, "{:?}", result.failures);
        assert_eq!(result.iterations_run, 3);
        assert_eq!(result.successful_iterations, 3);
        assert_eq!(result.performance_data.len(), 3);
    }

    #[test]
    fn zero_iterations_average_to_zero() {
        let scenario = get_scenario("menu-toggle").expect("scenario");
        let result = LogicTester::new(false).run_scenario(scenario.as_ref(), 0);
        assert!(result.passed);
        assert_eq!(result.average_duration, Duration::ZERO);
    }

    #[test]
    fn failed_runs_are_numbered() {
        let runs = vec![
            (Duration::from_millis(2), Ok(())),
            (Duration::from_millis(4), Err(anyhow::anyhow!("grid class kept"))),
        ];
        let result = ScenarioResult::from_runs("Grid Uncheck".into(), runs);
        assert!(!result.passed);
        assert_eq!(result.successful_iterations, 1);
        assert_eq!(result.failures, vec!["Iteration 2: grid class kept".to_string()]);
        assert_eq!(result.average_duration, Duration::from_millis(3));
    }

    #[test]
    fn single_failure_keeps_error_chain() {
        let outcome: anyhow::Result<()> = Err(anyhow::anyhow!("inner").context("outer"));
        let result = ScenarioResult::single("x".into(), &outcome, Duration::from_millis(4));
        assert!(!result.passed);
        assert_eq!(result.iterations_run, 1);
        assert_eq!(result.successful_iterations, 0);
        assert_eq!(result.failures, vec!["outer: inner".to_string()]);
    }

    #[test]
    fn durations_serialize_as_micros() {
        let result = ScenarioResult::single("x".into(), &Ok(()), Duration::from_millis(2));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["average_duration"], 2000);
        assert_eq!(json["performance_data"][0], 2000);
        let back: ScenarioResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.average_duration, Duration::from_millis(2));
    }
}
