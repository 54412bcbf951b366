use anyhow::Result;
use thirtyfour::prelude::*;

use crate::browser::LivePage;

mod browser_checks;
pub mod catalog;
mod logic_checks;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub page: LivePage<'a>,
    pub verbose: bool,
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn name(&self) -> &'static str;

    /// Run the scenario against the in-memory page and store.
    fn run_logic(&self) -> Result<()>;
}

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    catalog::find(&name.to_lowercase()).map(|scenario| Box::new(scenario) as _)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog::SCENARIOS
        .iter()
        .map(|scenario| (scenario.key, scenario.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        for (key, name) in list_scenarios() {
            let scenario = get_scenario(key).expect("listed scenario resolves");
            assert_eq!(scenario.name(), name);
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert!(get_scenario("MENU-TOGGLE").is_some());
        assert!(get_scenario("nope").is_none());
    }

    #[test]
    fn every_logic_scenario_passes() {
        for (key, _) in list_scenarios() {
            let scenario = get_scenario(key).expect("scenario");
            scenario
                .run_logic()
                .unwrap_or_else(|e| panic!("{key} failed: {e:#}"));
        }
    }
}
