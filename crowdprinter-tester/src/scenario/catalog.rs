use anyhow::Result;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx, browser_checks, logic_checks};

/// The behaviour a scenario verifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    DefaultHydration,
    FontExclusivity,
    SerifSelection,
    GridUncheck,
    MenuToggle,
    BackgroundReload,
}

#[derive(Debug, Clone, Copy)]
pub struct PreferenceScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub check: Check,
}

pub const SCENARIOS: [PreferenceScenario; 6] = [
    PreferenceScenario {
        key: "default-hydration",
        name: "Default Hydration",
        check: Check::DefaultHydration,
    },
    PreferenceScenario {
        key: "font-exclusivity",
        name: "Single Font Class",
        check: Check::FontExclusivity,
    },
    PreferenceScenario {
        key: "serif-selection",
        name: "Serif Selection",
        check: Check::SerifSelection,
    },
    PreferenceScenario {
        key: "grid-uncheck",
        name: "Grid Uncheck",
        check: Check::GridUncheck,
    },
    PreferenceScenario {
        key: "menu-toggle",
        name: "Menu Toggle",
        check: Check::MenuToggle,
    },
    PreferenceScenario {
        key: "background-reload",
        name: "Background Survives Reload",
        check: Check::BackgroundReload,
    },
];

pub fn find(key: &str) -> Option<PreferenceScenario> {
    SCENARIOS.iter().copied().find(|scenario| scenario.key == key)
}

#[async_trait::async_trait]
impl BrowserScenario for PreferenceScenario {
    async fn run_browser(&self, _driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let page = &ctx.page;
        page.open_fresh(&ctx.base_url).await?;
        if ctx.verbose {
            println!("  🌐 Loaded {} with empty storage", ctx.base_url);
        }
        match self.check {
            Check::DefaultHydration => browser_checks::default_hydration(page).await,
            Check::FontExclusivity => browser_checks::font_exclusivity(page).await,
            Check::SerifSelection => browser_checks::serif_selection(page).await,
            Check::GridUncheck => browser_checks::grid_uncheck(page).await,
            Check::MenuToggle => browser_checks::menu_toggle(page).await,
            Check::BackgroundReload => browser_checks::background_reload(page).await,
        }
    }
}

impl CombinedScenario for PreferenceScenario {
    fn name(&self) -> &'static str {
        self.name
    }

    fn run_logic(&self) -> Result<()> {
        match self.check {
            Check::DefaultHydration => logic_checks::default_hydration(),
            Check::FontExclusivity => logic_checks::font_exclusivity(),
            Check::SerifSelection => logic_checks::serif_selection(),
            Check::GridUncheck => logic_checks::grid_uncheck(),
            Check::MenuToggle => logic_checks::menu_toggle(),
            Check::BackgroundReload => logic_checks::background_reload(),
        }
    }
}
