use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::{fs, path::Path};
use thirtyfour::prelude::*;

/// Script returning the stored preferences and the classes the widget edits.
const PAGE_STATE_SCRIPT: &str = r"
    const content = document.querySelector('.fontchange');
    return {
        localStorage: Object.assign({}, window.localStorage),
        bodyClasses: document.body ? document.body.className : null,
        contentClasses: content ? content.className : null,
    };
";

pub fn artifacts_dir(base: &str, browser: &str, scenario: &str) -> String {
    let stamp = Utc::now().format("%Y%m%dT%H%M%S");
    format!("{base}/{browser}/{scenario}/{stamp}")
}

/// What a failed browser scenario leaves behind for inspection.
#[derive(Debug, Default, Serialize)]
struct FailureArtifacts {
    #[serde(skip)]
    screenshot: Option<Vec<u8>>,
    #[serde(skip)]
    dom: Option<String>,
    page_state: Option<Value>,
    error: String,
}

impl FailureArtifacts {
    fn write_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating artifacts dir {}", dir.display()))?;
        if let Some(png) = &self.screenshot {
            fs::write(dir.join("screenshot.png"), png).context("writing screenshot")?;
        }
        if let Some(html) = &self.dom {
            fs::write(dir.join("dom.html"), html).context("writing DOM snapshot")?;
        }
        let summary = serde_json::to_vec_pretty(self)?;
        fs::write(dir.join("state.json"), summary).context("writing page state")?;
        fs::write(dir.join("error.txt"), &self.error).context("writing error")?;
        Ok(())
    }
}

/// Best-effort capture: anything the driver cannot provide is left out.
pub async fn capture_artifacts(driver: &WebDriver, dir: &str, err: &anyhow::Error) -> Result<()> {
    let artifacts = FailureArtifacts {
        screenshot: driver.screenshot_as_png().await.ok(),
        dom: driver.source().await.ok(),
        page_state: driver
            .execute(PAGE_STATE_SCRIPT, vec![])
            .await
            .ok()
            .map(|ret| ret.json().clone()),
        error: format!("{err:#}"),
    };
    artifacts.write_to(Path::new(dir))
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_csv_normalises_entries() {
        let parts = split_csv(" Chrome, ,firefox,  EDGE ");
        assert_eq!(parts, vec!["chrome", "firefox", "edge"]);
    }

    #[test]
    fn artifacts_dir_nests_browser_then_scenario() {
        let dir = artifacts_dir("target/out", "chrome", "menu-toggle");
        assert!(dir.starts_with("target/out/chrome/menu-toggle/"));
    }

    #[test]
    fn failure_artifacts_land_on_disk() {
        let base = std::env::temp_dir().join(format!(
            "crowdprinter-artifacts-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        let artifacts = FailureArtifacts {
            screenshot: Some(vec![1, 2, 3]),
            dom: Some("<html />".to_string()),
            page_state: Some(json!({
                "localStorage": { "font": "serif", "background-grid": "false" },
                "bodyClasses": "",
            })),
            error: "grid class still present".to_string(),
        };
        artifacts.write_to(&base).expect("write artifacts");

        assert!(base.join("screenshot.png").exists());
        assert!(base.join("dom.html").exists());
        let state: Value =
            serde_json::from_slice(&fs::read(base.join("state.json")).unwrap()).unwrap();
        assert_eq!(state["page_state"]["localStorage"]["font"], "serif");
        assert_eq!(state["error"], "grid class still present");
        assert!(state.get("screenshot").is_none());
    }

    #[test]
    fn missing_captures_are_skipped() {
        let base = std::env::temp_dir().join(format!(
            "crowdprinter-artifacts-empty-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        FailureArtifacts {
            error: "no driver".to_string(),
            ..FailureArtifacts::default()
        }
        .write_to(&base)
        .expect("write artifacts");
        assert!(!base.join("screenshot.png").exists());
        assert!(base.join("error.txt").exists());
    }
}
