use std::time::Duration;
use thirtyfour::Capabilities;
use thirtyfour::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Chrome,
    Edge,
    Firefox,
    Safari,
}

impl BrowserKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "chrome" => Some(Self::Chrome),
            "edge" => Some(Self::Edge),
            "firefox" => Some(Self::Firefox),
            "safari" => Some(Self::Safari),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Edge => "edge",
            Self::Firefox => "firefox",
            Self::Safari => "safari",
        }
    }

    const fn default_driver_url(self) -> &'static str {
        match self {
            Self::Chrome => "http://localhost:9515",
            Self::Edge => "http://localhost:17556",
            Self::Firefox => "http://localhost:4444",
            Self::Safari => "http://localhost:4445",
        }
    }
}

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub implicit_wait_secs: u64,
    pub remote_hub: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            implicit_wait_secs: 3,
            remote_hub: None,
        }
    }
}

/// Capabilities for `kind`. Safari has no headless mode and ignores the flag.
fn capabilities(kind: BrowserKind, headless: bool) -> WebDriverResult<Capabilities> {
    Ok(match kind {
        BrowserKind::Chrome => {
            let mut caps = DesiredCapabilities::chrome();
            if headless {
                caps.set_headless()?;
            }
            caps.into()
        }
        BrowserKind::Edge => {
            let mut caps = DesiredCapabilities::edge();
            if headless {
                caps.set_headless()?;
            }
            caps.into()
        }
        BrowserKind::Firefox => {
            let mut caps = DesiredCapabilities::firefox();
            if headless {
                caps.set_headless()?;
            }
            caps.into()
        }
        BrowserKind::Safari => DesiredCapabilities::safari().into(),
    })
}

/// Open a session on the hub when one is configured, otherwise on the
/// browser's local driver port.
pub async fn new_session(kind: BrowserKind, cfg: &BrowserConfig) -> WebDriverResult<WebDriver> {
    let endpoint = cfg
        .remote_hub
        .as_deref()
        .unwrap_or_else(|| kind.default_driver_url());
    log::debug!("starting {} session at {endpoint}", kind.label());
    let driver = WebDriver::new(endpoint, capabilities(kind, cfg.headless)?).await?;
    driver
        .set_implicit_wait_timeout(Duration::from_secs(cfg.implicit_wait_secs))
        .await?;
    Ok(driver)
}
