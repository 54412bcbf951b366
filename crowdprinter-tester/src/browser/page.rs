use anyhow::{Context, Result};
use thirtyfour::prelude::*;

/// Reads and drives the accessibility menu on a live page.
#[derive(Debug, Clone)]
pub struct LivePage<'a> {
    driver: &'a WebDriver,
}

impl<'a> LivePage<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    /// Load `url` with an empty `localStorage`, so hydration sees no preferences.
    pub async fn open_fresh(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await?;
        self.driver
            .execute("window.localStorage.clear()", vec![])
            .await
            .context("clearing localStorage")?;
        self.driver.refresh().await?;
        Ok(())
    }

    pub async fn reload(&self) -> Result<()> {
        self.driver.refresh().await?;
        Ok(())
    }

    pub async fn stored(&self, key: &str) -> Result<Option<String>> {
        let ret = self
            .driver
            .execute(
                "return window.localStorage.getItem(arguments[0])",
                vec![key.into()],
            )
            .await
            .with_context(|| format!("reading localStorage `{key}`"))?;
        Ok(ret.json().as_str().map(str::to_string))
    }

    /// Classes of the first element matching `selector`.
    pub async fn classes(&self, selector: &str) -> Result<Vec<String>> {
        let el = self
            .driver
            .find(By::Css(selector))
            .await
            .with_context(|| format!("finding `{selector}`"))?;
        Ok(split_classes(el.class_name().await?.as_deref()))
    }

    /// Classes of every element matching `selector`.
    pub async fn all_classes(&self, selector: &str) -> Result<Vec<Vec<String>>> {
        let mut out = Vec::new();
        for el in self.driver.find_all(By::Css(selector)).await? {
            out.push(split_classes(el.class_name().await?.as_deref()));
        }
        Ok(out)
    }

    pub async fn has_class(&self, selector: &str, class: &str) -> Result<bool> {
        Ok(self.classes(selector).await?.iter().any(|c| c == class))
    }

    pub async fn is_checked(&self, id: &str) -> Result<bool> {
        let el = self
            .driver
            .find(By::Id(id))
            .await
            .with_context(|| format!("finding #{id}"))?;
        Ok(el.is_selected().await?)
    }

    pub async fn click(&self, selector: &str) -> Result<()> {
        self.driver
            .find(By::Css(selector))
            .await
            .with_context(|| format!("finding `{selector}`"))?
            .click()
            .await?;
        Ok(())
    }
}

fn split_classes(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
