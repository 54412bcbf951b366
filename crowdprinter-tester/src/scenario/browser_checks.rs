use anyhow::{Result, ensure};
use crowdprinter_prefs::{Font, PageContract};

use crate::browser::LivePage;

const CONTENT: &str = ".fontchange";
const BODY: &str = "body";
const BLOBS: &str = ".blobs";
const MENU_BUTTON: &str = "#accessibility-options button";

fn contract() -> PageContract {
    PageContract::default()
}

async fn font_classes(page: &LivePage<'_>) -> Result<Vec<String>> {
    let known = contract().classes.known_font_classes();
    Ok(page
        .classes(CONTENT)
        .await?
        .into_iter()
        .filter(|class| known.contains(class))
        .collect())
}

async fn any_blob_hidden(page: &LivePage<'_>) -> Result<bool> {
    let hidden = contract().classes.blob_hidden;
    Ok(page
        .all_classes(BLOBS)
        .await?
        .iter()
        .any(|el| el.contains(&hidden)))
}

async fn open_menu(page: &LivePage<'_>) -> Result<()> {
    let hidden = contract().classes.panel_hidden;
    if page.has_class("#font-selection", &hidden).await? {
        page.click(MENU_BUTTON).await?;
    }
    Ok(())
}

pub async fn default_hydration(page: &LivePage<'_>) -> Result<()> {
    let classes = font_classes(page).await?;
    ensure!(classes == ["font-Ubuntu"], "content fonts: {classes:?}");
    ensure!(
        !page.has_class(BODY, "grid").await?,
        "body must not carry `grid`"
    );
    ensure!(
        page.has_class(BODY, &contract().classes.body_grid).await?,
        "grid background should be on by default"
    );
    ensure!(!any_blob_hidden(page).await?, "no blob should be hidden");
    ensure!(page.is_checked("font-Ubuntu").await?, "Ubuntu radio checked");
    Ok(())
}

pub async fn font_exclusivity(page: &LivePage<'_>) -> Result<()> {
    open_menu(page).await?;
    for font in Font::ALL {
        page.click(&format!("#font-{font}")).await?;
        let classes = font_classes(page).await?;
        ensure!(
            classes == [format!("font-{font}")],
            "after selecting {font}: {classes:?}"
        );
    }
    Ok(())
}

pub async fn serif_selection(page: &LivePage<'_>) -> Result<()> {
    open_menu(page).await?;
    page.click("#font-serif").await?;
    ensure!(
        page.stored("font").await?.as_deref() == Some("serif"),
        "localStorage font should be serif"
    );
    let classes = font_classes(page).await?;
    ensure!(classes == ["font-serif"], "content fonts: {classes:?}");
    Ok(())
}

pub async fn grid_uncheck(page: &LivePage<'_>) -> Result<()> {
    open_menu(page).await?;
    let blobs_before = page.all_classes(BLOBS).await?;
    page.click("#background-grid").await?;
    ensure!(
        !page.has_class(BODY, &contract().classes.body_grid).await?,
        "body should lose the grid class"
    );
    ensure!(
        page.stored("background-grid").await?.as_deref() == Some("false"),
        "localStorage background-grid should be false"
    );
    ensure!(
        page.all_classes(BLOBS).await? == blobs_before,
        "blobs should be untouched"
    );
    Ok(())
}

pub async fn menu_toggle(page: &LivePage<'_>) -> Result<()> {
    let before = (
        page.classes("#font-selection").await?,
        page.classes("#background-selection").await?,
    );
    page.click(MENU_BUTTON).await?;
    page.click(MENU_BUTTON).await?;
    let after = (
        page.classes("#font-selection").await?,
        page.classes("#background-selection").await?,
    );
    ensure!(before == after, "panels changed: {before:?} -> {after:?}");
    Ok(())
}

pub async fn background_reload(page: &LivePage<'_>) -> Result<()> {
    open_menu(page).await?;
    page.click("#background-grid").await?;
    page.reload().await?;
    ensure!(
        !page.has_class(BODY, &contract().classes.body_grid).await?,
        "grid should stay off after reload"
    );
    ensure!(!any_blob_hidden(page).await?, "blobs should stay on");
    ensure!(
        !page.is_checked("background-grid").await?,
        "grid checkbox should be unchecked after reload"
    );
    ensure!(
        page.is_checked("background-blobs").await?,
        "blobs checkbox should stay checked after reload"
    );
    Ok(())
}
