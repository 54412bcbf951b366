use anyhow::{Context, Result, ensure};
use crowdprinter_prefs::{
    BackgroundChange, BackgroundControl, Control, Font, MemoryPage, MemoryStore, Page,
    PageContract, PreferenceController, Preferences, Target,
};

type Controller = PreferenceController<MemoryPage, MemoryStore>;

const BLOBS: usize = 3;

fn hydrated(store: &MemoryStore) -> Result<Controller> {
    let ctl = PreferenceController::new(
        MemoryPage::standard(BLOBS),
        store.clone(),
        PageContract::default(),
    );
    ctl.hydrate().context("hydrate")?;
    Ok(ctl)
}

fn font_classes(ctl: &Controller) -> Vec<String> {
    let known = ctl.contract().classes.known_font_classes();
    ctl.page()
        .classes(Target::Content)
        .into_iter()
        .filter(|class| known.contains(class))
        .collect()
}

fn any_blob_hidden(ctl: &Controller) -> bool {
    let hidden = &ctl.contract().classes.blob_hidden;
    ctl.page()
        .element_classes(Target::Blobs)
        .iter()
        .any(|el| el.contains(hidden))
}

fn body_has_grid(ctl: &Controller) -> bool {
    ctl.page()
        .classes(Target::Body)
        .contains(&ctl.contract().classes.body_grid)
}

fn uncheck(ctl: &Controller, control: BackgroundControl) -> Result<()> {
    ctl.page().set_checked(Control::Background(control), false)?;
    ctl.apply_background(Some(BackgroundChange::new(control, false)))?;
    Ok(())
}

pub fn default_hydration() -> Result<()> {
    let ctl = hydrated(&MemoryStore::default())?;
    ensure!(
        font_classes(&ctl) == ["font-Ubuntu"],
        "expected only font-Ubuntu, got {:?}",
        font_classes(&ctl)
    );
    ensure!(
        !ctl.page().classes(Target::Body).contains("grid"),
        "body must not carry `grid`"
    );
    ensure!(body_has_grid(&ctl), "grid background should be on by default");
    ensure!(!any_blob_hidden(&ctl), "no blob should be hidden by default");
    ensure!(
        ctl.stored_preferences()? == Preferences::default(),
        "stored preferences should equal defaults"
    );
    Ok(())
}

pub fn font_exclusivity() -> Result<()> {
    let ctl = hydrated(&MemoryStore::default())?;
    for font in Font::ALL {
        ctl.apply_font(font.as_str())?;
        let classes = font_classes(&ctl);
        ensure!(
            classes == [format!("font-{font}")],
            "after selecting {font}: {classes:?}"
        );
    }
    Ok(())
}

pub fn serif_selection() -> Result<()> {
    let ctl = hydrated(&MemoryStore::default())?;
    ensure!(font_classes(&ctl) == ["font-Ubuntu"], "precondition: Ubuntu");
    ctl.apply_font("serif")?;
    ensure!(
        ctl.store().value("font").as_deref() == Some("serif"),
        "store should hold serif"
    );
    ensure!(font_classes(&ctl) == ["font-serif"], "content should be serif");
    Ok(())
}

pub fn grid_uncheck() -> Result<()> {
    let ctl = hydrated(&MemoryStore::default())?;
    let blobs_before = ctl.page().element_classes(Target::Blobs);
    uncheck(&ctl, BackgroundControl::Grid)?;
    ensure!(!body_has_grid(&ctl), "body should lose the grid class");
    ensure!(
        ctl.store().value("background-grid").as_deref() == Some("false"),
        "store should hold background-grid=false"
    );
    ensure!(
        ctl.page().element_classes(Target::Blobs) == blobs_before,
        "blobs should be untouched"
    );
    Ok(())
}

pub fn menu_toggle() -> Result<()> {
    let ctl = hydrated(&MemoryStore::default())?;
    let snapshot = |ctl: &Controller| {
        (
            ctl.page().classes(Target::FontPanel),
            ctl.page().classes(Target::BackgroundPanel),
        )
    };
    let before = snapshot(&ctl);
    ctl.toggle_accessibility_menu()?;
    ensure!(snapshot(&ctl) != before, "first toggle should change the panels");
    ctl.toggle_accessibility_menu()?;
    ensure!(snapshot(&ctl) == before, "second toggle should restore the panels");
    Ok(())
}

pub fn background_reload() -> Result<()> {
    let store = MemoryStore::default();
    let first = hydrated(&store)?;
    uncheck(&first, BackgroundControl::Grid)?;

    let reloaded = hydrated(&store)?;
    ensure!(!body_has_grid(&reloaded), "grid should stay off after reload");
    ensure!(!any_blob_hidden(&reloaded), "blobs should stay on after reload");
    ensure!(
        !reloaded
            .page()
            .checked(Control::Background(BackgroundControl::Grid))?,
        "grid checkbox should be unchecked after reload"
    );
    Ok(())
}
