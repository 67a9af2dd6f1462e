//! Prefs command - show or change theme and language.

use crate::app::App;
use techgloss_core::{Config, Language, Theme};

/// Run the prefs command.
pub fn run(
    config: Config,
    theme: Option<Theme>,
    language: Option<Language>,
    toggle_theme: bool,
) -> anyhow::Result<()> {
    let app = App::new(config)?;
    let mut prefs = app.prefs;

    if let Some(theme) = theme {
        prefs.theme = theme;
    }
    if toggle_theme {
        prefs.toggle_theme();
    }
    if let Some(language) = language {
        prefs.language = language;
    }

    if prefs != app.prefs {
        prefs.save(app.store.storage())?;
        println!("Preferences saved.");
    }

    println!("Theme:    {}", prefs.theme);
    println!(
        "Language: {} ({})",
        prefs.language.code(),
        prefs.language.display_name()
    );

    Ok(())
}
