//! Import command - replace the glossary with a JSON snapshot.

use crate::app::App;
use crate::prompt::confirm;
use anyhow::Context;
use std::fs;
use std::path::Path;
use techgloss_core::{snapshot, Config};

/// Run the import command.
pub fn run(config: Config, file: &Path, skip_confirm: bool) -> anyhow::Result<()> {
    let mut app = App::new(config)?;

    let bytes = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let snapshot::ImportedSnapshot { terms, issues } = snapshot::import(&bytes)
        .with_context(|| format!("{} was not imported; the glossary is unchanged", file.display()))?;

    if !issues.is_empty() {
        eprintln!("Warning: {} problem(s) in {}:", issues.len(), file.display());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
    }

    let question = format!(
        "Replace all {} terms with {} imported terms?",
        app.store.len(),
        terms.len()
    );
    if !skip_confirm && !confirm(&question)? {
        println!("Cancelled.");
        return Ok(());
    }

    let count = terms.len();
    app.store.replace_all(terms);
    println!("Imported {} terms.", count);

    Ok(())
}
