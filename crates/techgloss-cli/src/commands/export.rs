//! Export command - write the glossary to a JSON snapshot.

use crate::app::App;
use chrono::Local;
use std::fs;
use std::path::PathBuf;
use techgloss_core::{snapshot, Config};

/// Run the export command.
pub fn run(config: Config, out: Option<PathBuf>) -> anyhow::Result<()> {
    let app = App::new(config)?;

    let path =
        out.unwrap_or_else(|| PathBuf::from(snapshot::export_file_name(Local::now().date_naive())));
    let bytes = snapshot::export(app.store.list())?;
    fs::write(&path, &bytes)?;

    println!(
        "Exported {} terms to {} ({} bytes)",
        app.store.len(),
        path.display(),
        bytes.len()
    );

    Ok(())
}
