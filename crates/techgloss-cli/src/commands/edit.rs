//! Edit command - change fields of an existing term.

use super::{enrich, TermArgs};
use crate::app::App;
use techgloss_core::{Config, TermId};

/// Run the edit command.
pub async fn run(config: Config, id: u64, fields: TermArgs) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    let id = TermId::from(id);

    let Some(current) = app.store.get(id) else {
        anyhow::bail!("No term with id {}", id);
    };

    let mut draft = fields.to_draft();
    let word = draft.word.clone().unwrap_or_else(|| current.word.clone());
    let category = draft.category.unwrap_or(current.category);
    enrich(&app, &mut draft, &word, category, &fields).await;

    if draft.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }

    let term = app.store.update(id, draft)?;
    println!("Updated term {} ({})", term.id, term.word);

    Ok(())
}
