//! Add command - create a new term.

use super::{enrich, TermArgs};
use crate::app::App;
use techgloss_core::Config;

/// Run the add command.
pub async fn run(config: Config, fields: TermArgs) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    let mut draft = fields.to_draft();

    let word = draft.word.clone().unwrap_or_default();
    let category = draft.category.unwrap_or_default();
    enrich(&app, &mut draft, &word, category, &fields).await;

    let term = app.store.create(draft)?;
    println!("Added term {} ({})", term.id, term.word);

    Ok(())
}
