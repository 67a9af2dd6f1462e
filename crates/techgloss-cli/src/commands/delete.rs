//! Delete command - remove a term after confirmation.

use crate::app::App;
use crate::prompt::confirm;
use techgloss_core::{Config, TermId};

/// Run the delete command.
pub fn run(config: Config, id: u64, skip_confirm: bool) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    let id = TermId::from(id);

    let Some(term) = app.store.get(id) else {
        println!("No term with id {}. Nothing to delete.", id);
        return Ok(());
    };

    if !skip_confirm && !confirm(&format!("Delete term {} ({})?", id, term.word))? {
        println!("Cancelled.");
        return Ok(());
    }

    app.store.delete(id);
    println!("Term {} deleted.", id);

    Ok(())
}
