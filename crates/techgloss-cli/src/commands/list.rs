//! List command - show terms matching a query.

use crate::app::App;
use crate::OutputFormat;
use techgloss_core::search::parse_query;
use techgloss_core::stats::view_share;
use techgloss_core::{Category, CategoryFilter, Config};

/// Run the list command.
pub fn run(
    config: Config,
    query: &str,
    category: Option<Category>,
    limit: Option<usize>,
    output: OutputFormat,
) -> anyhow::Result<()> {
    let app = App::new(config)?;

    let mut query = parse_query(query)?;
    if let Some(category) = category {
        query = query.with_category(CategoryFilter::Only(category));
    }

    let matches = query.apply(app.store.list());
    let limit = match limit.unwrap_or(app.config.ui.page_size) {
        0 => usize::MAX,
        n => n,
    };
    let shown: Vec<_> = matches.iter().take(limit).collect();

    match output {
        OutputFormat::Text => {
            for term in &shown {
                println!(
                    "{:>4}  {}  {}  {}  [{}]",
                    term.id, term.word, term.reading, term.english, term.category
                );
            }

            eprintln!();
            eprintln!(
                "Showing {} of {} matches in {} ({:.1}% of {} terms)",
                shown.len(),
                matches.len(),
                query.category(),
                view_share(matches.len(), app.store.len()),
                app.store.len()
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
    }

    Ok(())
}
