//! Stats command - category counts and last activity.

use crate::app::App;
use techgloss_core::stats::view_share;
use techgloss_core::{Config, StoreSummary};

/// Run the stats command.
pub fn run(config: Config) -> anyhow::Result<()> {
    let app = App::new(config)?;
    let summary = StoreSummary::new(app.store.list(), app.store.last_modified());
    let language = app.prefs.language;

    println!("TechGloss Statistics");
    println!("====================");
    println!();
    println!("Total terms: {}", summary.total);
    println!();
    println!("By category:");

    for (category, count) in summary.by_category.iter_all() {
        println!(
            "  {:<12} {:>5}  {:>5.1}%",
            category.label(),
            count,
            view_share(count, summary.total)
        );
    }

    println!();
    println!(
        "Last activity: {} ({})",
        summary.last_activity(app.store.now()).label(language),
        summary.last_modified.format("%Y-%m-%d %H:%M:%S UTC")
    );

    Ok(())
}
