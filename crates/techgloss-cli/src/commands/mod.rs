//! Subcommand implementations.

pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod key;
pub mod list;
pub mod prefs;
pub mod show;
pub mod stats;

use crate::app::App;
use clap::Args;
use techgloss_core::{Category, MeaningsDraft, TermDraft};
use tracing::debug;

/// Term fields accepted by `add` and `edit`.
///
/// On `edit`, omitted fields keep their value and an empty string clears an
/// optional field.
#[derive(Args, Debug, Clone, Default)]
pub struct TermArgs {
    /// Japanese headword
    #[arg(long)]
    pub word: Option<String>,

    /// Kana reading
    #[arg(long)]
    pub reading: Option<String>,

    /// Alternate name
    #[arg(long)]
    pub alias: Option<String>,

    /// English name
    #[arg(long)]
    pub english: Option<String>,

    /// Mongolian definition
    #[arg(long)]
    pub mn: Option<String>,

    /// English definition
    #[arg(long)]
    pub en: Option<String>,

    /// Japanese definition
    #[arg(long)]
    pub jp: Option<String>,

    /// Category (label or name, e.g. resin-die)
    #[arg(long)]
    pub category: Option<Category>,

    /// Image URL
    #[arg(long)]
    pub image_url: Option<String>,

    /// Video URL
    #[arg(long)]
    pub video_url: Option<String>,

    /// Let the AI suggest reading, English name and definitions
    #[arg(long)]
    pub auto_fill: bool,

    /// Let the AI draw an illustration
    #[arg(long)]
    pub generate_image: bool,
}

impl TermArgs {
    /// The supplied fields as an edit buffer
    pub fn to_draft(&self) -> TermDraft {
        TermDraft {
            word: self.word.clone(),
            reading: self.reading.clone(),
            alias: self.alias.clone(),
            english: self.english.clone(),
            meanings: MeaningsDraft {
                mn: self.mn.clone(),
                en: self.en.clone(),
                jp: self.jp.clone(),
            },
            category: self.category,
            image_url: self.image_url.clone(),
            video_url: self.video_url.clone(),
        }
    }
}

/// Run the requested AI enrichment into `draft`.
///
/// Failures print a notice and leave the draft as it was.
pub async fn enrich(app: &App, draft: &mut TermDraft, word: &str, category: Category, args: &TermArgs) {
    if !args.auto_fill && !args.generate_image {
        return;
    }

    if word.trim().is_empty() {
        eprintln!("Enter the word first to use AI enrichment.");
        return;
    }

    if args.auto_fill {
        debug!(word, "Requesting auto-fill");
        match app.gateway.auto_fill_fields(word, category).await {
            Ok(fill) => {
                draft.apply_auto_fill(&fill);
                println!("AI fill applied.");
            }
            Err(e) => eprintln!("{}", e.user_notice(app.prefs.language)),
        }
    }

    if args.generate_image {
        debug!(word, "Requesting illustration");
        match app.gateway.generate_image(word, category).await {
            Ok(uri) => {
                draft.set_image(uri);
                println!("AI image generated.");
            }
            Err(e) => eprintln!("{}", e.user_notice(app.prefs.language)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        fields: TermArgs,
    }

    #[test]
    fn test_to_draft() {
        let harness = Harness::parse_from([
            "techgloss",
            "--word",
            "ゲート",
            "--mn",
            "хаалга",
            "--category",
            "resin-die",
            "--alias",
            "",
            "--auto-fill",
        ]);
        let draft = harness.fields.to_draft();

        assert_eq!(draft.word.as_deref(), Some("ゲート"));
        assert_eq!(draft.meanings.mn.as_deref(), Some("хаалга"));
        assert_eq!(draft.meanings.en, None);
        assert_eq!(draft.category, Some(Category::ResinDie));
        assert_eq!(draft.alias.as_deref(), Some(""));
        assert!(harness.fields.auto_fill);
        assert!(!harness.fields.generate_image);
    }

    #[test]
    fn test_empty_args_give_empty_draft() {
        assert!(TermArgs::default().to_draft().is_empty());
    }
}
