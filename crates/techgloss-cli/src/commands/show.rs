//! Show command - full detail of one term.

use crate::app::App;
use techgloss_core::{Config, DetailSession, GlossaryTerm, Language, TermDetail, TermId};

/// Run the show command.
pub async fn run(
    config: Config,
    id: u64,
    explain: bool,
    language: Option<Language>,
) -> anyhow::Result<()> {
    let app = App::new(config)?;
    let id = TermId::from(id);
    let language = language.unwrap_or(app.prefs.language);

    let Some(term) = app.store.get(id) else {
        anyhow::bail!("No term with id {}", id);
    };

    let mut session = DetailSession::new();
    let ticket = session.open(term.id, language);

    if explain {
        let explanation = app
            .gateway
            .explain_term(&term.word, term.category, language)
            .await;
        if explanation.is_none() {
            eprintln!("{}", explanation_unavailable(language));
        }
        session.complete(ticket, explanation);
    }

    print_detail(&session.detail(term), language);
    Ok(())
}

fn explanation_unavailable(language: Language) -> &'static str {
    match language {
        Language::Mn => "AI тайлбар авах боломжгүй байна.",
        Language::En => "AI explanation unavailable.",
        Language::Jp => "AIの解説を取得できませんでした。",
    }
}

fn print_term(term: &GlossaryTerm) {
    println!("{}  ({})", term.word, term.reading);
    println!("  ID:        {}", term.id);
    println!("  Category:  {}", term.category);
    println!("  English:   {}", term.english);
    if let Some(ref alias) = term.alias {
        println!("  Alias:     {}", alias);
    }

    println!();
    for lang in Language::ALL {
        println!("  [{}] {}", lang.code().to_uppercase(), term.meanings.get(lang));
    }

    if let Some(ref url) = term.image_url {
        if term.has_embedded_image() {
            println!("  Image:     embedded ({} bytes)", url.len());
        } else {
            println!("  Image:     {}", url);
        }
    }
    if let Some(ref url) = term.video_url {
        println!("  Video:     {}", url);
    }
}

fn print_detail(detail: &TermDetail<'_>, language: Language) {
    print_term(detail.term);

    let Some(ref explanation) = detail.explanation else {
        return;
    };

    println!();
    println!("AI Explanation ({})", language.display_name());
    println!("  {}", explanation.explanation);

    if !explanation.examples.is_empty() {
        println!();
        println!("  Examples:");
        for example in &explanation.examples {
            println!("    - {}", example);
        }
    }

    if !explanation.related_terms.is_empty() {
        println!();
        println!("  Related: {}", explanation.related_terms.join(", "));
    }
}
