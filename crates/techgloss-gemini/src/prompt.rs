//! Prompt text for the three enrichment calls.

use techgloss_core::{Category, Language};

pub(crate) fn explanation(word: &str, category: Category, language: Language) -> String {
    format!(
        "Explain the technical term \"{}\" (Context: {}) in the manufacturing/engineering field. \
         Provide a detailed explanation strictly in {}. \
         Also provide a few real-world examples and related technical terms in the same language.",
        word,
        category.label(),
        language.display_name()
    )
}

pub(crate) fn auto_fill(word: &str, category: Category) -> String {
    format!(
        "Research the technical term \"{}\" in the context of \"{}\". \
         Provide: 1. Reading (kana), 2. English name, \
         3. Short definitions in Mongolian, English, and Japanese.",
        word,
        category.label()
    )
}

pub(crate) fn illustration(word: &str, category: Category) -> String {
    format!(
        "Create a professional, clean technical illustration or realistic 3D render \
         for the manufacturing/engineering term: \"{}\". Category: {}. \
         Minimal background, high quality, 4k.",
        word,
        category.label()
    )
}
