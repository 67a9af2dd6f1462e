//! Core data types for TechGloss.
//!
//! This module defines the glossary entry and the values that travel with it:
//!
//! - **Persisted**: `GlossaryTerm` and its parts, stored as camelCase JSON
//! - **Partial**: `TermDraft`, the pending edit buffer used by create/update
//! - **Ephemeral**: `AiExplanation` and `AutoFill`, never written to storage

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a glossary term.
///
/// Assigned by the store as `max + 1` on creation and never changed after.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TermId(pub u64);

impl TermId {
    /// Create a new term ID
    pub fn new(id: u64) -> Self {
        TermId(id)
    }

    /// Get the raw ID value
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The id following this one, `None` once ids are exhausted
    pub fn next(&self) -> Option<TermId> {
        self.0.checked_add(1).map(TermId)
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TermId {
    fn from(id: u64) -> Self {
        TermId(id)
    }
}

/// Closed classification of glossary entries.
///
/// The serialized form is the Japanese label used in the stored data, so
/// existing snapshots stay readable.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    #[default]
    #[serde(rename = "一般")]
    General,
    #[serde(rename = "ALJ専門")]
    AljSpecial,
    #[serde(rename = "トヨタ用語")]
    Toyota,
    #[serde(rename = "その他")]
    Others,
    #[serde(rename = "樹脂成型")]
    ResinMolding,
    #[serde(rename = "樹脂金型")]
    ResinDie,
    #[serde(rename = "設計専門")]
    DesignSpecial,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::AljSpecial,
        Category::Toyota,
        Category::Others,
        Category::ResinMolding,
        Category::ResinDie,
        Category::DesignSpecial,
    ];

    /// The stored label (e.g. "樹脂金型")
    pub fn label(&self) -> &'static str {
        match self {
            Category::General => "一般",
            Category::AljSpecial => "ALJ専門",
            Category::Toyota => "トヨタ用語",
            Category::Others => "その他",
            Category::ResinMolding => "樹脂成型",
            Category::ResinDie => "樹脂金型",
            Category::DesignSpecial => "設計専門",
        }
    }

    /// ASCII name accepted on the command line (e.g. "resin-die")
    pub fn slug(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::AljSpecial => "alj-special",
            Category::Toyota => "toyota",
            Category::Others => "others",
            Category::ResinMolding => "resin-molding",
            Category::ResinDie => "resin-die",
            Category::DesignSpecial => "design-special",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s || c.slug().replace('-', "") == normalized)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Interface and content language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Mn,
    En,
    Jp,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Mn, Language::En, Language::Jp];

    /// Storage code ("mn", "en", "jp")
    pub fn code(&self) -> &'static str {
        match self {
            Language::Mn => "mn",
            Language::En => "en",
            Language::Jp => "jp",
        }
    }

    /// English name of the language, used in AI prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Mn => "Mongolian",
            Language::En => "English",
            Language::Jp => "Japanese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mn" => Ok(Language::Mn),
            "en" => Ok(Language::En),
            "jp" | "ja" => Ok(Language::Jp),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

/// Display theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Definitions of a term in each supported language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meanings {
    /// Mongolian definition (required for persisted entries)
    pub mn: String,
    pub en: String,
    pub jp: String,
}

impl Meanings {
    /// Definition in the given language
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Mn => &self.mn,
            Language::En => &self.en,
            Language::Jp => &self.jp,
        }
    }

    /// All three definitions
    pub fn values(&self) -> [&str; 3] {
        [&self.mn, &self.en, &self.jp]
    }
}

/// A single glossary entry.
///
/// The struct-level `serde(default)` makes decoding lenient: stored or
/// imported entries with missing fields load with empty values instead of
/// failing. Content rules (`word` and `meanings.mn` non-empty) are enforced
/// by the store on create/update, not by the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlossaryTerm {
    /// Unique identifier within the store
    pub id: TermId,

    /// Primary display text (e.g. "金型")
    pub word: String,

    /// Phonetic reading (e.g. "かながた")
    pub reading: String,

    /// Alternate name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// English gloss
    pub english: String,

    pub meanings: Meanings,

    pub category: Category,

    /// Remote URL or embedded `data:` URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

impl GlossaryTerm {
    /// Create a term with the required fields; everything else is empty.
    pub fn new(id: TermId, word: impl Into<String>, meaning_mn: impl Into<String>) -> Self {
        GlossaryTerm {
            id,
            word: word.into(),
            meanings: Meanings {
                mn: meaning_mn.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Set the reading
    pub fn with_reading(mut self, reading: impl Into<String>) -> Self {
        self.reading = reading.into();
        self
    }

    /// Set the English gloss
    pub fn with_english(mut self, english: impl Into<String>) -> Self {
        self.english = english.into();
        self
    }

    /// Set the alias
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Set the English and Japanese definitions
    pub fn with_meanings(mut self, en: impl Into<String>, jp: impl Into<String>) -> Self {
        self.meanings.en = en.into();
        self.meanings.jp = jp.into();
        self
    }

    /// True if the image is embedded rather than linked
    pub fn has_embedded_image(&self) -> bool {
        self.image_url
            .as_deref()
            .map(|url| url.starts_with("data:"))
            .unwrap_or(false)
    }
}

/// Per-language partial definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeaningsDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jp: Option<String>,
}

impl MeaningsDraft {
    /// True when no language is supplied
    pub fn is_empty(&self) -> bool {
        self.mn.is_none() && self.en.is_none() && self.jp.is_none()
    }

    /// Overwrite the supplied keys of `meanings`, leaving the rest alone.
    pub fn merge_into(&self, meanings: &mut Meanings) {
        if let Some(ref mn) = self.mn {
            meanings.mn = mn.clone();
        }
        if let Some(ref en) = self.en {
            meanings.en = en.clone();
        }
        if let Some(ref jp) = self.jp {
            meanings.jp = jp.clone();
        }
    }
}

/// Pending edit buffer.
///
/// `None` means "not supplied": `create` fills defaults for it and
/// `update` keeps the existing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermDraft {
    pub word: Option<String>,
    pub reading: Option<String>,
    pub alias: Option<String>,
    pub english: Option<String>,
    pub meanings: MeaningsDraft,
    pub category: Option<Category>,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

impl TermDraft {
    /// Draft with the two required fields set
    pub fn new(word: impl Into<String>, meaning_mn: impl Into<String>) -> Self {
        TermDraft {
            word: Some(word.into()),
            meanings: MeaningsDraft {
                mn: Some(meaning_mn.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Edit buffer pre-filled from an existing term
    pub fn from_term(term: &GlossaryTerm) -> Self {
        TermDraft {
            word: Some(term.word.clone()),
            reading: Some(term.reading.clone()),
            alias: term.alias.clone(),
            english: Some(term.english.clone()),
            meanings: MeaningsDraft {
                mn: Some(term.meanings.mn.clone()),
                en: Some(term.meanings.en.clone()),
                jp: Some(term.meanings.jp.clone()),
            },
            category: Some(term.category),
            image_url: term.image_url.clone(),
            video_url: term.video_url.clone(),
        }
    }

    pub fn with_reading(mut self, reading: impl Into<String>) -> Self {
        self.reading = Some(reading.into());
        self
    }

    pub fn with_english(mut self, english: impl Into<String>) -> Self {
        self.english = Some(english.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// True when nothing is supplied
    pub fn is_empty(&self) -> bool {
        self.word.is_none()
            && self.reading.is_none()
            && self.alias.is_none()
            && self.english.is_none()
            && self.meanings.is_empty()
            && self.category.is_none()
            && self.image_url.is_none()
            && self.video_url.is_none()
    }

    /// Merge an auto-fill result into the buffer.
    ///
    /// Only non-empty values replace what the buffer holds; an empty string
    /// from the service never wipes user input.
    pub fn apply_auto_fill(&mut self, fill: &AutoFill) {
        fn take(slot: &mut Option<String>, value: &Option<String>) {
            if let Some(v) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                *slot = Some(v.to_string());
            }
        }

        take(&mut self.reading, &fill.reading);
        take(&mut self.english, &fill.english);
        if let Some(ref meanings) = fill.meanings {
            take(&mut self.meanings.mn, &meanings.mn);
            take(&mut self.meanings.en, &meanings.en);
            take(&mut self.meanings.jp, &meanings.jp);
        }
    }

    /// Assign a generated image to the buffer
    pub fn set_image(&mut self, data_uri: impl Into<String>) {
        self.image_url = Some(data_uri.into());
    }
}

/// AI-generated explanation of a term. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiExplanation {
    pub explanation: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub related_terms: Vec<String>,
}

/// Best-effort field suggestions from the AI service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoFill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meanings: Option<MeaningsDraft>,
}
