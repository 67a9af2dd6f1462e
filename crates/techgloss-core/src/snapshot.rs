//! Snapshot Codec: whole-glossary export and import.
//!
//! A snapshot is a pretty-printed JSON array of terms, written to a file
//! named after the export date (`techgloss_db_2024-05-01.json`).
//!
//! ## Import rules
//!
//! - The document must be JSON whose top-level value is an array. Anything
//!   else fails with `GlossError::Format` and nothing is imported.
//! - Every element becomes a term, whatever its shape. Missing fields become
//!   empty. A field of the wrong type (a string `id`, an unknown category)
//!   is reset to its default, and an element that is not an object becomes
//!   an empty term. Each reset is reported as a `SnapshotIssue`.
//! - Content is NOT validated. Empty words, empty Mongolian definitions and
//!   duplicate ids are imported as they are and reported by `audit`, so the
//!   caller can warn before the replace is confirmed.

use crate::error::{GlossError, Result};
use crate::types::{Category, GlossaryTerm, Meanings, TermId};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, warn};

/// Encode the full term list as pretty-printed JSON.
pub fn export(terms: &[GlossaryTerm]) -> Result<Vec<u8>> {
    let bytes = serde_json::to_vec_pretty(terms)?;
    info!(terms = terms.len(), bytes = bytes.len(), "Exported snapshot");
    Ok(bytes)
}

/// File name for a snapshot taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("techgloss_db_{}.json", date.format("%Y-%m-%d"))
}

/// A decoded snapshot and everything that looked wrong in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedSnapshot {
    /// One term per array element, in document order
    pub terms: Vec<GlossaryTerm>,
    /// Repairs made while decoding, followed by the `audit` findings
    pub issues: Vec<SnapshotIssue>,
}

/// Decode a snapshot document.
///
/// Fails with `GlossError::Format` only when the bytes are not JSON or the
/// top-level value is not an array.
pub fn import(bytes: &[u8]) -> Result<ImportedSnapshot> {
    let document: Value = serde_json::from_slice(bytes)
        .map_err(|e| GlossError::format(format!("not a JSON document: {}", e)))?;

    let elements = match document {
        Value::Array(elements) => elements,
        other => {
            return Err(GlossError::format(format!(
                "top-level value is {}, expected an array",
                json_kind(&other)
            )))
        }
    };

    let mut issues = Vec::new();
    let terms: Vec<GlossaryTerm> = elements
        .iter()
        .enumerate()
        .map(|(index, element)| decode_entry(index, element, &mut issues))
        .collect();

    if !issues.is_empty() {
        warn!(repaired = issues.len(), "Snapshot entries needed repair");
    }
    issues.extend(audit(&terms));

    debug!(terms = terms.len(), issues = issues.len(), "Decoded snapshot");
    Ok(ImportedSnapshot { terms, issues })
}

fn decode_entry(index: usize, element: &Value, issues: &mut Vec<SnapshotIssue>) -> GlossaryTerm {
    let Value::Object(entry) = element else {
        issues.push(SnapshotIssue::NotAnObject {
            index,
            kind: json_kind(element),
        });
        return GlossaryTerm::default();
    };

    match GlossaryTerm::deserialize(element) {
        Ok(term) => term,
        Err(e) => {
            debug!(index, error = %e, "Decoding entry field by field");
            EntryReader { index, issues }.read(entry)
        }
    }
}

/// Field-by-field decoder for entries the typed decoder refused.
struct EntryReader<'a> {
    index: usize,
    issues: &'a mut Vec<SnapshotIssue>,
}

impl EntryReader<'_> {
    fn read(&mut self, entry: &Map<String, Value>) -> GlossaryTerm {
        GlossaryTerm {
            id: self.id(entry.get("id")),
            word: self.text(entry.get("word"), "word").unwrap_or_default(),
            reading: self.text(entry.get("reading"), "reading").unwrap_or_default(),
            alias: self.text(entry.get("alias"), "alias"),
            english: self.text(entry.get("english"), "english").unwrap_or_default(),
            meanings: self.meanings(entry.get("meanings")),
            category: self.category(entry.get("category")),
            image_url: self.text(entry.get("imageUrl"), "imageUrl"),
            video_url: self.text(entry.get("videoUrl"), "videoUrl"),
        }
    }

    fn reset(&mut self, field: &'static str) {
        self.issues.push(SnapshotIssue::FieldReset {
            index: self.index,
            field,
        });
    }

    fn id(&mut self, value: Option<&Value>) -> TermId {
        let parsed = match value {
            None | Some(Value::Null) => return TermId::default(),
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            Some(_) => None,
        };
        parsed.map(TermId).unwrap_or_else(|| {
            self.reset("id");
            TermId::default()
        })
    }

    fn text(&mut self, value: Option<&Value>, field: &'static str) -> Option<String> {
        match value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.reset(field);
                None
            }
        }
    }

    fn category(&mut self, value: Option<&Value>) -> Category {
        match value {
            None | Some(Value::Null) => Category::default(),
            Some(Value::String(s)) => s.parse().unwrap_or_else(|_| {
                self.reset("category");
                Category::default()
            }),
            Some(_) => {
                self.reset("category");
                Category::default()
            }
        }
    }

    fn meanings(&mut self, value: Option<&Value>) -> Meanings {
        match value {
            None | Some(Value::Null) => Meanings::default(),
            Some(Value::Object(m)) => Meanings {
                mn: self.text(m.get("mn"), "meanings.mn").unwrap_or_default(),
                en: self.text(m.get("en"), "meanings.en").unwrap_or_default(),
                jp: self.text(m.get("jp"), "meanings.jp").unwrap_or_default(),
            },
            Some(_) => {
                self.reset("meanings");
                Meanings::default()
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A content problem found in imported data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotIssue {
    /// Two or more entries share an id
    DuplicateId { id: TermId },
    /// Entry has an empty word
    EmptyWord { index: usize, id: TermId },
    /// Entry has an empty Mongolian definition
    EmptyMeaning { index: usize, id: TermId },
    /// Element was not an object and was imported as an empty term
    NotAnObject { index: usize, kind: &'static str },
    /// Field had the wrong type and was reset to its default
    FieldReset { index: usize, field: &'static str },
}

impl fmt::Display for SnapshotIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotIssue::DuplicateId { id } => write!(f, "duplicate id {}", id),
            SnapshotIssue::EmptyWord { index, id } => {
                write!(f, "entry {} (id {}) has an empty word", index, id)
            }
            SnapshotIssue::EmptyMeaning { index, id } => {
                write!(f, "entry {} (id {}) has an empty Mongolian meaning", index, id)
            }
            SnapshotIssue::NotAnObject { index, kind } => {
                write!(f, "entry {} is {}, imported as an empty term", index, kind)
            }
            SnapshotIssue::FieldReset { index, field } => {
                write!(f, "entry {}: unreadable {} was reset", index, field)
            }
        }
    }
}

/// Report content problems without rejecting anything.
pub fn audit(terms: &[GlossaryTerm]) -> Vec<SnapshotIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    for (index, term) in terms.iter().enumerate() {
        if !seen.insert(term.id) && reported.insert(term.id) {
            issues.push(SnapshotIssue::DuplicateId { id: term.id });
        }
        if term.word.trim().is_empty() {
            issues.push(SnapshotIssue::EmptyWord { index, id: term.id });
        }
        if term.meanings.mn.trim().is_empty() {
            issues.push(SnapshotIssue::EmptyMeaning { index, id: term.id });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_terms;

    #[test]
    fn test_round_trip() {
        let mut terms = seed_terms();
        terms[0].image_url = Some("data:image/png;base64,AAAA".to_string());
        terms[2].video_url = Some("https://example.com/burr.mp4".to_string());

        let bytes = export(&terms).unwrap();
        let imported = import(&bytes).unwrap();
        assert_eq!(imported.terms, terms);
        assert!(imported.issues.is_empty());
    }

    #[test]
    fn test_export_is_pretty() {
        let bytes = export(&seed_terms()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("[\n"));
        assert!(!text.contains("\"imageUrl\""));
        assert!(text.contains("\"word\": \"金型\""));
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(export_file_name(date), "techgloss_db_2024-05-01.json");
    }

    #[test]
    fn test_import_rejects_non_array() {
        for doc in [r#"{"id": 1}"#, "42", "\"terms\"", "null"] {
            let result = import(doc.as_bytes());
            assert!(matches!(result, Err(GlossError::Format { .. })), "{}", doc);
        }
    }

    #[test]
    fn test_import_rejects_invalid_json() {
        assert!(matches!(
            import(b"[{\"id\": 1,"),
            Err(GlossError::Format { .. })
        ));
    }

    #[test]
    fn test_import_empty_array() {
        let imported = import(b"[]").unwrap();
        assert!(imported.terms.is_empty());
        assert!(imported.issues.is_empty());
    }

    #[test]
    fn test_import_accepts_incomplete_entries() {
        let doc = r#"[{"id": 5}, {"word": "ゲート", "category": "トヨタ用語"}]"#;
        let terms = import(doc.as_bytes()).unwrap().terms;

        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].id, TermId(5));
        assert_eq!(terms[0].word, "");
        assert_eq!(terms[1].id, TermId(0));
        assert_eq!(terms[1].category, Category::Toyota);
    }

    #[test]
    fn test_import_repairs_unshaped_entries() {
        let doc = r#"[
            {"id": "7", "word": "ゲート", "meanings": {"mn": "хаалга"}, "category": "Plastics"},
            "loose string",
            {"id": -3, "word": 12, "meanings": {"mn": "бүрхүүл", "en": ["x"]}}
        ]"#;
        let imported = import(doc.as_bytes()).unwrap();
        let terms = &imported.terms;

        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0].id, TermId(7));
        assert_eq!(terms[0].word, "ゲート");
        assert_eq!(terms[0].category, Category::General);
        assert_eq!(terms[1], GlossaryTerm::default());
        assert_eq!(terms[2].id, TermId(0));
        assert_eq!(terms[2].word, "");
        assert_eq!(terms[2].meanings.mn, "бүрхүүл");

        let repairs: Vec<_> = imported
            .issues
            .iter()
            .filter(|i| {
                matches!(
                    i,
                    SnapshotIssue::FieldReset { .. } | SnapshotIssue::NotAnObject { .. }
                )
            })
            .cloned()
            .collect();
        assert_eq!(
            repairs,
            vec![
                SnapshotIssue::FieldReset { index: 0, field: "category" },
                SnapshotIssue::NotAnObject { index: 1, kind: "a string" },
                SnapshotIssue::FieldReset { index: 2, field: "id" },
                SnapshotIssue::FieldReset { index: 2, field: "word" },
                SnapshotIssue::FieldReset { index: 2, field: "meanings.en" },
            ]
        );
        assert!(imported
            .issues
            .contains(&SnapshotIssue::EmptyWord { index: 1, id: TermId(0) }));
    }

    #[test]
    fn test_import_accepts_category_slug() {
        let doc = r#"[{"id": 1, "word": "a", "meanings": {"mn": "b"}, "category": "resin-die"}]"#;
        let imported = import(doc.as_bytes()).unwrap();
        assert_eq!(imported.terms[0].category, Category::ResinDie);
        assert!(imported.issues.is_empty());
    }

    #[test]
    fn test_audit() {
        let doc = r#"[
            {"id": 1, "word": "a", "meanings": {"mn": "b"}},
            {"id": 1, "word": "", "meanings": {"mn": "c"}},
            {"id": 1, "word": "d"}
        ]"#;
        let imported = import(doc.as_bytes()).unwrap();
        let expected = vec![
            SnapshotIssue::DuplicateId { id: TermId(1) },
            SnapshotIssue::EmptyWord { index: 1, id: TermId(1) },
            SnapshotIssue::EmptyMeaning { index: 2, id: TermId(1) },
        ];

        assert_eq!(audit(&imported.terms), expected);
        assert_eq!(imported.issues, expected);
        assert!(audit(&seed_terms()).is_empty());
    }
}
