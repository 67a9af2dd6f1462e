//! The Term Store: the canonical ordered list of glossary entries.
//!
//! The store is an owned object passed explicitly to whoever reads or
//! mutates it. It:
//!
//! - Loads the list from storage, falling back to the seed data
//! - Keeps insertion order (no sorting)
//! - Validates and applies create/update/delete
//! - Writes the whole list back after every mutation, together with a
//!   separate last-modified timestamp
//!
//! Storage failures never reach the caller: a failed read means the seed
//! list, a failed write is logged and skipped.

use crate::error::{GlossError, Result};
use crate::seed::seed_terms;
use crate::storage::{KeyValueStore, DATA_KEY, UPDATE_KEY};
use crate::types::{GlossaryTerm, Meanings, TermDraft, TermId};
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use tracing::{debug, info, instrument, warn};

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        ManualClock {
            now: Mutex::new(now),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// The in-memory glossary and its persistence.
///
/// ## Example
///
/// ```rust,ignore
/// use techgloss_core::{storage::MemoryKeyValueStore, TermDraft, TermStore};
///
/// let mut store = TermStore::load(MemoryKeyValueStore::new());
/// let term = store.create(TermDraft::new("金型", "хэв"))?;
/// assert_eq!(term.id.as_u64(), 4); // seed holds ids 1..=3
/// ```
pub struct TermStore<S: KeyValueStore> {
    /// Where the list and timestamp are persisted
    storage: S,

    /// All terms, in insertion order
    terms: Vec<GlossaryTerm>,

    /// When the list last changed
    last_modified: DateTime<Utc>,

    clock: Box<dyn Clock>,
}

impl<S: KeyValueStore> TermStore<S> {
    /// Load the store from `storage` using the system clock.
    pub fn load(storage: S) -> Self {
        Self::load_with_clock(storage, Box::new(SystemClock))
    }

    /// Load the store from `storage` with an explicit clock.
    ///
    /// Never fails: missing or unreadable data yields the seed list.
    pub fn load_with_clock(storage: S, clock: Box<dyn Clock>) -> Self {
        let terms = match storage.get(DATA_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<GlossaryTerm>>(&raw) {
                Ok(terms) => {
                    info!(terms = terms.len(), "Loaded glossary from storage");
                    terms
                }
                Err(e) => {
                    warn!(error = %e, "Stored glossary is malformed, using seed data");
                    seed_terms()
                }
            },
            Ok(None) => {
                debug!("No stored glossary, using seed data");
                seed_terms()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read glossary, using seed data");
                seed_terms()
            }
        };

        let last_modified = match storage.get(UPDATE_KEY) {
            Ok(Some(raw)) => DateTime::parse_from_rfc3339(raw.trim())
                .map(|t| t.with_timezone(&Utc))
                .unwrap_or_else(|e| {
                    warn!(error = %e, "Stored timestamp is malformed, using current time");
                    clock.now()
                }),
            _ => clock.now(),
        };

        TermStore {
            storage,
            terms,
            last_modified,
            clock,
        }
    }

    /// All terms in insertion order.
    pub fn list(&self) -> &[GlossaryTerm] {
        &self.terms
    }

    /// Look up a term by id.
    pub fn get(&self, id: TermId) -> Option<&GlossaryTerm> {
        self.terms.iter().find(|t| t.id == id)
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// When the list last changed.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Current time according to the store's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Next id to assign: one past the highest, or 1 when empty.
    ///
    /// Fails when the highest id is already `u64::MAX`, which only an
    /// imported snapshot can produce.
    fn next_id(&self) -> Result<TermId> {
        match self.terms.iter().map(|t| t.id).max() {
            None => Ok(TermId(1)),
            Some(max) => max.next().ok_or_else(|| {
                warn!(max = %max, "No id left to assign");
                GlossError::IdExhausted { max }
            }),
        }
    }

    /// Create a new term from `draft`.
    ///
    /// `word` and `meanings.mn` are required; unspecified fields start empty
    /// and the category defaults to `General`.
    #[instrument(skip(self, draft))]
    pub fn create(&mut self, draft: TermDraft) -> Result<GlossaryTerm> {
        require(draft.word.as_deref(), "word")?;
        require(draft.meanings.mn.as_deref(), "meanings.mn")?;
        let id = self.next_id()?;

        let mut meanings = Meanings::default();
        draft.meanings.merge_into(&mut meanings);

        let term = GlossaryTerm {
            id,
            word: draft.word.unwrap_or_default(),
            reading: draft.reading.unwrap_or_default(),
            alias: non_empty(draft.alias),
            english: draft.english.unwrap_or_default(),
            meanings,
            category: draft.category.unwrap_or_default(),
            image_url: non_empty(draft.image_url),
            video_url: non_empty(draft.video_url),
        };

        info!(id = %term.id, word = %term.word, "Created term");
        self.terms.push(term.clone());
        self.touch_and_persist();

        Ok(term)
    }

    /// Merge `draft` over the term with `id`.
    ///
    /// Supplied fields overwrite, unsupplied fields and the id are kept;
    /// `meanings` merges per language. Blanking `word` or `meanings.mn` is
    /// rejected and leaves the store unchanged.
    #[instrument(skip(self, draft))]
    pub fn update(&mut self, id: TermId, draft: TermDraft) -> Result<GlossaryTerm> {
        let position = self
            .terms
            .iter()
            .position(|t| t.id == id)
            .ok_or(GlossError::NotFound { id })?;

        if draft.word.is_some() {
            require(draft.word.as_deref(), "word")?;
        }
        if draft.meanings.mn.is_some() {
            require(draft.meanings.mn.as_deref(), "meanings.mn")?;
        }

        let term = &mut self.terms[position];
        if let Some(word) = draft.word {
            term.word = word;
        }
        if let Some(reading) = draft.reading {
            term.reading = reading;
        }
        if let Some(alias) = draft.alias {
            term.alias = non_empty(Some(alias));
        }
        if let Some(english) = draft.english {
            term.english = english;
        }
        draft.meanings.merge_into(&mut term.meanings);
        if let Some(category) = draft.category {
            term.category = category;
        }
        if let Some(image_url) = draft.image_url {
            term.image_url = non_empty(Some(image_url));
        }
        if let Some(video_url) = draft.video_url {
            term.video_url = non_empty(Some(video_url));
        }

        let updated = term.clone();
        info!(id = %id, "Updated term");
        self.touch_and_persist();

        Ok(updated)
    }

    /// Remove the term with `id`.
    ///
    /// Deleting an unknown id is a no-op. Returns whether anything was removed.
    #[instrument(skip(self))]
    pub fn delete(&mut self, id: TermId) -> bool {
        let before = self.terms.len();
        self.terms.retain(|t| t.id != id);
        let removed = self.terms.len() != before;

        if removed {
            info!(id = %id, "Deleted term");
            self.touch_and_persist();
        } else {
            debug!(id = %id, "Delete of unknown id ignored");
            self.persist_terms();
        }

        removed
    }

    /// Replace the whole list (used by snapshot import).
    #[instrument(skip(self, terms))]
    pub fn replace_all(&mut self, terms: Vec<GlossaryTerm>) {
        info!(
            previous = self.terms.len(),
            imported = terms.len(),
            "Replacing glossary"
        );
        self.terms = terms;
        self.touch_and_persist();
    }

    fn touch_and_persist(&mut self) {
        self.last_modified = self.clock.now();
        if let Err(e) = self
            .storage
            .set(UPDATE_KEY, &self.last_modified.to_rfc3339())
        {
            warn!(error = %e, "Failed to persist last-modified timestamp");
        }
        self.persist_terms();
    }

    fn persist_terms(&self) {
        let result = serde_json::to_string(&self.terms)
            .map_err(GlossError::from)
            .and_then(|json| self.storage.set(DATA_KEY, &json));

        if let Err(e) = result {
            warn!(error = %e, "Failed to persist glossary, change kept in memory only");
        }
    }
}

impl<S: KeyValueStore> std::fmt::Debug for TermStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermStore")
            .field("terms", &self.terms.len())
            .field("last_modified", &self.last_modified)
            .finish()
    }
}

fn require(value: Option<&str>, field: &'static str) -> Result<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(GlossError::Validation { field }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
