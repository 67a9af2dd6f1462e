//! Term detail view state.
//!
//! Opening a term requests an explanation; the answer may arrive after the
//! user has already moved to another term or switched language. A
//! `DetailSession` hands out a ticket per request and only accepts the
//! result whose ticket still matches what is on screen.

use crate::types::{AiExplanation, GlossaryTerm, Language, TermId};
use tracing::debug;

/// Identifies one explanation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExplanationTicket {
    seq: u64,
    term_id: TermId,
    language: Language,
}

impl ExplanationTicket {
    pub fn term_id(&self) -> TermId {
        self.term_id
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

/// What the detail view shows for the currently viewed term.
#[derive(Debug, Default)]
pub struct DetailSession {
    seq: u64,
    current: Option<ExplanationTicket>,
    explanation: Option<AiExplanation>,
}

impl DetailSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start viewing `term_id` in `language`; any earlier request is superseded.
    pub fn open(&mut self, term_id: TermId, language: Language) -> ExplanationTicket {
        self.seq += 1;
        let ticket = ExplanationTicket {
            seq: self.seq,
            term_id,
            language,
        };
        self.current = Some(ticket);
        self.explanation = None;
        ticket
    }

    /// Deliver an explanation result.
    ///
    /// Returns true if it was applied. Results for a superseded or closed
    /// request are dropped.
    pub fn complete(&mut self, ticket: ExplanationTicket, result: Option<AiExplanation>) -> bool {
        if self.current != Some(ticket) {
            debug!(
                term = %ticket.term_id,
                language = %ticket.language,
                "Dropping stale explanation"
            );
            return false;
        }
        self.explanation = result;
        true
    }

    /// Stop viewing and discard the explanation.
    pub fn close(&mut self) {
        self.current = None;
        self.explanation = None;
    }

    /// Term currently viewed
    pub fn viewing(&self) -> Option<TermId> {
        self.current.map(|t| t.term_id)
    }

    pub fn explanation(&self) -> Option<&AiExplanation> {
        self.explanation.as_ref()
    }

    /// Bundle the viewed term with whatever explanation is available.
    pub fn detail<'a>(&self, term: &'a GlossaryTerm) -> TermDetail<'a> {
        let explanation = match self.current {
            Some(ticket) if ticket.term_id == term.id => self.explanation.clone(),
            _ => None,
        };
        TermDetail { term, explanation }
    }
}

/// A term together with its optional AI explanation.
#[derive(Debug, Clone)]
pub struct TermDetail<'a> {
    pub term: &'a GlossaryTerm,
    pub explanation: Option<AiExplanation>,
}

impl TermDetail<'_> {
    /// Whether the explanation block should be rendered
    pub fn has_explanation(&self) -> bool {
        self.explanation.is_some()
    }
}
