//! Error types for TechGloss core operations.
//!
//! This module defines well-structured error types using `thiserror` for
//! library-level errors, while the CLI uses `anyhow` for convenient error
//! handling at the top level.

use crate::types::{Language, TermId};
use thiserror::Error;

/// Result type alias using GlossError
pub type Result<T> = std::result::Result<T, GlossError>;

/// Core error types for TechGloss operations.
///
/// The variants fall into three groups that callers treat differently:
/// store violations reported straight back to the caller, gateway failures
/// turned into a user notice, and storage failures recovered locally.
#[derive(Error, Debug)]
pub enum GlossError {
    // === Term Store Errors ===
    /// A required field is missing on create/save
    #[error("required field is empty: {field}")]
    Validation { field: &'static str },

    /// No term with the requested id
    #[error("term not found: {id}")]
    NotFound { id: TermId },

    /// The highest stored id has no successor
    #[error("no term id left after {max}")]
    IdExhausted { max: TermId },

    // === Snapshot Errors ===
    /// Import payload is not JSON or its top-level value is not an array
    #[error("invalid snapshot: {reason}")]
    Format { reason: String },

    // === Gateway Errors ===
    /// The AI service rejected the call for quota or rate-limit reasons
    #[error("AI quota exceeded")]
    QuotaExceeded,

    /// Any other AI service failure
    #[error("AI gateway error: {reason}")]
    Gateway { reason: String },

    // === Storage Errors ===
    /// Persisted read/write failed
    #[error("storage error: {operation} failed: {reason}")]
    Storage { operation: String, reason: String },

    // === Search Errors ===
    /// Query string could not be parsed
    #[error("invalid query: {query}: {reason}")]
    InvalidQuery { query: String, reason: String },

    // === Configuration Errors ===
    /// Configuration file parsing failed
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    // === I/O Errors ===
    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// Serialization/deserialization failed
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl GlossError {
    /// Returns true for failures coming from the AI enrichment gateway
    pub fn is_gateway_failure(&self) -> bool {
        matches!(self, GlossError::QuotaExceeded | GlossError::Gateway { .. })
    }

    /// Message shown to the user for a failed enrichment call.
    ///
    /// Quota exhaustion gets its own notice so the user knows to switch to
    /// a paid key; everything else is a generic failure.
    pub fn user_notice(&self, language: Language) -> String {
        match (self, language) {
            (GlossError::QuotaExceeded, Language::Jp) => {
                "クォータを超過しました。有料のAPIキーを選択してください。".to_string()
            }
            (GlossError::QuotaExceeded, Language::Mn) => {
                "Квота дууссан байна. Төлбөртэй API түлхүүр сонгож ашиглана уу.".to_string()
            }
            (GlossError::QuotaExceeded, Language::En) => {
                "Quota exceeded. Select a paid API key to continue.".to_string()
            }
            (GlossError::Gateway { .. }, Language::Jp) => {
                "AIの処理中にエラーが発生しました。".to_string()
            }
            (GlossError::Gateway { .. }, Language::Mn) => {
                "AI ашиглахад алдаа гарлаа.".to_string()
            }
            (GlossError::Gateway { .. }, Language::En) => "AI request failed.".to_string(),
            (other, _) => other.to_string(),
        }
    }

    /// Create a storage error
    pub fn storage(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        GlossError::Storage {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a gateway error
    pub fn gateway(reason: impl Into<String>) -> Self {
        GlossError::Gateway {
            reason: reason.into(),
        }
    }

    /// Create a snapshot format error
    pub fn format(reason: impl Into<String>) -> Self {
        GlossError::Format {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for GlossError {
    fn from(err: serde_json::Error) -> Self {
        GlossError::Serialization(err.to_string())
    }
}
