//! Error types for the Gemini gateway.

use techgloss_core::GlossError;
use thiserror::Error;

/// Marker the service uses when the selected key or model is unknown
pub const ENTITY_NOT_FOUND: &str = "Requested entity was not found";

/// Errors specific to Gemini calls.
#[derive(Error, Debug)]
pub enum GeminiError {
    /// No API key could be resolved
    #[error("no API key (set {source_hint})")]
    MissingKey { source_hint: String },

    /// Request never produced an HTTP response
    #[error("request failed: {0}")]
    Transport(reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Error object inside a 200 response
    #[error("API error {status}: {message}")]
    Api { status: String, message: String },

    /// Response had no usable candidate
    #[error("empty response")]
    EmptyResponse,

    /// Response text could not be decoded
    #[error("unparsable response: {0}")]
    Parse(String),

    /// Image call returned no inline image
    #[error("no image in response")]
    NoImage,
}

impl GeminiError {
    /// Wrap a reqwest error with its URL stripped.
    pub fn transport(err: reqwest::Error) -> Self {
        GeminiError::Transport(err.without_url())
    }

    /// Rate-limit or billing rejection.
    pub fn is_quota(&self) -> bool {
        match self {
            GeminiError::Http { status, body } => {
                *status == 429 || body.contains("RESOURCE_EXHAUSTED") || body.contains("429")
            }
            GeminiError::Api { status, message } => {
                status == "RESOURCE_EXHAUSTED" || message.contains("429")
            }
            _ => false,
        }
    }

    /// The key (or model) was not recognised by the service.
    pub fn is_entity_not_found(&self) -> bool {
        self.to_string().contains(ENTITY_NOT_FOUND)
    }
}

impl From<GeminiError> for GlossError {
    fn from(err: GeminiError) -> Self {
        if err.is_quota() {
            GlossError::QuotaExceeded
        } else {
            GlossError::gateway(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_classification() {
        let http = GeminiError::Http {
            status: 429,
            body: String::new(),
        };
        assert!(http.is_quota());

        let body = GeminiError::Http {
            status: 400,
            body: r#"{"error": {"status": "RESOURCE_EXHAUSTED"}}"#.to_string(),
        };
        assert!(body.is_quota());

        let api = GeminiError::Api {
            status: "RESOURCE_EXHAUSTED".to_string(),
            message: "Quota exceeded".to_string(),
        };
        assert!(matches!(GlossError::from(api), GlossError::QuotaExceeded));
    }

    #[test]
    fn test_generic_failures() {
        let err = GeminiError::Http {
            status: 500,
            body: "internal".to_string(),
        };
        assert!(!err.is_quota());
        assert!(matches!(GlossError::from(err), GlossError::Gateway { .. }));
        assert!(matches!(
            GlossError::from(GeminiError::NoImage),
            GlossError::Gateway { .. }
        ));
    }

    #[test]
    fn test_entity_not_found() {
        let err = GeminiError::Http {
            status: 404,
            body: format!(r#"{{"error": {{"message": "{}."}}}}"#, ENTITY_NOT_FOUND),
        };
        assert!(err.is_entity_not_found());
        assert!(!GeminiError::EmptyResponse.is_entity_not_found());
    }
}
