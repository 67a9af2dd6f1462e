//! AI enrichment gateway traits.
//!
//! The store and the query engine never talk to an AI service. Enrichment
//! goes through the `EnrichmentGateway` trait, implemented by a service
//! adapter crate (`techgloss-gemini`) or by `OfflineGateway` when no
//! credentials are configured.
//!
//! ## Implementing a New Gateway
//!
//! 1. Create a new crate depending on `techgloss-core`
//! 2. Implement `EnrichmentGateway`, mapping quota rejections to
//!    `GlossError::QuotaExceeded` and everything else to `GlossError::Gateway`
//! 3. Make `explain_term` swallow its own failures; callers render the term
//!    without an explanation when it yields `None`

use crate::error::{GlossError, Result};
use crate::types::{AiExplanation, AutoFill, Category, Language};
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// AI-backed enrichment for glossary terms.
///
/// Implementations hold no per-session state: each call reads its
/// credentials when it runs so a key switched mid-session takes effect on
/// the next request.
#[async_trait]
pub trait EnrichmentGateway: Send + Sync {
    /// Gateway name for diagnostics
    fn name(&self) -> &'static str;

    /// Explain `word` in `language`. Failures are logged and yield `None`.
    async fn explain_term(
        &self,
        word: &str,
        category: Category,
        language: Language,
    ) -> Option<AiExplanation>;

    /// Suggest reading, English name and definitions for `word`.
    async fn auto_fill_fields(&self, word: &str, category: Category) -> Result<AutoFill>;

    /// Generate an illustration, returned as a `data:` URI.
    async fn generate_image(&self, word: &str, category: Category) -> Result<String>;
}

/// Host-provided hook for choosing the API credential.
///
/// The methods are synchronous and may block (a terminal prompt, say).
/// Gateways call `open_select_key` from inside an async call, so a
/// blocking implementation needs a runtime where that stall is acceptable,
/// such as a current-thread runtime driving one request at a time.
pub trait KeySelector: Send + Sync {
    /// Whether the user has picked a key
    fn has_selected_api_key(&self) -> bool;

    /// Ask the user to pick (another) key. May block until they answer.
    fn open_select_key(&self) -> Result<()>;
}

/// Selector for hosts without a key picker.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKeySelector;

impl KeySelector for NoKeySelector {
    fn has_selected_api_key(&self) -> bool {
        false
    }

    fn open_select_key(&self) -> Result<()> {
        debug!("No key selector available");
        Ok(())
    }
}

/// Gateway used when no service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGateway;

#[async_trait]
impl EnrichmentGateway for OfflineGateway {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn explain_term(
        &self,
        word: &str,
        _category: Category,
        _language: Language,
    ) -> Option<AiExplanation> {
        debug!(word, "Offline gateway: no explanation");
        None
    }

    async fn auto_fill_fields(&self, _word: &str, _category: Category) -> Result<AutoFill> {
        Err(GlossError::gateway("no API key"))
    }

    async fn generate_image(&self, _word: &str, _category: Category) -> Result<String> {
        Err(GlossError::gateway("no API key"))
    }
}

/// Remove Markdown code fences around a JSON payload.
///
/// Models sometimes wrap structured output in ```` ```json ```` blocks even
/// when a JSON MIME type was requested.
pub fn strip_code_fences(text: &str) -> String {
    static FENCE: OnceLock<Option<Regex>> = OnceLock::new();
    match FENCE.get_or_init(|| Regex::new(r"```[A-Za-z]*").ok()) {
        Some(fence) => fence.replace_all(text, "").trim().to_string(),
        None => text.replace("```", "").trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n[]\n```  "), "[]");
        assert_eq!(strip_code_fences("  {\"a\": 1}"), "{\"a\": 1}");
    }

    #[tokio::test]
    async fn test_offline_gateway() {
        let gateway = OfflineGateway;

        let explanation = gateway
            .explain_term("金型", Category::ResinDie, Language::En)
            .await;
        assert!(explanation.is_none());

        let fill = gateway.auto_fill_fields("金型", Category::ResinDie).await;
        assert!(matches!(fill, Err(GlossError::Gateway { .. })));

        let image = gateway.generate_image("金型", Category::ResinDie).await;
        assert!(image.unwrap_err().is_gateway_failure());
    }

    #[test]
    fn test_no_key_selector() {
        let selector = NoKeySelector;
        assert!(!selector.has_selected_api_key());
        assert!(selector.open_select_key().is_ok());
    }

    #[tokio::test]
    async fn test_gateway_as_trait_object() {
        let gateway: Box<dyn EnrichmentGateway> = Box::new(OfflineGateway);
        assert_eq!(gateway.name(), "offline");
        assert!(gateway
            .explain_term("バリ", Category::ResinMolding, Language::Jp)
            .await
            .is_none());
    }
}
