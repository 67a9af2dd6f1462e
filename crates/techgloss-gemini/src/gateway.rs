//! `EnrichmentGateway` implementation over the Gemini generateContent API.

use crate::api::{auto_fill_schema, explanation_schema, GenerateRequest, GenerateResponse};
use crate::error::GeminiError;
use crate::key::ApiKeySource;
use crate::prompt;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use techgloss_core::{
    strip_code_fences, AiExplanation, AutoFill, Category, EnrichmentGateway, GatewayConfig,
    KeySelector, Language, NoKeySelector, Result,
};
use tracing::{debug, info, instrument, warn};

/// Header carrying the API key, so it never appears in a URL
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini-backed enrichment.
///
/// Holds configuration only. Every call resolves the key and builds its own
/// HTTP client, so nothing outlives a request.
pub struct GeminiGateway {
    config: GatewayConfig,
    key_source: ApiKeySource,
    key_selector: Arc<dyn KeySelector>,
}

impl GeminiGateway {
    pub fn new(config: GatewayConfig, key_source: ApiKeySource) -> Self {
        GeminiGateway {
            config,
            key_source,
            key_selector: Arc::new(NoKeySelector),
        }
    }

    /// Hook used to let the user pick another key after a rejection
    pub fn with_key_selector(mut self, selector: Arc<dyn KeySelector>) -> Self {
        self.key_selector = selector;
        self
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Whether a key can be resolved right now
    pub fn has_key(&self) -> bool {
        self.key_source.is_available()
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            model
        )
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> std::result::Result<GenerateResponse, GeminiError> {
        let key = self.key_source.resolve()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()
            .map_err(GeminiError::transport)?;

        let response = client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, key)
            .json(request)
            .send()
            .await
            .map_err(GeminiError::transport)?;

        let status = response.status();
        let body = response.text().await.map_err(GeminiError::transport)?;

        if !status.is_success() {
            return Err(GeminiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| GeminiError::Parse(e.to_string()))
    }

    async fn generate_json<T: DeserializeOwned>(
        &self,
        request: GenerateRequest,
    ) -> std::result::Result<T, GeminiError> {
        let text = self
            .generate(&self.config.text_model, &request)
            .await?
            .into_text()?;
        parse_json(&text)
    }
}

fn parse_json<T: DeserializeOwned>(text: &str) -> std::result::Result<T, GeminiError> {
    serde_json::from_str(&strip_code_fences(text)).map_err(|e| GeminiError::Parse(e.to_string()))
}

#[async_trait]
impl EnrichmentGateway for GeminiGateway {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self), fields(model = %self.config.text_model))]
    async fn explain_term(
        &self,
        word: &str,
        category: Category,
        language: Language,
    ) -> Option<AiExplanation> {
        let request = GenerateRequest::prompt(prompt::explanation(word, category, language))
            .with_json_schema(explanation_schema());

        match self.generate_json::<AiExplanation>(request).await {
            Ok(explanation) => {
                debug!(
                    examples = explanation.examples.len(),
                    related = explanation.related_terms.len(),
                    "Received explanation"
                );
                Some(explanation)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch or parse explanation");
                if e.is_entity_not_found() {
                    info!("API key rejected, asking for another");
                    if let Err(e) = self.key_selector.open_select_key() {
                        warn!(error = %e, "Key selection failed");
                    }
                }
                None
            }
        }
    }

    #[instrument(skip(self), fields(model = %self.config.text_model))]
    async fn auto_fill_fields(&self, word: &str, category: Category) -> Result<AutoFill> {
        let request = GenerateRequest::prompt(prompt::auto_fill(word, category))
            .with_json_schema(auto_fill_schema());

        let fill: AutoFill = self.generate_json(request).await.map_err(|e| {
            warn!(error = %e, "Auto-fill failed");
            e
        })?;
        debug!("Received auto-fill");
        Ok(fill)
    }

    #[instrument(skip(self), fields(model = %self.config.image_model))]
    async fn generate_image(&self, word: &str, category: Category) -> Result<String> {
        let request = GenerateRequest::prompt(prompt::illustration(word, category))
            .with_aspect_ratio(self.config.image_aspect_ratio.clone());

        let uri = self
            .generate(&self.config.image_model, &request)
            .await
            .and_then(GenerateResponse::into_image_uri)
            .map_err(|e| {
                warn!(error = %e, "Image generation failed");
                e
            })?;
        info!(bytes = uri.len(), "Generated illustration");
        Ok(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use techgloss_core::GlossError;

    #[derive(Default)]
    struct CountingSelector {
        opened: AtomicUsize,
    }

    impl KeySelector for CountingSelector {
        fn has_selected_api_key(&self) -> bool {
            true
        }

        fn open_select_key(&self) -> Result<()> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn unreachable_config() -> GatewayConfig {
        GatewayConfig {
            // Discard port; nothing listens there
            api_base: "http://127.0.0.1:9/v1beta".to_string(),
            timeout_secs: 5,
            ..GatewayConfig::default()
        }
    }

    #[test]
    fn test_endpoint() {
        let gateway = GeminiGateway::new(
            GatewayConfig {
                api_base: "https://example.test/v1beta/".to_string(),
                ..GatewayConfig::default()
            },
            ApiKeySource::fixed("k"),
        );
        assert_eq!(
            gateway.endpoint("gemini-3-flash-preview"),
            "https://example.test/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_parse_json_strips_fences() {
        let fill: AutoFill = parse_json(
            "```json\n{\"reading\": \"かながた\", \"meanings\": {\"en\": \"mold\"}}\n```",
        )
        .unwrap();
        assert_eq!(fill.reading.as_deref(), Some("かながた"));
        assert_eq!(fill.meanings.unwrap().en.as_deref(), Some("mold"));

        let explanation: AiExplanation =
            parse_json(r#"{"explanation": "x", "examples": ["a"], "relatedTerms": ["b"]}"#)
                .unwrap();
        assert_eq!(explanation.related_terms, vec!["b".to_string()]);

        assert!(parse_json::<AiExplanation>("not json").is_err());
        assert!(parse_json::<AiExplanation>(r#"{"examples": []}"#).is_err());
    }

    #[tokio::test]
    async fn test_network_failure_yields_none() {
        let selector = Arc::new(CountingSelector::default());
        let gateway = GeminiGateway::new(unreachable_config(), ApiKeySource::fixed("test"))
            .with_key_selector(selector.clone());

        let explanation = gateway
            .explain_term("金型", Category::ResinDie, Language::Mn)
            .await;
        assert!(explanation.is_none());
        assert_eq!(selector.opened.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_network_failure_is_gateway_error() {
        let gateway = GeminiGateway::new(unreachable_config(), ApiKeySource::fixed("test"));

        let fill = gateway.auto_fill_fields("金型", Category::ResinDie).await;
        assert!(matches!(fill, Err(GlossError::Gateway { .. })));

        let image = gateway.generate_image("金型", Category::ResinDie).await;
        assert!(matches!(image, Err(GlossError::Gateway { .. })));
    }

    #[tokio::test]
    async fn test_network_failure_hides_key() {
        let secret = "SUPERSECRETKEY123";
        let gateway = GeminiGateway::new(unreachable_config(), ApiKeySource::fixed(secret));

        let err = gateway
            .auto_fill_fields("金型", Category::ResinDie)
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(!message.contains(secret), "{}", message);
        assert!(!format!("{:?}", err).contains(secret));

        let err = gateway
            .generate_image("金型", Category::ResinDie)
            .await
            .unwrap_err();
        assert!(!err.to_string().contains(secret));
    }

    #[tokio::test]
    async fn test_missing_key() {
        let gateway = GeminiGateway::new(
            unreachable_config(),
            ApiKeySource::from_env("TECHGLOSS_TEST_UNSET_VAR"),
        );
        assert!(!gateway.has_key());

        let err = gateway
            .auto_fill_fields("金型", Category::ResinDie)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no API key"));
        assert!(gateway
            .explain_term("金型", Category::ResinDie, Language::En)
            .await
            .is_none());
    }
}
