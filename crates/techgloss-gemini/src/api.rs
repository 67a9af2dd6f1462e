//! generateContent wire types.

use crate::error::GeminiError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// ============================================================================
// Request
// ============================================================================

#[derive(Serialize, Debug)]
pub(crate) struct GenerateRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateRequest {
    /// Single-turn text prompt
    pub fn prompt(text: impl Into<String>) -> Self {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part::text(text)],
            }],
            generation_config: None,
        }
    }

    /// Ask for JSON matching `schema`
    pub fn with_json_schema(mut self, schema: Value) -> Self {
        let config = self.generation_config.get_or_insert_with(Default::default);
        config.response_mime_type = Some("application/json".to_string());
        config.response_schema = Some(schema);
        self
    }

    /// Request an image with the given aspect ratio
    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        let config = self.generation_config.get_or_insert_with(Default::default);
        config.image_config = Some(ImageConfig {
            aspect_ratio: aspect_ratio.into(),
        });
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub(crate) struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    fn text(text: impl Into<String>) -> Self {
        Part {
            text: Some(text.into()),
            inline_data: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct InlineData {
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    pub data: String,
}

#[derive(Serialize, Debug, Default)]
pub(crate) struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(rename = "imageConfig", skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

#[derive(Serialize, Debug)]
pub(crate) struct ImageConfig {
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: String,
}

// ============================================================================
// Response
// ============================================================================

#[derive(Deserialize, Debug)]
pub(crate) struct GenerateResponse {
    pub candidates: Option<Vec<Candidate>>,
    pub error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct Candidate {
    pub content: Option<Content>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl GenerateResponse {
    fn into_parts(self) -> Result<Vec<Part>, GeminiError> {
        if let Some(error) = self.error {
            return Err(GeminiError::Api {
                status: error.status,
                message: error.message,
            });
        }

        self.candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .filter(|parts| !parts.is_empty())
            .ok_or(GeminiError::EmptyResponse)
    }

    /// Concatenated text of the first candidate
    pub fn into_text(self) -> Result<String, GeminiError> {
        let text: String = self
            .into_parts()?
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(GeminiError::EmptyResponse);
        }
        Ok(text)
    }

    /// First inline image of the first candidate, as a `data:` URI
    pub fn into_image_uri(self) -> Result<String, GeminiError> {
        let inline = self
            .into_parts()?
            .into_iter()
            .find_map(|p| p.inline_data)
            .ok_or(GeminiError::NoImage)?;

        STANDARD
            .decode(inline.data.as_bytes())
            .map_err(|e| GeminiError::Parse(format!("image data is not base64: {}", e)))?;

        Ok(format!("data:image/png;base64,{}", inline.data))
    }
}

// ============================================================================
// Response Schemas
// ============================================================================

pub(crate) fn explanation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "explanation": { "type": "STRING" },
            "examples": { "type": "ARRAY", "items": { "type": "STRING" } },
            "relatedTerms": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["explanation", "examples", "relatedTerms"]
    })
}

pub(crate) fn auto_fill_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "reading": { "type": "STRING" },
            "english": { "type": "STRING" },
            "meanings": {
                "type": "OBJECT",
                "properties": {
                    "mn": { "type": "STRING" },
                    "en": { "type": "STRING" },
                    "jp": { "type": "STRING" }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(body: &str) -> GenerateResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_json_request_shape() {
        let request = GenerateRequest::prompt("hello").with_json_schema(explanation_schema());
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            value["generationConfig"]["responseSchema"]["required"][2],
            "relatedTerms"
        );
        assert!(value["generationConfig"].get("imageConfig").is_none());
    }

    #[test]
    fn test_image_request_shape() {
        let request = GenerateRequest::prompt("draw").with_aspect_ratio("16:9");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["generationConfig"]["imageConfig"]["aspectRatio"], "16:9");
        assert!(value["generationConfig"].get("responseSchema").is_none());
        assert!(value["contents"][0]["parts"][0].get("inlineData").is_none());
    }

    #[test]
    fn test_plain_prompt_has_no_config() {
        let value = serde_json::to_value(GenerateRequest::prompt("x")).unwrap();
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_into_text() {
        let body = r#"{"candidates": [{"content": {"role": "model",
            "parts": [{"text": "{\"a\":"}, {"text": " 1}"}]}}]}"#;
        assert_eq!(response(body).into_text().unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_empty_candidates() {
        assert!(matches!(
            response(r#"{"candidates": []}"#).into_text(),
            Err(GeminiError::EmptyResponse)
        ));
        assert!(matches!(
            response(r#"{}"#).into_text(),
            Err(GeminiError::EmptyResponse)
        ));
        assert!(matches!(
            response(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).into_text(),
            Err(GeminiError::EmptyResponse)
        ));
    }

    #[test]
    fn test_error_object() {
        let body = r#"{"error": {"code": 429, "status": "RESOURCE_EXHAUSTED", "message": "slow down"}}"#;
        let err = response(body).into_text().unwrap_err();
        assert!(err.is_quota());
    }

    #[test]
    fn test_into_image_uri() {
        let body = r#"{"candidates": [{"content": {"parts": [
            {"text": "Here is your render"},
            {"inlineData": {"mimeType": "image/png", "data": "iVBORw0KGgo="}}
        ]}}]}"#;
        assert_eq!(
            response(body).into_image_uri().unwrap(),
            "data:image/png;base64,iVBORw0KGgo="
        );
    }

    #[test]
    fn test_image_missing_or_corrupt() {
        let text_only = r#"{"candidates": [{"content": {"parts": [{"text": "sorry"}]}}]}"#;
        assert!(matches!(
            response(text_only).into_image_uri(),
            Err(GeminiError::NoImage)
        ));

        let corrupt = r#"{"candidates": [{"content": {"parts": [
            {"inlineData": {"mimeType": "image/png", "data": "not base64!"}}
        ]}}]}"#;
        assert!(matches!(
            response(corrupt).into_image_uri(),
            Err(GeminiError::Parse(_))
        ));
    }
}
