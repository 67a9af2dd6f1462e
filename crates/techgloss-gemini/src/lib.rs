//! # TechGloss Gemini Gateway
//!
//! This crate provides the Gemini implementation of the
//! `EnrichmentGateway` trait from `techgloss-core`. It uses the
//! `generateContent` REST endpoint for:
//!
//! - **Explanations** of a term in the viewer's language (JSON schema output)
//! - **Auto-fill** of reading, English name and definitions (JSON schema output)
//! - **Illustrations** returned as inline base64 image data
//!
//! ## Architecture
//!
//! - `gateway.rs`: The `EnrichmentGateway` implementation
//! - `api.rs`: Request/response wire types and response schemas
//! - `prompt.rs`: Prompt text
//! - `key.rs`: API key resolution
//!
//! ## Failure Handling
//!
//! HTTP 429 and `RESOURCE_EXHAUSTED` responses map to
//! `GlossError::QuotaExceeded`; every other failure maps to
//! `GlossError::Gateway`. Nothing is retried.

mod api;
mod gateway;
mod key;
mod prompt;

pub use gateway::GeminiGateway;
pub use key::ApiKeySource;

/// Error types specific to the Gemini gateway
pub mod error;
pub use error::GeminiError;
