//! API key resolution.

use crate::error::GeminiError;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Where the API key comes from.
///
/// Resolved on every call: an explicit key wins, then the key file (so a key
/// switched by the user applies immediately), then the environment variable.
#[derive(Debug, Clone, Default)]
pub struct ApiKeySource {
    key: Option<String>,
    key_file: Option<PathBuf>,
    env_var: Option<String>,
}

impl ApiKeySource {
    /// Read the key from an environment variable
    pub fn from_env(var: impl Into<String>) -> Self {
        ApiKeySource {
            env_var: Some(var.into()),
            ..Default::default()
        }
    }

    /// Use a fixed key
    pub fn fixed(key: impl Into<String>) -> Self {
        ApiKeySource {
            key: Some(key.into()),
            ..Default::default()
        }
    }

    /// Prefer a key stored in `path` when it exists
    pub fn with_key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.key_file = Some(path.into());
        self
    }

    /// Resolve the key now.
    pub fn resolve(&self) -> Result<String, GeminiError> {
        if let Some(key) = self.key.as_deref().and_then(non_blank) {
            return Ok(key);
        }

        if let Some(ref path) = self.key_file {
            match fs::read_to_string(path) {
                Ok(contents) => {
                    if let Some(key) = non_blank(&contents) {
                        debug!(path = %path.display(), "Using API key from key file");
                        return Ok(key);
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to read key file"),
            }
        }

        if let Some(ref var) = self.env_var {
            if let Some(key) = std::env::var(var).ok().as_deref().and_then(non_blank) {
                return Ok(key);
            }
        }

        Err(GeminiError::MissingKey {
            source_hint: self.hint(),
        })
    }

    /// Whether any key is currently available
    pub fn is_available(&self) -> bool {
        self.resolve().is_ok()
    }

    fn hint(&self) -> String {
        let mut places = Vec::new();
        if let Some(ref path) = self.key_file {
            places.push(path.display().to_string());
        }
        if let Some(ref var) = self.env_var {
            places.push(var.clone());
        }
        if places.is_empty() {
            "an API key".to_string()
        } else {
            places.join(" or ")
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
