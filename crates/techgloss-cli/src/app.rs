//! Application state management.

use crate::key_selector::FileKeySelector;
use std::path::PathBuf;
use std::sync::Arc;
use techgloss_core::{
    Config, EnrichmentGateway, FileKeyValueStore, KeySelector, OfflineGateway, Preferences,
    TermStore,
};
use techgloss_gemini::{ApiKeySource, GeminiGateway};
use tracing::info;

/// File in the data directory holding a user-selected API key
const KEY_FILE: &str = "api_key";

/// Shared application state.
pub struct App {
    /// Configuration
    pub config: Config,

    /// The glossary
    pub store: TermStore<FileKeyValueStore>,

    /// Theme and language in effect
    pub prefs: Preferences,

    /// AI enrichment
    pub gateway: Box<dyn EnrichmentGateway>,

    /// Credential picker
    pub key_selector: Arc<FileKeySelector>,
}

impl App {
    /// Create a new application instance.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let data_dir = config.data_dir()?;
        let store = TermStore::load(FileKeyValueStore::new(&data_dir));

        let defaults = Preferences {
            theme: config.ui.default_theme,
            language: config.ui.default_language,
        };
        let prefs = Preferences::load_or(store.storage(), defaults);

        let key_selector = Arc::new(FileKeySelector::new(data_dir.join(KEY_FILE)));
        let gateway = build_gateway(&config, key_selector.clone());

        info!(
            data_dir = %data_dir.display(),
            terms = store.len(),
            gateway = gateway.name(),
            "Application initialized"
        );

        Ok(App {
            config,
            store,
            prefs,
            gateway,
            key_selector,
        })
    }

    /// Path of the user-selected key file
    pub fn key_file(&self) -> PathBuf {
        self.key_selector.path().to_path_buf()
    }
}

/// Gemini when a key can be found, the offline gateway otherwise.
fn build_gateway(config: &Config, selector: Arc<FileKeySelector>) -> Box<dyn EnrichmentGateway> {
    let key_source = ApiKeySource::from_env(config.gateway.api_key_env.clone())
        .with_key_file(selector.path());

    if key_source.is_available() {
        let selector: Arc<dyn KeySelector> = selector;
        Box::new(GeminiGateway::new(config.gateway.clone(), key_source).with_key_selector(selector))
    } else {
        Box::new(OfflineGateway)
    }
}
