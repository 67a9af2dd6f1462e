//! # TechGloss Core Library
//!
//! This crate provides the term store, search, statistics and snapshot
//! functionality for the TechGloss glossary console. It knows nothing about
//! any particular AI service; enrichment is abstracted behind traits.
//!
//! ## Architecture
//!
//! - **Types** (`types`): Terms, categories, languages and edit drafts
//! - **Storage** (`storage`): Key-value persistence of the glossary
//! - **Store** (`store`): Validated CRUD over the term list
//! - **Search** (`search`): Free-text and category filtering
//! - **Stats** (`stats`): Category counts and time-since-change
//! - **Snapshot** (`snapshot`): JSON export and import
//! - **Gateway** (`gateway`): Interface for AI enrichment services
//! - **Detail** (`detail`): Explanation state of the detail view
//! - **Config** (`config`): Configuration management
//!
//! ## Example
//!
//! ```rust,ignore
//! use techgloss_core::{filter, CategoryFilter, FileKeyValueStore, TermDraft, TermStore};
//!
//! let mut store = TermStore::load(FileKeyValueStore::new("/tmp/techgloss"));
//! store.create(TermDraft::new("ゲート", "Хайлмал орох суваг"))?;
//!
//! for term in filter(store.list(), "gate", CategoryFilter::All) {
//!     println!("{} {}", term.id, term.word);
//! }
//! ```

pub mod config;
pub mod detail;
pub mod error;
pub mod gateway;
pub mod preferences;
pub mod search;
pub mod seed;
pub mod snapshot;
pub mod stats;
pub mod storage;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::{Config, GatewayConfig};
pub use detail::{DetailSession, ExplanationTicket, TermDetail};
pub use error::{GlossError, Result};
pub use gateway::{strip_code_fences, EnrichmentGateway, KeySelector, NoKeySelector, OfflineGateway};
pub use preferences::Preferences;
pub use search::{filter, parse_query, CategoryFilter, SearchQuery};
pub use stats::{counts_by_category, time_since, CategoryCounts, StoreSummary, TimeSince};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use store::{Clock, ManualClock, SystemClock, TermStore};
pub use types::{
    AiExplanation, AutoFill, Category, GlossaryTerm, Language, Meanings, MeaningsDraft, TermDraft,
    TermId, Theme,
};
