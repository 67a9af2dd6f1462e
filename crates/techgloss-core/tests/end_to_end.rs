//! Whole-console scenarios: store, search, snapshot and detail view together.

use async_trait::async_trait;
use techgloss_core::snapshot;
use techgloss_core::{
    filter, AiExplanation, AutoFill, Category, CategoryFilter, DetailSession, EnrichmentGateway,
    FileKeyValueStore, GlossError, Language, Result, TermDraft, TermId, TermStore,
};
use tempfile::TempDir;
use tracing::warn;

/// Gateway whose transport always fails.
struct UnreachableGateway;

impl UnreachableGateway {
    fn send(&self) -> Result<String> {
        Err(GlossError::gateway("connection refused"))
    }
}

#[async_trait]
impl EnrichmentGateway for UnreachableGateway {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    async fn explain_term(
        &self,
        word: &str,
        _category: Category,
        _language: Language,
    ) -> Option<AiExplanation> {
        match self.send() {
            Ok(_) => None,
            Err(e) => {
                warn!(word, error = %e, "Explanation failed");
                None
            }
        }
    }

    async fn auto_fill_fields(&self, _word: &str, _category: Category) -> Result<AutoFill> {
        self.send().map(|_| AutoFill::default())
    }

    async fn generate_image(&self, _word: &str, _category: Category) -> Result<String> {
        self.send()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn ids(store: &TermStore<FileKeyValueStore>) -> Vec<u64> {
    store.list().iter().map(|t| t.id.as_u64()).collect()
}

#[test]
fn create_then_delete_from_seed() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let mut store = TermStore::load(FileKeyValueStore::new(temp_dir.path()));
    assert_eq!(ids(&store), vec![1, 2, 3]);

    let created = store.create(TermDraft::new("X", "y")).unwrap();
    assert_eq!(created.id, TermId(4));

    assert!(store.delete(TermId(2)));
    assert_eq!(ids(&store), vec![1, 3, 4]);

    // The change survives a reload
    let reloaded = TermStore::load(FileKeyValueStore::new(temp_dir.path()));
    assert_eq!(ids(&reloaded), vec![1, 3, 4]);
    assert_eq!(reloaded.get(TermId(4)).unwrap().word, "X");
}

#[test]
fn empty_word_is_rejected_and_store_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = TermStore::load(FileKeyValueStore::new(temp_dir.path()));
    let before = store.list().to_vec();

    let result = store.create(TermDraft::new("", "y"));
    assert!(matches!(result, Err(GlossError::Validation { field: "word" })));
    assert_eq!(store.list(), before.as_slice());
}

#[tokio::test]
async fn failed_explanation_still_renders_detail() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let store = TermStore::load(FileKeyValueStore::new(temp_dir.path()));
    let gateway = UnreachableGateway;
    let mut session = DetailSession::new();

    let term = store.get(TermId(1)).unwrap();
    let ticket = session.open(term.id, Language::En);
    let explanation = gateway
        .explain_term(&term.word, term.category, Language::En)
        .await;
    assert!(explanation.is_none());
    assert!(session.complete(ticket, explanation));

    let detail = session.detail(term);
    assert!(!detail.has_explanation());
    assert_eq!(detail.term.word, "金型");
    assert_eq!(detail.term.reading, "かながた");
    assert!(!detail.term.meanings.mn.is_empty());
}

#[tokio::test]
async fn failed_auto_fill_keeps_draft() {
    let gateway = UnreachableGateway;
    let mut draft = TermDraft::new("ゲート", "хаалга").with_english("Gate");

    match gateway.auto_fill_fields("ゲート", Category::ResinDie).await {
        Ok(fill) => draft.apply_auto_fill(&fill),
        Err(e) => {
            assert!(e.is_gateway_failure());
            assert_eq!(e.user_notice(Language::En), "AI request failed.");
        }
    }
    assert_eq!(draft.english.as_deref(), Some("Gate"));
}

#[test]
fn export_import_replace() {
    let source_dir = TempDir::new().unwrap();
    let mut source = TermStore::load(FileKeyValueStore::new(source_dir.path()));
    source
        .create(TermDraft::new("ゲート", "хаалга").with_category(Category::ResinDie))
        .unwrap();
    let bytes = snapshot::export(source.list()).unwrap();

    let target_dir = TempDir::new().unwrap();
    let mut target = TermStore::load(FileKeyValueStore::new(target_dir.path()));
    target.delete(TermId(1));

    let imported = snapshot::import(&bytes).unwrap();
    assert!(imported.issues.is_empty());
    target.replace_all(imported.terms);
    assert_eq!(target.list(), source.list());

    let found = filter(target.list(), "ゲート", CategoryFilter::Only(Category::ResinDie));
    assert_eq!(found.len(), 1);
}

#[test]
fn bad_import_leaves_store_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = TermStore::load(FileKeyValueStore::new(temp_dir.path()));
    let before = store.list().to_vec();

    match snapshot::import(br#"{"terms": []}"#) {
        Ok(imported) => store.replace_all(imported.terms),
        Err(e) => assert!(matches!(e, GlossError::Format { .. })),
    }
    assert_eq!(store.list(), before.as_slice());
}

#[test]
fn import_with_largest_id_blocks_create() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = TermStore::load(FileKeyValueStore::new(temp_dir.path()));

    let doc = format!(
        r#"[{{"id": {}, "word": "ゲート", "meanings": {{"mn": "хаалга"}}}}]"#,
        u64::MAX
    );
    store.replace_all(snapshot::import(doc.as_bytes()).unwrap().terms);

    let result = store.create(TermDraft::new("X", "y"));
    assert!(matches!(result, Err(GlossError::IdExhausted { .. })));
    assert_eq!(ids(&store), vec![u64::MAX]);
}

#[test]
fn import_of_mixed_entries_replaces_store() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = TermStore::load(FileKeyValueStore::new(temp_dir.path()));

    let doc = r#"[{"id": 9, "word": "ゲート", "meanings": {"mn": "хаалга"}, "category": "Plastics"}, 42]"#;
    let imported = snapshot::import(doc.as_bytes()).unwrap();
    assert!(!imported.issues.is_empty());
    store.replace_all(imported.terms);

    assert_eq!(ids(&store), vec![9, 0]);
    let created = store.create(TermDraft::new("X", "y")).unwrap();
    assert_eq!(created.id, TermId(10));
}
