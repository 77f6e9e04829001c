//! # Content Store
//!
//! The store holds the one [`Document`] the application browses. It is filled once at
//! startup and afterwards only replaced wholesale by an import.
//!
//! ## Loading
//!
//! A [`DocumentSource`] produces the raw JSON. [`ContentStore::load_or_fallback`] never
//! fails: when the source cannot be read or does not parse, the embedded default
//! document is used instead and the outcome records why.
//!
//! ## Import and export
//!
//! Import is a shallow merge at the top level: every key of the imported object
//! replaces the key of the same name in the current document, other keys are kept.
//! The merged document is fully built before it is swapped in, so a failed import
//! leaves the store untouched (the same `Arc`, not just an equal copy).
//!
//! Export writes the whole document, unknown top-level keys included, as indented JSON.

use crate::error::{BidbookError, Result};
use crate::model::Document;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

pub mod source;

pub use source::{source_for, EmbeddedSource, FileSource, HttpSource};

/// Produces the raw JSON of a document.
pub trait DocumentSource {
    fn fetch(&self) -> Result<String>;

    /// A human readable location, used in log lines and messages.
    fn describe(&self) -> String;

    fn is_embedded(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOrigin {
    Source(String),
    Fallback { source: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub store: ContentStore,
    pub origin: LoadOrigin,
}

impl LoadOutcome {
    pub fn fell_back(&self) -> bool {
        matches!(self.origin, LoadOrigin::Fallback { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Top-level keys taken from the imported file.
    pub replaced_keys: Vec<String>,
    pub sections: usize,
    pub sequences: usize,
    pub definitions: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    document: Arc<Document>,
}

impl ContentStore {
    pub fn new(document: Document) -> Self {
        Self {
            document: Arc::new(document),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let document: Document = serde_json::from_str(json)?;
        Ok(Self::new(document))
    }

    /// The embedded default document. Falls back to an empty document if it does not parse.
    pub fn embedded() -> Self {
        match Self::from_json(source::EMBEDDED_DOCUMENT) {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "embedded document does not parse");
                Self::default()
            }
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn shared(&self) -> Arc<Document> {
        Arc::clone(&self.document)
    }

    pub fn load_or_fallback(source: &dyn DocumentSource) -> LoadOutcome {
        let location = source.describe();
        let loaded = source.fetch().and_then(|json| Self::from_json(&json));
        match loaded {
            Ok(store) => {
                info!(source = %location, sections = store.document.sections.len(), "document loaded");
                LoadOutcome {
                    store,
                    origin: LoadOrigin::Source(location),
                }
            }
            Err(e) if source.is_embedded() => {
                warn!(error = %e, "embedded document does not parse");
                LoadOutcome {
                    store: Self::default(),
                    origin: LoadOrigin::Source(location),
                }
            }
            Err(e) => {
                warn!(source = %location, error = %e, "loading from embedded data");
                LoadOutcome {
                    store: Self::embedded(),
                    origin: LoadOrigin::Fallback {
                        source: location,
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    /// Shallow-merges an imported JSON object into the document.
    pub fn import_json(&mut self, json: &str) -> Result<ImportSummary> {
        let imported: Value =
            serde_json::from_str(json).map_err(|e| BidbookError::Import(e.to_string()))?;
        let Value::Object(imported) = imported else {
            return Err(BidbookError::Import(
                "expected a JSON object at the top level".to_string(),
            ));
        };

        let mut merged = match serde_json::to_value(self.document.as_ref())? {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        let replaced_keys: Vec<String> = imported.keys().cloned().collect();
        for (key, value) in imported {
            merged.insert(key, value);
        }
        let document: Document = serde_json::from_value(Value::Object(merged))
            .map_err(|e| BidbookError::Import(e.to_string()))?;

        let summary = ImportSummary {
            replaced_keys,
            sections: document.sections.len(),
            sequences: document.sequences.len(),
            definitions: document.definitions.len(),
        };
        info!(keys = ?summary.replaced_keys, "document imported");
        self.document = Arc::new(document);
        Ok(summary)
    }

    pub fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportSummary> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| BidbookError::Import(format!("{}: {}", path.display(), e)))?;
        self.import_json(&json)
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self.document.as_ref())?)
    }

    pub fn export_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.export_json()?)?;
        info!(path = %path.display(), "document exported");
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// A small document exercising every block type, both sequence schemas, and links
    /// of every color.
    pub const SAMPLE_JSON: &str = r#"{
        "metadata": {"title": "Uma + PS Bridge System", "version": "test"},
        "sections": {
            "1c-opening": {
                "id": "1c-opening",
                "title": "1♣ Opening: 16+ any shape, or 11-15 with clubs",
                "subtitle": "Strong or natural",
                "content": {
                    "overview": "1c is either strong or natural",
                    "sections": [
                        {"title": "Responses", "type": "hierarchical_table", "data": [
                            {"bid": "1c-1d", "description": "Walsh, 4+ h or s", "cellType": "responder", "level": 1,
                             "links": [{"text": "Walsh", "type": "green", "target": "walsh"}],
                             "children": [
                                {"bid": "1c-1d-1h", "description": "Opener rebids, see 1c-1d rebids", "cellType": "opener", "level": 2,
                                 "links": [{"text": "1c-1d rebids", "type": "red", "target": "1c-1d-rebids"}]}
                             ]},
                            {"bid": "1c-1n", "description": "8-10 balanced", "cellType": "responder", "level": 1}
                        ]}
                    ]
                }
            },
            "2c-opening": {
                "id": "2c-opening",
                "title": "2♣ Opening",
                "content": {
                    "sections": [
                        {"title": "Auctions", "type": "auction_table", "data": {
                            "header": "After 2c",
                            "rows": [{"bids": [{"type": "opener", "text": "2c"}, {"type": "responder", "text": "2d"},
                                               {"type": "description", "text": "relay"}]}]
                        }}
                    ]
                }
            },
            "conventions": {
                "id": "conventions",
                "title": "Conventions"
            }
        },
        "sequences": {
            "1c-1d-rebids": {
                "id": "1c-1d-rebids",
                "title": "1♣-1♦ opener rebids",
                "auction": ["1c", "1d"],
                "content": {"sections": [
                    {"title": "Rebids", "type": "table", "data": [
                        {"bid": "1c-1d-1n", "description": "12-14, see 1NT continuation", "cellType": "opener",
                         "links": [{"text": "1NT continuation", "type": "blue", "target": "1c-1d-1n"}]}
                    ]}
                ]}
            },
            "1c-1d-1n": {
                "id": "1c-1d-1n",
                "title": "1♣-1♦-1NT continuation",
                "auction": ["1c", "1d", "1n"],
                "categories": {
                    "responder": {"title": "Responder continues", "bids": [
                        {"bid": "2c", "description": "puppet to 2d", "type": "responder-bid"}
                    ]}
                }
            }
        },
        "definitions": {
            "walsh": {
                "id": "walsh",
                "title": "Walsh",
                "category": "Convention",
                "definition": "Responder bypasses d to show a major"
            }
        },
        "bid_colors": {"opener": "blue"}
    }"#;

    pub fn sample_document() -> Document {
        serde_json::from_str(SAMPLE_JSON).unwrap()
    }

    pub struct StoreFixture {
        pub store: ContentStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: ContentStore::new(sample_document()),
            }
        }

        pub fn empty() -> Self {
            Self {
                store: ContentStore::default(),
            }
        }

        pub fn with_section(mut self, id: &str, title: &str, overview: &str) -> Self {
            let json = format!(
                r#"{{"sections": {{"{id}": {{"id": "{id}", "title": "{title}", "content": {{"overview": "{overview}"}}}}}}}}"#
            );
            let mut document = self.store.document().clone();
            let extra: Document = serde_json::from_str(&json).unwrap();
            document.sections.extend(extra.sections);
            self.store = ContentStore::new(document);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{StoreFixture, SAMPLE_JSON};
    use super::*;
    use tempfile::tempdir;

    struct FailingSource;

    impl DocumentSource for FailingSource {
        fn fetch(&self) -> Result<String> {
            Err(BidbookError::Load("connection refused".to_string()))
        }

        fn describe(&self) -> String {
            "https://example.invalid/uma.json".to_string()
        }
    }

    struct StaticSource(&'static str);

    impl DocumentSource for StaticSource {
        fn fetch(&self) -> Result<String> {
            Ok(self.0.to_string())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    #[test]
    fn load_uses_the_source_when_it_works() {
        let outcome = ContentStore::load_or_fallback(&StaticSource(SAMPLE_JSON));
        assert!(!outcome.fell_back());
        assert!(outcome.store.document().sections.contains_key("1c-opening"));
    }

    #[test]
    fn load_falls_back_on_transport_failure() {
        let outcome = ContentStore::load_or_fallback(&FailingSource);
        assert!(outcome.fell_back());
        assert_eq!(
            outcome.store.document(),
            ContentStore::embedded().document()
        );
    }

    #[test]
    fn load_falls_back_on_malformed_document() {
        let outcome = ContentStore::load_or_fallback(&StaticSource("{not json"));
        match outcome.origin {
            LoadOrigin::Fallback { source, .. } => assert_eq!(source, "static"),
            other => panic!("unexpected origin {:?}", other),
        }
    }

    #[test]
    fn malformed_import_leaves_store_untouched() {
        let mut store = StoreFixture::new().store;
        let before = store.shared();
        let err = store.import_json("{\"sections\": ").unwrap_err();
        assert!(matches!(err, BidbookError::Import(_)));
        assert!(err.to_string().starts_with("Error importing data: "));
        assert!(Arc::ptr_eq(&before, &store.shared()));
    }

    #[test]
    fn non_object_import_is_rejected() {
        let mut store = StoreFixture::new().store;
        let before = store.shared();
        assert!(store.import_json("[1, 2]").is_err());
        assert!(Arc::ptr_eq(&before, &store.shared()));
    }

    #[test]
    fn import_with_wrong_shape_is_rejected() {
        let mut store = StoreFixture::new().store;
        let before = store.shared();
        assert!(store.import_json(r#"{"sections": [1, 2]}"#).is_err());
        assert!(Arc::ptr_eq(&before, &store.shared()));
    }

    #[test]
    fn import_replaces_whole_top_level_keys() {
        let mut store = StoreFixture::new().store;
        let summary = store
            .import_json(r#"{"sections": {"new": {"id": "new", "title": "New"}}, "cross_references": {}}"#)
            .unwrap();
        assert_eq!(summary.replaced_keys.len(), 2);
        assert!(summary.replaced_keys.contains(&"cross_references".to_string()));
        let doc = store.document();
        assert_eq!(doc.sections.len(), 1);
        assert!(doc.sections.contains_key("new"));
        assert!(doc.sequences.contains_key("1c-1d-rebids"));
        assert!(doc.extra.contains_key("cross_references"));
        assert!(doc.extra.contains_key("bid_colors"));
    }

    #[test]
    fn export_writes_indented_json_with_unknown_keys() {
        let store = StoreFixture::new().store;
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("uma-ps-system.json");
        store.export_to(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\n  \"metadata\""));
        let value: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["bid_colors"]["opener"], "blue");
        let reloaded = ContentStore::from_json(&written).unwrap();
        assert_eq!(reloaded.document(), store.document());
    }

    #[test]
    fn fixture_builder_adds_sections() {
        let store = StoreFixture::empty()
            .with_section("a", "Alpha", "first")
            .with_section("b", "Beta", "second")
            .store;
        let ids: Vec<&String> = store.document().sections.keys().collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
