//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry point
//! for every bidbook operation, whatever the client.
//!
//! The facade:
//! - **Owns** the application state ([`AppState`]) and the document source
//! - **Dispatches** to the matching command function
//! - **Returns structured types** (`Result<CmdResult>`), never strings for display
//!
//! Business logic lives in `commands/*.rs`; terminal I/O lives in the CLI.
//!
//! ## Generic Over DocumentSource
//!
//! `BidbookApi<S: DocumentSource>` is generic over where the document comes from:
//! - Production: `BidbookApi<Box<dyn DocumentSource>>` (file, HTTP or embedded)
//! - Testing: any fixed in-memory source
//!
//! A new API starts with the embedded document; call [`BidbookApi::load`] to fetch from
//! the source (falling back to the embedded document on failure).

use crate::commands::{self, AppState, BidbookPaths};
use crate::config::BidbookConfig;
use crate::editor::{DraftKind, EditorDraft};
use crate::error::Result;
use crate::navigation::Navigator;
use crate::notation::Suit;
use crate::store::{ContentStore, DocumentSource};
use std::path::Path;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, PanelView, TocEntry};

impl DocumentSource for Box<dyn DocumentSource> {
    fn fetch(&self) -> Result<String> {
        (**self).fetch()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn is_embedded(&self) -> bool {
        (**self).is_embedded()
    }
}

pub struct BidbookApi<S: DocumentSource> {
    source: S,
    paths: BidbookPaths,
    state: AppState,
}

impl<S: DocumentSource> BidbookApi<S> {
    pub fn new(source: S, config: BidbookConfig, paths: BidbookPaths) -> Self {
        Self {
            source,
            paths,
            state: AppState::new(ContentStore::embedded(), config),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn navigator(&self) -> &Navigator {
        &self.state.nav
    }

    pub fn store(&self) -> &ContentStore {
        &self.state.store
    }

    pub fn paths(&self) -> &BidbookPaths {
        &self.paths
    }

    pub fn source_description(&self) -> String {
        self.source.describe()
    }

    pub fn load(&mut self) -> CmdResult {
        commands::load::run(&mut self.state, &self.source)
    }

    pub fn toc(&self) -> CmdResult {
        commands::toc::run(&self.state)
    }

    pub fn current_view(&self) -> CmdResult {
        commands::helpers::view_result(&self.state)
    }

    pub fn show_section(&mut self, id: &str) -> CmdResult {
        commands::view::show(&mut self.state, id)
    }

    pub fn open_sequence(&mut self, id: &str) -> CmdResult {
        commands::view::sequence(&mut self.state, id)
    }

    pub fn open_definition(&mut self, id: &str) -> CmdResult {
        commands::view::definition(&mut self.state, id)
    }

    pub fn follow(&mut self, number: usize) -> Result<CmdResult> {
        commands::view::follow(&mut self.state, number)
    }

    pub fn close_secondary(&mut self) -> CmdResult {
        commands::view::close_secondary(&mut self.state)
    }

    pub fn close_definition(&mut self) -> CmdResult {
        commands::view::close_definition(&mut self.state)
    }

    pub fn back(&mut self) -> CmdResult {
        commands::view::back(&mut self.state)
    }

    pub fn escape(&mut self) -> CmdResult {
        commands::view::escape(&mut self.state)
    }

    pub fn search(&mut self, query: &str) -> CmdResult {
        commands::search::run(&mut self.state, query)
    }

    pub fn focus_search(&mut self) -> CmdResult {
        commands::search::focus(&mut self.state)
    }

    pub fn import_file(&mut self, path: &Path) -> Result<CmdResult> {
        commands::import::run(&mut self.state, path)
    }

    pub fn export(&self, path: Option<&Path>) -> Result<CmdResult> {
        commands::export::run(&self.state, path)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&mut self.state, &self.paths, action)
    }

    pub fn toggle_edit_mode(&mut self) -> CmdResult {
        commands::edit::toggle_edit_mode(&mut self.state)
    }

    pub fn open_editor(&mut self, kind: DraftKind) -> CmdResult {
        commands::edit::open_modal(&mut self.state, kind)
    }

    pub fn update_draft(&mut self, draft: EditorDraft) -> Result<CmdResult> {
        commands::edit::update_draft(&mut self.state, draft)
    }

    pub fn insert_notation(&mut self, suit: Suit) -> Result<CmdResult> {
        commands::edit::insert_notation(&mut self.state, suit)
    }

    pub fn move_cursor(&mut self, position: usize) -> Result<CmdResult> {
        commands::edit::move_cursor(&mut self.state, position)
    }

    pub fn save_editor(&mut self) -> Result<CmdResult> {
        commands::edit::save_modal(&mut self.state)
    }

    pub fn close_editor(&mut self) -> CmdResult {
        commands::edit::close_modal(&mut self.state)
    }

    pub fn save_changes(&mut self) -> CmdResult {
        commands::edit::save_changes(&mut self.state)
    }
}
