use crate::config::BidbookConfig;
use crate::editor::EditorDraft;
use crate::navigation::{Navigator, PanelSlot};
use crate::render::{CrossReference, DisplayTree};
use crate::search::SearchHit;
use crate::store::ContentStore;
use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;

pub mod config;
pub mod edit;
pub mod export;
pub mod helpers;
pub mod import;
pub mod load;
pub mod search;
pub mod toc;
pub mod view;

/// Notifications disappear from the client after this long.
pub const NOTIFICATION_TTL_SECS: i64 = 5;

#[derive(Debug, Clone)]
pub struct BidbookPaths {
    pub config_dir: PathBuf,
}

/// Everything that changes while the application runs. Owned by the API facade and
/// handed to commands by reference; there is no global state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: ContentStore,
    pub nav: Navigator,
    pub config: BidbookConfig,
    pub edit_mode: bool,
    /// The editor modal's draft, present while the modal is open.
    pub draft: Option<EditorDraft>,
    pub search_hits: Vec<SearchHit>,
    pub search_focused: bool,
}

impl AppState {
    pub fn new(store: ContentStore, config: BidbookConfig) -> Self {
        Self {
            store,
            nav: Navigator::new(config.title_limit),
            config,
            edit_mode: false,
            draft: None,
            search_hits: Vec::new(),
            search_focused: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub title: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl CmdMessage {
    fn new(level: MessageLevel, content: impl Into<String>) -> Self {
        Self {
            level,
            title: None,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, content)
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Success, content)
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Error, content)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::seconds(NOTIFICATION_TTL_SECS)
    }
}

/// A rendered panel as the client should show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub slot: PanelSlot,
    /// The smart title for the panel header.
    pub title: String,
    pub full_title: String,
    pub tree: DisplayTree,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
    pub full_title: String,
    pub subtitle: Option<String>,
    pub active: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub panels: Vec<PanelView>,
    pub breadcrumbs: Vec<String>,
    /// Numbered cross-references of the visible panels; `follow N` picks `references[N-1]`.
    pub references: Vec<(PanelSlot, CrossReference)>,
    pub toc: Vec<TocEntry>,
    pub search_hits: Vec<SearchHit>,
    /// Exported document text, when export goes to stdout.
    pub exported: Option<String>,
    pub exported_path: Option<PathBuf>,
    pub draft: Option<EditorDraft>,
    pub config: Option<BidbookConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_toc(mut self, toc: Vec<TocEntry>) -> Self {
        self.toc = toc;
        self
    }

    pub fn with_search_hits(mut self, hits: Vec<SearchHit>) -> Self {
        self.search_hits = hits;
        self
    }

    pub fn with_config(mut self, config: BidbookConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_draft(mut self, draft: EditorDraft) -> Self {
        self.draft = Some(draft);
        self
    }

    /// Appends the messages of another result, keeping everything else of `self`.
    pub fn merge_messages(mut self, other: CmdResult) -> Self {
        self.messages.extend(other.messages);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_expire_after_five_seconds() {
        let message = CmdMessage::info("hello");
        assert!(!message.is_expired(message.created_at + Duration::seconds(4)));
        assert!(message.is_expired(message.created_at + Duration::seconds(5)));
    }

    #[test]
    fn messages_carry_optional_titles() {
        let message = CmdMessage::warning("Some content may be limited.").with_title("Offline");
        assert_eq!(message.level, MessageLevel::Warning);
        assert_eq!(message.title.as_deref(), Some("Offline"));
    }

    #[test]
    fn merge_keeps_order() {
        let first = CmdResult::default().with_message(CmdMessage::info("a"));
        let second = CmdResult::default().with_message(CmdMessage::success("b"));
        let merged = first.merge_messages(second);
        let contents: Vec<&str> = merged.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "b"]);
    }
}
