//! # Dispatch
//!
//! Every user action a client can trigger is an [`Action`]. Clients translate their
//! input (a typed line, a key chord, a click on a numbered reference) into an action and
//! hand it to [`dispatch`], which calls the matching API method.
//!
//! Key chords go through the binding table in [`key_binding`], so a client never wires
//! a key straight to a controller method.

use crate::api::BidbookApi;
use crate::commands::CmdResult;
use crate::editor::DraftKind;
use crate::error::{BidbookError, Result};
use crate::notation::Suit;
use crate::store::DocumentSource;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Toc,
    Show(String),
    Follow(usize),
    Sequence(String),
    Definition(String),
    CloseSecondary,
    CloseDefinition,
    Back,
    Escape,
    Search(String),
    FocusSearch,
    ToggleEditMode,
    /// Ctrl+S: saves the open draft, or the pending changes in edit mode.
    Save,
    OpenEditor(DraftKind),
    InsertNotation(Suit),
    MoveCursor(usize),
    CloseEditor,
    Import(PathBuf),
    Export(Option<PathBuf>),
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    CtrlE,
    CtrlS,
    CtrlF,
    Escape,
}

impl Key {
    pub const ALL: [Key; 4] = [Key::CtrlE, Key::CtrlS, Key::CtrlF, Key::Escape];

    pub fn label(self) -> &'static str {
        match self {
            Key::CtrlE => "^E",
            Key::CtrlS => "^S",
            Key::CtrlF => "^F",
            Key::Escape => "esc",
        }
    }

    fn parse(token: &str) -> Option<Key> {
        match token.to_lowercase().as_str() {
            "^e" | "ctrl+e" => Some(Key::CtrlE),
            "^s" | "ctrl+s" => Some(Key::CtrlS),
            "^f" | "ctrl+f" => Some(Key::CtrlF),
            "esc" | "escape" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// The keyboard shortcut table.
pub fn key_binding(key: Key) -> Action {
    match key {
        Key::CtrlE => Action::ToggleEditMode,
        Key::CtrlS => Action::Save,
        Key::CtrlF => Action::FocusSearch,
        Key::Escape => Action::Escape,
    }
}

impl FromStr for Action {
    type Err = BidbookError;

    /// Parses one line of interactive input.
    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        if let Some(query) = line.strip_prefix('/') {
            return Ok(Action::Search(query.trim().to_string()));
        }
        if let Some(key) = Key::parse(line) {
            return Ok(key_binding(key));
        }
        if let Ok(number) = line.parse::<usize>() {
            return Ok(Action::Follow(number));
        }

        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };
        let action = match (verb.to_lowercase().as_str(), arg) {
            ("" | "toc", "") => Action::Toc,
            ("show" | "open", id) if !id.is_empty() => Action::Show(id.to_string()),
            ("follow" | "f", n) => Action::Follow(n.parse().map_err(|_| {
                BidbookError::Api(format!("'{}' is not a reference number", n))
            })?),
            ("seq" | "sequence", id) if !id.is_empty() => Action::Sequence(id.to_string()),
            ("def" | "definition", id) if !id.is_empty() => Action::Definition(id.to_string()),
            ("close", "") => Action::CloseSecondary,
            ("closedef", "") => Action::CloseDefinition,
            ("back", "") => Action::Back,
            ("search", query) => Action::Search(query.to_string()),
            ("edit", "") => Action::OpenEditor(DraftKind::Section),
            ("edit", kind) => Action::OpenEditor(kind.parse()?),
            ("note" | "insert", suit) => Action::InsertNotation(Suit::parse(suit).ok_or_else(
                || BidbookError::Api(format!("Unknown notation '{}', use c, d, h, s or nt", suit)),
            )?),
            ("cursor", n) => Action::MoveCursor(n.parse().map_err(|_| {
                BidbookError::Api(format!("'{}' is not a cursor position", n))
            })?),
            ("cancel", "") => Action::CloseEditor,
            ("save", "") => Action::Save,
            ("import", path) if !path.is_empty() => Action::Import(PathBuf::from(path)),
            ("export", "") => Action::Export(None),
            ("export", path) => Action::Export(Some(PathBuf::from(path))),
            ("help" | "?", "") => Action::Help,
            ("quit" | "q" | "exit", "") => Action::Quit,
            _ => {
                return Err(BidbookError::Api(format!(
                    "Unknown command '{}'. Type 'help' for a list.",
                    line
                )))
            }
        };
        Ok(action)
    }
}

/// What the client should do after an action.
#[derive(Debug)]
pub enum Outcome {
    Continue(CmdResult),
    Help,
    Quit,
}

pub fn dispatch<S: DocumentSource>(api: &mut BidbookApi<S>, action: Action) -> Result<Outcome> {
    debug!(?action, "dispatch");
    let result = match action {
        Action::Toc => api.toc(),
        Action::Show(id) => api.show_section(&id),
        Action::Follow(number) => api.follow(number)?,
        Action::Sequence(id) => api.open_sequence(&id),
        Action::Definition(id) => api.open_definition(&id),
        Action::CloseSecondary => api.close_secondary(),
        Action::CloseDefinition => api.close_definition(),
        Action::Back => api.back(),
        Action::Escape => api.escape(),
        Action::Search(query) => api.search(&query),
        Action::FocusSearch => api.focus_search(),
        Action::ToggleEditMode => api.toggle_edit_mode(),
        Action::Save if api.state().draft.is_some() => api.save_editor()?,
        Action::Save => api.save_changes(),
        Action::OpenEditor(kind) => api.open_editor(kind),
        Action::InsertNotation(suit) => api.insert_notation(suit)?,
        Action::MoveCursor(position) => api.move_cursor(position)?,
        Action::CloseEditor => api.close_editor(),
        Action::Import(path) => api.import_file(&path)?,
        Action::Export(path) => api.export(path.as_deref())?,
        Action::Help => return Ok(Outcome::Help),
        Action::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Continue(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::BidbookPaths;
    use crate::config::BidbookConfig;
    use crate::navigation::NavState;
    use crate::store::fixtures::SAMPLE_JSON;
    use tempfile::tempdir;

    struct Sample;

    impl DocumentSource for Sample {
        fn fetch(&self) -> Result<String> {
            Ok(SAMPLE_JSON.to_string())
        }

        fn describe(&self) -> String {
            "sample".to_string()
        }
    }

    fn api() -> (BidbookApi<Sample>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let paths = BidbookPaths {
            config_dir: dir.path().to_path_buf(),
        };
        let mut api = BidbookApi::new(Sample, BidbookConfig::default(), paths);
        api.load();
        (api, dir)
    }

    fn parse(line: &str) -> Action {
        line.parse().unwrap()
    }

    #[test]
    fn parses_verbs() {
        assert_eq!(parse("show 1c-opening"), Action::Show("1c-opening".into()));
        assert_eq!(parse("follow 3"), Action::Follow(3));
        assert_eq!(parse("3"), Action::Follow(3));
        assert_eq!(parse("seq 1c-1d-1n"), Action::Sequence("1c-1d-1n".into()));
        assert_eq!(parse("def walsh"), Action::Definition("walsh".into()));
        assert_eq!(parse("close"), Action::CloseSecondary);
        assert_eq!(parse("closedef"), Action::CloseDefinition);
        assert_eq!(parse("/ Walsh "), Action::Search("Walsh".into()));
        assert_eq!(parse("edit definition"), Action::OpenEditor(DraftKind::Definition));
        assert_eq!(parse("note h"), Action::InsertNotation(Suit::Hearts));
        assert_eq!(parse("cursor 4"), Action::MoveCursor(4));
        assert_eq!(parse("export"), Action::Export(None));
        assert_eq!(parse("export out.json"), Action::Export(Some("out.json".into())));
        assert_eq!(parse(""), Action::Toc);
        assert_eq!(parse("quit"), Action::Quit);
    }

    #[test]
    fn parses_key_chords_through_the_binding_table() {
        assert_eq!(parse("^E"), Action::ToggleEditMode);
        assert_eq!(parse("^s"), Action::Save);
        assert_eq!(parse("^F"), Action::FocusSearch);
        assert_eq!(parse("esc"), Action::Escape);
        for key in Key::ALL {
            assert_eq!(parse(key.label()), key_binding(key));
        }
    }

    #[test]
    fn rejects_nonsense() {
        assert!("dance".parse::<Action>().is_err());
        assert!("follow x".parse::<Action>().is_err());
        assert!("show".parse::<Action>().is_err());
        assert!("note z".parse::<Action>().is_err());
        assert!("cursor end".parse::<Action>().is_err());
    }

    #[test]
    fn dispatch_drives_navigation() {
        let (mut api, _dir) = api();
        dispatch(&mut api, parse("show 1c-opening")).unwrap();
        dispatch(&mut api, parse("follow 2")).unwrap();
        assert_eq!(api.navigator().state(), NavState::SecondaryOpen);
        dispatch(&mut api, parse("esc")).unwrap();
        assert_eq!(api.navigator().state(), NavState::SectionLoaded);
        assert!(matches!(dispatch(&mut api, parse("quit")), Ok(Outcome::Quit)));
        assert!(matches!(dispatch(&mut api, parse("help")), Ok(Outcome::Help)));
    }

    #[test]
    fn save_targets_open_draft_first() {
        let (mut api, _dir) = api();
        dispatch(&mut api, parse("edit")).unwrap();
        let err = dispatch(&mut api, parse("^S")).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a title");
        dispatch(&mut api, parse("cancel")).unwrap();
        dispatch(&mut api, parse("^E")).unwrap();
        match dispatch(&mut api, parse("^S")).unwrap() {
            Outcome::Continue(result) => {
                assert_eq!(result.messages[0].content, "Changes saved successfully!")
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn cursor_moves_need_an_open_draft() {
        let (mut api, _dir) = api();
        assert!(dispatch(&mut api, parse("cursor 0")).is_err());
        dispatch(&mut api, parse("edit")).unwrap();
        dispatch(&mut api, parse("note s")).unwrap();
        dispatch(&mut api, parse("cursor 0")).unwrap();
        dispatch(&mut api, parse("note h")).unwrap();
        assert_eq!(api.state().draft.as_ref().unwrap().body, "♥♠");
    }

    #[test]
    fn bad_reference_number_is_an_error() {
        let (mut api, _dir) = api();
        assert!(dispatch(&mut api, Action::Follow(1)).is_err());
    }
}
