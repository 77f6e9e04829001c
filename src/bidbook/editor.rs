use crate::error::{BidbookError, Result};
use crate::notation::Suit;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::process::Command;

pub const EMPTY_TITLE_MESSAGE: &str = "Please enter a title";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftKind {
    Section,
    Definition,
}

impl DraftKind {
    pub fn heading(self) -> &'static str {
        match self {
            DraftKind::Section => "Add New Section",
            DraftKind::Definition => "Add New Definition",
        }
    }
}

impl fmt::Display for DraftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftKind::Section => f.write_str("section"),
            DraftKind::Definition => f.write_str("definition"),
        }
    }
}

impl std::str::FromStr for DraftKind {
    type Err = BidbookError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "section" | "sec" => Ok(DraftKind::Section),
            "definition" | "def" => Ok(DraftKind::Definition),
            other => Err(BidbookError::Api(format!(
                "Unknown draft kind '{}', expected section or definition",
                other
            ))),
        }
    }
}

/// The content of the editor modal: a title line and a free-text body with a cursor.
///
/// Buffer format for the `$EDITOR` round trip: title\n\nbody
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorDraft {
    pub kind: DraftKind,
    pub title: String,
    pub body: String,
    /// Insertion point in `body`, in chars.
    pub cursor: usize,
}

impl EditorDraft {
    /// An empty draft, as the modal opens.
    pub fn new(kind: DraftKind) -> Self {
        Self {
            kind,
            title: String::new(),
            body: String::new(),
            cursor: 0,
        }
    }

    pub fn with_content(kind: DraftKind, title: String, body: String) -> Self {
        let cursor = body.chars().count();
        Self {
            kind,
            title,
            body,
            cursor,
        }
    }

    /// Inserts text at the cursor and moves the cursor past it.
    pub fn insert(&mut self, text: &str) {
        let at = self
            .body
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.body.len());
        self.body.insert_str(at, text);
        self.cursor = self.body[..at].chars().count() + text.chars().count();
    }

    pub fn insert_notation(&mut self, suit: Suit) {
        self.insert(suit.symbol());
    }

    pub fn move_cursor(&mut self, position: usize) {
        self.cursor = position.min(self.body.chars().count());
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(BidbookError::Validation(EMPTY_TITLE_MESSAGE.to_string()));
        }
        Ok(())
    }

    pub fn to_buffer(&self) -> String {
        if self.body.is_empty() {
            format!("{}\n\n", self.title)
        } else {
            format!("{}\n\n{}", self.title, self.body)
        }
    }

    /// Parses an editor buffer: the first line is the title, a blank line is skipped,
    /// the rest is the body.
    pub fn from_buffer(kind: DraftKind, buffer: &str) -> Self {
        let (title, rest) = match buffer.split_once('\n') {
            Some((title, rest)) => (title, rest),
            None => (buffer, ""),
        };
        let body = rest.strip_prefix('\n').unwrap_or(rest).trim_end();
        Self::with_content(kind, title.trim().to_string(), body.to_string())
    }
}

/// Gets the editor command from environment.
/// Checks $EDITOR, then $VISUAL, then falls back to common editors.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(BidbookError::Api(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens a file in the user's editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or(editor.as_str());
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| BidbookError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(BidbookError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    Ok(fs::read_to_string(path)?)
}

/// Round-trips a draft through the user's editor.
pub fn edit_draft(initial: &EditorDraft) -> Result<EditorDraft> {
    let temp_file = env::temp_dir().join(format!(
        "bidbook_{}_{}.txt",
        initial.kind,
        std::process::id()
    ));

    fs::write(&temp_file, initial.to_buffer())?;
    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(EditorDraft::from_buffer(initial.kind, &result?))
}
