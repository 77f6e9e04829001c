//! The editor modal and edit mode.
//!
//! Saving is a stub: a valid draft is accepted and reported, but nothing is written to
//! the document.

use crate::commands::helpers::view_result;
use crate::commands::{AppState, CmdMessage, CmdResult};
use crate::editor::{DraftKind, EditorDraft};
use crate::error::{BidbookError, Result};
use crate::notation::Suit;
use tracing::{debug, info};

pub const CONTENT_SAVED: &str = "Content saved successfully!";
pub const CHANGES_SAVED: &str = "Changes saved successfully!";

pub fn toggle_edit_mode(state: &mut AppState) -> CmdResult {
    state.edit_mode = !state.edit_mode;
    debug!(edit_mode = state.edit_mode, "toggle edit mode");
    let message = if state.edit_mode {
        "Edit mode on"
    } else {
        "Edit mode off"
    };
    view_result(state).with_message(CmdMessage::info(message))
}

/// Opens the modal with an empty draft, discarding any previous one.
pub fn open_modal(state: &mut AppState, kind: DraftKind) -> CmdResult {
    let draft = EditorDraft::new(kind);
    state.draft = Some(draft.clone());
    CmdResult::default().with_draft(draft)
}

pub fn close_modal(state: &mut AppState) -> CmdResult {
    state.draft = None;
    view_result(state)
}

/// Replaces the open draft, e.g. after an external editor round trip.
pub fn update_draft(state: &mut AppState, draft: EditorDraft) -> Result<CmdResult> {
    let current = open_draft(state)?;
    *current = draft.clone();
    Ok(CmdResult::default().with_draft(draft))
}

pub fn insert_notation(state: &mut AppState, suit: Suit) -> Result<CmdResult> {
    let draft = open_draft(state)?;
    draft.insert_notation(suit);
    let draft = draft.clone();
    Ok(CmdResult::default().with_draft(draft))
}

/// Moves the draft cursor to a char position, clamped to the body.
pub fn move_cursor(state: &mut AppState, position: usize) -> Result<CmdResult> {
    let draft = open_draft(state)?;
    draft.move_cursor(position);
    let draft = draft.clone();
    Ok(CmdResult::default().with_draft(draft))
}

/// Validates and "saves" the draft. A blank title keeps the modal open.
pub fn save_modal(state: &mut AppState) -> Result<CmdResult> {
    let draft = open_draft(state)?;
    draft.validate()?;
    info!(kind = %draft.kind, title = %draft.title, "saving draft");
    state.draft = None;
    Ok(view_result(state).with_message(CmdMessage::success(CONTENT_SAVED)))
}

/// Ctrl+S: only does anything in edit mode.
pub fn save_changes(state: &mut AppState) -> CmdResult {
    if !state.edit_mode {
        return CmdResult::default();
    }
    info!("saving changes");
    CmdResult::default().with_message(CmdMessage::success(CHANGES_SAVED))
}

fn open_draft(state: &mut AppState) -> Result<&mut EditorDraft> {
    state
        .draft
        .as_mut()
        .ok_or_else(|| BidbookError::Api("The editor is not open".to_string()))
}
