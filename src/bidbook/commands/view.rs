use crate::commands::helpers::{resolve_reference, view_result};
use crate::commands::{edit, AppState, CmdMessage, CmdResult};
use crate::navigation::{BackOutcome, PanelSlot};
use crate::render::CrossReference;

pub fn show(state: &mut AppState, id: &str) -> CmdResult {
    let doc = state.store.shared();
    state.nav.load_section(&doc, id);
    view_result(state)
}

pub fn sequence(state: &mut AppState, id: &str) -> CmdResult {
    let doc = state.store.shared();
    state.nav.open_secondary(&doc, id);
    view_result(state)
}

pub fn definition(state: &mut AppState, id: &str) -> CmdResult {
    let doc = state.store.shared();
    state.nav.open_definition_overlay(&doc, id);
    view_result(state)
}

/// Follows the `number`th visible cross-reference (1-based).
pub fn follow(state: &mut AppState, number: usize) -> crate::error::Result<CmdResult> {
    let (origin, reference) = resolve_reference(&state.nav, number)?;
    Ok(follow_reference(state, origin, &reference))
}

pub fn follow_reference(
    state: &mut AppState,
    origin: PanelSlot,
    reference: &CrossReference,
) -> CmdResult {
    let doc = state.store.shared();
    state.nav.follow(&doc, origin, reference);
    view_result(state)
}

pub fn close_secondary(state: &mut AppState) -> CmdResult {
    state.nav.close_secondary();
    view_result(state)
}

pub fn close_definition(state: &mut AppState) -> CmdResult {
    state.nav.close_definition_overlay();
    view_result(state)
}

pub fn back(state: &mut AppState) -> CmdResult {
    state.nav.go_back();
    view_result(state)
}

/// Closes the topmost thing open: editor modal, definitions overlay, secondary panel,
/// primary panel (home), and finally edit mode.
pub fn escape(state: &mut AppState) -> CmdResult {
    if state.draft.is_some() {
        return edit::close_modal(state);
    }
    if state.nav.close_definition_overlay() {
        return view_result(state);
    }
    match state.nav.go_back() {
        BackOutcome::ClosedSecondary | BackOutcome::WentHome => view_result(state),
        BackOutcome::Nothing if state.edit_mode => edit::toggle_edit_mode(state),
        BackOutcome::Nothing => view_result(state).with_message(CmdMessage::info("Nothing to close")),
    }
}
