use crate::commands::helpers::view_result;
use crate::commands::{AppState, CmdMessage, CmdResult};
use crate::search::search;

/// Searches section titles and text. The first hit is opened in the primary panel.
/// A blank query clears previous results.
pub fn run(state: &mut AppState, query: &str) -> CmdResult {
    let hits = search(state.store.document(), query, state.config.snippet_context);
    state.search_hits = hits.clone();

    if query.trim().is_empty() {
        return CmdResult::default();
    }

    let Some(first) = hits.first() else {
        return CmdResult::default()
            .with_message(CmdMessage::info(format!("No sections match '{}'", query.trim())));
    };

    let doc = state.store.shared();
    state.nav.load_section(&doc, &first.section_id);
    view_result(state).with_search_hits(hits)
}

/// Ctrl+F equivalent: the client should put the cursor in its search box.
pub fn focus(state: &mut AppState) -> CmdResult {
    state.search_focused = true;
    CmdResult::default()
}
