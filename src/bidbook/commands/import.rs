use crate::commands::helpers::view_result;
use crate::commands::{AppState, CmdMessage, CmdResult};
use crate::error::Result;
use std::path::Path;

pub const IMPORTED: &str = "Data imported successfully!";

/// Merges a JSON file into the document and re-renders the current section.
/// On failure the store is left as it was.
pub fn run(state: &mut AppState, path: &Path) -> Result<CmdResult> {
    let summary = state.store.import_file(path)?;
    let doc = state.store.shared();
    state.nav.reload_current(&doc);

    let mut result = view_result(state);
    result.add_message(CmdMessage::success(IMPORTED));
    result.add_message(CmdMessage::info(format!(
        "Replaced {}; now {} sections, {} sequences, {} definitions",
        summary.replaced_keys.join(", "),
        summary.sections,
        summary.sequences,
        summary.definitions
    )));
    Ok(result)
}
