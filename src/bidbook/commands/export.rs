use crate::commands::{AppState, CmdMessage, CmdResult};
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Path that sends the export to stdout instead of a file.
pub const STDOUT_PATH: &str = "-";

/// Writes the whole document as indented JSON. Without a path the configured
/// `export_file` is used.
pub fn run(state: &AppState, path: Option<&Path>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if path.is_some_and(|p| p.as_os_str() == STDOUT_PATH) {
        result.exported = Some(state.store.export_json()?);
        return Ok(result);
    }

    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&state.config.export_file));
    state.store.export_to(&path)?;
    result.add_message(CmdMessage::success(format!(
        "Exported to {}",
        path.display()
    )));
    result.exported_path = Some(path);
    Ok(result)
}
