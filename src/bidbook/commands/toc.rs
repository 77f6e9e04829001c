use crate::commands::{AppState, CmdResult, TocEntry};
use crate::navigation::{smart_title, TitleContext};

/// Lists the sections in document order, marking the one currently loaded.
pub fn run(state: &AppState) -> CmdResult {
    let current = state.nav.current_section();
    let limit = state.nav.title_limit();
    let entries = state
        .store
        .document()
        .sections
        .iter()
        .map(|(id, section)| {
            let full_title = if section.title.is_empty() {
                id.clone()
            } else {
                section.title.clone()
            };
            TocEntry {
                id: id.clone(),
                title: smart_title(&full_title, TitleContext::General, limit),
                full_title,
                subtitle: section.subtitle.clone(),
                active: current == Some(id.as_str()),
            }
        })
        .collect();
    CmdResult::default().with_toc(entries)
}
