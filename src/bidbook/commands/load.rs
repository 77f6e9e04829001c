use crate::commands::{AppState, CmdMessage, CmdResult};
use crate::store::{ContentStore, DocumentSource, LoadOrigin};
use tracing::debug;

pub const FALLBACK_WARNING: &str =
    "Loading from embedded data due to network issues. Some content may be limited.";

/// Replaces the store with the document from `source`, or the embedded one when the
/// source fails. The current section, if any, is re-rendered from the new document.
pub fn run(state: &mut AppState, source: &dyn DocumentSource) -> CmdResult {
    let outcome = ContentStore::load_or_fallback(source);
    let mut result = CmdResult::default();
    if let LoadOrigin::Fallback { source, reason } = &outcome.origin {
        debug!(%source, %reason, "startup load fell back");
        result.add_message(CmdMessage::warning(FALLBACK_WARNING).with_title("Offline"));
    }
    state.store = outcome.store;
    let doc = state.store.shared();
    state.nav.reload_current(&doc);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::config::BidbookConfig;
    use crate::error::{BidbookError, Result};
    use crate::store::fixtures::SAMPLE_JSON;

    struct Fixed(std::result::Result<&'static str, &'static str>);

    impl DocumentSource for Fixed {
        fn fetch(&self) -> Result<String> {
            self.0
                .map(str::to_string)
                .map_err(|e| BidbookError::Load(e.to_string()))
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    #[test]
    fn successful_load_has_no_messages() {
        let mut state = AppState::new(ContentStore::default(), BidbookConfig::default());
        let result = run(&mut state, &Fixed(Ok(SAMPLE_JSON)));
        assert!(result.messages.is_empty());
        assert!(state.store.document().sections.contains_key("1c-opening"));
    }

    #[test]
    fn failed_load_warns_and_uses_embedded_document() {
        let mut state = AppState::new(ContentStore::default(), BidbookConfig::default());
        let result = run(&mut state, &Fixed(Err("503")));
        assert_eq!(result.messages.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(result.messages[0].content, FALLBACK_WARNING);
        assert_eq!(state.store.document(), ContentStore::embedded().document());
    }
}
