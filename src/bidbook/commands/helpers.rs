use crate::commands::{AppState, CmdResult, PanelView};
use crate::error::{BidbookError, Result};
use crate::navigation::{Navigator, PanelSlot};
use crate::render::CrossReference;

pub fn panel_views(nav: &Navigator) -> Vec<PanelView> {
    let mut views = Vec::new();
    let slots = [
        (PanelSlot::Primary, Some(nav.primary())),
        (PanelSlot::Secondary, nav.secondary()),
        (PanelSlot::Overlay, nav.overlay()),
    ];
    for (slot, panel) in slots {
        let Some(panel) = panel else {
            continue;
        };
        views.push(PanelView {
            slot,
            title: nav.panel_title(slot).unwrap_or_default(),
            full_title: panel.tree.title.clone(),
            tree: panel.tree.clone(),
        });
    }
    views
}

/// A result showing the current panels, breadcrumbs and numbered references.
pub fn view_result(state: &AppState) -> CmdResult {
    CmdResult {
        panels: panel_views(&state.nav),
        breadcrumbs: state.nav.breadcrumbs(),
        references: state.nav.visible_references(),
        ..CmdResult::default()
    }
}

/// Resolves a 1-based reference number against the visible panels.
pub fn resolve_reference(nav: &Navigator, number: usize) -> Result<(PanelSlot, CrossReference)> {
    let references = nav.visible_references();
    number
        .checked_sub(1)
        .and_then(|index| references.get(index).cloned())
        .ok_or_else(|| {
            BidbookError::Api(format!(
                "Reference {} not found ({} visible)",
                number,
                references.len()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BidbookConfig;
    use crate::store::fixtures::StoreFixture;

    fn state() -> AppState {
        AppState::new(StoreFixture::new().store, BidbookConfig::default())
    }

    #[test]
    fn welcome_state_has_only_primary() {
        let views = panel_views(&state().nav);
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].slot, PanelSlot::Primary);
        assert_eq!(views[0].title, "Uma + PS Bridge System");
    }

    #[test]
    fn panels_are_listed_primary_secondary_overlay() {
        let mut state = state();
        let doc = state.store.shared();
        state.nav.load_section(&doc, "1c-opening");
        state.nav.open_secondary(&doc, "1c-1d-rebids");
        state.nav.open_definition_overlay(&doc, "walsh");
        let slots: Vec<PanelSlot> = panel_views(&state.nav).iter().map(|v| v.slot).collect();
        assert_eq!(
            slots,
            vec![PanelSlot::Primary, PanelSlot::Secondary, PanelSlot::Overlay]
        );
    }

    #[test]
    fn reference_numbers_are_one_based() {
        let mut state = state();
        let doc = state.store.shared();
        state.nav.load_section(&doc, "1c-opening");
        let (slot, first) = resolve_reference(&state.nav, 1).unwrap();
        assert_eq!(slot, PanelSlot::Primary);
        assert_eq!(first.target, "walsh");
        assert!(resolve_reference(&state.nav, 0).is_err());
        assert!(resolve_reference(&state.nav, 99).is_err());
    }
}
