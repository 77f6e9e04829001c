//! # Navigation
//!
//! The [`Navigator`] owns the panel state: a primary panel (level A), an optional
//! secondary panel (level B), and an optional definitions overlay that sits above both.
//!
//! The navigation stack mirrors the panels:
//!
//! - empty while nothing is loaded (the primary panel shows the welcome placeholder)
//! - `[toc, level-a]` once a section is loaded
//! - `[toc, level-a, level-b]` while the secondary panel is open
//!
//! At most one `level-b` entry exists and it is always last. The overlay is not on the
//! stack at all.
//!
//! "Back" from the primary panel goes home, not to the previously loaded section.
//!
//! The navigator never looks anything up by itself: every operation that resolves an
//! id takes the [`Document`] it should resolve against.

use crate::model::Document;
use crate::render::{self, ContentKind, CrossReference, DisplayTree};
use tracing::{debug, warn};

pub const DEFAULT_TITLE_LIMIT: usize = 40;
const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLevel {
    Toc,
    LevelA,
    LevelB,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub level: NavLevel,
    pub section_id: Option<String>,
    pub title: String,
    pub content: Option<DisplayTree>,
}

impl NavEntry {
    fn toc() -> Self {
        NavEntry {
            level: NavLevel::Toc,
            section_id: None,
            title: "TOC".to_string(),
            content: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelSlot {
    Primary,
    Secondary,
    Overlay,
}

/// What a panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub kind: ContentKind,
    pub id: Option<String>,
    pub tree: DisplayTree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Empty,
    SectionLoaded,
    SecondaryOpen,
}

/// What [`Navigator::go_back`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    ClosedSecondary,
    WentHome,
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleContext<'a> {
    General,
    Breadcrumb { parent: &'a str },
}

#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<NavEntry>,
    current_section: Option<String>,
    primary: Panel,
    secondary: Option<Panel>,
    overlay: Option<Panel>,
    title_limit: usize,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE_LIMIT)
    }
}

impl Navigator {
    pub fn new(title_limit: usize) -> Self {
        Self {
            stack: Vec::new(),
            current_section: None,
            primary: welcome_panel(),
            secondary: None,
            overlay: None,
            title_limit,
        }
    }

    pub fn stack(&self) -> &[NavEntry] {
        &self.stack
    }

    pub fn current_section(&self) -> Option<&str> {
        self.current_section.as_deref()
    }

    pub fn primary(&self) -> &Panel {
        &self.primary
    }

    pub fn secondary(&self) -> Option<&Panel> {
        self.secondary.as_ref()
    }

    pub fn overlay(&self) -> Option<&Panel> {
        self.overlay.as_ref()
    }

    pub fn title_limit(&self) -> usize {
        self.title_limit
    }

    pub fn set_title_limit(&mut self, limit: usize) {
        self.title_limit = limit;
    }

    pub fn state(&self) -> NavState {
        if self.secondary.is_some() {
            NavState::SecondaryOpen
        } else if self.stack.iter().any(|e| e.level == NavLevel::LevelA) {
            NavState::SectionLoaded
        } else {
            NavState::Empty
        }
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay.is_some()
    }

    /// Resets the stack to `[toc, level-a(id)]` and closes the secondary panel.
    /// An id that does not resolve shows the loading placeholder.
    pub fn load_section(&mut self, doc: &Document, id: &str) {
        debug!(section = id, "load section");
        let section = doc.sections.get(id);
        let title = section
            .map(|s| s.title.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| id.to_string());

        self.close_secondary();
        self.current_section = Some(id.to_string());

        let tree = match section {
            Some(section) => render::render_section(section),
            None => {
                warn!(section = id, "section not found, showing loading placeholder");
                render::loading(&title)
            }
        };
        self.stack = vec![
            NavEntry::toc(),
            NavEntry {
                level: NavLevel::LevelA,
                section_id: Some(id.to_string()),
                title,
                content: Some(tree.clone()),
            },
        ];
        self.primary = Panel {
            kind: ContentKind::Section,
            id: Some(id.to_string()),
            tree,
        };
    }

    /// Re-renders the current section from `doc`. Like any section load this closes
    /// the secondary panel, so nothing rendered from the previous document stays up.
    pub fn reload_current(&mut self, doc: &Document) {
        let Some(id) = self.current_section.clone() else {
            return;
        };
        self.load_section(doc, &id);
    }

    /// Opens a sequence in the secondary panel, replacing whatever it showed.
    /// Returns false when the id did not resolve and a notice was shown instead.
    pub fn open_secondary(&mut self, doc: &Document, id: &str) -> bool {
        let panel = match doc.sequences.get(id) {
            Some(sequence) => Panel {
                kind: ContentKind::Sequence,
                id: Some(id.to_string()),
                tree: render::render_sequence(sequence),
            },
            None => {
                warn!(sequence = id, "sequence not found");
                Panel {
                    kind: ContentKind::Sequence,
                    id: Some(id.to_string()),
                    tree: render::missing(ContentKind::Sequence, id),
                }
            }
        };
        let found = !panel.tree.is_notice();
        debug!(sequence = id, found, "open secondary");
        self.show_secondary(panel);
        found
    }

    fn show_secondary(&mut self, panel: Panel) {
        self.pop_level_b();
        self.stack.push(NavEntry {
            level: NavLevel::LevelB,
            section_id: None,
            title: panel.tree.title.clone(),
            content: Some(panel.tree.clone()),
        });
        self.secondary = Some(panel);
    }

    /// Closes the secondary panel. Closing an already closed panel does nothing.
    pub fn close_secondary(&mut self) -> bool {
        self.pop_level_b();
        let was_open = self.secondary.take().is_some();
        if was_open {
            debug!("close secondary");
        }
        was_open
    }

    fn pop_level_b(&mut self) {
        if self
            .stack
            .last()
            .is_some_and(|entry| entry.level == NavLevel::LevelB)
        {
            self.stack.pop();
        }
    }

    /// Copies the secondary panel into the primary slot. The secondary panel stays
    /// open until the caller replaces it.
    pub fn promote_secondary_to_primary(&mut self) -> bool {
        let Some(secondary) = self.secondary.clone() else {
            return false;
        };
        debug!(title = %secondary.tree.title, "promote secondary to primary");

        let entry = NavEntry {
            level: NavLevel::LevelA,
            section_id: None,
            title: secondary.tree.title.clone(),
            content: Some(secondary.tree.clone()),
        };
        match self
            .stack
            .iter_mut()
            .find(|e| e.level == NavLevel::LevelA)
        {
            Some(level_a) => {
                level_a.title = entry.title;
                level_a.content = entry.content;
            }
            None => {
                let level_b = self.stack.pop().filter(|e| e.level == NavLevel::LevelB);
                self.stack = vec![NavEntry::toc(), entry];
                self.stack.extend(level_b);
            }
        }
        self.primary = secondary;
        true
    }

    /// Acts on a cross-reference span clicked in `origin`.
    ///
    /// Green spans open the overlay. Sequence spans open in the secondary panel; when
    /// clicked from inside the secondary panel, its content moves to the primary first.
    pub fn follow(&mut self, doc: &Document, origin: PanelSlot, reference: &CrossReference) -> bool {
        if reference.link.opens_definition() {
            return self.open_definition_overlay(doc, &reference.target);
        }
        if origin == PanelSlot::Secondary {
            self.promote_secondary_to_primary();
        }
        self.open_secondary(doc, &reference.target)
    }

    pub fn go_back(&mut self) -> BackOutcome {
        if self.close_secondary() {
            return BackOutcome::ClosedSecondary;
        }
        if self.stack.is_empty() {
            return BackOutcome::Nothing;
        }
        debug!("back to home");
        self.stack.clear();
        self.current_section = None;
        self.primary = welcome_panel();
        BackOutcome::WentHome
    }

    pub fn open_definition_overlay(&mut self, doc: &Document, id: &str) -> bool {
        let (tree, found) = match doc.definitions.get(id) {
            Some(definition) => (render::render_definition(definition), true),
            None => {
                warn!(definition = id, "definition not found");
                (render::missing(ContentKind::Definition, id), false)
            }
        };
        debug!(definition = id, found, "open definition overlay");
        self.overlay = Some(Panel {
            kind: ContentKind::Definition,
            id: Some(id.to_string()),
            tree,
        });
        found
    }

    pub fn close_definition_overlay(&mut self) -> bool {
        self.overlay.take().is_some()
    }

    /// The short header title of a panel.
    pub fn panel_title(&self, slot: PanelSlot) -> Option<String> {
        let panel = match slot {
            PanelSlot::Primary => Some(&self.primary),
            PanelSlot::Secondary => self.secondary.as_ref(),
            PanelSlot::Overlay => self.overlay.as_ref(),
        }?;
        Some(smart_title(
            &panel.tree.title,
            TitleContext::General,
            self.title_limit,
        ))
    }

    /// Smart titles for every stack entry, each derived relative to the entry below it.
    pub fn breadcrumbs(&self) -> Vec<String> {
        self.stack
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let context = match index.checked_sub(1).and_then(|i| self.stack.get(i)) {
                    Some(parent) => TitleContext::Breadcrumb {
                        parent: &parent.title,
                    },
                    None => TitleContext::General,
                };
                smart_title(&entry.title, context, self.title_limit)
            })
            .collect()
    }

    /// Every cross-reference visible in the panels, primary first.
    pub fn visible_references(&self) -> Vec<(PanelSlot, CrossReference)> {
        let primary = self
            .primary
            .tree
            .references()
            .into_iter()
            .map(|r| (PanelSlot::Primary, r.to_owned_ref()));
        let secondary = self
            .secondary
            .iter()
            .flat_map(|panel| panel.tree.references())
            .map(|r| (PanelSlot::Secondary, r.to_owned_ref()));
        primary.chain(secondary).collect()
    }
}

fn welcome_panel() -> Panel {
    Panel {
        kind: ContentKind::Section,
        id: None,
        tree: render::welcome(),
    }
}

/// Shortens a title for a panel header or breadcrumb.
///
/// A `"X: details"` title becomes `"X"`. In breadcrumb context a title that shares its
/// parent's leading token becomes a "Part 1"/"Part 2" label when it names responses,
/// rebids or continuations. Anything else is truncated to `limit`.
pub fn smart_title(full: &str, context: TitleContext<'_>, limit: usize) -> String {
    if let Some((head, _)) = full.split_once(": ") {
        return head.to_string();
    }
    if let TitleContext::Breadcrumb { parent } = context {
        if let Some(base) = parent.split(' ').next().filter(|base| !base.is_empty()) {
            if full.contains(base) {
                return part_title(full, base, limit.saturating_sub(5));
            }
        }
    }
    truncate_title(full, limit)
}

fn part_title(full: &str, base: &str, fallback_limit: usize) -> String {
    let lower = full.to_lowercase();
    if lower.contains("rebid") {
        format!("{} Part 2", base)
    } else if lower.contains("response") {
        format!("{} Part 1", base)
    } else if lower.contains("continuation") {
        format!("{} Part 2", base)
    } else {
        truncate_title(full, fallback_limit)
    }
}

/// Cuts `title` to `max` chars plus an ellipsis, preferring the last space when it
/// falls past 70% of `max`.
pub fn truncate_title(title: &str, max: usize) -> String {
    if title.chars().count() <= max {
        return title.to_string();
    }
    let truncated: String = title.chars().take(max).collect();
    if let Some(byte_pos) = truncated.rfind(' ') {
        let char_pos = truncated[..byte_pos].chars().count();
        if char_pos * 10 > max * 7 {
            return format!("{}{}", &truncated[..byte_pos], ELLIPSIS);
        }
    }
    format!("{}{}", truncated, ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LinkKind;
    use crate::store::fixtures::sample_document;

    fn reference(kind: LinkKind, target: &str) -> CrossReference {
        CrossReference {
            text: target.to_string(),
            link: kind,
            target: target.to_string(),
        }
    }

    fn levels(nav: &Navigator) -> Vec<NavLevel> {
        nav.stack().iter().map(|e| e.level).collect()
    }

    #[test]
    fn starts_empty_with_welcome() {
        let nav = Navigator::default();
        assert_eq!(nav.state(), NavState::Empty);
        assert!(nav.stack().is_empty());
        assert_eq!(nav.primary().tree, render::welcome());
    }

    #[test]
    fn load_section_leaves_two_entries_for_every_section() {
        let doc = sample_document();
        let mut nav = Navigator::default();
        for id in doc.sections.keys() {
            nav.open_secondary(&doc, "1c-1d-rebids");
            nav.load_section(&doc, id);
            assert_eq!(levels(&nav), vec![NavLevel::Toc, NavLevel::LevelA]);
            assert_eq!(nav.stack()[1].section_id.as_deref(), Some(id.as_str()));
            assert!(nav.secondary().is_none());
            assert_eq!(nav.state(), NavState::SectionLoaded);
        }
    }

    #[test]
    fn load_unknown_section_shows_loading() {
        let doc = sample_document();
        let mut nav = Navigator::default();
        nav.load_section(&doc, "nope");
        assert_eq!(nav.stack()[1].title, "nope");
        assert_eq!(nav.primary().tree, render::loading("nope"));
    }

    #[test]
    fn secondary_is_always_the_single_last_entry() {
        let doc = sample_document();
        let mut nav = Navigator::default();
        nav.load_section(&doc, "1c-opening");
        assert!(nav.open_secondary(&doc, "1c-1d-rebids"));
        assert!(nav.open_secondary(&doc, "1c-1d-1n"));
        assert_eq!(
            levels(&nav),
            vec![NavLevel::Toc, NavLevel::LevelA, NavLevel::LevelB]
        );
        assert_eq!(nav.state(), NavState::SecondaryOpen);
    }

    #[test]
    fn missing_sequence_shows_notice() {
        let doc = sample_document();
        let mut nav = Navigator::default();
        nav.load_section(&doc, "1c-opening");
        assert!(!nav.open_secondary(&doc, "ghost"));
        let panel = nav.secondary().unwrap();
        assert!(panel.tree.is_notice());
        assert_eq!(nav.stack().last().unwrap().title, "Missing sequence");
    }

    #[test]
    fn close_secondary_is_idempotent() {
        let doc = sample_document();
        let mut nav = Navigator::default();
        nav.load_section(&doc, "1c-opening");
        nav.open_secondary(&doc, "1c-1d-rebids");
        assert!(nav.close_secondary());
        assert!(!nav.close_secondary());
        assert_eq!(levels(&nav), vec![NavLevel::Toc, NavLevel::LevelA]);
    }

    #[test]
    fn follow_from_secondary_promotes_first() {
        let doc = sample_document();
        let mut nav = Navigator::default();
        nav.load_section(&doc, "1c-opening");
        nav.follow(&doc, PanelSlot::Primary, &reference(LinkKind::Red, "1c-1d-rebids"));
        let first = nav.secondary().unwrap().tree.clone();

        nav.follow(&doc, PanelSlot::Secondary, &reference(LinkKind::Blue, "1c-1d-1n"));
        assert_eq!(nav.primary().tree, first);
        assert_eq!(nav.stack()[1].title, first.title);
        assert_eq!(nav.secondary().unwrap().id.as_deref(), Some("1c-1d-1n"));
        assert_eq!(nav.stack().len(), 3);
    }

    #[test]
    fn follow_from_primary_does_not_promote() {
        let doc = sample_document();
        let mut nav = Navigator::default();
        nav.load_section(&doc, "1c-opening");
        let section_tree = nav.primary().tree.clone();
        nav.follow(&doc, PanelSlot::Primary, &reference(LinkKind::Red, "1c-1d-rebids"));
        nav.follow(&doc, PanelSlot::Primary, &reference(LinkKind::Blue, "1c-1d-1n"));
        assert_eq!(nav.primary().tree, section_tree);
    }

    #[test]
    fn green_references_open_the_overlay_only() {
        let doc = sample_document();
        let mut nav = Navigator::default();
        nav.load_section(&doc, "1c-opening");
        let before = nav.stack().to_vec();
        assert!(nav.follow(&doc, PanelSlot::Secondary, &reference(LinkKind::Green, "walsh")));
        assert!(nav.overlay_open());
        assert_eq!(nav.stack(), before.as_slice());
        assert!(nav.close_definition_overlay());
        assert!(!nav.close_definition_overlay());
    }

    #[test]
    fn missing_definition_shows_notice_in_overlay() {
        let doc = sample_document();
        let mut nav = Navigator::default();
        assert!(!nav.open_definition_overlay(&doc, "ghost"));
        assert_eq!(nav.overlay().unwrap().tree.title, "Missing definition");
    }

    #[test]
    fn back_closes_secondary_then_goes_home() {
        let doc = sample_document();
        let mut nav = Navigator::default();
        nav.load_section(&doc, "1c-opening");
        nav.open_secondary(&doc, "1c-1d-rebids");
        assert_eq!(nav.go_back(), BackOutcome::ClosedSecondary);
        assert_eq!(nav.go_back(), BackOutcome::WentHome);
        assert_eq!(nav.state(), NavState::Empty);
        assert_eq!(nav.current_section(), None);
        assert_eq!(nav.primary().tree.title, render::WELCOME_TITLE);
        assert_eq!(nav.go_back(), BackOutcome::Nothing);
    }

    #[test]
    fn promote_without_section_builds_level_a() {
        let doc = sample_document();
        let mut nav = Navigator::default();
        nav.open_secondary(&doc, "1c-1d-rebids");
        assert!(nav.promote_secondary_to_primary());
        assert_eq!(
            levels(&nav),
            vec![NavLevel::Toc, NavLevel::LevelA, NavLevel::LevelB]
        );
    }

    #[test]
    fn reload_closes_secondary() {
        let doc = sample_document();
        let mut nav = Navigator::default();
        nav.load_section(&doc, "1c-opening");
        nav.open_secondary(&doc, "1c-1d-rebids");
        nav.reload_current(&doc);
        assert_eq!(nav.state(), NavState::SectionLoaded);
        assert!(nav.secondary().is_none());
        assert_eq!(
            levels(&nav),
            vec![NavLevel::Toc, NavLevel::LevelA]
        );
    }

    #[test]
    fn visible_references_list_primary_before_secondary() {
        let doc = sample_document();
        let mut nav = Navigator::default();
        nav.load_section(&doc, "1c-opening");
        nav.open_secondary(&doc, "1c-1d-rebids");
        let slots: Vec<PanelSlot> = nav.visible_references().iter().map(|(s, _)| *s).collect();
        let first_secondary = slots.iter().position(|s| *s == PanelSlot::Secondary);
        assert!(slots.iter().take(first_secondary.unwrap_or(slots.len())).all(|s| *s == PanelSlot::Primary));
        assert!(slots.contains(&PanelSlot::Primary));
    }

    #[test]
    fn smart_title_splits_on_colon() {
        assert_eq!(
            smart_title("1♣ Opening: longer clubs or balanced", TitleContext::General, 40),
            "1♣ Opening"
        );
    }

    #[test]
    fn smart_title_truncates_at_word_boundary() {
        let title = "Responder continuations after the strong club";
        assert_eq!(title.chars().count(), 45);
        let short = smart_title(title, TitleContext::General, 40);
        assert!(short.ends_with('…'));
        assert!(short.chars().count() <= 41);
        assert_eq!(short, "Responder continuations after the…");
    }

    #[test]
    fn truncation_of_fifty_chars_stays_within_limit() {
        let title = "Some long bidding sequence title that goes past 40";
        assert_eq!(title.chars().count(), 50);
        let short = truncate_title(title, 40);
        assert!(short.ends_with('…'));
        assert!(short.chars().count() <= 41);
        assert_eq!(short, "Some long bidding sequence title that…");
    }

    #[test]
    fn truncation_without_late_space_cuts_hard() {
        let title = format!("A {}", "x".repeat(45));
        let short = truncate_title(&title, 40);
        assert_eq!(short.chars().count(), 41);
        assert_eq!(short, format!("A {}…", "x".repeat(38)));
    }

    #[test]
    fn short_titles_are_untouched() {
        assert_eq!(truncate_title("Walsh", 40), "Walsh");
    }

    #[test]
    fn breadcrumb_part_labels() {
        let parent = TitleContext::Breadcrumb {
            parent: "1♣ Opening",
        };
        assert_eq!(smart_title("1♣-1♦ opener rebids", parent, 40), "1♣ Part 2");
        assert_eq!(smart_title("1♣ responses", parent, 40), "1♣ Part 1");
        assert_eq!(smart_title("1♣ continuation", parent, 40), "1♣ Part 2");
        assert_eq!(smart_title("2♦ responses", parent, 40), "2♦ responses");
    }

    #[test]
    fn breadcrumbs_follow_stack() {
        let doc = sample_document();
        let mut nav = Navigator::default();
        nav.load_section(&doc, "1c-opening");
        nav.open_secondary(&doc, "1c-1d-rebids");
        let crumbs = nav.breadcrumbs();
        assert_eq!(crumbs.len(), 3);
        assert_eq!(crumbs[0], "TOC");
        assert_eq!(crumbs[1], "1♣ Opening");
        assert_eq!(crumbs[2], "1♣ Part 2");
    }
}
