//! Styles for the bidbook terminal client.
//!
//! Templates and the renderer only use the semantic names in [`names`]: what a piece of
//! text *is* (an opener bid, a green reference, a breadcrumb), never what it looks like.
//! [`BIDBOOK_THEME`] maps those names onto a small visual palette, so restyling the client
//! is a change to this file only.
//!
//! The palette follows the bidding book conventions: opener bids on one side, responder
//! bids on the other, hearts and diamonds in red, and cross-references colored by what
//! they open (green → definition, red and blue → sequence).

use super::theme::{rgb_to_ansi256, Theme};
use console::Style;
use once_cell::sync::Lazy;

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const REGULAR: &str = "regular";
    pub const MUTED: &str = "muted";
    pub const FAINT: &str = "faint";
    pub const TITLE: &str = "title";
    pub const BREADCRUMB: &str = "breadcrumb";
    pub const HEADING: &str = "heading";
    pub const SUBTITLE: &str = "subtitle";
    pub const OPENER: &str = "opener";
    pub const RESPONDER: &str = "responder";
    pub const SUIT_RED: &str = "suit-red";
    pub const REF_GREEN: &str = "ref-green";
    pub const REF_RED: &str = "ref-red";
    pub const REF_BLUE: &str = "ref-blue";
    pub const REF_NUMBER: &str = "ref-number";
    pub const ANNOTATION: &str = "annotation";
    pub const NOTICE: &str = "notice";
    pub const PLACEHOLDER: &str = "placeholder";
    pub const ACTIVE: &str = "active";
    pub const ERROR: &str = "error";
    pub const WARNING: &str = "warning";
    pub const SUCCESS: &str = "success";
    pub const INFO: &str = "info";
}

pub static BIDBOOK_THEME: Lazy<Theme> = Lazy::new(build_theme);

fn build_theme() -> Theme {
    let regular = Style::new();
    let muted = Style::new().color256(rgb_to_ansi256((128, 128, 128)));
    let faint = Style::new().color256(rgb_to_ansi256((90, 90, 90)));
    let red = Style::new().color256(rgb_to_ansi256((200, 30, 45)));
    let green = Style::new().color256(rgb_to_ansi256((0, 150, 60)));
    let blue = Style::new().color256(rgb_to_ansi256((40, 100, 220)));
    let accent = Style::new().color256(rgb_to_ansi256((196, 140, 0)));

    Theme::new()
        .add(names::REGULAR, regular.clone())
        .add(names::MUTED, muted.clone())
        .add(names::FAINT, faint.clone())
        .add(names::TITLE, regular.clone().bold())
        .add(names::BREADCRUMB, muted.clone())
        .add(names::HEADING, accent.clone().bold())
        .add(names::SUBTITLE, muted.clone().italic())
        .add(names::OPENER, regular.clone().bold())
        .add(names::RESPONDER, regular.clone())
        .add(names::SUIT_RED, red.clone())
        .add(names::REF_GREEN, green.underlined())
        .add(names::REF_RED, red.clone().underlined())
        .add(names::REF_BLUE, blue.clone().underlined())
        .add(names::REF_NUMBER, faint)
        .add(names::ANNOTATION, muted.clone().italic())
        .add(names::NOTICE, Style::new().yellow().bold())
        .add(names::PLACEHOLDER, muted.clone().italic())
        .add(names::ACTIVE, accent.bold())
        .add(names::ERROR, Style::new().red().bold())
        .add(names::WARNING, Style::new().yellow().bold())
        .add(names::SUCCESS, Style::new().green())
        .add(names::INFO, muted)
}
