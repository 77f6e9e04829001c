//! # CLI Templates
//!
//! Terminal output is rendered from minijinja templates kept in `templates/` as
//! stand-alone files, so they can be edited and diffed apart from the code, and
//! embedded here as string constants.
//!
//! Conventions for the template files:
//!
//! 1. Tag-only lines end in `-%}` so they emit nothing; every other line ends in a real
//!    line break. Tag lines are never indented.
//! 2. Layout (column widths, padding, reference numbers) is computed in Rust and passed
//!    in ready to print. Templates only pick styles and arrange lines.
//! 3. Every styled piece goes through `style("name")` with a name from `styles::names`.

pub const PANEL_TEMPLATE: &str = include_str!("templates/panel.tmp");
pub const TOC_TEMPLATE: &str = include_str!("templates/toc.tmp");
pub const SEARCH_TEMPLATE: &str = include_str!("templates/search.tmp");
pub const MESSAGES_TEMPLATE: &str = include_str!("templates/messages.tmp");
pub const TEXT_LIST_TEMPLATE: &str = include_str!("templates/text_list.tmp");
