//! Substring search over sections.
//!
//! Matching is case-insensitive containment against the section title and the flattened
//! section text ([`Section::searchable_text`]). Hits come back in document order; there
//! is no ranking.

use crate::model::{Document, Section};
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_SNIPPET_CONTEXT: usize = 50;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub section_id: String,
    pub title: String,
    pub snippet: String,
}

/// Finds every section whose title or text contains `query`.
/// A blank query matches nothing.
pub fn search(doc: &Document, query: &str, context: usize) -> Vec<SearchHit> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let needle = fold(query);

    let hits: Vec<SearchHit> = doc
        .sections
        .iter()
        .filter_map(|(id, section)| match_section(id, section, &needle, context))
        .collect();
    debug!(query, hits = hits.len(), "search");
    hits
}

fn match_section(id: &str, section: &Section, needle: &[char], context: usize) -> Option<SearchHit> {
    let text: Vec<char> = section.searchable_text().chars().collect();
    let in_text = find(&fold_chars(&text), needle);
    let in_title = find(&fold(&section.title), needle).is_some();
    if in_text.is_none() && !in_title {
        return None;
    }
    let snippet = match in_text {
        Some(index) => snippet_around(&text, index, needle.len(), context),
        None => leading(&text, context * 2),
    };
    Some(SearchHit {
        section_id: id.to_string(),
        title: section.title.clone(),
        snippet,
    })
}

/// `context` chars either side of the match, with an ellipsis on each cut side.
fn snippet_around(text: &[char], index: usize, len: usize, context: usize) -> String {
    let start = index.saturating_sub(context);
    let end = (index + len + context).min(text.len());
    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.extend(&text[start..end]);
    if end < text.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

fn leading(text: &[char], max: usize) -> String {
    let mut snippet: String = text.iter().take(max).collect();
    if text.len() > max {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

/// Lowercases char by char so positions in the folded text match the original.
fn fold(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

fn fold_chars(text: &[char]) -> Vec<char> {
    text.iter().copied().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn find(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}
