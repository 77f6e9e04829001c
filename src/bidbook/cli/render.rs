//! # Rendering Module
//!
//! Turns `CmdResult` pieces into terminal text through the templates in `templates/`.
//!
//! Layout stays in Rust because it needs Unicode-aware widths (`♣` and `…` are one
//! column, some titles are not): bid column padding, auction grid cells, reference
//! numbers. Templates receive lines made of styled spans and only decide how each
//! span looks.
//!
//! Cross-references in the primary and secondary panels are numbered `[1]`, `[2]`, …
//! in reading order, primary first. That is the same order `follow N` resolves against.

use super::styles::{names, BIDBOOK_THEME};
use super::templates::{
    MESSAGES_TEMPLATE, PANEL_TEMPLATE, SEARCH_TEMPLATE, TEXT_LIST_TEMPLATE, TOC_TEMPLATE,
};
use super::theme::render_with_color;
use bidbook::api::{CmdMessage, MessageLevel, PanelView, TocEntry};
use bidbook::model::{BidKind, CellType, LinkKind};
use bidbook::navigation::PanelSlot;
use bidbook::render::{AuctionGrid, Block, Inline, RichText, TableLine, TextRole};
use bidbook::search::SearchHit;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const LINE_WIDTH: usize = 72;
const INDENT: &str = "  ";
const BULLET: &str = "• ";
const MIN_AUCTION_CELL: usize = 6;

#[derive(Serialize, Debug, Clone, PartialEq)]
struct Span {
    text: String,
    style: &'static str,
}

impl Span {
    fn new(text: impl Into<String>, style: &'static str) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Serialize)]
struct Line {
    indent: String,
    spans: Vec<Span>,
}

#[derive(Serialize)]
struct BlockData {
    gap: bool,
    marker: String,
    marker_style: &'static str,
    lines: Vec<Line>,
}

impl BlockData {
    fn lines(lines: Vec<Line>) -> Self {
        Self {
            gap: false,
            marker: String::new(),
            marker_style: names::REGULAR,
            lines,
        }
    }
}

#[derive(Serialize)]
struct PanelData {
    breadcrumbs: Vec<String>,
    label: &'static str,
    title: String,
    /// Only set when the header title was shortened.
    full_title: String,
    rule: String,
    blocks: Vec<BlockData>,
}

#[derive(Serialize)]
struct TocLine {
    marker: &'static str,
    title: String,
    style: &'static str,
    padding: String,
    id: String,
    subtitle: String,
}

#[derive(Serialize)]
struct TocData {
    heading: &'static str,
    rule: String,
    entries: Vec<TocLine>,
    empty_message: &'static str,
}

#[derive(Serialize)]
struct HitLine {
    number: String,
    title: String,
    id: String,
    indent: String,
    snippet: String,
}

#[derive(Serialize)]
struct SearchData {
    hits: Vec<HitLine>,
}

#[derive(Serialize)]
struct MessageData {
    title: String,
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct TextListData {
    lines: Vec<String>,
    empty_message: String,
}

/// Renders the visible panels: breadcrumbs above the first, then each panel in order.
pub fn render_panels(panels: &[PanelView], breadcrumbs: &[String], use_color: bool) -> String {
    let mut counter = 0;
    let mut output = String::new();
    for (index, panel) in panels.iter().enumerate() {
        let crumbs = if index == 0 && breadcrumbs.len() > 1 {
            breadcrumbs.to_vec()
        } else {
            Vec::new()
        };
        let numbered = panel.slot != PanelSlot::Overlay;
        let data = panel_data(panel, crumbs, numbered.then_some(&mut counter));
        if index > 0 {
            output.push('\n');
        }
        output.push_str(
            &render_with_color(PANEL_TEMPLATE, &data, &BIDBOOK_THEME, use_color)
                .unwrap_or_else(|e| format!("Render error: {}\n", e)),
        );
    }
    output
}

fn panel_data(panel: &PanelView, breadcrumbs: Vec<String>, mut counter: Option<&mut usize>) -> PanelData {
    let label = match panel.slot {
        PanelSlot::Primary => "[section]",
        PanelSlot::Secondary => "[sequence]",
        PanelSlot::Overlay => "[definition]",
    };
    let full_title = if panel.title == panel.full_title {
        String::new()
    } else {
        panel.full_title.clone()
    };
    let blocks = panel
        .tree
        .blocks
        .iter()
        .map(|block| block_data(block, counter.as_deref_mut()))
        .collect();
    PanelData {
        breadcrumbs,
        label,
        title: panel.title.clone(),
        full_title,
        rule: "─".repeat(LINE_WIDTH),
        blocks,
    }
}

fn block_data(block: &Block, counter: Option<&mut usize>) -> BlockData {
    match block {
        Block::Subtitle(text) => BlockData::lines(vec![plain_line(text, names::SUBTITLE)]),
        Block::Overview(text) => BlockData::lines(vec![plain_line(text, names::REGULAR)]),
        Block::Heading { depth, text } => BlockData {
            gap: true,
            marker: format!("{} {}", "#".repeat(*depth as usize + 1), text),
            marker_style: names::HEADING,
            lines: Vec::new(),
        },
        Block::Table(lines) => BlockData::lines(table_lines(lines, counter)),
        Block::Auction(grid) => BlockData::lines(auction_lines(grid)),
        Block::BidStrip(bids) => {
            let mut spans = Vec::new();
            for (index, (cell, bid)) in bids.iter().enumerate() {
                if index > 0 {
                    spans.push(Span::new(" - ", names::FAINT));
                }
                spans.extend(suit_spans(bid, cell_style(*cell)));
            }
            BlockData::lines(vec![Line {
                indent: String::new(),
                spans,
            }])
        }
        Block::Paragraph { role, text } => BlockData {
            gap: false,
            marker: role_label(*role).to_string(),
            marker_style: names::MUTED,
            lines: vec![Line {
                indent: INDENT.to_string(),
                spans: suit_spans(text, names::REGULAR),
            }],
        },
        Block::List { role, items } => BlockData {
            gap: false,
            marker: role_label(*role).to_string(),
            marker_style: names::MUTED,
            lines: items
                .iter()
                .map(|item| Line {
                    indent: format!("{}{}", INDENT, BULLET),
                    spans: suit_spans(item, names::REGULAR),
                })
                .collect(),
        },
        Block::Notice { title, message, .. } => BlockData {
            gap: false,
            marker: title.clone(),
            marker_style: names::NOTICE,
            lines: vec![plain_line(message, names::REGULAR)],
        },
        Block::Placeholder(text) => BlockData::lines(vec![plain_line(text, names::PLACEHOLDER)]),
    }
}

fn role_label(role: TextRole) -> &'static str {
    match role {
        TextRole::Category => "Category",
        TextRole::Definition => "Definition",
        TextRole::Meaning => "Meaning",
        TextRole::Details => "Details",
        TextRole::Examples => "Examples",
        TextRole::Algorithm => "Algorithm",
        TextRole::Notes => "Notes",
    }
}

fn plain_line(text: &str, style: &'static str) -> Line {
    Line {
        indent: String::new(),
        spans: suit_spans(text, style),
    }
}

fn cell_style(cell: CellType) -> &'static str {
    match cell {
        CellType::Opener => names::OPENER,
        CellType::Responder => names::RESPONDER,
    }
}

fn link_style(link: LinkKind) -> &'static str {
    match link {
        LinkKind::Green => names::REF_GREEN,
        LinkKind::Red => names::REF_RED,
        LinkKind::Blue => names::REF_BLUE,
    }
}

/// Splits text so that red suit symbols get their own style.
fn suit_spans(text: &str, base: &'static str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c == '♥' || c == '♦' {
            if !current.is_empty() {
                spans.push(Span::new(std::mem::take(&mut current), base));
            }
            spans.push(Span::new(c.to_string(), names::SUIT_RED));
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        spans.push(Span::new(current, base));
    }
    spans
}

fn description_spans(text: &RichText, mut counter: Option<&mut usize>) -> Vec<Span> {
    let mut spans = Vec::new();
    for inline in &text.0 {
        match inline {
            Inline::Text(text) => spans.extend(suit_spans(text, names::REGULAR)),
            Inline::Reference { text, link, .. } => {
                spans.push(Span::new(text.clone(), link_style(*link)));
                if let Some(counter) = counter.as_deref_mut() {
                    *counter += 1;
                    spans.push(Span::new(format!("[{}]", counter), names::REF_NUMBER));
                }
            }
        }
    }
    spans
}

fn table_lines(lines: &[TableLine], mut counter: Option<&mut usize>) -> Vec<Line> {
    let bid_width = lines
        .iter()
        .map(|line| line.indent * INDENT.len() + line.bid.width())
        .max()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            let indent = INDENT.repeat(line.indent);
            let used = indent.len() + line.bid.width();
            let mut spans = suit_spans(&line.bid, cell_style(line.cell));
            spans.push(Span::new(
                " ".repeat(bid_width.saturating_sub(used) + 2),
                names::REGULAR,
            ));
            spans.extend(description_spans(&line.description, counter.as_deref_mut()));
            if !line.annotations.is_empty() {
                spans.push(Span::new(
                    format!(" ({})", line.annotations.join(", ")),
                    names::ANNOTATION,
                ));
            }
            Line { indent, spans }
        })
        .collect()
}

fn auction_lines(grid: &AuctionGrid) -> Vec<Line> {
    let width = grid
        .rows
        .iter()
        .flatten()
        .map(|cell| cell.text.width())
        .max()
        .unwrap_or(0)
        .max(MIN_AUCTION_CELL)
        + 2;

    let mut lines = Vec::new();
    if let Some(header) = &grid.header {
        lines.push(plain_line(header, names::MUTED));
    }
    for row in &grid.rows {
        let mut spans = Vec::new();
        for cell in row {
            let style = match cell.kind {
                BidKind::Opener => names::OPENER,
                BidKind::Responder => names::RESPONDER,
                BidKind::Description => names::ANNOTATION,
                BidKind::Empty | BidKind::Plain => names::REGULAR,
            };
            spans.extend(suit_spans(&cell.text, style));
            spans.push(Span::new(
                " ".repeat(width.saturating_sub(cell.text.width())),
                names::REGULAR,
            ));
        }
        lines.push(Line {
            indent: INDENT.to_string(),
            spans,
        });
    }
    lines
}

/// Renders the table of contents, one section per line.
pub fn render_toc(entries: &[TocEntry], use_color: bool) -> String {
    let title_width = entries.iter().map(|e| e.title.width()).max().unwrap_or(0);
    let lines = entries
        .iter()
        .map(|entry| TocLine {
            marker: if entry.active { "▸ " } else { "  " },
            title: entry.title.clone(),
            style: if entry.active {
                names::ACTIVE
            } else {
                names::REGULAR
            },
            padding: " ".repeat(title_width.saturating_sub(entry.title.width()) + 2),
            id: entry.id.clone(),
            subtitle: entry.subtitle.clone().unwrap_or_default(),
        })
        .collect();
    let data = TocData {
        heading: "Table of Contents",
        rule: "─".repeat(LINE_WIDTH),
        entries: lines,
        empty_message: "No sections found.",
    };
    render_with_color(TOC_TEMPLATE, &data, &BIDBOOK_THEME, use_color)
        .unwrap_or_else(|_| "No sections found.\n".to_string())
}

pub fn render_search_hits(hits: &[SearchHit], use_color: bool) -> String {
    let hits = hits
        .iter()
        .enumerate()
        .map(|(index, hit)| {
            let number = format!("{}.", index + 1);
            HitLine {
                indent: " ".repeat(number.width() + 1),
                number,
                title: hit.title.clone(),
                id: format!("({})", hit.section_id),
                snippet: hit.snippet.clone(),
            }
        })
        .collect();
    render_with_color(SEARCH_TEMPLATE, &SearchData { hits }, &BIDBOOK_THEME, use_color)
        .unwrap_or_else(|e| format!("Render error: {}\n", e))
}

pub fn render_text_list(lines: &[String], empty_message: &str, use_color: bool) -> String {
    let data = TextListData {
        lines: lines.to_vec(),
        empty_message: empty_message.to_string(),
    };
    render_with_color(TEXT_LIST_TEMPLATE, &data, &BIDBOOK_THEME, use_color)
        .unwrap_or_else(|_| format!("{}\n", empty_message))
}

/// Renders command messages; each level has its own style.
pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                title: msg.title.clone().unwrap_or_default(),
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    };

    render_with_color(MESSAGES_TEMPLATE, &data, &BIDBOOK_THEME, use_color).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}
