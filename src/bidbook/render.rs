//! # Renderer
//!
//! Turns stored records into a [`DisplayTree`]: a UI-agnostic list of blocks that any
//! surface (the terminal client, a test) can walk. The tree carries no styling, only
//! roles: which cells are opener or responder, which spans are cross-references and
//! of what color.
//!
//! ## Text pipeline
//!
//! Every row description goes through two passes, in this order:
//!
//! 1. **Link substitution**: each `links[]` entry is applied in array order. Every literal
//!    occurrence of `link.text` (metacharacters escaped) in the still-plain parts of the
//!    description becomes an [`Inline::Reference`]. Text already claimed by an earlier
//!    link is never matched again, so array order decides overlaps.
//! 2. **Notation**: [`notation::convert`] runs once over every resulting segment.
//!
//! Rendering never fails. Missing content, unknown block types and absent fields come
//! out as placeholders or empty cells.

use crate::model::{
    AlgorithmEntry, AuctionTable, BidKind, BlockBody, CellType, Definition, Link, LinkKind,
    Section, SectionBlock, Sequence, TableRow,
};
use crate::notation;
use regex::Regex;
use std::fmt;

pub const WELCOME_TITLE: &str = "Uma + PS Bridge System";
pub const WELCOME_MESSAGE: &str =
    "Select a section from the Table of Contents to begin exploring the Uma + PS Bridge System.";
pub const LOADING_MESSAGE: &str = "Loading content...";
pub const NO_CONTENT_MESSAGE: &str = "No content available";
pub const MISSING_TITLE: &str = "Content Not Available";

/// Descriptions longer than this (in chars) carry their raw text as a tooltip.
const TOOLTIP_THRESHOLD: usize = 50;

/// Which mapping a record lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Section,
    Sequence,
    Definition,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentKind::Section => "section",
            ContentKind::Sequence => "sequence",
            ContentKind::Definition => "definition",
        };
        f.write_str(name)
    }
}

impl ContentKind {
    /// The mapping a cross-reference of this color resolves against.
    pub fn for_link(kind: LinkKind) -> Self {
        if kind.opens_definition() {
            ContentKind::Definition
        } else {
            ContentKind::Sequence
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Reference {
        text: String,
        link: LinkKind,
        target: String,
    },
}

/// A run of text with embedded cross-reference spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText(pub Vec<Inline>);

impl RichText {
    pub fn plain(text: impl Into<String>) -> Self {
        RichText(vec![Inline::Text(text.into())])
    }

    pub fn references(&self) -> impl Iterator<Item = Reference<'_>> {
        self.0.iter().filter_map(|inline| match inline {
            Inline::Reference { text, link, target } => Some(Reference {
                text,
                link: *link,
                target,
            }),
            Inline::Text(_) => None,
        })
    }

    pub fn to_plain(&self) -> String {
        self.0
            .iter()
            .map(|inline| match inline {
                Inline::Text(text) => text.as_str(),
                Inline::Reference { text, .. } => text.as_str(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|inline| match inline {
            Inline::Text(text) => text.is_empty(),
            Inline::Reference { .. } => false,
        })
    }
}

/// A borrowed view of one cross-reference span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    pub text: &'a str,
    pub link: LinkKind,
    pub target: &'a str,
}

impl Reference<'_> {
    pub fn to_owned_ref(&self) -> CrossReference {
        CrossReference {
            text: self.text.to_string(),
            link: self.link,
            target: self.target.to_string(),
        }
    }
}

/// An owned cross-reference, as handed to the navigator when a span is followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossReference {
    pub text: String,
    pub link: LinkKind,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLine {
    pub bid: String,
    pub description: RichText,
    pub cell: CellType,
    /// Indent steps: `level - 1` for hierarchical rows, always 0 for flat tables.
    pub indent: usize,
    pub annotations: Vec<String>,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionCell {
    pub kind: BidKind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionGrid {
    /// Widest row in the table; shorter rows are not padded.
    pub columns: usize,
    pub header: Option<String>,
    pub rows: Vec<Vec<AuctionCell>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Category,
    Definition,
    Meaning,
    Details,
    Examples,
    Algorithm,
    Notes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Subtitle(String),
    Overview(String),
    Heading { depth: u8, text: String },
    Table(Vec<TableLine>),
    Auction(AuctionGrid),
    /// An auction strip; even positions are opener bids.
    BidStrip(Vec<(CellType, String)>),
    Paragraph { role: TextRole, text: String },
    List { role: TextRole, items: Vec<String> },
    Notice {
        title: String,
        message: String,
        dismissible: bool,
    },
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTree {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl DisplayTree {
    /// All cross-reference spans, in reading order.
    pub fn references(&self) -> Vec<Reference<'_>> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Table(lines) => Some(lines),
                _ => None,
            })
            .flatten()
            .flat_map(|line| line.description.references())
            .collect()
    }

    pub fn is_notice(&self) -> bool {
        self.blocks
            .iter()
            .any(|block| matches!(block, Block::Notice { .. }))
    }
}

pub fn render_section(section: &Section) -> DisplayTree {
    let title = if section.title.is_empty() {
        "Bridge System Content".to_string()
    } else {
        section.title.clone()
    };

    let Some(content) = &section.content else {
        return DisplayTree {
            title,
            blocks: vec![Block::Placeholder(NO_CONTENT_MESSAGE.to_string())],
        };
    };

    let mut blocks = Vec::new();
    if let Some(subtitle) = &section.subtitle {
        blocks.push(Block::Subtitle(subtitle.clone()));
    }
    if let Some(overview) = &content.overview {
        blocks.push(Block::Overview(notation::convert(overview)));
    }
    for block in &content.sections {
        render_block(block, 1, &mut blocks);
    }
    DisplayTree { title, blocks }
}

pub fn render_sequence(sequence: &Sequence) -> DisplayTree {
    let mut blocks = vec![Block::Heading {
        depth: 1,
        text: sequence.title.clone(),
    }];
    if !sequence.auction.is_empty() {
        let strip = sequence
            .auction
            .iter()
            .enumerate()
            .map(|(index, bid)| {
                let cell = if index % 2 == 0 {
                    CellType::Opener
                } else {
                    CellType::Responder
                };
                (cell, notation::convert(bid))
            })
            .collect();
        blocks.push(Block::BidStrip(strip));
    }
    for block in &sequence.sections {
        render_block(block, 2, &mut blocks);
    }
    DisplayTree {
        title: sequence.title.clone(),
        blocks,
    }
}

pub fn render_definition(definition: &Definition) -> DisplayTree {
    let mut blocks = vec![Block::Heading {
        depth: 1,
        text: definition.title.clone(),
    }];
    if let Some(category) = &definition.category {
        blocks.push(Block::Paragraph {
            role: TextRole::Category,
            text: category.clone(),
        });
    }
    if let Some(text) = &definition.definition {
        blocks.push(Block::Paragraph {
            role: TextRole::Definition,
            text: notation::convert(text),
        });
    }
    if let Some(meaning) = &definition.meaning {
        blocks.push(Block::Paragraph {
            role: TextRole::Meaning,
            text: notation::convert(meaning),
        });
    }
    if !definition.details.is_empty() {
        blocks.push(converted_list(TextRole::Details, &definition.details));
    }
    if !definition.examples.is_empty() {
        blocks.push(converted_list(TextRole::Examples, &definition.examples));
    }
    for entry in definition.algorithm.values() {
        match entry {
            AlgorithmEntry::Steps(steps) => {
                blocks.push(converted_list(TextRole::Algorithm, steps));
            }
            AlgorithmEntry::Line(line) => blocks.push(Block::Paragraph {
                role: TextRole::Algorithm,
                text: notation::convert(line),
            }),
            AlgorithmEntry::Other(value) => blocks.push(Block::Paragraph {
                role: TextRole::Algorithm,
                text: value.to_string(),
            }),
        }
    }
    if let Some(notes) = &definition.notes {
        blocks.push(Block::Paragraph {
            role: TextRole::Notes,
            text: notation::convert(notes),
        });
    }
    DisplayTree {
        title: definition.title.clone(),
        blocks,
    }
}

/// The "Content Not Available" notice for a reference that does not resolve.
pub fn missing(kind: ContentKind, id: &str) -> DisplayTree {
    DisplayTree {
        title: format!("Missing {}", kind),
        blocks: vec![Block::Notice {
            title: MISSING_TITLE.to_string(),
            message: format!("The {} \"{}\" is not yet available in this version.", kind, id),
            dismissible: true,
        }],
    }
}

pub fn welcome() -> DisplayTree {
    DisplayTree {
        title: WELCOME_TITLE.to_string(),
        blocks: vec![Block::Placeholder(WELCOME_MESSAGE.to_string())],
    }
}

pub fn loading(title: &str) -> DisplayTree {
    DisplayTree {
        title: title.to_string(),
        blocks: vec![Block::Placeholder(LOADING_MESSAGE.to_string())],
    }
}

/// Applies `links` to a raw description, then converts notation.
pub fn rich_text(raw: &str, links: &[Link]) -> RichText {
    let mut spans = vec![Inline::Text(raw.to_string())];
    for link in links.iter().filter(|link| !link.text.is_empty()) {
        let pattern = match Regex::new(&regex::escape(&link.text)) {
            Ok(pattern) => pattern,
            Err(_) => continue,
        };
        spans = spans
            .into_iter()
            .flat_map(|span| match span {
                Inline::Text(text) => split_on_link(&pattern, &text, link),
                reference => vec![reference],
            })
            .collect();
    }

    RichText(
        spans
            .into_iter()
            .filter(|span| !matches!(span, Inline::Text(text) if text.is_empty()))
            .map(|span| match span {
                Inline::Text(text) => Inline::Text(notation::convert(&text)),
                Inline::Reference { text, link, target } => Inline::Reference {
                    text: notation::convert(&text),
                    link,
                    target,
                },
            })
            .collect(),
    )
}

fn split_on_link(pattern: &Regex, text: &str, link: &Link) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        out.push(Inline::Text(text[cursor..found.start()].to_string()));
        out.push(Inline::Reference {
            text: found.as_str().to_string(),
            link: link.kind,
            target: link.target.clone(),
        });
        cursor = found.end();
    }
    out.push(Inline::Text(text[cursor..].to_string()));
    out
}

fn render_block(block: &SectionBlock, depth: u8, out: &mut Vec<Block>) {
    out.push(Block::Heading {
        depth,
        text: block.title.clone(),
    });
    match &block.body {
        BlockBody::Table(rows) => {
            out.push(Block::Table(rows.iter().map(flat_line).collect()));
        }
        BlockBody::HierarchicalTable(rows) => {
            let mut lines = Vec::new();
            for row in rows {
                hierarchical_lines(row, &mut lines);
            }
            out.push(Block::Table(lines));
        }
        BlockBody::AuctionTable(table) => out.push(Block::Auction(auction_grid(table))),
        BlockBody::Unsupported { .. } => {}
    }
}

fn annotations(row: &TableRow) -> Vec<String> {
    row.hcp
        .iter()
        .chain(row.shape.iter())
        .filter(|value| !value.is_empty())
        .cloned()
        .collect()
}

fn flat_line(row: &TableRow) -> TableLine {
    TableLine {
        bid: notation::convert(&row.bid),
        description: rich_text(&row.description, &row.links),
        cell: row.cell_type,
        indent: 0,
        annotations: annotations(row),
        tooltip: None,
    }
}

/// Pre-order: the row, then each child's subtree in order.
fn hierarchical_lines(row: &TableRow, out: &mut Vec<TableLine>) {
    let level = row.level.unwrap_or(1).max(1);
    let tooltip = (row.description.chars().count() > TOOLTIP_THRESHOLD)
        .then(|| row.description.clone());
    out.push(TableLine {
        indent: (level - 1) as usize,
        tooltip,
        ..flat_line(row)
    });
    for child in &row.children {
        hierarchical_lines(child, out);
    }
}

fn auction_grid(table: &AuctionTable) -> AuctionGrid {
    let columns = table
        .rows
        .iter()
        .map(|row| row.bids.len())
        .max()
        .unwrap_or(0);
    let rows = table
        .rows
        .iter()
        .map(|row| {
            row.bids
                .iter()
                .map(|bid| AuctionCell {
                    kind: bid.kind,
                    text: match bid.kind {
                        BidKind::Empty => String::new(),
                        _ => notation::convert(&bid.text),
                    },
                })
                .collect()
        })
        .collect();
    AuctionGrid {
        columns,
        header: table.header.as_deref().map(notation::convert),
        rows,
    }
}

fn converted_list(role: TextRole, items: &[String]) -> Block {
    Block::List {
        role,
        items: items.iter().map(|item| notation::convert(item)).collect(),
    }
}
