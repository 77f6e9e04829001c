//! # Document Model
//!
//! The reference content is a single JSON document with three independent mappings:
//! `sections`, `definitions` and `sequences`. Ids are unique inside one mapping, but the
//! same id may appear in two mappings with unrelated meaning.
//!
//! Mappings are [`IndexMap`]s so that iteration (table of contents, search) follows the
//! order in which records appear in the source document.
//!
//! Parsing is lenient: unknown block types, missing row fields and unexpected cell types
//! all degrade to empty or default values rather than failing the whole document.
//!
//! Sequences come in two shapes. Newer records carry `content.sections`, older ones a
//! `categories` mapping of bid lists. Both are resolved once, at deserialization time,
//! into the canonical [`SectionBlock`] list so rendering never has to branch on schema.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub sections: IndexMap<String, Section>,
    #[serde(default)]
    pub definitions: IndexMap<String, Definition>,
    #[serde(default)]
    pub sequences: IndexMap<String, Sequence>,
    /// Top-level keys this model does not interpret (`cross_references`, `bid_colors`, ...).
    /// They are carried through import and export untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(
        rename = "lastUpdate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_update: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<SectionContent>,
}

impl Section {
    /// Flattens every piece of text in the section into one string, in display order.
    /// This is what search matches against.
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(subtitle) = &self.subtitle {
            parts.push(subtitle);
        }
        if let Some(content) = &self.content {
            if let Some(overview) = &content.overview {
                parts.push(overview);
            }
            for block in &content.sections {
                block.collect_text(&mut parts);
            }
        }
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default)]
    pub sections: Vec<SectionBlock>,
}

/// A titled block of tabular content inside a section or sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawBlock", into = "RawBlock")]
pub struct SectionBlock {
    pub title: String,
    pub body: BlockBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockBody {
    Table(Vec<TableRow>),
    HierarchicalTable(Vec<TableRow>),
    AuctionTable(AuctionTable),
    /// A block whose `type` is unknown or whose `data` is missing or malformed.
    Unsupported { kind: Option<String>, data: Option<Value> },
}

impl SectionBlock {
    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        parts.push(&self.title);
        match &self.body {
            BlockBody::Table(rows) | BlockBody::HierarchicalTable(rows) => {
                for row in rows {
                    row.collect_text(parts);
                }
            }
            BlockBody::AuctionTable(table) => {
                if let Some(header) = &table.header {
                    parts.push(header);
                }
                for row in &table.rows {
                    for bid in &row.bids {
                        parts.push(&bid.text);
                    }
                }
            }
            BlockBody::Unsupported { .. } => {}
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawBlock {
    #[serde(default)]
    title: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl From<RawBlock> for SectionBlock {
    fn from(raw: RawBlock) -> Self {
        let RawBlock { title, kind, data } = raw;
        let body = match (kind.as_deref(), data) {
            (Some("table"), Some(data)) => {
                parse_body(data, kind.clone(), BlockBody::Table)
            }
            (Some("hierarchical_table"), Some(data)) => {
                parse_body(data, kind.clone(), BlockBody::HierarchicalTable)
            }
            (Some("auction_table"), Some(data)) => {
                parse_body(data, kind.clone(), BlockBody::AuctionTable)
            }
            (_, data) => BlockBody::Unsupported {
                kind: kind.clone(),
                data,
            },
        };
        SectionBlock { title, body }
    }
}

fn parse_body<T, F>(data: Value, kind: Option<String>, wrap: F) -> BlockBody
where
    T: serde::de::DeserializeOwned,
    F: FnOnce(T) -> BlockBody,
{
    match serde_json::from_value(data.clone()) {
        Ok(parsed) => wrap(parsed),
        Err(_) => BlockBody::Unsupported {
            kind,
            data: Some(data),
        },
    }
}

impl From<SectionBlock> for RawBlock {
    fn from(block: SectionBlock) -> Self {
        let (kind, data) = match block.body {
            BlockBody::Table(rows) => (Some("table".to_string()), serde_json::to_value(rows).ok()),
            BlockBody::HierarchicalTable(rows) => (
                Some("hierarchical_table".to_string()),
                serde_json::to_value(rows).ok(),
            ),
            BlockBody::AuctionTable(table) => (
                Some("auction_table".to_string()),
                serde_json::to_value(table).ok(),
            ),
            BlockBody::Unsupported { kind, data } => (kind, data),
        };
        RawBlock {
            title: block.title,
            kind,
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Opener,
    #[default]
    #[serde(other)]
    Responder,
}

/// A row of a flat or hierarchical bid table. Hierarchical rows nest through `children`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub bid: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "cellType", default)]
    pub cell_type: CellType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TableRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hcp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
}

impl TableRow {
    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        parts.push(&self.bid);
        parts.push(&self.description);
        for child in &self.children {
            child.collect_text(parts);
        }
    }
}

/// Color category of a cross-reference. Green points into `definitions`,
/// red and blue point into `sequences`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Green,
    Red,
    #[default]
    #[serde(other)]
    Blue,
}

impl LinkKind {
    pub fn opens_definition(self) -> bool {
        matches!(self, LinkKind::Green)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: LinkKind,
    #[serde(default)]
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuctionTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default)]
    pub rows: Vec<AuctionRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuctionRow {
    #[serde(default)]
    pub bids: Vec<AuctionBid>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidKind {
    Opener,
    Responder,
    Description,
    Empty,
    #[default]
    #[serde(other)]
    Plain,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuctionBid {
    #[serde(rename = "type", default)]
    pub kind: BidKind,
    #[serde(default)]
    pub text: String,
}

/// A drill-down bidding line, shown in the secondary panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSequence", into = "RawSequence")]
pub struct Sequence {
    pub id: String,
    pub title: String,
    pub auction: Vec<String>,
    pub sections: Vec<SectionBlock>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawSequence {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    auction: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<SectionContent>,
    #[serde(default, skip_serializing)]
    categories: Option<IndexMap<String, LegacyCategory>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LegacyCategory {
    #[serde(default)]
    title: String,
    #[serde(default)]
    bids: Vec<LegacyBid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LegacyBid {
    #[serde(default)]
    bid: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    hcp: Option<String>,
    #[serde(default)]
    shape: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl From<LegacyCategory> for SectionBlock {
    fn from(category: LegacyCategory) -> Self {
        let rows = category
            .bids
            .into_iter()
            .map(|bid| TableRow {
                bid: bid.bid,
                description: bid.description,
                cell_type: match bid.kind.as_deref() {
                    Some("opener-bid") => CellType::Opener,
                    _ => CellType::Responder,
                },
                hcp: bid.hcp,
                shape: bid.shape,
                ..TableRow::default()
            })
            .collect();
        SectionBlock {
            title: category.title,
            body: BlockBody::Table(rows),
        }
    }
}

impl From<RawSequence> for Sequence {
    fn from(raw: RawSequence) -> Self {
        let mut sections = raw.content.map(|c| c.sections).unwrap_or_default();
        if let Some(categories) = raw.categories {
            sections.extend(categories.into_values().map(SectionBlock::from));
        }
        Sequence {
            id: raw.id,
            title: raw.title,
            auction: raw.auction.unwrap_or_default(),
            sections,
        }
    }
}

impl From<Sequence> for RawSequence {
    fn from(sequence: Sequence) -> Self {
        RawSequence {
            id: sequence.id,
            title: sequence.title,
            auction: if sequence.auction.is_empty() {
                None
            } else {
                Some(sequence.auction)
            },
            content: Some(SectionContent {
                overview: None,
                sections: sequence.sections,
            }),
            categories: None,
        }
    }
}

/// A convention or term, shown only in the floating definitions overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub algorithm: IndexMap<String, AlgorithmEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlgorithmEntry {
    Steps(Vec<String>),
    Line(String),
    Other(Value),
}
