//! Page layout tree
//!
//! ```text
//! PageDocument
//!   └─ Section (rows XOR blocks)
//!        ├─ Row → Column → Block
//!        └─ Block
//! ```

use crate::block::Block;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Width of the layout grid
pub const GRID_COLUMNS: u8 = 12;

/// Page or product document; only `sections` is interpreted
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageDocument {
    #[serde(default)]
    pub sections: Vec<Arc<Section>>,

    /// Title, slug, SEO fields and the rest of the document, carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PageDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same document with a different section list
    pub fn with_sections(&self, sections: Vec<Arc<Section>>) -> Self {
        Self {
            sections,
            extra: self.extra.clone(),
        }
    }

    /// Slug from the carried-through fields, if the API provided one
    pub fn slug(&self) -> Option<&str> {
        self.extra.get("slug").and_then(Value::as_str)
    }
}

/// Top-level page section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Catalog template the section was created from; informational only
    pub key: String,

    /// Admin-only caption
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Background, container width, padding and divider flags
    #[serde(default)]
    pub style: Map<String, Value>,

    #[serde(default)]
    pub rows: Vec<Arc<Row>>,

    #[serde(default)]
    pub blocks: Vec<Arc<Block>>,
}

/// Which child list of a section holds content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentShape {
    Rows,
    Blocks,
    /// Nothing added yet; either list may be used
    Empty,
}

impl Section {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            style: Map::new(),
            rows: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Shape implied by the lists the section currently holds
    pub fn content_shape(&self) -> ContentShape {
        match (self.rows.is_empty(), self.blocks.is_empty()) {
            (false, _) => ContentShape::Rows,
            (true, false) => ContentShape::Blocks,
            (true, true) => ContentShape::Empty,
        }
    }

    pub fn with_rows(&self, rows: Vec<Arc<Row>>) -> Self {
        Self {
            rows,
            ..self.clone()
        }
    }

    pub fn with_blocks(&self, blocks: Vec<Arc<Block>>) -> Self {
        Self {
            blocks,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    /// Spacing token between columns (`sm`, `md`, `lg`)
    #[serde(default = "default_gap")]
    pub gap: String,

    #[serde(default)]
    pub columns: Vec<Arc<Column>>,
}

fn default_gap() -> String {
    "md".to_string()
}

impl Row {
    pub fn new(columns: Vec<Arc<Column>>) -> Self {
        Self {
            gap: default_gap(),
            columns,
        }
    }

    pub fn with_columns(&self, columns: Vec<Arc<Column>>) -> Self {
        Self {
            gap: self.gap.clone(),
            columns,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub span: ColumnSpan,

    #[serde(default)]
    pub align: Align,

    #[serde(rename = "vAlign", default)]
    pub v_align: VAlign,

    #[serde(default)]
    pub blocks: Vec<Arc<Block>>,
}

impl Column {
    pub fn new(span: ColumnSpan) -> Self {
        Self {
            span,
            align: Align::default(),
            v_align: VAlign::default(),
            blocks: Vec::new(),
        }
    }

    pub fn with_blocks(&self, blocks: Vec<Arc<Block>>) -> Self {
        Self {
            blocks,
            ..self.clone()
        }
    }
}

/// Responsive width in grid units; mobile always stacks at full width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpan {
    #[serde(default = "full_width")]
    pub base: u8,

    #[serde(default = "full_width")]
    pub md: u8,
}

fn full_width() -> u8 {
    GRID_COLUMNS
}

impl ColumnSpan {
    /// Even split of the grid across `count` columns; the remainder is left to the renderer
    pub fn even(count: u8) -> Self {
        Self {
            base: GRID_COLUMNS,
            md: GRID_COLUMNS / count.max(1),
        }
    }

    pub fn half() -> Self {
        Self::even(2)
    }
}

impl Default for ColumnSpan {
    fn default() -> Self {
        Self::even(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    #[default]
    Top,
    Center,
    Bottom,
}
