//! # Page Layout Operations
//!
//! Same contract as the navigation operations: take the section list,
//! return the next one, share everything off the edited spine. Sections,
//! rows and columns are addressed by index per level; block lists by
//! [`BlockHost`].
//!
//! A section's content shape (rows or blocks) comes from its catalog
//! template and never changes, even after the section is emptied.
//! Operations that would use the other list return the input unchanged,
//! as do boundary moves and deleting a row's last column.

use crate::catalog::section_shape;
use crate::registry::default_block;
use folio_common::{
    blocks_at, column_at, duplicated, inserted, map_section, moved_down, moved_up, pushed, removed, replaced, row_at,
    section_at, set_blocks, set_columns, set_rows, BlockHost, PathError,
};
use folio_model::{Align, Block, BlockKind, Column, ColumnSpan, ContentShape, Row, Section, VAlign, GRID_COLUMNS};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Page section list
pub type Sections = Vec<Arc<Section>>;

fn unchanged(sections: &[Arc<Section>]) -> Result<Sections, PathError> {
    Ok(sections.to_vec())
}

// Sections

/// Insert `section` at `index`, or append when `index` is `None`
pub fn insert_section(sections: &[Arc<Section>], index: Option<usize>, section: Section) -> Result<Sections, PathError> {
    let section = Arc::new(section);
    match index {
        Some(index) => inserted(sections, index, section),
        None => Ok(pushed(sections, section)),
    }
}

pub fn delete_section(sections: &[Arc<Section>], index: usize) -> Result<Sections, PathError> {
    removed(sections, index).map(|(rest, _)| rest)
}

/// Copy of the section inserted right after it.
///
/// The copy shares its rows and blocks with the original; both are
/// immutable, and the next edit to either rebuilds its own spine.
pub fn duplicate_section(sections: &[Arc<Section>], index: usize) -> Result<Sections, PathError> {
    duplicated(sections, index, Section::clone)
}

pub fn move_section_up(sections: &[Arc<Section>], index: usize) -> Result<Sections, PathError> {
    Ok(moved_up(sections, index)?.unwrap_or_else(|| sections.to_vec()))
}

pub fn move_section_down(sections: &[Arc<Section>], index: usize) -> Result<Sections, PathError> {
    Ok(moved_down(sections, index)?.unwrap_or_else(|| sections.to_vec()))
}

pub fn set_section_label(sections: &[Arc<Section>], index: usize, label: Option<String>) -> Result<Sections, PathError> {
    map_section(sections, index, |s| Ok(Section { label, ..s.clone() }))
}

/// Replace the opaque style map
pub fn set_section_style(sections: &[Arc<Section>], index: usize, style: Map<String, Value>) -> Result<Sections, PathError> {
    map_section(sections, index, |s| Ok(Section { style, ..s.clone() }))
}

// Rows

/// Append a row of `column_count` columns splitting the grid evenly
pub fn add_row(sections: &[Arc<Section>], section: usize, column_count: u8) -> Result<Sections, PathError> {
    let target = section_at(sections, section)?;
    if section_shape(target) == ContentShape::Blocks {
        debug!(section, "add row ignored: section holds blocks");
        return unchanged(sections);
    }
    if column_count == 0 || column_count > GRID_COLUMNS {
        debug!(section, column_count, "add row ignored: column count outside the grid");
        return unchanged(sections);
    }

    let span = ColumnSpan::even(column_count);
    let columns = (0..column_count).map(|_| Arc::new(Column::new(span))).collect();
    set_rows(sections, section, pushed(&target.rows, Arc::new(Row::new(columns))))
}

pub fn delete_row(sections: &[Arc<Section>], section: usize, row: usize) -> Result<Sections, PathError> {
    let rows = &section_at(sections, section)?.rows;
    let (rest, _) = removed(rows, row)?;
    set_rows(sections, section, rest)
}

pub fn move_row_up(sections: &[Arc<Section>], section: usize, row: usize) -> Result<Sections, PathError> {
    match moved_up(&section_at(sections, section)?.rows, row)? {
        Some(rows) => set_rows(sections, section, rows),
        None => unchanged(sections),
    }
}

pub fn move_row_down(sections: &[Arc<Section>], section: usize, row: usize) -> Result<Sections, PathError> {
    match moved_down(&section_at(sections, section)?.rows, row)? {
        Some(rows) => set_rows(sections, section, rows),
        None => unchanged(sections),
    }
}

// Columns

/// Append a half-width column to the row
pub fn add_column(sections: &[Arc<Section>], section: usize, row: usize) -> Result<Sections, PathError> {
    let columns = &row_at(sections, section, row)?.columns;
    let column = Arc::new(Column::new(ColumnSpan::half()));
    set_columns(sections, section, row, pushed(columns, column))
}

/// Remove a column unless it is the row's last one
pub fn delete_column(sections: &[Arc<Section>], section: usize, row: usize, column: usize) -> Result<Sections, PathError> {
    let columns = &row_at(sections, section, row)?.columns;
    let (rest, _) = removed(columns, column)?;
    if rest.is_empty() {
        debug!(section, row, "delete column ignored: a row keeps at least one column");
        return unchanged(sections);
    }
    set_columns(sections, section, row, rest)
}

/// Partial update of a column's layout hints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<ColumnSpan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    #[serde(rename = "vAlign", default, skip_serializing_if = "Option::is_none")]
    pub v_align: Option<VAlign>,
}

pub fn update_column(
    sections: &[Arc<Section>],
    section: usize,
    row: usize,
    column: usize,
    patch: &ColumnPatch,
) -> Result<Sections, PathError> {
    let columns = &row_at(sections, section, row)?.columns;
    let old = column_at(sections, section, row, column)?;
    let next = Column {
        span: patch.span.unwrap_or(old.span),
        align: patch.align.unwrap_or(old.align),
        v_align: patch.v_align.unwrap_or(old.v_align),
        blocks: old.blocks.clone(),
    };
    set_columns(sections, section, row, replaced(columns, column, Arc::new(next))?)
}

// Blocks

/// Splice a new block list into `host`, or return the input when `next` is `None`
fn with_blocks(
    sections: &[Arc<Section>],
    host: BlockHost,
    next: Option<Vec<Arc<Block>>>,
) -> Result<Sections, PathError> {
    match next {
        Some(blocks) => set_blocks(sections, host, blocks),
        None => unchanged(sections),
    }
}

/// Append a registry-default block of `kind`
pub fn add_block(sections: &[Arc<Section>], host: BlockHost, kind: BlockKind) -> Result<Sections, PathError> {
    if let BlockHost::Section { section } = host {
        if section_shape(section_at(sections, section)?) == ContentShape::Rows {
            debug!(section, %kind, "add block ignored: section holds rows");
            return unchanged(sections);
        }
    }
    let blocks = blocks_at(sections, host)?;
    set_blocks(sections, host, pushed(blocks, Arc::new(default_block(kind))))
}

/// Replace the block at `index` wholesale
pub fn update_block(sections: &[Arc<Section>], host: BlockHost, index: usize, block: Block) -> Result<Sections, PathError> {
    let blocks = replaced(blocks_at(sections, host)?, index, Arc::new(block))?;
    set_blocks(sections, host, blocks)
}

pub fn delete_block(sections: &[Arc<Section>], host: BlockHost, index: usize) -> Result<Sections, PathError> {
    let (rest, _) = removed(blocks_at(sections, host)?, index)?;
    set_blocks(sections, host, rest)
}

/// Clone of the block inserted right after it
pub fn duplicate_block(sections: &[Arc<Section>], host: BlockHost, index: usize) -> Result<Sections, PathError> {
    let blocks = duplicated(blocks_at(sections, host)?, index, Block::clone)?;
    set_blocks(sections, host, blocks)
}

pub fn move_block_up(sections: &[Arc<Section>], host: BlockHost, index: usize) -> Result<Sections, PathError> {
    let next = moved_up(blocks_at(sections, host)?, index)?;
    with_blocks(sections, host, next)
}

pub fn move_block_down(sections: &[Arc<Section>], host: BlockHost, index: usize) -> Result<Sections, PathError> {
    let next = moved_down(blocks_at(sections, host)?, index)?;
    with_blocks(sections, host, next)
}
