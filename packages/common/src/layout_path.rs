//! # Layout Addressing
//!
//! The page layout has a fixed shape, so positions are named per level
//! instead of being a free-form index list. Setters follow the same rule as
//! [`crate::set_by_path`]: rebuild the spine, share everything else.

use crate::error::PathError;
use folio_model::{Block, Column, Row, Section};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Owner of a block list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "in", rename_all = "camelCase")]
pub enum BlockHost {
    /// `sections[section].blocks`
    Section { section: usize },
    /// `sections[section].rows[row].columns[column].blocks`
    Column { section: usize, row: usize, column: usize },
}

impl BlockHost {
    pub fn section(&self) -> usize {
        match self {
            BlockHost::Section { section } | BlockHost::Column { section, .. } => *section,
        }
    }

    fn path(&self) -> Vec<usize> {
        match *self {
            BlockHost::Section { section } => vec![section],
            BlockHost::Column { section, row, column } => vec![section, row, column],
        }
    }
}

fn pick<'a, T>(list: &'a [Arc<T>], path: &[usize], depth: usize) -> Result<&'a Arc<T>, PathError> {
    let index = path[depth];
    list.get(index).ok_or_else(|| PathError::OutOfRange {
        path: path.to_vec(),
        depth,
        index,
        len: list.len(),
    })
}

pub fn section_at(sections: &[Arc<Section>], section: usize) -> Result<&Arc<Section>, PathError> {
    pick(sections, &[section], 0)
}

pub fn row_at(sections: &[Arc<Section>], section: usize, row: usize) -> Result<&Arc<Row>, PathError> {
    let path = [section, row];
    pick(&pick(sections, &path, 0)?.rows, &path, 1)
}

pub fn column_at(sections: &[Arc<Section>], section: usize, row: usize, column: usize) -> Result<&Arc<Column>, PathError> {
    let path = [section, row, column];
    let row = pick(&pick(sections, &path, 0)?.rows, &path, 1)?;
    pick(&row.columns, &path, 2)
}

/// Block list owned by `host`
pub fn blocks_at(sections: &[Arc<Section>], host: BlockHost) -> Result<&[Arc<Block>], PathError> {
    match host {
        BlockHost::Section { section } => Ok(&section_at(sections, section)?.blocks),
        BlockHost::Column { section, row, column } => Ok(&column_at(sections, section, row, column)?.blocks),
    }
}

/// New section list with `sections[section]` replaced by `f(old)`
pub fn map_section<F>(sections: &[Arc<Section>], section: usize, f: F) -> Result<Vec<Arc<Section>>, PathError>
where
    F: FnOnce(&Section) -> Result<Section, PathError>,
{
    let old = section_at(sections, section)?;
    let mut next = sections.to_vec();
    next[section] = Arc::new(f(old)?);
    Ok(next)
}

pub fn set_rows(sections: &[Arc<Section>], section: usize, rows: Vec<Arc<Row>>) -> Result<Vec<Arc<Section>>, PathError> {
    map_section(sections, section, |s| Ok(s.with_rows(rows)))
}

pub fn set_columns(
    sections: &[Arc<Section>],
    section: usize,
    row: usize,
    columns: Vec<Arc<Column>>,
) -> Result<Vec<Arc<Section>>, PathError> {
    map_section(sections, section, |s| {
        let path = [section, row];
        let old = pick(&s.rows, &path, 1)?;
        let mut rows = s.rows.clone();
        rows[row] = Arc::new(old.with_columns(columns));
        Ok(s.with_rows(rows))
    })
}

/// New section list with the blocks owned by `host` replaced
pub fn set_blocks(sections: &[Arc<Section>], host: BlockHost, blocks: Vec<Arc<Block>>) -> Result<Vec<Arc<Section>>, PathError> {
    match host {
        BlockHost::Section { section } => map_section(sections, section, |s| Ok(s.with_blocks(blocks))),
        BlockHost::Column { section, row, column } => {
            let path = host.path();
            let old_row = row_at(sections, section, row)?;
            let old_column = pick(&old_row.columns, &path, 2)?;

            let mut columns = old_row.columns.clone();
            columns[column] = Arc::new(old_column.with_blocks(blocks));
            set_columns(sections, section, row, columns)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_model::{ColumnSpan, DividerBlock, ParagraphBlock};

    fn paragraph(text: &str) -> Arc<Block> {
        Arc::new(Block::Paragraph(ParagraphBlock {
            text_en: text.to_string(),
            text_ar: String::new(),
        }))
    }

    fn sample() -> Vec<Arc<Section>> {
        let left = Arc::new(Column::new(ColumnSpan::half()).with_blocks(vec![paragraph("left")]));
        let right = Arc::new(Column::new(ColumnSpan::half()).with_blocks(vec![paragraph("right")]));
        let grid = Section::new("two-column").with_rows(vec![Arc::new(Row::new(vec![left, right]))]);
        let text = Section::new("text").with_blocks(vec![paragraph("intro")]);
        vec![Arc::new(text), Arc::new(grid)]
    }

    #[test]
    fn test_blocks_at_each_host() {
        let sections = sample();

        assert_eq!(blocks_at(&sections, BlockHost::Section { section: 0 }).unwrap().len(), 1);
        let right = blocks_at(&sections, BlockHost::Column { section: 1, row: 0, column: 1 }).unwrap();
        assert_eq!(*right[0], *paragraph("right"));

        let err = blocks_at(&sections, BlockHost::Column { section: 1, row: 0, column: 2 }).unwrap_err();
        assert_eq!(
            err,
            PathError::OutOfRange {
                path: vec![1, 0, 2],
                depth: 2,
                index: 2,
                len: 2,
            }
        );
    }

    #[test]
    fn test_set_blocks_rebuilds_only_the_spine() {
        let sections = sample();
        let host = BlockHost::Column { section: 1, row: 0, column: 0 };
        let divider = Arc::new(Block::Divider(DividerBlock {}));

        let next = set_blocks(&sections, host, vec![divider.clone()]).unwrap();

        assert!(Arc::ptr_eq(&next[0], &sections[0]));
        assert!(!Arc::ptr_eq(&next[1], &sections[1]));
        assert!(Arc::ptr_eq(&next[1].rows[0].columns[1], &sections[1].rows[0].columns[1]));
        assert!(Arc::ptr_eq(&blocks_at(&next, host).unwrap()[0], &divider));

        // Old tree still holds the paragraph
        assert_eq!(*blocks_at(&sections, host).unwrap()[0], *paragraph("left"));
    }

    #[test]
    fn test_round_trip_through_host() {
        let sections = sample();
        for host in [
            BlockHost::Section { section: 0 },
            BlockHost::Column { section: 1, row: 0, column: 0 },
            BlockHost::Column { section: 1, row: 0, column: 1 },
        ] {
            let blocks = blocks_at(&sections, host).unwrap().to_vec();
            assert_eq!(set_blocks(&sections, host, blocks).unwrap(), sections);
        }
    }

    #[test]
    fn test_host_serializes_with_tag() {
        let host = BlockHost::Column { section: 2, row: 0, column: 1 };
        let json = serde_json::to_value(host).unwrap();
        assert_eq!(json, serde_json::json!({ "in": "column", "section": 2, "row": 0, "column": 1 }));
    }
}
