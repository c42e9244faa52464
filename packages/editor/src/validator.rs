//! # Save-time Validation
//!
//! Editing never rejects a structure; everything is checked here, once, when
//! the editor saves. Both walks are depth-first in array order and stop at
//! the first violation.

use crate::registry::{shape_check, ShapeError};
use folio_common::{walk_layout, walk_nav, walk_row, walk_section, BlockPosition, LayoutVisitor, NavVisitor};
use folio_model::{Block, BlockKind, NavNode, Row, Section};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;
use thiserror::Error;

/// Deepest level a menu may use; top-level items are level 1
pub const DEFAULT_MAX_DEPTH: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Item {id} sits at level {depth}; menus allow at most {max} levels")]
    DepthExceeded { id: String, depth: usize, max: usize },

    #[error("Item {id} is missing {field}")]
    MissingField { id: String, field: &'static str },

    #[error("Link {href} is used by both {first_id} and {id} at the same level")]
    DuplicateLink { href: String, id: String, first_id: String },

    #[error("{kind} block at {position} is malformed: {reason}")]
    InvalidBlock {
        position: Location,
        kind: BlockKind,
        reason: ShapeError,
    },

    #[error("Section {section} is malformed: {reason}")]
    InvalidSection { section: usize, reason: SectionDefect },
}

/// Printable form of [`BlockPosition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location(pub BlockPosition);

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let BlockPosition { section, cell, index } = self.0;
        match cell {
            Some((row, column)) => write!(f, "section {section} row {row} column {column} index {index}"),
            None => write!(f, "section {section} index {index}"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SectionDefect {
    #[error("it holds both rows and blocks")]
    MixedContent,

    #[error("row {0} has no columns")]
    EmptyRow(usize),
}

/// Validation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatorConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self::new(ValidatorConfig { max_depth })
    }

    pub fn max_depth(&self) -> usize {
        self.config.max_depth
    }

    /// First depth, field or sibling-link violation in the menu
    pub fn validate_menu(&self, items: &[Arc<NavNode>]) -> Result<(), ValidationError> {
        let mut check = MenuCheck {
            max_depth: self.config.max_depth,
        };
        match walk_nav(&mut check, items) {
            ControlFlow::Break(err) => Err(err),
            ControlFlow::Continue(()) => Ok(()),
        }
    }

    /// First block shape or section structure violation in the page
    pub fn validate_page(&self, sections: &[Arc<Section>]) -> Result<(), ValidationError> {
        match walk_layout(&mut PageCheck, sections) {
            ControlFlow::Break(err) => Err(err),
            ControlFlow::Continue(()) => Ok(()),
        }
    }
}

struct MenuCheck {
    max_depth: usize,
}

impl MenuCheck {
    fn check_fields(node: &NavNode) -> Result<(), ValidationError> {
        let missing = if node.label_en.trim().is_empty() {
            Some("labelEN")
        } else if node.label_ar.trim().is_empty() {
            Some("labelAR")
        } else if node.href.trim().is_empty() {
            Some("href")
        } else {
            None
        };

        match missing {
            Some(field) => Err(ValidationError::MissingField {
                id: node.id.clone(),
                field,
            }),
            None => Ok(()),
        }
    }
}

impl NavVisitor for MenuCheck {
    type Break = ValidationError;

    // Each node is fully checked, including against its earlier siblings,
    // before the walk descends into its children.
    fn visit_level(&mut self, level: &[Arc<NavNode>], path: &[usize], depth: usize) -> ControlFlow<ValidationError> {
        let mut seen: HashMap<&str, &str> = HashMap::new();

        for (index, node) in level.iter().enumerate() {
            if depth > self.max_depth {
                return ControlFlow::Break(ValidationError::DepthExceeded {
                    id: node.id.clone(),
                    depth,
                    max: self.max_depth,
                });
            }
            if let Err(err) = Self::check_fields(node) {
                return ControlFlow::Break(err);
            }

            let href = node.href.trim();
            if let Some(first_id) = seen.get(href) {
                return ControlFlow::Break(ValidationError::DuplicateLink {
                    href: href.to_string(),
                    id: node.id.clone(),
                    first_id: first_id.to_string(),
                });
            }
            seen.insert(href, node.id.as_str());

            self.visit_node(node, path, index, depth)?;
        }
        ControlFlow::Continue(())
    }
}

struct PageCheck;

impl LayoutVisitor for PageCheck {
    type Break = ValidationError;

    fn visit_section(&mut self, section: &Section, index: usize) -> ControlFlow<ValidationError> {
        if !section.rows.is_empty() && !section.blocks.is_empty() {
            return ControlFlow::Break(ValidationError::InvalidSection {
                section: index,
                reason: SectionDefect::MixedContent,
            });
        }
        walk_section(self, section, index)
    }

    fn visit_row(&mut self, row: &Row, section: usize, index: usize) -> ControlFlow<ValidationError> {
        if row.columns.is_empty() {
            return ControlFlow::Break(ValidationError::InvalidSection {
                section,
                reason: SectionDefect::EmptyRow(index),
            });
        }
        walk_row(self, row, section, index)
    }

    fn visit_block(&mut self, block: &Block, position: BlockPosition) -> ControlFlow<ValidationError> {
        match shape_check(block) {
            Ok(()) => ControlFlow::Continue(()),
            Err(reason) => ControlFlow::Break(ValidationError::InvalidBlock {
                position: Location(position),
                kind: block.kind(),
                reason,
            }),
        }
    }
}
