//! # Editor Mutations
//!
//! Serializable form of every structural operation, so that an editor
//! action (or a line of a script) can be recorded, sent and replayed.
//!
//! ## Semantics
//!
//! - A mutation never changes the tree it is applied to; `apply` returns
//!   the next tree.
//! - Positions are read against the tree the mutation is applied to.
//!   A position that does not resolve is a [`MutationError::Path`].
//! - Positions that make a mutation meaningless (moving the first item up,
//!   deleting a row's only column) are not errors; the result equals the
//!   input.
//!
//! Wire form is internally tagged by `op`:
//!
//! ```json
//! { "op": "indent", "path": [], "index": 1 }
//! { "op": "addBlock", "host": { "in": "section", "section": 0 }, "kind": "quote" }
//! ```

use crate::catalog;
use crate::layout::{self, ColumnPatch, Sections};
use crate::nav::{self, NavPatch, NavRoot, NodeFactory};
use folio_common::{BlockHost, PathError};
use folio_model::{Block, BlockKind, NavNode, Section};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Navigation menu mutation
///
/// `path` selects a sibling list (empty for the top level) and `index` an
/// item in it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum NavMutation {
    /// Append a default item at the top level
    AddTopLevel,

    /// Append a default child to an item
    AddChild {
        #[serde(default)]
        path: Vec<usize>,
        index: usize,
    },

    /// Remove an item and its subtree
    Delete {
        #[serde(default)]
        path: Vec<usize>,
        index: usize,
    },

    ToggleVisibility {
        #[serde(default)]
        path: Vec<usize>,
        index: usize,
    },

    /// Overwrite some of an item's own fields
    Update {
        #[serde(default)]
        path: Vec<usize>,
        index: usize,
        patch: NavPatch,
    },

    Indent {
        #[serde(default)]
        path: Vec<usize>,
        index: usize,
    },

    Outdent {
        #[serde(default)]
        path: Vec<usize>,
        index: usize,
    },

    /// Same-level move, as produced by a drag
    Reorder {
        #[serde(default)]
        path: Vec<usize>,
        from: usize,
        to: usize,
    },

    MoveUp {
        #[serde(default)]
        path: Vec<usize>,
        index: usize,
    },

    MoveDown {
        #[serde(default)]
        path: Vec<usize>,
        index: usize,
    },

    /// Copy an item and its subtree under fresh ids
    Duplicate {
        #[serde(default)]
        path: Vec<usize>,
        index: usize,
    },
}

/// Page layout mutation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum LayoutMutation {
    /// Instantiate a catalog template; appended when `index` is absent
    AddSection {
        template: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
    },
    DeleteSection {
        section: usize,
    },
    DuplicateSection {
        section: usize,
    },
    MoveSectionUp {
        section: usize,
    },
    MoveSectionDown {
        section: usize,
    },
    SetSectionLabel {
        section: usize,
        #[serde(default)]
        label: Option<String>,
    },
    SetSectionStyle {
        section: usize,
        style: Map<String, Value>,
    },

    AddRow {
        section: usize,
        columns: u8,
    },
    DeleteRow {
        section: usize,
        row: usize,
    },
    MoveRowUp {
        section: usize,
        row: usize,
    },
    MoveRowDown {
        section: usize,
        row: usize,
    },

    AddColumn {
        section: usize,
        row: usize,
    },
    DeleteColumn {
        section: usize,
        row: usize,
        column: usize,
    },
    UpdateColumn {
        section: usize,
        row: usize,
        column: usize,
        patch: ColumnPatch,
    },

    AddBlock {
        host: BlockHost,
        kind: BlockKind,
    },
    UpdateBlock {
        host: BlockHost,
        index: usize,
        block: Block,
    },
    DeleteBlock {
        host: BlockHost,
        index: usize,
    },
    DuplicateBlock {
        host: BlockHost,
        index: usize,
    },
    MoveBlockUp {
        host: BlockHost,
        index: usize,
    },
    MoveBlockDown {
        host: BlockHost,
        index: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("{0}")]
    Path(#[from] PathError),

    #[error("Unknown section template: {0}")]
    UnknownTemplate(String),
}

impl NavMutation {
    /// Apply to `root`, drawing new ids from `factory`
    pub fn apply(&self, root: &[Arc<NavNode>], factory: &mut NodeFactory) -> Result<NavRoot, MutationError> {
        let next = match self {
            NavMutation::AddTopLevel => nav::add_top_level(root, factory),
            NavMutation::AddChild { path, index } => nav::add_child(root, path, *index, factory)?,
            NavMutation::Delete { path, index } => nav::delete_at(root, path, *index)?,
            NavMutation::ToggleVisibility { path, index } => nav::toggle_visibility(root, path, *index)?,
            NavMutation::Update { path, index, patch } => nav::update_node(root, path, *index, patch)?,
            NavMutation::Indent { path, index } => nav::indent(root, path, *index)?,
            NavMutation::Outdent { path, index } => nav::outdent(root, path, *index)?,
            NavMutation::Reorder { path, from, to } => nav::reorder(root, path, *from, *to)?,
            NavMutation::MoveUp { path, index } => nav::move_up(root, path, *index)?,
            NavMutation::MoveDown { path, index } => nav::move_down(root, path, *index)?,
            NavMutation::Duplicate { path, index } => nav::duplicate_at(root, path, *index, factory)?,
        };
        Ok(next)
    }

    /// Wire name of the operation
    pub fn name(&self) -> &'static str {
        match self {
            NavMutation::AddTopLevel => "addTopLevel",
            NavMutation::AddChild { .. } => "addChild",
            NavMutation::Delete { .. } => "delete",
            NavMutation::ToggleVisibility { .. } => "toggleVisibility",
            NavMutation::Update { .. } => "update",
            NavMutation::Indent { .. } => "indent",
            NavMutation::Outdent { .. } => "outdent",
            NavMutation::Reorder { .. } => "reorder",
            NavMutation::MoveUp { .. } => "moveUp",
            NavMutation::MoveDown { .. } => "moveDown",
            NavMutation::Duplicate { .. } => "duplicate",
        }
    }
}

impl LayoutMutation {
    pub fn apply(&self, sections: &[Arc<Section>]) -> Result<Sections, MutationError> {
        use LayoutMutation::*;

        let next = match self {
            AddSection { template, index } => {
                let section =
                    catalog::instantiate(template).ok_or_else(|| MutationError::UnknownTemplate(template.clone()))?;
                layout::insert_section(sections, *index, section)?
            }
            DeleteSection { section } => layout::delete_section(sections, *section)?,
            DuplicateSection { section } => layout::duplicate_section(sections, *section)?,
            MoveSectionUp { section } => layout::move_section_up(sections, *section)?,
            MoveSectionDown { section } => layout::move_section_down(sections, *section)?,
            SetSectionLabel { section, label } => layout::set_section_label(sections, *section, label.clone())?,
            SetSectionStyle { section, style } => layout::set_section_style(sections, *section, style.clone())?,

            AddRow { section, columns } => layout::add_row(sections, *section, *columns)?,
            DeleteRow { section, row } => layout::delete_row(sections, *section, *row)?,
            MoveRowUp { section, row } => layout::move_row_up(sections, *section, *row)?,
            MoveRowDown { section, row } => layout::move_row_down(sections, *section, *row)?,

            AddColumn { section, row } => layout::add_column(sections, *section, *row)?,
            DeleteColumn { section, row, column } => layout::delete_column(sections, *section, *row, *column)?,
            UpdateColumn {
                section,
                row,
                column,
                patch,
            } => layout::update_column(sections, *section, *row, *column, patch)?,

            AddBlock { host, kind } => layout::add_block(sections, *host, *kind)?,
            UpdateBlock { host, index, block } => layout::update_block(sections, *host, *index, block.clone())?,
            DeleteBlock { host, index } => layout::delete_block(sections, *host, *index)?,
            DuplicateBlock { host, index } => layout::duplicate_block(sections, *host, *index)?,
            MoveBlockUp { host, index } => layout::move_block_up(sections, *host, *index)?,
            MoveBlockDown { host, index } => layout::move_block_down(sections, *host, *index)?,
        };
        Ok(next)
    }

    /// Section the mutation edits in place, if it addresses one
    pub fn section(&self) -> Option<usize> {
        use LayoutMutation::*;

        match self {
            AddSection { .. } => None,
            DeleteSection { section }
            | DuplicateSection { section }
            | MoveSectionUp { section }
            | MoveSectionDown { section }
            | SetSectionLabel { section, .. }
            | SetSectionStyle { section, .. }
            | AddRow { section, .. }
            | DeleteRow { section, .. }
            | MoveRowUp { section, .. }
            | MoveRowDown { section, .. }
            | AddColumn { section, .. }
            | DeleteColumn { section, .. }
            | UpdateColumn { section, .. } => Some(*section),
            AddBlock { host, .. }
            | UpdateBlock { host, .. }
            | DeleteBlock { host, .. }
            | DuplicateBlock { host, .. }
            | MoveBlockUp { host, .. }
            | MoveBlockDown { host, .. } => Some(host.section()),
        }
    }

    pub fn name(&self) -> &'static str {
        use LayoutMutation::*;

        match self {
            AddSection { .. } => "addSection",
            DeleteSection { .. } => "deleteSection",
            DuplicateSection { .. } => "duplicateSection",
            MoveSectionUp { .. } => "moveSectionUp",
            MoveSectionDown { .. } => "moveSectionDown",
            SetSectionLabel { .. } => "setSectionLabel",
            SetSectionStyle { .. } => "setSectionStyle",
            AddRow { .. } => "addRow",
            DeleteRow { .. } => "deleteRow",
            MoveRowUp { .. } => "moveRowUp",
            MoveRowDown { .. } => "moveRowDown",
            AddColumn { .. } => "addColumn",
            DeleteColumn { .. } => "deleteColumn",
            UpdateColumn { .. } => "updateColumn",
            AddBlock { .. } => "addBlock",
            UpdateBlock { .. } => "updateBlock",
            DeleteBlock { .. } => "deleteBlock",
            DuplicateBlock { .. } => "duplicateBlock",
            MoveBlockUp { .. } => "moveBlockUp",
            MoveBlockDown { .. } => "moveBlockDown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{IdAllocator, IdGenerator};
    use crate::nav::NavDefaults;

    fn factory() -> NodeFactory {
        NodeFactory::new(
            IdAllocator::new(IdGenerator::from_seed("t"), Default::default()),
            NavDefaults::default(),
        )
    }

    #[test]
    fn test_nav_wire_format() {
        let op: NavMutation = serde_json::from_str(r#"{"op":"indent","index":1}"#).unwrap();
        assert_eq!(op, NavMutation::Indent { path: vec![], index: 1 });

        let op: NavMutation =
            serde_json::from_str(r#"{"op":"update","path":[0],"index":2,"patch":{"href":"/b","newTab":true}}"#)
                .unwrap();
        match op {
            NavMutation::Update { patch, .. } => {
                assert_eq!(patch.href.as_deref(), Some("/b"));
                assert_eq!(patch.new_tab, Some(true));
                assert_eq!(patch.label_en, None);
            }
            other => panic!("Expected update, got {:?}", other),
        }

        let json = serde_json::to_value(NavMutation::AddTopLevel).unwrap();
        assert_eq!(json, serde_json::json!({ "op": "addTopLevel" }));
    }

    #[test]
    fn test_layout_wire_format() {
        let op: LayoutMutation = serde_json::from_str(
            r#"{"op":"addBlock","host":{"in":"column","section":1,"row":0,"column":1},"kind":"icon-feature"}"#,
        )
        .unwrap();
        assert_eq!(
            op,
            LayoutMutation::AddBlock {
                host: BlockHost::Column {
                    section: 1,
                    row: 0,
                    column: 1
                },
                kind: BlockKind::IconFeature,
            }
        );
        assert_eq!(op.name(), "addBlock");
    }

    #[test]
    fn test_name_matches_wire_tag() {
        let ops = vec![
            NavMutation::AddTopLevel,
            NavMutation::ToggleVisibility { path: vec![], index: 0 },
            NavMutation::Reorder {
                path: vec![],
                from: 0,
                to: 1,
            },
        ];
        for op in ops {
            let json = serde_json::to_value(&op).unwrap();
            assert_eq!(json["op"], op.name());
        }

        let op = LayoutMutation::MoveSectionDown { section: 0 };
        assert_eq!(serde_json::to_value(&op).unwrap()["op"], op.name());
    }

    #[test]
    fn test_nav_apply_and_path_error() {
        let mut factory = factory();
        let root = NavMutation::AddTopLevel.apply(&[], &mut factory).unwrap();
        let root = NavMutation::AddChild { path: vec![], index: 0 }.apply(&root, &mut factory).unwrap();
        assert_eq!(root[0].children.len(), 1);

        let err = NavMutation::Delete { path: vec![3], index: 0 }.apply(&root, &mut factory).unwrap_err();
        assert!(matches!(err, MutationError::Path(_)));
    }

    #[test]
    fn test_layout_apply_unknown_template() {
        let err = LayoutMutation::AddSection {
            template: "carousel".to_string(),
            index: None,
        }
        .apply(&[])
        .unwrap_err();
        assert_eq!(err, MutationError::UnknownTemplate("carousel".to_string()));
    }

    #[test]
    fn test_layout_apply_sequence() {
        let ops = [
            LayoutMutation::AddSection {
                template: "custom-grid".to_string(),
                index: None,
            },
            LayoutMutation::AddColumn { section: 0, row: 0 },
            LayoutMutation::AddBlock {
                host: BlockHost::Column {
                    section: 0,
                    row: 0,
                    column: 1,
                },
                kind: BlockKind::Quote,
            },
            LayoutMutation::AddSection {
                template: "hero".to_string(),
                index: Some(0),
            },
        ];

        let mut sections: Sections = Vec::new();
        for op in &ops {
            sections = op.apply(&sections).unwrap();
        }

        assert_eq!(sections[0].key, "hero");
        assert_eq!(sections[1].key, "custom-grid");
        assert_eq!(sections[1].rows[0].columns[1].blocks[0].kind(), BlockKind::Quote);
    }
}
