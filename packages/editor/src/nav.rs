//! # Navigation Tree Operations
//!
//! Every operation takes the current root and returns the next one. The
//! input is never modified; nodes off the edited spine are shared.
//!
//! Operations address a node as `(path, index)`: `path` selects a sibling
//! list (see [`folio_common::get_by_path`]) and `index` a node within it.
//! Positions that make an operation meaningless (indenting the first
//! sibling, outdenting a top-level item) return the root unchanged. Depth
//! and link uniqueness are not checked here; see [`crate::Validator`].

use crate::ids::IdAllocator;
use folio_common::{
    inserted, map_level, moved, moved_down, moved_up, node_at, pushed, removed, replaced, walk_nav, walk_node,
    NavVisitor, PathError,
};
use folio_model::{LinkKind, NavNode};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::debug;

/// Navigation sibling list
pub type NavRoot = Vec<Arc<NavNode>>;

/// Field values given to newly added items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavDefaults {
    #[serde(rename = "labelEN", default = "default_label_en")]
    pub label_en: String,
    #[serde(rename = "labelAR", default = "default_label_ar")]
    pub label_ar: String,
    #[serde(default = "default_href")]
    pub href: String,
}

fn default_label_en() -> String {
    "New item".to_string()
}

fn default_label_ar() -> String {
    "عنصر جديد".to_string()
}

fn default_href() -> String {
    "/".to_string()
}

impl Default for NavDefaults {
    fn default() -> Self {
        Self {
            label_en: default_label_en(),
            label_ar: default_label_ar(),
            href: default_href(),
        }
    }
}

/// Builds new items: fresh id plus the configured defaults
#[derive(Debug, Clone)]
pub struct NodeFactory {
    pub ids: IdAllocator,
    pub defaults: NavDefaults,
}

impl NodeFactory {
    pub fn new(ids: IdAllocator, defaults: NavDefaults) -> Self {
        Self { ids, defaults }
    }

    pub fn new_node(&mut self) -> NavNode {
        NavNode::new(
            self.ids.fresh(),
            self.defaults.label_en.clone(),
            self.defaults.label_ar.clone(),
            self.defaults.href.clone(),
        )
    }

    /// Copy of `node` and its whole subtree under fresh ids
    pub fn deep_copy(&mut self, node: &NavNode) -> NavNode {
        let id = self.ids.fresh();
        let children = node.children.iter().map(|c| Arc::new(self.deep_copy(c))).collect();
        let mut copy = node.with_children(children);
        copy.id = id;
        copy
    }
}

/// Partial update of an item's own fields; `None` leaves a field as is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavPatch {
    #[serde(rename = "labelEN", default, skip_serializing_if = "Option::is_none")]
    pub label_en: Option<String>,
    #[serde(rename = "labelAR", default, skip_serializing_if = "Option::is_none")]
    pub label_ar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<LinkKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(rename = "newTab", default, skip_serializing_if = "Option::is_none")]
    pub new_tab: Option<bool>,
}

impl NavPatch {
    pub fn href(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::default()
        }
    }

    pub fn labels(label_en: impl Into<String>, label_ar: impl Into<String>) -> Self {
        Self {
            label_en: Some(label_en.into()),
            label_ar: Some(label_ar.into()),
            ..Self::default()
        }
    }

    fn apply_to(&self, node: &NavNode) -> NavNode {
        let mut next = node.clone();
        if let Some(label_en) = &self.label_en {
            next.label_en = label_en.clone();
        }
        if let Some(label_ar) = &self.label_ar {
            next.label_ar = label_ar.clone();
        }
        if let Some(href) = &self.href {
            next.href = href.clone();
        }
        if let Some(kind) = self.kind {
            next.kind = kind;
        }
        if let Some(visible) = self.visible {
            next.visible = visible;
        }
        if let Some(new_tab) = self.new_tab {
            next.new_tab = new_tab;
        }
        next
    }
}

/// Replace the node at `(path, index)` with `f(node)`
fn map_node<F>(root: &[Arc<NavNode>], path: &[usize], index: usize, f: F) -> Result<NavRoot, PathError>
where
    F: FnOnce(&NavNode) -> NavNode,
{
    map_level(root, path, |level| {
        let node = level
            .get(index)
            .ok_or(PathError::IndexOutOfRange { index, len: level.len() })?;
        replaced(level, index, Arc::new(f(node))).map(Some)
    })
}

/// Append a default item at the top level
pub fn add_top_level(root: &[Arc<NavNode>], factory: &mut NodeFactory) -> NavRoot {
    pushed(root, Arc::new(factory.new_node()))
}

/// Append a default item to the children of the node at `(path, index)`
pub fn add_child(root: &[Arc<NavNode>], path: &[usize], index: usize, factory: &mut NodeFactory) -> Result<NavRoot, PathError> {
    let child = Arc::new(factory.new_node());
    map_node(root, path, index, |node| node.with_children(pushed(&node.children, child)))
}

/// Remove the node at `(path, index)` together with its subtree
pub fn delete_at(root: &[Arc<NavNode>], path: &[usize], index: usize) -> Result<NavRoot, PathError> {
    map_level(root, path, |level| removed(level, index).map(|(rest, _)| Some(rest)))
}

/// Flip `visible` on the node at `(path, index)`
pub fn toggle_visibility(root: &[Arc<NavNode>], path: &[usize], index: usize) -> Result<NavRoot, PathError> {
    map_node(root, path, index, |node| NavNode {
        visible: !node.visible,
        ..node.clone()
    })
}

/// Apply `patch` to the node at `(path, index)`. No-op when no field changes.
pub fn update_node(root: &[Arc<NavNode>], path: &[usize], index: usize, patch: &NavPatch) -> Result<NavRoot, PathError> {
    map_level(root, path, |level| {
        let node = level
            .get(index)
            .ok_or(PathError::IndexOutOfRange { index, len: level.len() })?;
        let next = patch.apply_to(node);
        if next == **node {
            debug!(?path, index, "update ignored: patch changes no field");
            return Ok(None);
        }
        replaced(level, index, Arc::new(next)).map(Some)
    })
}

/// Make the node the last child of its previous sibling. No-op for the first sibling.
pub fn indent(root: &[Arc<NavNode>], path: &[usize], index: usize) -> Result<NavRoot, PathError> {
    map_level(root, path, |level| {
        let (rest, node) = removed(level, index)?;
        if index == 0 {
            debug!(?path, "indent ignored: first sibling has no previous sibling");
            return Ok(None);
        }

        let new_parent = &rest[index - 1];
        let new_parent = new_parent.with_children(pushed(&new_parent.children, node));
        replaced(&rest, index - 1, Arc::new(new_parent)).map(Some)
    })
}

/// Move the node out of its parent, right after the parent. No-op at the top level.
pub fn outdent(root: &[Arc<NavNode>], path: &[usize], index: usize) -> Result<NavRoot, PathError> {
    let Some((&parent_index, parent_path)) = path.split_last() else {
        node_at(root, path, index)?;
        debug!(index, "outdent ignored: item is already top level");
        return Ok(root.to_vec());
    };

    map_level(root, parent_path, |level| {
        let parent = level
            .get(parent_index)
            .ok_or(PathError::IndexOutOfRange { index: parent_index, len: level.len() })?;
        let (children, node) = removed(&parent.children, index)?;

        let level = replaced(level, parent_index, Arc::new(parent.with_children(children)))?;
        inserted(&level, parent_index + 1, node).map(Some)
    })
}

/// Move one sibling from `from` to `to` within the list at `path`
pub fn reorder(root: &[Arc<NavNode>], path: &[usize], from: usize, to: usize) -> Result<NavRoot, PathError> {
    map_level(root, path, |level| moved(level, from, to).map(Some))
}

/// Swap with the previous sibling. No-op for the first sibling.
pub fn move_up(root: &[Arc<NavNode>], path: &[usize], index: usize) -> Result<NavRoot, PathError> {
    map_level(root, path, |level| moved_up(level, index))
}

/// Swap with the next sibling. No-op for the last sibling.
pub fn move_down(root: &[Arc<NavNode>], path: &[usize], index: usize) -> Result<NavRoot, PathError> {
    map_level(root, path, |level| moved_down(level, index))
}

/// Insert a copy of the node, with fresh ids throughout its subtree, right after it
pub fn duplicate_at(root: &[Arc<NavNode>], path: &[usize], index: usize, factory: &mut NodeFactory) -> Result<NavRoot, PathError> {
    map_level(root, path, |level| {
        let node = level
            .get(index)
            .ok_or(PathError::IndexOutOfRange { index, len: level.len() })?;
        let copy = Arc::new(factory.deep_copy(node));
        inserted(level, index + 1, copy).map(Some)
    })
}

struct FindById<'a>(&'a str);

impl NavVisitor for FindById<'_> {
    type Break = (Vec<usize>, usize);

    fn visit_node(&mut self, node: &NavNode, path: &[usize], index: usize, depth: usize) -> ControlFlow<Self::Break> {
        if node.id == self.0 {
            return ControlFlow::Break((path.to_vec(), index));
        }
        walk_node(self, node, path, index, depth)
    }
}

/// Current `(path, index)` of the node with `id`
pub fn find_path(root: &[Arc<NavNode>], id: &str) -> Option<(Vec<usize>, usize)> {
    match walk_nav(&mut FindById(id), root) {
        ControlFlow::Break(found) => Some(found),
        ControlFlow::Continue(()) => None,
    }
}

/// Node with `id`, wherever it sits
pub fn find_node<'a>(root: &'a [Arc<NavNode>], id: &str) -> Option<&'a Arc<NavNode>> {
    let (path, index) = find_path(root, id)?;
    node_at(root, &path, index).ok()
}
