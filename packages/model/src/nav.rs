//! Navigation menu tree

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Opaque node identifier, unique across a whole menu
pub type NodeId = String;

/// One level of the navigation tree
pub type NavList = Vec<Arc<NavNode>>;

/// How `href` is interpreted by the public site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Site-relative route, e.g. `/about`
    #[default]
    Internal,
    /// Absolute URL to another site
    External,
}

/// Navigation menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavNode {
    /// Empty when the stored document had no id; repaired on load
    #[serde(default)]
    pub id: NodeId,

    #[serde(rename = "labelEN", default)]
    pub label_en: String,

    #[serde(rename = "labelAR", default)]
    pub label_ar: String,

    #[serde(default)]
    pub href: String,

    #[serde(rename = "type", default)]
    pub kind: LinkKind,

    /// Controls the public render only; hidden items stay editable
    #[serde(default = "default_visible")]
    pub visible: bool,

    #[serde(rename = "newTab", default)]
    pub new_tab: bool,

    #[serde(default)]
    pub children: NavList,

    /// Per-item fields owned by the API (database ids, icons) carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_visible() -> bool {
    true
}

impl NavNode {
    pub fn new(
        id: impl Into<NodeId>,
        label_en: impl Into<String>,
        label_ar: impl Into<String>,
        href: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label_en: label_en.into(),
            label_ar: label_ar.into(),
            href: href.into(),
            kind: LinkKind::Internal,
            visible: true,
            new_tab: false,
            children: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Shallow copy with a replaced child list; grandchildren are shared
    pub fn with_children(&self, children: NavList) -> Self {
        Self {
            children,
            ..self.clone_fields()
        }
    }

    /// Copy every scalar field, leaving children empty
    pub fn clone_fields(&self) -> Self {
        Self {
            id: self.id.clone(),
            label_en: self.label_en.clone(),
            label_ar: self.label_ar.clone(),
            href: self.href.clone(),
            kind: self.kind,
            visible: self.visible,
            new_tab: self.new_tab,
            children: Vec::new(),
            extra: self.extra.clone(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(|c| c.subtree_len()).sum::<usize>()
    }
}

/// Navigation document as exchanged with the admin API
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NavMenu {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub items: NavList,

    /// Fields owned by the API (timestamps, database ids) carried through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NavMenu {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Same document with a different item tree
    pub fn with_items(&self, items: NavList) -> Self {
        Self {
            name: self.name.clone(),
            items,
            extra: self.extra.clone(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.items.iter().map(|n| n.subtree_len()).sum()
    }
}
