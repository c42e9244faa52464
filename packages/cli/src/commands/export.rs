use super::files::{print_json, read_menu, resolve};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use folio_model::NavNode;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Menu file or menu name under the data directory
    pub input: String,
}

/// Public read shape of a menu item: visible items only, no admin fields
#[derive(Debug, PartialEq, Serialize)]
pub struct PublicItem {
    #[serde(rename = "labelEN")]
    pub label_en: String,
    #[serde(rename = "labelAR")]
    pub label_ar: String,
    pub href: String,
    #[serde(rename = "newTab")]
    pub new_tab: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PublicItem>,
}

#[derive(Debug, Serialize)]
pub struct PublicMenu {
    pub name: String,
    pub items: Vec<PublicItem>,
}

/// Visible items, with hidden items dropped together with their subtrees
pub fn project(level: &[Arc<NavNode>]) -> Vec<PublicItem> {
    level
        .iter()
        .filter(|node| node.visible)
        .map(|node| PublicItem {
            label_en: node.label_en.clone(),
            label_ar: node.label_ar.clone(),
            href: node.href.clone(),
            new_tab: node.new_tab,
            children: project(&node.children),
        })
        .collect()
}

pub fn export(args: ExportArgs, config: &Config, cwd: &Path) -> Result<()> {
    let path = resolve(&args.input, "menus", config, cwd);
    let menu = read_menu(&path)?;

    print_json(&PublicMenu {
        items: project(&menu.items),
        name: menu.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_items_drop_their_subtree() {
        let mut hidden = NavNode::new("b", "Hidden", "مخفي", "/hidden");
        hidden.visible = false;
        let hidden = hidden.with_children(vec![Arc::new(NavNode::new("c", "Child", "فرع", "/child"))]);

        let items = vec![Arc::new(NavNode::new("a", "Home", "الرئيسية", "/")), Arc::new(hidden)];
        let public = project(&items);

        assert_eq!(public.len(), 1);
        assert_eq!(public[0].href, "/");
    }

    #[test]
    fn test_public_shape_omits_admin_fields() {
        let items = vec![Arc::new(NavNode::new("a", "Home", "الرئيسية", "/"))];
        let json = serde_json::to_value(project(&items)).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{ "labelEN": "Home", "labelAR": "الرئيسية", "href": "/", "newTab": false }])
        );
    }
}
