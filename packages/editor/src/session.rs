//! # Edit Session Management
//!
//! A session owns one document while it is being edited: the current tree,
//! the selection, a version counter and a dirty flag. Every edit goes
//! through `dispatch`, which swaps in the tree returned by the mutation.
//!
//! Nothing is validated until `save`. A save that fails validation never
//! reaches the store; a save the store rejects leaves the session exactly as
//! it was, so the editor can retry.

use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::ids::{repair_ids, IdGenerator};
use crate::mutations::{LayoutMutation, NavMutation};
use crate::nav::{find_node, find_path, NodeFactory};
use crate::store::{MenuStore, PageStore};
use crate::validator::{ValidationError, Validator};
use folio_model::{NavMenu, NavNode, NodeId, PageDocument, Section};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Outcome of a dispatched mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchResult {
    /// The tree changed; `version` is the new document version
    Applied { version: u64 },
    /// The mutation resolved but had nothing to do
    Unchanged,
}

fn same_list<T>(a: &[Arc<T>], b: &[Arc<T>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
}

/// Navigation menu session
#[derive(Debug)]
pub struct NavEditor {
    menu: NavMenu,
    factory: NodeFactory,
    validator: Validator,
    selection: Option<NodeId>,
    version: u64,
    dirty: bool,
}

impl NavEditor {
    /// Start editing `menu`, giving every node a usable id first.
    ///
    /// A menu that needed id repairs starts dirty so that the repair is
    /// persisted by the next save.
    pub fn open(menu: NavMenu, config: &EditorConfig) -> Self {
        let repair = repair_ids(&menu.items, IdGenerator::for_menu(&menu.name));
        if repair.reassigned > 0 {
            info!(menu = %menu.name, reassigned = repair.reassigned, "Repaired menu ids");
        }

        Self {
            menu: menu.with_items(repair.items),
            factory: NodeFactory::new(repair.allocator, config.nav_defaults.clone()),
            validator: Validator::new(config.validator()),
            selection: None,
            version: 0,
            dirty: repair.reassigned > 0,
        }
    }

    #[instrument(skip(store, config))]
    pub fn load(store: &impl MenuStore, name: &str, config: &EditorConfig) -> Result<Self, EditorError> {
        let menu = store.load_menu(name)?;
        Ok(Self::open(menu, config))
    }

    pub fn menu(&self) -> &NavMenu {
        &self.menu
    }

    pub fn items(&self) -> &[Arc<NavNode>] {
        &self.menu.items
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn dispatch(&mut self, mutation: NavMutation) -> Result<DispatchResult, EditorError> {
        let next = mutation.apply(&self.menu.items, &mut self.factory)?;
        if same_list(&next, &self.menu.items) {
            debug!(op = mutation.name(), "Mutation left the menu unchanged");
            return Ok(DispatchResult::Unchanged);
        }

        self.menu = self.menu.with_items(next);
        self.version += 1;
        self.dirty = true;

        if let Some(id) = &self.selection {
            if find_path(&self.menu.items, id).is_none() {
                debug!(node_id = %id, "Selected item removed, clearing selection");
                self.selection = None;
            }
        }

        debug!(op = mutation.name(), version = self.version, "Applied mutation");
        Ok(DispatchResult::Applied { version: self.version })
    }

    /// Select the item with `id`; returns false (and clears the selection) if there is none
    pub fn select(&mut self, id: &str) -> bool {
        self.selection = find_node(&self.menu.items, id).map(|node| node.id.clone());
        self.selection.is_some()
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selected(&self) -> Option<&Arc<NavNode>> {
        find_node(&self.menu.items, self.selection.as_deref()?)
    }

    /// Current `(path, index)` of the selected item
    pub fn selected_position(&self) -> Option<(Vec<usize>, usize)> {
        find_path(&self.menu.items, self.selection.as_deref()?)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validator.validate_menu(&self.menu.items)
    }

    /// Validate, then hand the whole menu to `store`
    #[instrument(skip(self, store), fields(menu = %self.menu.name, version = self.version))]
    pub fn save(&mut self, store: &mut impl MenuStore) -> Result<(), EditorError> {
        if let Err(err) = self.validate() {
            warn!(error = %err, "Save blocked by validation");
            return Err(err.into());
        }
        if let Err(err) = store.save_menu(&self.menu) {
            warn!(error = %err, "Save failed, keeping local changes");
            return Err(err.into());
        }
        self.dirty = false;
        info!("Saved menu");
        Ok(())
    }
}

/// Page layout session
#[derive(Debug)]
pub struct PageEditor {
    slug: String,
    document: PageDocument,
    validator: Validator,
    selection: Option<usize>,
    version: u64,
    dirty: bool,
}

impl PageEditor {
    pub fn open(slug: impl Into<String>, document: PageDocument, config: &EditorConfig) -> Self {
        Self {
            slug: slug.into(),
            document,
            validator: Validator::new(config.validator()),
            selection: None,
            version: 0,
            dirty: false,
        }
    }

    #[instrument(skip(store, config))]
    pub fn load(store: &impl PageStore, slug: &str, config: &EditorConfig) -> Result<Self, EditorError> {
        let document = store.load_page(slug)?;
        Ok(Self::open(slug, document, config))
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    pub fn sections(&self) -> &[Arc<Section>] {
        &self.document.sections
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn dispatch(&mut self, mutation: LayoutMutation) -> Result<DispatchResult, EditorError> {
        let next = mutation.apply(&self.document.sections)?;
        if same_list(&next, &self.document.sections) {
            debug!(op = mutation.name(), "Mutation left the page unchanged");
            return Ok(DispatchResult::Unchanged);
        }

        let previous = self.selection.and_then(|index| self.document.sections.get(index).cloned());
        self.document = self.document.with_sections(next);
        self.version += 1;
        self.dirty = true;

        if let (Some(index), Some(section)) = (self.selection, previous) {
            self.selection = self.follow_section(index, &section, &mutation);
            if self.selection.is_none() {
                debug!(section = index, "Selected section removed, clearing selection");
            }
        }

        debug!(op = mutation.name(), version = self.version, "Applied mutation");
        Ok(DispatchResult::Applied { version: self.version })
    }

    /// Where the section selected at `index` ended up.
    ///
    /// An untouched section is found by identity wherever it moved; a section
    /// edited in place stays at its index.
    fn follow_section(&self, index: usize, before: &Arc<Section>, mutation: &LayoutMutation) -> Option<usize> {
        let sections = &self.document.sections;
        if let Some(found) = sections.iter().position(|s| Arc::ptr_eq(s, before)) {
            return Some(found);
        }
        match mutation {
            LayoutMutation::DeleteSection { .. } => None,
            _ if mutation.section() == Some(index) && index < sections.len() => Some(index),
            _ => None,
        }
    }

    /// Select the section at `index`; returns false (and clears the selection) if out of range
    pub fn select(&mut self, index: usize) -> bool {
        self.selection = (index < self.document.sections.len()).then_some(index);
        self.selection.is_some()
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validator.validate_page(&self.document.sections)
    }

    #[instrument(skip(self, store), fields(slug = %self.slug, version = self.version))]
    pub fn save(&mut self, store: &mut impl PageStore) -> Result<(), EditorError> {
        if let Err(err) = self.validate() {
            warn!(error = %err, "Save blocked by validation");
            return Err(err.into());
        }
        if let Err(err) = store.save_page(&self.slug, &self.document) {
            warn!(error = %err, "Save failed, keeping local changes");
            return Err(err.into());
        }
        self.dirty = false;
        info!("Saved page");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutations::MutationError;
    use crate::nav::NavPatch;
    use crate::store::MemoryStore;
    use folio_common::BlockHost;
    use folio_model::BlockKind;

    fn editor() -> NavEditor {
        NavEditor::open(NavMenu::new("main"), &EditorConfig::default())
    }

    #[test]
    fn test_open_repairs_ids_and_marks_dirty() {
        let menu = NavMenu::new("main").with_items(vec![
            Arc::new(NavNode::new("", "Home", "الرئيسية", "/")),
            Arc::new(NavNode::new("", "About", "من نحن", "/about")),
        ]);
        let editor = NavEditor::open(menu, &EditorConfig::default());

        assert!(editor.is_dirty());
        assert!(!editor.items()[0].id.is_empty());
        assert_ne!(editor.items()[0].id, editor.items()[1].id);

        let clean = NavEditor::open(editor.menu().clone(), &EditorConfig::default());
        assert!(!clean.is_dirty());
    }

    #[test]
    fn test_dispatch_versions_and_noops() {
        let mut editor = editor();
        assert_eq!(editor.version(), 0);

        let result = editor.dispatch(NavMutation::AddTopLevel).unwrap();
        assert_eq!(result, DispatchResult::Applied { version: 1 });
        assert!(editor.is_dirty());

        let result = editor.dispatch(NavMutation::Indent { path: vec![], index: 0 }).unwrap();
        assert_eq!(result, DispatchResult::Unchanged);
        assert_eq!(editor.version(), 1);

        let err = editor.dispatch(NavMutation::Delete { path: vec![], index: 5 }).unwrap_err();
        assert!(matches!(err, EditorError::Mutation(MutationError::Path(_))));
        assert_eq!(editor.items().len(), 1);
    }

    #[test]
    fn test_update_without_changes_is_unchanged() {
        let mut editor = editor();
        editor.dispatch(NavMutation::AddTopLevel).unwrap();
        let href = editor.items()[0].href.clone();

        let result = editor
            .dispatch(NavMutation::Update {
                path: vec![],
                index: 0,
                patch: NavPatch::href(href),
            })
            .unwrap();
        assert_eq!(result, DispatchResult::Unchanged);
        assert_eq!(editor.version(), 1);
    }

    #[test]
    fn test_selection_follows_moves_and_clears_on_delete() {
        let mut editor = editor();
        editor.dispatch(NavMutation::AddTopLevel).unwrap();
        editor.dispatch(NavMutation::AddTopLevel).unwrap();
        let second = editor.items()[1].id.clone();

        assert!(editor.select(&second));
        editor.dispatch(NavMutation::Indent { path: vec![], index: 1 }).unwrap();
        assert_eq!(editor.selected_position(), Some((vec![0], 0)));
        assert_eq!(editor.selected().map(|n| n.id.clone()), Some(second));

        editor.dispatch(NavMutation::Delete { path: vec![], index: 0 }).unwrap();
        assert!(editor.selected().is_none());
        assert!(!editor.select("missing"));
    }

    #[test]
    fn test_save_blocked_by_validation() {
        let mut store = MemoryStore::new();
        let mut editor = editor();
        editor.dispatch(NavMutation::AddTopLevel).unwrap();
        editor.dispatch(NavMutation::AddTopLevel).unwrap();

        let err = editor.save(&mut store).unwrap_err();
        assert!(err.is_validation());
        assert!(store.menu("main").is_none());
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_failed_persistence_keeps_state() {
        let mut store = MemoryStore::new();
        store.set_offline(true);

        let mut editor = editor();
        editor.dispatch(NavMutation::AddTopLevel).unwrap();
        let before = editor.menu().clone();

        let err = editor.save(&mut store).unwrap_err();
        assert!(matches!(err, EditorError::Store(_)));
        assert!(editor.is_dirty());
        assert_eq!(editor.menu(), &before);

        store.set_offline(false);
        editor.save(&mut store).unwrap();
        assert!(!editor.is_dirty());
        assert_eq!(store.menu("main"), Some(&before));
    }

    #[test]
    fn test_new_items_use_configured_defaults() {
        let mut config = EditorConfig::default();
        config.nav_defaults.label_en = "Untitled".to_string();
        let mut editor = NavEditor::open(NavMenu::new("main"), &config);

        editor.dispatch(NavMutation::AddTopLevel).unwrap();
        editor
            .dispatch(NavMutation::Update {
                path: vec![],
                index: 0,
                patch: NavPatch::href("/start"),
            })
            .unwrap();
        assert_eq!(editor.items()[0].label_en, "Untitled");
        assert_eq!(editor.items()[0].href, "/start");
    }

    fn page_editor() -> PageEditor {
        let mut editor = PageEditor::open("about", PageDocument::new(), &EditorConfig::default());
        for template in ["hero", "rich-text", "cta-banner"] {
            editor
                .dispatch(LayoutMutation::AddSection {
                    template: template.to_string(),
                    index: None,
                })
                .unwrap();
        }
        editor
    }

    #[test]
    fn test_page_selection_tracking() {
        let mut editor = page_editor();
        assert!(editor.select(1));

        editor
            .dispatch(LayoutMutation::AddBlock {
                host: BlockHost::Section { section: 1 },
                kind: BlockKind::Quote,
            })
            .unwrap();
        assert_eq!(editor.selected(), Some(1));

        editor.dispatch(LayoutMutation::MoveSectionUp { section: 1 }).unwrap();
        assert_eq!(editor.selected(), Some(0));

        editor.dispatch(LayoutMutation::DeleteSection { section: 2 }).unwrap();
        assert_eq!(editor.selected(), Some(0));

        editor.dispatch(LayoutMutation::DeleteSection { section: 0 }).unwrap();
        assert_eq!(editor.selected(), None);
    }

    #[test]
    fn test_page_save_roundtrip() {
        let mut store = MemoryStore::new();
        let mut editor = page_editor();
        editor.save(&mut store).unwrap();

        let loaded = PageEditor::load(&store, "about", &EditorConfig::default()).unwrap();
        assert_eq!(loaded.sections().len(), 3);
        assert_eq!(loaded.sections()[2].key, "cta-banner");
        assert!(!loaded.is_dirty());
    }
}
