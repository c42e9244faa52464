//! # Persistence Boundary
//!
//! Sessions hand a whole tree to a store on save and get a whole tree back
//! on load; there are no partial updates. Two backends:
//!
//! - [`JsonFileStore`]: one pretty-printed JSON file per document under a
//!   data directory (`menus/<name>.json`, `pages/<slug>.json`)
//! - [`MemoryStore`]: in-process maps, with a switch that makes every save
//!   fail so callers can exercise their retry path

use folio_model::{NavMenu, PageDocument};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No {kind} named '{name}'")]
    NotFound { kind: &'static str, name: String },

    #[error("'{0}' is not a valid document name")]
    InvalidName(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub trait MenuStore {
    fn load_menu(&self, name: &str) -> Result<NavMenu, StoreError>;

    /// Replace the stored menu named `menu.name`
    fn save_menu(&mut self, menu: &NavMenu) -> Result<(), StoreError>;
}

pub trait PageStore {
    fn load_page(&self, slug: &str) -> Result<PageDocument, StoreError>;

    fn save_page(&mut self, slug: &str, page: &PageDocument) -> Result<(), StoreError>;
}

/// Names become file names: ASCII letters, digits, `-` and `_` only
pub fn check_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}

/// Pretty-print `value` to `path`, creating parent directories.
///
/// The JSON goes to a `.json.tmp` sibling first and is renamed over `path`,
/// so a failed write leaves the previous file intact.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let content = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, content).map_err(io_err)?;
    std::fs::rename(&staging, path).map_err(io_err)?;
    Ok(())
}

/// Documents as JSON files under a data directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn menu_path(&self, name: &str) -> PathBuf {
        self.root.join("menus").join(format!("{}.json", name))
    }

    pub fn page_path(&self, slug: &str) -> PathBuf {
        self.root.join("pages").join(format!("{}.json", slug))
    }

    fn read<T: DeserializeOwned>(path: &Path, kind: &'static str, name: &str) -> Result<T, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound {
                kind,
                name: name.to_string(),
            },
            _ => StoreError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl MenuStore for JsonFileStore {
    #[instrument(skip(self))]
    fn load_menu(&self, name: &str) -> Result<NavMenu, StoreError> {
        check_name(name)?;
        let path = self.menu_path(name);
        let mut menu: NavMenu = Self::read(&path, "menu", name)?;
        if menu.name.is_empty() {
            menu.name = name.to_string();
        }
        debug!(path = %path.display(), items = menu.items.len(), "Loaded menu");
        Ok(menu)
    }

    #[instrument(skip(self, menu), fields(name = %menu.name, nodes = menu.node_count()))]
    fn save_menu(&mut self, menu: &NavMenu) -> Result<(), StoreError> {
        check_name(&menu.name)?;
        let path = self.menu_path(&menu.name);
        write_json_atomic(&path, menu)?;
        info!(path = %path.display(), "Saved menu");
        Ok(())
    }
}

impl PageStore for JsonFileStore {
    #[instrument(skip(self))]
    fn load_page(&self, slug: &str) -> Result<PageDocument, StoreError> {
        check_name(slug)?;
        let path = self.page_path(slug);
        let page: PageDocument = Self::read(&path, "page", slug)?;
        debug!(path = %path.display(), sections = page.sections.len(), "Loaded page");
        Ok(page)
    }

    #[instrument(skip(self, page), fields(sections = page.sections.len()))]
    fn save_page(&mut self, slug: &str, page: &PageDocument) -> Result<(), StoreError> {
        check_name(slug)?;
        let path = self.page_path(slug);
        write_json_atomic(&path, page)?;
        info!(path = %path.display(), "Saved page");
        Ok(())
    }
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    menus: HashMap<String, NavMenu>,
    pages: HashMap<String, PageDocument>,
    offline: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every save fails with [`StoreError::Unavailable`]
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn insert_menu(&mut self, menu: NavMenu) {
        self.menus.insert(menu.name.clone(), menu);
    }

    pub fn insert_page(&mut self, slug: impl Into<String>, page: PageDocument) {
        self.pages.insert(slug.into(), page);
    }

    pub fn menu(&self, name: &str) -> Option<&NavMenu> {
        self.menus.get(name)
    }

    pub fn page(&self, slug: &str) -> Option<&PageDocument> {
        self.pages.get(slug)
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline {
            Err(StoreError::Unavailable("memory store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl MenuStore for MemoryStore {
    fn load_menu(&self, name: &str) -> Result<NavMenu, StoreError> {
        self.menus.get(name).cloned().ok_or_else(|| StoreError::NotFound {
            kind: "menu",
            name: name.to_string(),
        })
    }

    fn save_menu(&mut self, menu: &NavMenu) -> Result<(), StoreError> {
        self.check_online()?;
        self.insert_menu(menu.clone());
        Ok(())
    }
}

impl PageStore for MemoryStore {
    fn load_page(&self, slug: &str) -> Result<PageDocument, StoreError> {
        self.pages.get(slug).cloned().ok_or_else(|| StoreError::NotFound {
            kind: "page",
            name: slug.to_string(),
        })
    }

    fn save_page(&mut self, slug: &str, page: &PageDocument) -> Result<(), StoreError> {
        self.check_online()?;
        self.insert_page(slug, page.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_model::NavNode;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn menu() -> NavMenu {
        NavMenu::new("main").with_items(vec![Arc::new(NavNode::new("m-1", "Home", "الرئيسية", "/"))])
    }

    #[test]
    fn test_check_name() {
        assert!(check_name("main-menu_2").is_ok());
        assert!(matches!(check_name("../etc"), Err(StoreError::InvalidName(_))));
        assert!(matches!(check_name(""), Err(StoreError::InvalidName(_))));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path());

        store.save_menu(&menu()).unwrap();
        assert!(dir.path().join("menus/main.json").exists());
        assert!(!dir.path().join("menus/main.json.tmp").exists());

        let loaded = store.load_menu("main").unwrap();
        assert_eq!(loaded, menu());
    }

    #[test]
    fn test_file_store_missing_and_malformed() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        assert!(matches!(store.load_page("about"), Err(StoreError::NotFound { kind: "page", .. })));

        std::fs::create_dir_all(dir.path().join("pages")).unwrap();
        std::fs::write(dir.path().join("pages/about.json"), "{ not json").unwrap();
        assert!(matches!(store.load_page("about"), Err(StoreError::Json { .. })));
    }

    #[test]
    fn test_file_store_fills_missing_menu_name() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("menus")).unwrap();
        std::fs::write(dir.path().join("menus/footer.json"), r#"{ "items": [] }"#).unwrap();

        let menu = JsonFileStore::new(dir.path()).load_menu("footer").unwrap();
        assert_eq!(menu.name, "footer");
    }

    #[test]
    fn test_memory_store_offline() {
        let mut store = MemoryStore::new();
        store.set_offline(true);
        assert!(matches!(store.save_menu(&menu()), Err(StoreError::Unavailable(_))));
        assert!(store.menu("main").is_none());

        store.set_offline(false);
        store.save_menu(&menu()).unwrap();
        assert_eq!(store.load_menu("main").unwrap(), menu());
    }
}
