//! Locating and reading documents named on the command line

use crate::config::Config;
use anyhow::{Context, Result};
use folio_editor::{write_json_atomic, MenuStore, PageStore, StoreError};
use folio_model::{NavMenu, PageDocument};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// `input` relative to `cwd` when that file or directory exists, otherwise
/// `<dataDir>/<kind>/<input>.json`
pub fn resolve(input: &str, kind: &str, config: &Config, cwd: &Path) -> PathBuf {
    let direct = cwd.join(input);
    if direct.exists() {
        return direct;
    }
    config.get_data_dir(cwd).join(kind).join(format!("{}.json", input))
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Malformed JSON in {}", path.display()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Menu read from a file, named after the file when the document has no name
pub fn read_menu(path: &Path) -> Result<NavMenu> {
    let mut menu: NavMenu = read_json(path)?;
    if menu.name.is_empty() {
        menu.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    Ok(menu)
}

/// A single JSON file acting as the store for the one document it holds
pub struct DocumentFile {
    path: PathBuf,
}

impl DocumentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn write<T: Serialize>(&self, value: &T) -> Result<(), StoreError> {
        write_json_atomic(&self.path, value)
    }

    fn read<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

impl MenuStore for DocumentFile {
    fn load_menu(&self, _name: &str) -> Result<NavMenu, StoreError> {
        self.read()
    }

    fn save_menu(&mut self, menu: &NavMenu) -> Result<(), StoreError> {
        self.write(menu)
    }
}

impl PageStore for DocumentFile {
    fn load_page(&self, _slug: &str) -> Result<PageDocument, StoreError> {
        self.read()
    }

    fn save_page(&mut self, _slug: &str, page: &PageDocument) -> Result<(), StoreError> {
        self.write(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_prefers_existing_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("menu.json");
        std::fs::write(&file, "{}").unwrap();

        let config = Config::default();
        assert_eq!(resolve(file.to_str().unwrap(), "menus", &config, dir.path()), file);
        assert_eq!(resolve("menu.json", "menus", &config, dir.path()), file);
        assert_eq!(resolve(".", "menus", &config, dir.path()), dir.path().join("."));
        assert_eq!(
            resolve("footer", "menus", &config, dir.path()),
            dir.path().join("data/menus/footer.json")
        );
    }

    #[test]
    fn test_read_menu_names_from_file_stem() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("footer.json");
        std::fs::write(&file, r#"{ "items": [] }"#).unwrap();

        assert_eq!(read_menu(&file).unwrap().name, "footer");
    }

    #[test]
    fn test_document_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut file = DocumentFile::new(dir.path().join("page.json"));

        std::fs::write(dir.path().join("page.json"), "{}").unwrap();
        let mut page = PageDocument::new();
        page.extra.insert("slug".to_string(), "about".into());
        file.save_page("ignored", &page).unwrap();

        assert!(!dir.path().join("page.json.tmp").exists());
        assert_eq!(file.load_page("ignored").unwrap(), page);
    }
}
