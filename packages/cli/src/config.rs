use folio_editor::{EditorConfig, NavDefaults};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding `menus/` and `pages/`
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Deepest menu level accepted on save
    #[serde(default = "default_max_nav_depth")]
    pub max_nav_depth: usize,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Labels given to newly added menu items
    #[serde(default)]
    pub default_labels: DefaultLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultLabels {
    #[serde(default = "default_label_en")]
    pub en: String,
    #[serde(default = "default_label_ar")]
    pub ar: String,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_max_nav_depth() -> usize {
    folio_editor::DEFAULT_MAX_DEPTH
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_label_en() -> String {
    NavDefaults::default().label_en
}

fn default_label_ar() -> String {
    NavDefaults::default().label_ar
}

impl Default for DefaultLabels {
    fn default() -> Self {
        Self {
            en: default_label_en(),
            ar: default_label_ar(),
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the data directory
    pub fn get_data_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.data_dir)
    }

    /// Settings for editor sessions
    pub fn editor(&self) -> EditorConfig {
        EditorConfig {
            max_nav_depth: self.max_nav_depth,
            nav_defaults: NavDefaults {
                label_en: self.default_labels.en.clone(),
                label_ar: self.default_labels.ar.clone(),
                ..NavDefaults::default()
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_nav_depth: default_max_nav_depth(),
            log_level: default_log_level(),
            default_labels: DefaultLabels::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "dataDir": "content",
            "maxNavDepth": 2,
            "logLevel": "debug",
            "defaultLabels": { "en": "Untitled" }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.data_dir, "content");
        assert_eq!(config.max_nav_depth, 2);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.default_labels.en, "Untitled");
        assert_eq!(config.default_labels.ar, "عنصر جديد");

        let editor = config.editor();
        assert_eq!(editor.max_nav_depth, 2);
        assert_eq!(editor.nav_defaults.label_en, "Untitled");
        assert_eq!(editor.nav_defaults.href, "/");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.max_nav_depth, 3);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.editor(), EditorConfig::default());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "dataDir": "site" }"#).unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.get_data_dir(dir.path()), dir.path().join("site"));
    }
}
