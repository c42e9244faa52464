//! Editor settings, usually read from the `editor` block of a project config

use crate::nav::NavDefaults;
use crate::validator::{ValidatorConfig, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Deepest menu level accepted on save
    #[serde(default = "default_max_nav_depth")]
    pub max_nav_depth: usize,

    /// Field values for newly added menu items
    #[serde(default)]
    pub nav_defaults: NavDefaults,
}

fn default_max_nav_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl EditorConfig {
    pub fn validator(&self) -> ValidatorConfig {
        ValidatorConfig {
            max_depth: self.max_nav_depth,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_nav_depth: default_max_nav_depth(),
            nav_defaults: NavDefaults::default(),
        }
    }
}
