use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Tool settings, loaded from a YAML settings file. Constructed once in
/// `main` and passed explicitly to everything that needs it.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Path of the local inventory file.
    #[serde(default = "default_inventory_file")]
    pub inventory_file: PathBuf,

    /// Named sets of default host fields, mergeable into hosts on add.
    #[serde(default)]
    pub nicks: HashMap<String, Value>,
}

fn default_inventory_file() -> PathBuf {
    PathBuf::from("inventory.yaml")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            inventory_file: default_inventory_file(),
            nicks: HashMap::new(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .build()
            .with_context(|| format!("Settings: Failed to read {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("Settings: Invalid settings in {}", path.display()))
    }
}

/// Look up a nickname's default host fields.
pub fn resolve_nick<'a>(settings: &'a Settings, nick: &str) -> Option<&'a Value> {
    settings.nicks.get(nick)
}
