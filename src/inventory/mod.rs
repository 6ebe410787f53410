//! Local inventory store: a YAML file holding the list of host records.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs::File;
use std::path::Path;

use crate::config::Settings;
use crate::filter::filter_inventory;

/// Load structured data from a JSON or YAML file.
///
/// A missing file or unrecognized extension logs a warning and yields null
/// (nothing stored yet); a file that exists but fails to parse is an input
/// error.
pub fn load_file(path: &Path) -> Result<Value> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !path.exists() || !matches!(ext, "json" | "yaml" | "yml") {
        tracing::warn!("File {} is invalid or does not exist", path.display());
        return Ok(Value::Null);
    }
    let file = File::open(path)
        .with_context(|| format!("Inventory: Failed to open {}", path.display()))?;
    let data = if ext == "json" {
        serde_json::from_reader(file)
            .with_context(|| format!("Inventory: Invalid JSON in {}", path.display()))?
    } else {
        serde_yaml::from_reader(file)
            .with_context(|| format!("Inventory: Invalid YAML in {}", path.display()))?
    };
    Ok(data)
}

/// Load a file as a list of host records. A single top-level record becomes
/// a one-element list; an empty or missing file an empty one.
pub fn load_records(path: &Path) -> Result<Vec<Value>> {
    Ok(match load_file(path)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        single => vec![single],
    })
}

/// Load all hosts from the local inventory, optionally filtered.
pub fn load_inventory(settings: &Settings, filter: Option<&str>) -> Result<Vec<Value>> {
    let records = load_records(&settings.inventory_file)?;
    Ok(match filter {
        Some(raw) => filter_inventory(&records, raw),
        None => records,
    })
}

/// Add and/or remove hosts in the local inventory file.
///
/// Removal keys match a host's `hostname` or `name` field; added hosts go to
/// the end. The file is rewritten in full.
pub fn update_inventory(settings: &Settings, add: &[Value], remove: &[String]) -> Result<()> {
    let mut records = load_inventory(settings, None)?;
    if !remove.is_empty() {
        records.retain(|host| !matches_removal(host, remove));
    }
    records.extend(add.iter().cloned());
    replace_inventory(settings, &records)
}

/// Rewrite the inventory file with exactly these records.
pub fn replace_inventory(settings: &Settings, records: &[Value]) -> Result<()> {
    if let Some(parent) = settings.inventory_file.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Inventory: Failed to create {}", parent.display()))?;
    }
    let file = File::create(&settings.inventory_file)
        .with_context(|| format!("Inventory: Failed to write {}", settings.inventory_file.display()))?;
    serde_yaml::to_writer(file, &records)
        .with_context(|| format!("Inventory: Failed to write {}", settings.inventory_file.display()))?;
    Ok(())
}

fn matches_removal(host: &Value, remove: &[String]) -> bool {
    ["hostname", "name"].iter().any(|field| {
        host.get(field)
            .and_then(Value::as_str)
            .is_some_and(|value| remove.iter().any(|key| key == value))
    })
}

/// Render a value as a YAML document string.
pub fn yaml_format(value: &Value) -> Result<String> {
    serde_yaml::to_string(value).context("Inventory: Failed to render YAML")
}
