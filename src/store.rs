//! Loading and saving the gateway config document.
//!
//! The document is kept as an untyped tree: the gateway owns its schema and
//! this tool must survive (and preserve) sections it knows nothing about.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Default document location (`~/.openclaw/openclaw.json`).
pub fn default_document_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".openclaw").join("openclaw.json")
}

fn empty_document() -> Value {
    Value::Object(Map::new())
}

fn resolve_path(path: Option<&Path>) -> PathBuf {
    match path {
        Some(p) => p.to_path_buf(),
        None => default_document_path(),
    }
}

/// Load the config document.
///
/// A missing file yields an empty document; an unreadable or unparsable one
/// is an error, so editing commands never clobber a file they could not
/// read back.
pub fn load_document(config_path: Option<&Path>) -> Result<Value> {
    let path = resolve_path(config_path);
    if !path.exists() {
        debug!("no config document at {}, starting empty", path.display());
        return Ok(empty_document());
    }
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config document from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config document from {}", path.display()))
}

/// Lenient variant for read-only commands: any failure falls back to an
/// empty document, which resolves as "nothing configured".
pub fn load_document_or_default(config_path: Option<&Path>) -> Value {
    match load_document(config_path) {
        Ok(document) => document,
        Err(e) => {
            warn!("{:#}. Using empty document.", e);
            empty_document()
        }
    }
}

/// Save the config document as pretty-printed JSON.
///
/// Parent directories are created if they don't exist.
pub fn save_document(document: &Value, config_path: Option<&Path>) -> Result<()> {
    let path = resolve_path(config_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(document)
        .context("failed to serialize config document")?;
    fs::write(&path, json)
        .with_context(|| format!("failed to write config document to {}", path.display()))
}
