//! Subcommand handlers for clawctl.
//!
//! Argument parsing and routing live in main.rs; each handler takes the
//! resolved document location and returns the text to print. All output is
//! plain text so it pipes cleanly.

use std::path::Path;

use anyhow::{bail, Result};
use serde_json::Value;

use clawctl::connections::{
    resolve_openai_connection, Readiness, DEFAULT_OPENAI_MODEL, OPENAI_ENV_KEY_PATH,
    OPENAI_PROVIDER_KEY_PATH, REDACTED_SENTINEL,
};
use clawctl::document::patch::{apply_patch, ConfigPatch};
use clawctl::document::path::ConfigPath;
use clawctl::document::value_at_path;
use clawctl::store::{load_document, load_document_or_default, save_document};

/// Show the resolved OpenAI connection status.
pub fn run_status(config_path: Option<&Path>, json: bool) -> Result<String> {
    let document = load_document_or_default(config_path);
    let details = resolve_openai_connection(&document);

    if json {
        return Ok(serde_json::to_string_pretty(&details)?);
    }

    let headline = match details.readiness() {
        Readiness::Ready => "OpenAI is configured and selected.",
        Readiness::KeyOnly => "OpenAI key is set. Select an openai/* model to activate it.",
        Readiness::Unconfigured => "OpenAI key is missing.",
    };
    let model = if details.model_value.is_empty() {
        "(unset)"
    } else {
        details.model_value.as_str()
    };

    let mut lines = vec![
        headline.to_string(),
        format!("Source: {}", details.source_label()),
        format!("Model: {model}"),
    ];
    if details.key_stored_hidden {
        lines.push("Stored value is hidden in gateway responses.".to_string());
    }
    Ok(lines.join("\n"))
}

/// Print the value at a dotted config path.
pub fn run_get(config_path: Option<&Path>, path: &str) -> Result<String> {
    let path: ConfigPath = path.parse()?;
    let document = load_document_or_default(config_path);
    Ok(match value_at_path(&document, &path) {
        Some(value) => serde_json::to_string_pretty(value)?,
        None => "(absent)".to_string(),
    })
}

/// Set the value at a dotted config path.
pub fn run_set(config_path: Option<&Path>, path: &str, raw: &str) -> Result<String> {
    let path: ConfigPath = path.parse()?;
    let mut document = load_document(config_path)?;
    apply_patch(&mut document, &ConfigPatch::set(path.clone(), parse_value(raw)))?;
    save_document(&document, config_path)?;
    Ok(format!("Set {path}."))
}

/// Remove the value at a dotted config path. Removing an absent value is ok.
pub fn run_unset(config_path: Option<&Path>, path: &str) -> Result<String> {
    let path: ConfigPath = path.parse()?;
    let mut document = load_document(config_path)?;
    apply_patch(&mut document, &ConfigPatch::delete(path.clone()))?;
    save_document(&document, config_path)?;
    Ok(format!("Removed {path}."))
}

/// Store the OpenAI API key in the environment slot (or the provider slot).
pub fn run_set_key(config_path: Option<&Path>, key: &str, provider: bool) -> Result<String> {
    let key = key.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }
    if key == REDACTED_SENTINEL {
        // The sentinel means "secret withheld by the gateway", not a secret.
        bail!("refusing to store the redaction placeholder as an API key");
    }

    let target = if provider {
        &*OPENAI_PROVIDER_KEY_PATH
    } else {
        &*OPENAI_ENV_KEY_PATH
    };
    let mut document = load_document(config_path)?;
    apply_patch(
        &mut document,
        &ConfigPatch::set(target.clone(), Value::String(key.to_string())),
    )?;
    save_document(&document, config_path)?;
    Ok(format!("Stored OpenAI key at {target}."))
}

/// Remove the OpenAI API key from every candidate location.
pub fn run_clear_key(config_path: Option<&Path>) -> Result<String> {
    let mut document = load_document(config_path)?;
    apply_patch(&mut document, &ConfigPatch::delete(OPENAI_ENV_KEY_PATH.clone()))?;
    apply_patch(
        &mut document,
        &ConfigPatch::delete(OPENAI_PROVIDER_KEY_PATH.clone()),
    )?;
    save_document(&document, config_path)?;
    Ok("Cleared OpenAI key.".to_string())
}

/// Select the default model, targeting the correct leaf for the shape the
/// document currently stores (bare string vs structured descriptor).
pub fn run_use_model(config_path: Option<&Path>, model: Option<&str>) -> Result<String> {
    let model = model.unwrap_or(DEFAULT_OPENAI_MODEL).trim();
    if model.is_empty() {
        bail!("model must not be empty");
    }

    let mut document = load_document(config_path)?;
    let details = resolve_openai_connection(&document);
    apply_patch(
        &mut document,
        &ConfigPatch::set(details.model_path.clone(), Value::String(model.to_string())),
    )?;
    save_document(&document, config_path)?;
    Ok(format!("Default model set to {model} at {}.", details.model_path))
}

/// Parse a CLI value as JSON, falling back to a bare string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_set_then_get_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("openclaw.json");

        run_set(Some(&path), "env.OPENAI_API_KEY", "sk-test").unwrap();
        let shown = run_get(Some(&path), "env.OPENAI_API_KEY").unwrap();
        assert_eq!(shown, "\"sk-test\"");
    }

    #[test]
    fn test_get_absent_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("openclaw.json");
        let shown = run_get(Some(&path), "env.OPENAI_API_KEY").unwrap();
        assert_eq!(shown, "(absent)");
    }

    #[test]
    fn test_set_parses_json_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("openclaw.json");

        run_set(Some(&path), "gateway.port", "18789").unwrap();
        run_set(Some(&path), "channels.telegram.enabled", "true").unwrap();

        let doc = load_document(Some(&path)).unwrap();
        assert_eq!(doc["gateway"]["port"], json!(18789));
        assert_eq!(doc["channels"]["telegram"]["enabled"], json!(true));
    }

    #[test]
    fn test_unset_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("openclaw.json");

        run_set(Some(&path), "env.OPENAI_API_KEY", "sk-test").unwrap();
        run_unset(Some(&path), "env.OPENAI_API_KEY").unwrap();
        run_unset(Some(&path), "env.OPENAI_API_KEY").unwrap();
        assert_eq!(run_get(Some(&path), "env.OPENAI_API_KEY").unwrap(), "(absent)");
    }

    #[test]
    fn test_status_reports_ready() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("openclaw.json");

        run_set_key(Some(&path), "sk-test", false).unwrap();
        run_use_model(Some(&path), None).unwrap();

        let status = run_status(Some(&path), false).unwrap();
        assert!(status.contains("OpenAI is configured and selected."));
        assert!(status.contains("Source: env.OPENAI_API_KEY"));
        assert!(status.contains("Model: openai/gpt-5.2"));
    }

    #[test]
    fn test_status_json_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("openclaw.json");

        run_set_key(Some(&path), "sk-test", true).unwrap();
        let out = run_status(Some(&path), true).unwrap();
        let wire: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(wire["keySource"], json!("provider"));
        assert_eq!(wire["keyConfigured"], json!(true));
    }

    #[test]
    fn test_set_key_rejects_sentinel() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("openclaw.json");
        assert!(run_set_key(Some(&path), REDACTED_SENTINEL, false).is_err());
        assert!(run_set_key(Some(&path), "   ", false).is_err());
    }

    #[test]
    fn test_clear_key_removes_both_slots() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("openclaw.json");

        run_set_key(Some(&path), "sk-env", false).unwrap();
        run_set_key(Some(&path), "sk-provider", true).unwrap();
        run_clear_key(Some(&path)).unwrap();

        let status = run_status(Some(&path), false).unwrap();
        assert!(status.contains("OpenAI key is missing."));
    }

    #[test]
    fn test_use_model_follows_structured_shape() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("openclaw.json");

        let doc = json!({
            "agents": {"defaults": {"model": {
                "primary": "anthropic/claude-sonnet",
                "fallbacks": ["anthropic/claude-haiku"],
            }}},
        });
        save_document(&doc, Some(&path)).unwrap();

        run_use_model(Some(&path), Some("openai/gpt-5.2-codex")).unwrap();

        let updated = load_document(Some(&path)).unwrap();
        assert_eq!(
            updated["agents"]["defaults"]["model"]["primary"],
            json!("openai/gpt-5.2-codex")
        );
        // Fallbacks untouched.
        assert_eq!(
            updated["agents"]["defaults"]["model"]["fallbacks"],
            json!(["anthropic/claude-haiku"])
        );
    }

    #[test]
    fn test_set_on_malformed_file_does_not_clobber() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("openclaw.json");
        std::fs::write(&path, "{broken").unwrap();

        assert!(run_set(Some(&path), "env.OPENAI_API_KEY", "sk").is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{broken");
    }
}
