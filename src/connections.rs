//! OpenAI connection resolution over the gateway config document.
//!
//! The credential can live in several places; resolution reads the fixed
//! candidate paths in priority order and projects them into a
//! [`ConnectionDetails`] snapshot for front ends to render. Resolution is a
//! pure function of the document: no I/O, no caching, and no errors. A
//! malformed document resolves to "nothing configured".

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;

use crate::document::path::ConfigPath;
use crate::document::{string_at_path, value_at_path};

/// Placeholder the gateway substitutes for secret values in config reads.
///
/// A candidate equal to this proves a secret exists server-side even though
/// its plaintext is withheld; it must never be written back as a literal key.
pub const REDACTED_SENTINEL: &str = "__OPENCLAW_REDACTED__";

/// Model written by `use-model` when none is given.
pub const DEFAULT_OPENAI_MODEL: &str = "openai/gpt-5.2";

/// Credential in the gateway process environment table.
pub static OPENAI_ENV_KEY_PATH: Lazy<ConfigPath> =
    Lazy::new(|| ConfigPath::from_keys(["env", "OPENAI_API_KEY"]));

/// Credential in the provider config block.
pub static OPENAI_PROVIDER_KEY_PATH: Lazy<ConfigPath> =
    Lazy::new(|| ConfigPath::from_keys(["models", "providers", "openai", "apiKey"]));

/// Default model selector (bare form).
pub static DEFAULT_MODEL_PATH: Lazy<ConfigPath> =
    Lazy::new(|| ConfigPath::from_keys(["agents", "defaults", "model"]));

/// Default model selector, `primary` field of the structured form.
pub static DEFAULT_MODEL_PRIMARY_PATH: Lazy<ConfigPath> =
    Lazy::new(|| DEFAULT_MODEL_PATH.child("primary"));

/// Which candidate path supplied the configured credential.
///
/// The environment slot strictly dominates the provider slot, matching the
/// runtime's own lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeySource {
    Env,
    Provider,
    None,
}

/// Shape of the `agents.defaults.model` node.
///
/// The selector is stored either as a bare identifier string or as a
/// structured descriptor with a `primary` field and fallbacks. Both are
/// edited as a single scalar, so each shape maps to the leaf a write must
/// target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSlot {
    /// Scalar or absent node; writes target `agents.defaults.model`.
    Bare(Option<String>),
    /// Mapping node; writes target `agents.defaults.model.primary`.
    Structured { primary: Option<String> },
}

impl ModelSlot {
    pub fn classify(node: Option<&Value>) -> Self {
        match node {
            Some(Value::Object(map)) => Self::Structured {
                primary: map.get("primary").and_then(Value::as_str).map(str::to_owned),
            },
            Some(Value::String(model)) => Self::Bare(Some(model.clone())),
            _ => Self::Bare(None),
        }
    }

    /// The leaf a "default model" write must target for this shape.
    pub fn write_path(&self) -> ConfigPath {
        match self {
            Self::Bare(_) => DEFAULT_MODEL_PATH.clone(),
            Self::Structured { .. } => DEFAULT_MODEL_PRIMARY_PATH.clone(),
        }
    }

    fn value(&self) -> &str {
        match self {
            Self::Bare(model) => model.as_deref().unwrap_or(""),
            Self::Structured { primary } => primary.as_deref().unwrap_or(""),
        }
    }
}

/// Coarse connection status for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Readiness {
    /// Key configured and an `openai/*` model selected.
    Ready,
    /// Key configured but a non-OpenAI model selected.
    KeyOnly,
    Unconfigured,
}

/// Read-only projection of the OpenAI credential and model selection.
///
/// Recomputed from a document snapshot on every resolution; field names
/// serialize to the dashboard's camelCase wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetails {
    /// A non-empty credential string exists at some candidate path.
    pub key_configured: bool,
    /// Some candidate holds the redaction sentinel. Independent of
    /// `key_configured`: a sentinel still counts as configured.
    pub key_stored_hidden: bool,
    /// Raw value at the environment candidate only; empty if absent or
    /// non-string. The provider slot is never surfaced here.
    pub key_value: String,
    pub key_source: KeySource,
    /// Resolved default-model identifier, trimmed.
    pub model_value: String,
    /// The exact leaf a "default model" write must target.
    pub model_path: ConfigPath,
}

impl ConnectionDetails {
    pub fn readiness(&self) -> Readiness {
        let openai_model = self.model_value.to_lowercase().starts_with("openai/");
        if self.key_configured && openai_model {
            Readiness::Ready
        } else if self.key_configured {
            Readiness::KeyOnly
        } else {
            Readiness::Unconfigured
        }
    }

    /// Dotted form of the winning candidate path, for status output.
    pub fn source_label(&self) -> String {
        match self.key_source {
            KeySource::Env => OPENAI_ENV_KEY_PATH.to_string(),
            KeySource::Provider => OPENAI_PROVIDER_KEY_PATH.to_string(),
            KeySource::None => "not configured".to_string(),
        }
    }
}

/// A candidate is configured iff it is a string whose trimmed form is
/// non-empty. The sentinel therefore counts as configured.
fn is_configured_secret(value: Option<&str>) -> bool {
    value.map_or(false, |s| !s.trim().is_empty())
}

fn is_stored_hidden(value: Option<&str>) -> bool {
    value.map_or(false, |s| s.trim() == REDACTED_SENTINEL)
}

/// Resolve the OpenAI connection details from a config document snapshot.
pub fn resolve_openai_connection(document: &Value) -> ConnectionDetails {
    let env_key = string_at_path(document, &OPENAI_ENV_KEY_PATH);
    let provider_key = string_at_path(document, &OPENAI_PROVIDER_KEY_PATH);

    let env_configured = is_configured_secret(env_key);
    let provider_configured = is_configured_secret(provider_key);
    let key_source = if env_configured {
        KeySource::Env
    } else if provider_configured {
        KeySource::Provider
    } else {
        KeySource::None
    };

    let model = ModelSlot::classify(value_at_path(document, &DEFAULT_MODEL_PATH));

    ConnectionDetails {
        key_configured: env_configured || provider_configured,
        key_stored_hidden: is_stored_hidden(env_key) || is_stored_hidden(provider_key),
        key_value: env_key.unwrap_or("").to_string(),
        key_source,
        model_value: model.value().trim().to_string(),
        model_path: model.write_path(),
    }
}
