//! The `mkdocs.yml` configuration document.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::{Mapping, Value};

/// File name of the MkDocs configuration at the project root.
pub const CONFIG_FILE: &str = "mkdocs.yml";

/// `!!` tags serde_yaml resolves itself. Any other `!!` tag is dropped on load.
const CORE_TAGS: &[&str] = &["str", "int", "float", "bool", "null", "seq", "map"];

static SECONDARY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[\s\[{,])!!([^\s,\[\]{}]+)").expect("Invalid secondary tag regex")
});

/// A loaded MkDocs configuration: an ordered mapping of top-level keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    entries: Mapping,
}

/// Errors that can occur when loading or writing a configuration document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to parse {path}: top level must be a mapping")]
    NotAMapping { path: String },

    #[error("Failed to parse {path}: unsupported tag !!{tag} would be lost on rewrite")]
    UnsupportedTag { path: String, tag: String },

    #[error("Failed to serialize config: {0}")]
    SerializeError(String),

    #[error("Failed to write {path}: {message}")]
    WriteError { path: String, message: String },
}

impl ConfigDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing mapping.
    pub fn from_mapping(entries: Mapping) -> Self {
        Self { entries }
    }

    /// Parse a document from YAML text. `origin` only labels errors.
    ///
    /// Blank text and a bare `null` both yield an empty document.
    pub fn parse(source: &str, origin: &str) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::new());
        }

        if let Some(tag) = unsupported_tag(source) {
            return Err(ConfigError::UnsupportedTag {
                path: origin.to_string(),
                tag,
            });
        }

        let value: Value = serde_yaml::from_str(source).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        match value {
            Value::Null => Ok(Self::new()),
            Value::Mapping(entries) => Ok(Self { entries }),
            _ => Err(ConfigError::NotAMapping {
                path: origin.to_string(),
            }),
        }
    }

    /// Load a document from disk, treating a missing file as empty.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using empty document", path.display());
            return Ok(Self::new());
        }

        let source = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let doc = Self::parse(&source, &path.display().to_string())?;
        tracing::debug!("Loaded {} keys from {}", doc.len(), path.display());
        Ok(doc)
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Set a top-level key, replacing any existing value in place.
    pub fn insert(&mut self, key: &str, value: Value) {
        self.entries.insert(Value::String(key.to_string()), value);
    }

    /// Borrow the underlying mapping.
    pub fn as_mapping(&self) -> &Mapping {
        &self.entries
    }

    /// Consume the document, returning the underlying mapping.
    pub fn into_mapping(self) -> Mapping {
        self.entries
    }

    /// Point `theme.custom_dir` at the theme's override assets.
    ///
    /// A missing `theme` becomes a mapping. The `theme: <name>` shorthand is
    /// expanded to `theme: {name: <name>}` so the chosen theme is kept.
    pub fn set_custom_dir(&mut self, custom_dir: &Path) {
        if self.entries.get("theme").is_none() {
            self.insert("theme", Value::Mapping(Mapping::new()));
        }

        let Some(theme) = self.entries.get_mut("theme") else {
            return;
        };

        let replacement = match &*theme {
            Value::Mapping(_) => None,
            other => Some(Value::Mapping(expand_name_shorthand(other).unwrap_or_else(|| {
                tracing::warn!("Replacing unsupported theme value: {:?}", other);
                Mapping::new()
            }))),
        };
        if let Some(replacement) = replacement {
            *theme = replacement;
        }

        if let Value::Mapping(theme) = theme {
            theme.insert(
                Value::String("custom_dir".to_string()),
                Value::String(custom_dir.display().to_string()),
            );
        }
    }

    /// Render the document as block-style YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(&self.entries)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Write the document to `path`, overwriting whatever is there.
    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = self.to_yaml()?;
        fs::write(path, yaml).map_err(|e| ConfigError::WriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        tracing::info!("Wrote merged config to {}", path.display());
        Ok(())
    }
}

/// A mapping value as-is, or the `<name>` shorthand as `{name: <name>}`.
pub(crate) fn expand_name_shorthand(value: &Value) -> Option<Mapping> {
    match value {
        Value::Mapping(mapping) => Some(mapping.clone()),
        Value::String(name) => {
            let mut expanded = Mapping::new();
            expanded.insert(Value::String("name".to_string()), Value::String(name.clone()));
            Some(expanded)
        }
        _ => None,
    }
}

/// First `!!` tag in `source` that serde_yaml cannot keep. Comments are skipped.
fn unsupported_tag(source: &str) -> Option<String> {
    source.lines().find_map(|line| {
        let code = match line.find(" #") {
            Some(pos) => &line[..pos],
            None if line.trim_start().starts_with('#') => "",
            None => line,
        };

        SECONDARY_TAG_RE
            .captures_iter(code)
            .map(|caps| caps[1].to_string())
            .find(|tag| !CORE_TAGS.contains(&tag.as_str()))
    })
}
