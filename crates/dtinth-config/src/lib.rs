//! Configuration handling for mkdocs-dtinth.
//!
//! Locates the bundled theme, merges its `mkdocs.yml` defaults with the user's
//! `mkdocs.yml`, and writes the effective configuration back for MkDocs to read.

pub mod document;
pub mod merge;
pub mod theme;

pub use document::{ConfigDocument, ConfigError, CONFIG_FILE};
pub use merge::{effective_config, merge_documents, merge_mappings, NESTED_MERGE_KEYS};
pub use theme::{ThemeDir, ThemeLocator};
