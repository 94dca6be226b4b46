//! Merging theme defaults with the user's configuration.
//!
//! Merge semantics:
//! - Top-level keys: user value replaces the theme value
//! - Keys listed in `nested_keys` holding mappings on the user side: merged one
//!   level deep, user wins per nested key
//! - A `<name>` string base for a nested key counts as `{name: <name>}`; any
//!   other missing or non-mapping base counts as an empty mapping

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::document::{expand_name_shorthand, ConfigDocument, ConfigError};

/// Top-level keys whose mapping values are merged key-by-key instead of replaced.
pub const NESTED_MERGE_KEYS: &[&str] = &["theme"];

/// Layer `overlay` on top of `base`.
///
/// Base keys keep their position; keys only present in `overlay` are appended
/// in overlay order.
pub fn merge_mappings(mut base: Mapping, overlay: Mapping, nested_keys: &[&str]) -> Mapping {
    for (key, overlay_value) in overlay {
        let nested = key
            .as_str()
            .is_some_and(|name| nested_keys.contains(&name));

        let merged = match overlay_value {
            Value::Mapping(overlay_map) if nested => {
                let base_map = base
                    .get(&key)
                    .and_then(expand_name_shorthand)
                    .unwrap_or_else(Mapping::new);
                Value::Mapping(merge_mappings(base_map, overlay_map, &[]))
            }
            other => other,
        };

        base.insert(key, merged);
    }

    base
}

/// Merge theme defaults with the user's document using [`NESTED_MERGE_KEYS`].
pub fn merge_documents(theme_defaults: ConfigDocument, user: ConfigDocument) -> ConfigDocument {
    ConfigDocument::from_mapping(merge_mappings(
        theme_defaults.into_mapping(),
        user.into_mapping(),
        NESTED_MERGE_KEYS,
    ))
}

/// Build the effective configuration from the files on disk.
///
/// Either file may be missing; if both are, the result is empty.
pub fn effective_config(
    user_path: &Path,
    theme_defaults_path: &Path,
) -> Result<ConfigDocument, ConfigError> {
    let theme_defaults = ConfigDocument::load_or_default(theme_defaults_path)?;
    if theme_defaults.is_empty() {
        tracing::debug!(
            "No theme defaults found at {}",
            theme_defaults_path.display()
        );
    }

    let user = ConfigDocument::load_or_default(user_path)?;

    Ok(merge_documents(theme_defaults, user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn doc(yaml: &str) -> ConfigDocument {
        ConfigDocument::parse(yaml, "test").unwrap()
    }

    #[test]
    fn user_overrides_top_level_keys() {
        let merged = merge_documents(
            doc("site_name: Theme\nrepo_url: https://example.com\n"),
            doc("site_name: Mine\nedit_uri: edit/main/docs/\n"),
        );

        assert_eq!(
            merged,
            doc("site_name: Mine\nrepo_url: https://example.com\nedit_uri: edit/main/docs/\n")
        );
    }

    #[test]
    fn theme_key_merges_per_nested_key() {
        let merged = merge_documents(
            doc("theme:\n  name: material\n  language: en\n  palette:\n    primary: indigo\n"),
            doc("theme:\n  language: th\n  palette:\n    accent: red\n"),
        );

        // Nested values below `theme` are replaced whole, not merged again.
        assert_eq!(
            merged,
            doc("theme:\n  name: material\n  language: th\n  palette:\n    accent: red\n")
        );
    }

    #[test]
    fn other_nested_mappings_are_replaced_whole() {
        let merged = merge_documents(
            doc("extra:\n  analytics: true\n  social: []\n"),
            doc("extra:\n  version: 2\n"),
        );

        assert_eq!(merged, doc("extra:\n  version: 2\n"));
    }

    #[test]
    fn missing_theme_in_base_is_treated_as_empty() {
        let merged = merge_documents(doc("site_name: Theme\n"), doc("theme:\n  language: th\n"));

        assert_eq!(merged, doc("site_name: Theme\ntheme:\n  language: th\n"));
    }

    #[test]
    fn theme_name_shorthand_in_base_keeps_name() {
        let merged = merge_documents(doc("theme: material\n"), doc("theme:\n  language: th\n"));

        assert_eq!(merged, doc("theme:\n  name: material\n  language: th\n"));
    }

    #[test]
    fn non_string_scalar_theme_in_base_is_treated_as_empty() {
        let merged = merge_documents(doc("theme: 3\n"), doc("theme:\n  language: th\n"));

        assert_eq!(merged, doc("theme:\n  language: th\n"));
    }

    #[test]
    fn scalar_user_theme_replaces_base_mapping() {
        let merged = merge_documents(
            doc("theme:\n  name: material\n  language: en\n"),
            doc("theme: readthedocs\n"),
        );

        assert_eq!(merged, doc("theme: readthedocs\n"));
    }

    #[test]
    fn keeps_base_key_order_and_appends_new_keys() {
        let merged = merge_documents(
            doc("site_name: Theme\ntheme:\n  name: material\nmarkdown_extensions:\n  - toc\n"),
            doc("nav:\n  - index.md\nsite_name: Mine\n"),
        );

        let keys: Vec<&str> = merged
            .as_mapping()
            .keys()
            .filter_map(|k| k.as_str())
            .collect();
        assert_eq!(keys, vec!["site_name", "theme", "markdown_extensions", "nav"]);
    }

    #[test]
    fn allow_list_controls_nested_merge() {
        let base = doc("extra:\n  a: 1\n").into_mapping();
        let overlay = doc("extra:\n  b: 2\n").into_mapping();

        let merged = merge_mappings(base, overlay, &["extra"]);

        assert_eq!(ConfigDocument::from_mapping(merged), doc("extra:\n  a: 1\n  b: 2\n"));
    }

    #[test]
    fn both_files_missing_yields_empty_config() {
        let temp = tempdir().unwrap();

        let config = effective_config(
            &temp.path().join("mkdocs.yml"),
            &temp.path().join("theme/mkdocs.yml"),
        )
        .unwrap();

        assert!(config.is_empty());
    }

    #[test]
    fn theme_defaults_alone_are_reproduced() {
        let temp = tempdir().unwrap();
        let theme_yml = temp.path().join("theme.yml");
        let defaults = "theme:\n  name: material\nmarkdown_extensions:\n  - admonition\n";
        fs::write(&theme_yml, defaults).unwrap();

        let config = effective_config(&temp.path().join("mkdocs.yml"), &theme_yml).unwrap();

        assert_eq!(config, doc(defaults));
    }

    #[test]
    fn user_config_alone_is_reproduced() {
        let temp = tempdir().unwrap();
        let user_yml = temp.path().join("mkdocs.yml");
        fs::write(&user_yml, "site_name: Mine\ntheme:\n  language: th\n").unwrap();

        let config = effective_config(&user_yml, &temp.path().join("missing.yml")).unwrap();

        assert_eq!(config, doc("site_name: Mine\ntheme:\n  language: th\n"));
    }

    #[test]
    fn malformed_user_config_is_an_error() {
        let temp = tempdir().unwrap();
        let user_yml = temp.path().join("mkdocs.yml");
        fs::write(&user_yml, "site_name: [oops\n").unwrap();

        let result = effective_config(&user_yml, &temp.path().join("missing.yml"));

        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}
