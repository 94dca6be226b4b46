//! Locating the bundled theme.

use std::path::{Path, PathBuf};

/// Fixed location of a development checkout of this tool.
pub const DEV_CHECKOUT: &str = "/config/mkdocs-dtinth";

/// File that marks a directory as a checkout of this project.
const DEV_MARKER: &str = "Cargo.toml";

/// Directory name of the theme, both in a checkout and next to the binary.
const THEME_DIR_NAME: &str = "theme";

/// A theme directory: `mkdocs.yml` defaults plus an `overrides/` tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDir {
    root: PathBuf,
}

impl ThemeDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The theme's default `mkdocs.yml`.
    pub fn defaults_path(&self) -> PathBuf {
        self.root.join("mkdocs.yml")
    }

    /// Template and asset overrides, used as MkDocs' `theme.custom_dir`.
    pub fn overrides_dir(&self) -> PathBuf {
        self.root.join("overrides")
    }
}

/// Finds the theme directory for an installation.
///
/// A development checkout wins over the packaged theme so the theme can be
/// edited without reinstalling.
#[derive(Debug, Clone)]
pub struct ThemeLocator {
    /// Packaged locations, in order of preference
    packaged: Vec<PathBuf>,

    /// Development checkout, if one should be considered
    dev_checkout: Option<PathBuf>,
}

impl ThemeLocator {
    /// Create a locator for a binary installed in `install_dir`.
    pub fn new(install_dir: &Path) -> Self {
        Self {
            packaged: vec![
                install_dir.join(THEME_DIR_NAME),
                install_dir
                    .join("..")
                    .join("share")
                    .join("mkdocs-dtinth")
                    .join(THEME_DIR_NAME),
            ],
            dev_checkout: Some(PathBuf::from(DEV_CHECKOUT)),
        }
    }

    /// Use a different development checkout location, or none.
    pub fn with_dev_checkout(mut self, checkout: Option<PathBuf>) -> Self {
        self.dev_checkout = checkout;
        self
    }

    /// Add a packaged location to try after the standard ones.
    pub fn with_fallback(mut self, theme_dir: impl Into<PathBuf>) -> Self {
        self.packaged.push(theme_dir.into());
        self
    }

    /// Resolve the theme directory. Never fails; a missing theme shows up later
    /// as missing defaults.
    pub fn locate(&self) -> ThemeDir {
        if let Some(theme) = self.dev_theme() {
            tracing::debug!("Using theme from development checkout {}", theme.display());
            return ThemeDir::new(theme);
        }

        let found = self.packaged.iter().find(|dir| dir.is_dir());
        match found.or_else(|| self.packaged.first()) {
            Some(dir) => {
                tracing::debug!("Using packaged theme {}", dir.display());
                ThemeDir::new(dir.clone())
            }
            None => ThemeDir::new(THEME_DIR_NAME),
        }
    }

    fn dev_theme(&self) -> Option<PathBuf> {
        let checkout = self.dev_checkout.as_ref()?;
        let theme = checkout.join(THEME_DIR_NAME);

        if checkout.join(DEV_MARKER).exists() && theme.is_dir() {
            Some(theme)
        } else {
            None
        }
    }
}
