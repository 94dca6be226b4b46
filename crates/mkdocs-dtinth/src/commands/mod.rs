//! Subcommand implementations.

pub mod build;
pub mod init;
pub mod serve;

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use dtinth_config::{effective_config, ThemeDir, CONFIG_FILE};
use dtinth_runner::{Generator, DEFAULT_PROGRAM};

/// Everything a command needs to know about where it runs.
#[derive(Debug, Clone)]
pub struct Context {
    /// Project directory holding `mkdocs.yml`
    pub cwd: PathBuf,

    /// Theme providing defaults and overrides
    pub theme: ThemeDir,

    /// Generator executable
    program: OsString,
}

impl Context {
    pub fn new(cwd: PathBuf, theme: ThemeDir) -> Self {
        Self {
            cwd,
            theme,
            program: OsString::from(DEFAULT_PROGRAM),
        }
    }

    #[cfg(test)]
    pub fn with_program(mut self, program: &str) -> Self {
        self.program = OsString::from(program);
        self
    }

    /// The project's `mkdocs.yml`.
    pub fn config_path(&self) -> PathBuf {
        self.cwd.join(CONFIG_FILE)
    }

    /// Launcher for the generator in the project directory.
    pub fn generator(&self) -> Generator {
        Generator::new(&self.cwd).with_program(self.program.clone())
    }
}

/// Merge the theme defaults into the project's `mkdocs.yml` and point
/// `theme.custom_dir` at the theme overrides.
pub fn prepare_config(ctx: &Context) -> Result<PathBuf> {
    let config_path = ctx.config_path();
    let defaults_path = ctx.theme.defaults_path();

    if !defaults_path.exists() {
        tracing::warn!("Theme defaults not found at {}", defaults_path.display());
    }

    let mut config =
        effective_config(&config_path, &defaults_path).context("Failed to merge configuration")?;
    config.set_custom_dir(&ctx.theme.overrides_dir());
    config
        .write(&config_path)
        .context("Failed to write merged configuration")?;

    Ok(config_path)
}


#[cfg(test)]
mod tests {
    use super::test_support::project;
    use super::*;
    use dtinth_config::ConfigDocument;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn writes_merged_config_with_custom_dir() {
        let temp = tempdir().unwrap();
        let ctx = project(
            temp.path(),
            "site_name: Theme\ntheme:\n  name: material\n  language: en\n",
        );
        fs::write(
            ctx.config_path(),
            "site_name: Mine\ntheme:\n  language: th\n",
        )
        .unwrap();

        let written = prepare_config(&ctx).unwrap();

        let overrides = temp.path().join("theme/overrides");
        let expected = ConfigDocument::parse(
            &format!(
                "site_name: Mine\ntheme:\n  name: material\n  language: th\n  custom_dir: {}\n",
                overrides.display()
            ),
            "expected",
        )
        .unwrap();
        assert_eq!(written, ctx.config_path());
        assert_eq!(ConfigDocument::load_or_default(&written).unwrap(), expected);
    }

    #[test]
    fn theme_defaults_alone_gain_custom_dir() {
        let temp = tempdir().unwrap();
        let ctx = project(temp.path(), "theme:\n  name: material\n");

        prepare_config(&ctx).unwrap();

        let written = ConfigDocument::load_or_default(&ctx.config_path()).unwrap();
        let expected = ConfigDocument::parse(
            &format!(
                "theme:\n  name: material\n  custom_dir: {}\n",
                ctx.theme.overrides_dir().display()
            ),
            "expected",
        )
        .unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn repeated_runs_are_idempotent() {
        let temp = tempdir().unwrap();
        let ctx = project(temp.path(), "theme:\n  name: material\n");
        fs::write(ctx.config_path(), "site_name: Mine\n").unwrap();

        prepare_config(&ctx).unwrap();
        let first = fs::read_to_string(ctx.config_path()).unwrap();
        prepare_config(&ctx).unwrap();
        let second = fs::read_to_string(ctx.config_path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn missing_theme_still_writes_custom_dir() {
        let temp = tempdir().unwrap();
        let cwd = temp.path().to_path_buf();
        let ctx = Context::new(cwd, ThemeDir::new(temp.path().join("no-theme")));

        prepare_config(&ctx).unwrap();

        let written = ConfigDocument::load_or_default(&ctx.config_path()).unwrap();
        assert_eq!(written.len(), 1);
        assert!(written.get("theme").is_some());
    }

    #[test]
    fn python_tags_stop_the_rewrite() {
        let temp = tempdir().unwrap();
        let ctx = project(temp.path(), "theme:\n  name: material\n");
        let source = concat!(
            "markdown_extensions:\n",
            "  - pymdownx.emoji:\n",
            "      emoji_index: !!python/name:material.extensions.emoji.twemoji\n",
        );
        fs::write(ctx.config_path(), source).unwrap();

        let err = prepare_config(&ctx).unwrap_err();

        assert!(format!("{:#}", err).contains("!!python/name"));
        assert_eq!(fs::read_to_string(ctx.config_path()).unwrap(), source);
    }

    #[test]
    fn malformed_user_config_is_reported() {
        let temp = tempdir().unwrap();
        let ctx = project(temp.path(), "theme:\n  name: material\n");
        fs::write(ctx.config_path(), "nav: [broken\n").unwrap();

        let err = prepare_config(&ctx).unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to parse"));
        // The user's file is left as it was
        assert_eq!(
            fs::read_to_string(ctx.config_path()).unwrap(),
            "nav: [broken\n"
        );
    }
}
