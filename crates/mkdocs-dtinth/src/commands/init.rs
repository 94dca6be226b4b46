//! Initialize a documentation project.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use dtinth_config::CONFIG_FILE;
use dtinth_runner::remote_project_name;
use serde::Serialize;

use super::Context;

/// Content directory MkDocs reads pages from.
const DOCS_DIR: &str = "docs";

/// Name used when the target directory has no name of its own (`/`).
const FALLBACK_NAME: &str = "docs";

/// Starter `mkdocs.yml`. Theme settings come from the bundled theme on serve/build.
#[derive(Debug, Serialize)]
struct StarterConfig {
    site_name: String,
    site_url: String,
}

/// What `init` did.
#[derive(Debug, PartialEq)]
pub enum InitOutcome {
    /// Skeleton written into `target`
    Created { target: PathBuf },

    /// Nothing written; a config was already present
    ConfigExists { path: PathBuf },
}

/// Directory to initialize: the parent when run from a checkout of this tool.
pub fn target_dir(cwd: &Path) -> PathBuf {
    let in_checkout =
        cwd.file_name().and_then(|name| name.to_str()) == Some(env!("CARGO_PKG_NAME"));

    match cwd.parent() {
        Some(parent) if in_checkout => parent.to_path_buf(),
        _ => cwd.to_path_buf(),
    }
}

/// Public address for a project name.
fn site_url(name: &str) -> String {
    format!("https://github.com/{}", name)
}

fn directory_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

/// Run the init command.
pub async fn run(ctx: &Context) -> Result<InitOutcome> {
    let target = target_dir(&ctx.cwd);
    let config_path = target.join(CONFIG_FILE);

    if config_path.exists() {
        println!("{} already exists in {}", CONFIG_FILE, target.display());
        return Ok(InitOutcome::ConfigExists { path: config_path });
    }

    tracing::info!("Initializing project in {}", target.display());

    let name = match remote_project_name(&target).await {
        Some(name) => name,
        None => directory_name(&target),
    };

    let starter = StarterConfig {
        site_url: site_url(&name),
        site_name: name,
    };
    let yaml = serde_yaml::to_string(&starter).context("Failed to serialize mkdocs.yml")?;
    fs::write(&config_path, yaml).context("Failed to write mkdocs.yml")?;
    tracing::info!("Created {}", CONFIG_FILE);

    let docs_dir = target.join(DOCS_DIR);
    if !docs_dir.exists() {
        fs::create_dir_all(&docs_dir).context("Failed to create docs directory")?;
    }

    // Never overwrite existing content
    let index_path = docs_dir.join("index.md");
    if !index_path.exists() {
        fs::write(&index_path, DEFAULT_INDEX).context("Failed to write index.md")?;
        tracing::info!("Created docs/index.md");
    }

    tracing::info!("Project initialized in {}", target.display());
    tracing::info!("Run 'mkdocs-dtinth serve' to preview your documentation.");

    Ok(InitOutcome::Created { target })
}

const DEFAULT_INDEX: &str = r#"# Welcome

This is your new documentation site.

Edit this page in `docs/index.md`, then run `mkdocs-dtinth serve` to preview it.
"#;
