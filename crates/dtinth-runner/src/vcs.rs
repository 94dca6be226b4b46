//! Reading project names from git remotes.

use std::io;
use std::path::Path;

use tokio::process::Command;

/// Errors from looking up a git remote. All of them are expected in practice.
#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    #[error("git is not installed")]
    NotInstalled,

    #[error("Failed to run git: {0}")]
    SpawnError(String),

    #[error("No origin remote: {0}")]
    NoRemote(String),
}

/// Read the URL of the `origin` remote for the repository containing `dir`.
pub async fn origin_url(dir: &Path) -> Result<String, VcsError> {
    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .current_dir(dir)
        .output()
        .await
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => VcsError::NotInstalled,
            _ => VcsError::SpawnError(e.to_string()),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VcsError::NoRemote(stderr.trim().to_string()));
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if url.is_empty() {
        return Err(VcsError::NoRemote("empty URL".to_string()));
    }

    Ok(url)
}

/// Derive an `owner/repo` style name from a remote URL.
///
/// Understands `https://host/path.git` and `user@host:path.git`; anything else
/// yields `None`.
pub fn project_name_from_remote(url: &str) -> Option<String> {
    let url = url.trim();

    let path = if let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    {
        rest.split_once('/')?.1
    } else if url.contains("://") {
        return None;
    } else {
        url.split_once(':')?.1
    };

    let path = path.trim_end_matches('/');
    let name = path.strip_suffix(".git").unwrap_or(path);

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Project name from the `origin` remote of `dir`, if there is a usable one.
pub async fn remote_project_name(dir: &Path) -> Option<String> {
    match origin_url(dir).await {
        Ok(url) => {
            let name = project_name_from_remote(&url);
            if name.is_none() {
                tracing::debug!("Unrecognized remote URL: {}", url);
            }
            name
        }
        Err(e) => {
            tracing::debug!("No project name from git: {}", e);
            None
        }
    }
}
