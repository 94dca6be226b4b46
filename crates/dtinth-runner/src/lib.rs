//! External processes used by mkdocs-dtinth.
//!
//! Launches the MkDocs executable with forwarded arguments and reads the
//! `origin` remote from git to name new projects.

pub mod generator;
pub mod vcs;

pub use generator::{Generator, GeneratorCommand, LaunchError, DEFAULT_PROGRAM};
pub use vcs::{origin_url, project_name_from_remote, remote_project_name, VcsError};
