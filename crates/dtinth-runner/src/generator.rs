//! Launching the MkDocs executable.

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use tokio::process::Command;

/// Executable invoked when no other program is configured.
pub const DEFAULT_PROGRAM: &str = "mkdocs";

/// A generator subcommand and the arguments forwarded to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorCommand {
    /// Live preview; only the bind address is forwarded
    Serve { dev_addr: Option<String> },

    /// Static build; every argument is forwarded verbatim
    Build { args: Vec<OsString> },
}

impl GeneratorCommand {
    /// Full argument list, subcommand first.
    pub fn args(&self) -> Vec<OsString> {
        match self {
            Self::Serve { dev_addr } => {
                let mut args = vec![OsString::from("serve")];
                if let Some(addr) = dev_addr {
                    args.push(OsString::from("--dev-addr"));
                    args.push(OsString::from(addr));
                }
                args
            }
            Self::Build { args: forwarded } => {
                let mut args = vec![OsString::from("build")];
                args.extend(forwarded.iter().cloned());
                args
            }
        }
    }
}

/// Errors that can occur when running the generator.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Failed to launch {program}: not found on PATH")]
    NotFound { program: String },

    #[error("Failed to launch {program}: {message}")]
    SpawnError { program: String, message: String },

    #[error("Failed waiting for {program}: {message}")]
    WaitError { program: String, message: String },
}

/// Runs the external documentation generator in a project directory.
#[derive(Debug, Clone)]
pub struct Generator {
    program: OsString,
    working_dir: PathBuf,
}

impl Generator {
    /// Create a launcher for `mkdocs` running in `working_dir`.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: OsString::from(DEFAULT_PROGRAM),
            working_dir: working_dir.into(),
        }
    }

    /// Run a different executable instead of `mkdocs`.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Run the generator and wait for it to exit.
    ///
    /// Ctrl-C reaches the child through the terminal; the wrapper keeps waiting
    /// so the child's own exit status is returned.
    pub async fn run(&self, command: &GeneratorCommand) -> Result<ExitStatus, LaunchError> {
        let program = self.program.to_string_lossy().into_owned();
        let args = command.args();

        tracing::info!(
            "Running {} {}",
            program,
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let mut child = Command::new(&self.program)
            .args(&args)
            .current_dir(&self.working_dir)
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => LaunchError::NotFound {
                    program: program.clone(),
                },
                _ => LaunchError::SpawnError {
                    program: program.clone(),
                    message: e.to_string(),
                },
            })?;

        let status = tokio::select! {
            status = child.wait() => status,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, waiting for {} to exit", program);
                child.wait().await
            }
        }
        .map_err(|e| LaunchError::WaitError {
            program: program.clone(),
            message: e.to_string(),
        })?;

        if status.success() {
            tracing::debug!("{} exited successfully", program);
        } else {
            tracing::error!("{} exited with {}", program, status);
        }

        Ok(status)
    }
}
