//! mkdocs-dtinth CLI - MkDocs with a bundled theme.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitCode, ExitStatus};

use anyhow::{Context as _, Result};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use dtinth_config::{ThemeDir, ThemeLocator};

mod commands;

use commands::init::InitOutcome;
use commands::Context;

#[derive(Parser)]
#[command(name = "mkdocs-dtinth")]
#[command(about = "MkDocs with a bundled theme")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Theme directory to use instead of the bundled one
    #[arg(long, env = "MKDOCS_DTINTH_THEME_DIR", value_name = "DIR")]
    theme_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve documentation with the bundled theme
    Serve {
        /// IP address and port to serve on, passed to mkdocs
        #[arg(short = 'a', long, value_name = "ADDR")]
        dev_addr: Option<String>,
    },

    /// Build documentation with the bundled theme
    Build {
        /// Arguments passed through to `mkdocs build`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<OsString>,
    },

    /// Create a new project skeleton
    Init,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let theme = resolve_theme(&cwd, cli.theme_dir)?;
    tracing::debug!("Theme directory: {}", theme.root().display());

    let ctx = Context::new(cwd, theme);

    // Execute command
    let code = match command {
        Commands::Serve { dev_addr } => {
            let status = commands::serve::run(&ctx, dev_addr).await?;
            exit_value(status)
        }
        Commands::Build { args } => {
            let status = commands::build::run(&ctx, args).await?;
            exit_value(status)
        }
        Commands::Init => {
            let outcome = commands::init::run(&ctx).await?;
            init_exit_value(&outcome)
        }
    };

    Ok(ExitCode::from(code))
}

/// Pick the theme: an explicit `--theme-dir`, otherwise the installed one.
fn resolve_theme(cwd: &Path, theme_dir: Option<PathBuf>) -> Result<ThemeDir> {
    if let Some(dir) = theme_dir {
        return Ok(ThemeDir::new(cwd.join(dir)));
    }

    let exe = std::env::current_exe().context("Failed to locate the mkdocs-dtinth executable")?;
    let install_dir = exe.parent().map(Path::to_path_buf).unwrap_or_default();

    Ok(ThemeLocator::new(&install_dir)
        .with_fallback(source_theme_dir())
        .locate())
}

/// Theme directory of the source tree this binary was built from.
fn source_theme_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("theme")
}

/// Process exit code mirroring the generator's. Signals map to 1.
fn exit_value(status: ExitStatus) -> u8 {
    if status.success() {
        return 0;
    }

    status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}

/// Process exit code for `init`. An existing config is a failure.
fn init_exit_value(outcome: &InitOutcome) -> u8 {
    match outcome {
        InitOutcome::Created { .. } => 0,
        InitOutcome::ConfigExists { .. } => 1,
    }
}
