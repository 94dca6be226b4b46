//! Static site build command.

use std::ffi::OsString;
use std::process::ExitStatus;

use anyhow::Result;
use dtinth_runner::GeneratorCommand;

use super::{prepare_config, Context};

/// Run the build command, forwarding `args` to `mkdocs build`.
pub async fn run(ctx: &Context, args: Vec<OsString>) -> Result<ExitStatus> {
    tracing::info!("Building documentation in {}", ctx.cwd.display());

    prepare_config(ctx)?;

    let status = ctx
        .generator()
        .run(&GeneratorCommand::Build { args })
        .await?;

    if status.success() {
        tracing::info!("Build complete");
    }

    Ok(status)
}
