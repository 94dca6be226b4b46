//! Live preview command.

use std::process::ExitStatus;

use anyhow::Result;
use dtinth_runner::GeneratorCommand;

use super::{prepare_config, Context};

/// Run the serve command.
pub async fn run(ctx: &Context, dev_addr: Option<String>) -> Result<ExitStatus> {
    tracing::info!("Serving documentation from {}", ctx.cwd.display());

    prepare_config(ctx)?;

    let status = ctx
        .generator()
        .run(&GeneratorCommand::Serve { dev_addr })
        .await?;

    Ok(status)
}
