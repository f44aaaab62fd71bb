use anyhow::{anyhow, Result};
use clap::error::ErrorKind;
use memegen_client::{Reply, Session};
use memegen_core::paths::default_output_dir;

use super::load_table;
use crate::clap_builder::parse_invocation;
use crate::host::TerminalSession;
use crate::{AppContext, RunArgs};

pub(crate) async fn handle_run(ctx: &AppContext, args: RunArgs) -> Result<()> {
    let table = load_table(ctx).await?;
    let command = table
        .find(&args.command)
        .ok_or_else(|| anyhow!("unknown meme command: {}", args.command))?
        .clone();

    let invocation = match parse_invocation(command.spec(), args.args) {
        Ok(invocation) => invocation,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print()?;
            return Ok(());
        }
        Err(err) => return Err(anyhow!(err.render().to_string())),
    };

    let out_dir = args.out_dir.unwrap_or_else(default_output_dir);
    let session = TerminalSession::new(table.clone(), out_dir, command.name());
    if let Some(image) = command
        .invoke(&session, invocation.args, &invocation.options)
        .await
    {
        session.send(Reply::Image(image)).await?;
    }
    Ok(())
}
