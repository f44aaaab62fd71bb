use anyhow::Result;

use super::load_table;
use crate::{AppContext, HelpArgs};

pub(crate) async fn handle_help(ctx: &AppContext, args: HelpArgs) -> Result<()> {
    let table = load_table(ctx).await?;
    println!("{}", table.help(&args.command)?);
    Ok(())
}
