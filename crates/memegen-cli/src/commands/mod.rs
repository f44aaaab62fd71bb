use anyhow::Result;
use memegen_client::register_all;
use std::sync::Arc;

use crate::host::CommandTable;
use crate::AppContext;

mod help;
mod list;
mod run;

pub(crate) use help::handle_help;
pub(crate) use list::handle_list;
pub(crate) use run::handle_run;

/// Registers every configured meme into a fresh command table.
pub(crate) async fn load_table(ctx: &AppContext) -> Result<Arc<CommandTable>> {
    let mut table = CommandTable::default();
    register_all(&ctx.client, &ctx.config, &mut table).await;
    Ok(Arc::new(table))
}
