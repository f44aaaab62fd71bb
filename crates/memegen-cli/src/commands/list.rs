use anyhow::Result;
use serde::Serialize;

use super::load_table;
use crate::AppContext;
use memegen_core::output::{write_json, OutputFormat};

#[derive(Serialize)]
struct ListEntry<'a> {
    name: &'a str,
    key: &'a str,
    alias: Option<&'a str>,
    declaration: String,
    options: Vec<&'a str>,
    example: &'a str,
}

pub(crate) async fn handle_list(ctx: &AppContext) -> Result<()> {
    let table = load_table(ctx).await?;
    let entries = table
        .commands()
        .iter()
        .map(|command| {
            let spec = command.spec();
            ListEntry {
                name: &spec.name,
                key: &spec.key,
                alias: spec.alias.as_deref(),
                declaration: spec.declaration(),
                options: spec.options.iter().map(|o| o.name.as_str()).collect(),
                example: &spec.example,
            }
        })
        .collect::<Vec<_>>();

    match ctx.format {
        OutputFormat::Json => write_json(&entries)?,
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("no meme commands registered");
            }
            for entry in &entries {
                match entry.alias {
                    Some(alias) => println!("{} (alias: {alias})", entry.name),
                    None => println!("{}", entry.name),
                }
                println!("  usage:   {}", entry.declaration);
                if !entry.options.is_empty() {
                    println!("  options: --{}", entry.options.join(", --"));
                }
                println!("  example: {}", entry.example);
            }
        }
    }
    Ok(())
}
