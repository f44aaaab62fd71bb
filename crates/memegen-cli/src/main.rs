use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod clap_builder;
mod commands;
mod host;

use memegen_client::MemeClient;
use memegen_core::config::Config;
use memegen_core::output::OutputFormat;

use commands::{handle_help, handle_list, handle_run};

#[derive(Parser)]
#[command(
    name = "memegen",
    version,
    disable_help_subcommand = true,
    about = "Schema-driven meme commands backed by a remote meme generator"
)]
struct Cli {
    /// Extra config file, merged over the default locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Meme service base URL; overrides the config file.
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Bot name used in usage examples; overrides the config file.
    #[arg(long, global = true)]
    bot_name: Option<String>,

    #[arg(long, global = true)]
    format: Option<String>,

    #[arg(long, global = true, default_value = "60")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

pub(crate) struct AppContext {
    pub(crate) config: Config,
    pub(crate) client: MemeClient,
    pub(crate) format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Register every configured meme and list the resulting commands.
    List,
    /// Show usage for one meme command.
    Help(HelpArgs),
    /// Invoke a meme command by name or alias.
    Run(RunArgs),
}

#[derive(Args)]
pub(crate) struct HelpArgs {
    pub(crate) command: String,
}

#[derive(Args)]
pub(crate) struct RunArgs {
    /// Directory rendered images are written to.
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,

    pub(crate) command: String,

    /// Positional texts/images and `--<option> <value>` flags for the meme.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub(crate) args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let format = resolve_format(cli.format.as_deref())?;
    let mut config = Config::load_with_path(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(name) = cli.bot_name {
        config = config.with_name(name);
    }
    let client = MemeClient::new(build_client(cli.timeout_secs)?, config.endpoint.clone());
    let ctx = AppContext {
        config,
        client,
        format,
    };

    match cli.command {
        Commands::List => handle_list(&ctx).await,
        Commands::Help(args) => handle_help(&ctx, args).await,
        Commands::Run(args) => handle_run(&ctx, args).await,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init();
}

fn resolve_format(flag: Option<&str>) -> Result<OutputFormat> {
    if let Some(fmt) = flag {
        return fmt.parse();
    }
    if env::var("MEMEGEN_AGENT").ok().as_deref() == Some("1") {
        return Ok(OutputFormat::Json);
    }
    Ok(OutputFormat::Text)
}

fn build_client(timeout_secs: u64) -> Result<reqwest::Client> {
    if timeout_secs == 0 {
        return Err(anyhow!("--timeout-secs must be greater than zero"));
    }
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .build()?)
}
