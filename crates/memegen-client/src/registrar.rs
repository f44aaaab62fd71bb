//! Turns configured memes into registered commands.
//!
//! Loading is a fold over the configured memes in order. Under
//! [`LoadPolicy::AbortRemaining`] the first failure stops the fold, so no meme
//! at or after the failing one is registered; memes before it stay registered.

use memegen_core::{CommandSpec, Config, LoadPolicy, MemeConfig, SchemaError};
use std::ops::ControlFlow;
use thiserror::Error;
use tracing::{info, warn};

use crate::client::MemeClient;
use crate::error::ClientError;
use crate::host::{CommandHost, HostError};
use crate::invoker::MemeCommand;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("fetch schema: {0}")]
    Fetch(#[from] ClientError),
    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),
    #[error("register: {0}")]
    Register(#[from] HostError),
}

#[derive(Debug)]
pub struct LoadFailure {
    pub key: String,
    pub error: LoadError,
}

/// Outcome of one registration pass.
#[derive(Debug, Default)]
pub struct Registration {
    pub commands: Vec<MemeCommand>,
    pub failures: Vec<LoadFailure>,
    /// Set when a failure stopped the pass before the end of the list.
    pub aborted: bool,
}

impl Registration {
    /// Folds one meme's load result in and tells the caller whether to go on.
    pub fn record(
        &mut self,
        key: &str,
        result: Result<MemeCommand, LoadError>,
        policy: LoadPolicy,
    ) -> ControlFlow<()> {
        match result {
            Ok(command) => {
                self.commands.push(command);
                ControlFlow::Continue(())
            }
            Err(error) => {
                warn!(key = %key, %error, "meme load failed");
                self.failures.push(LoadFailure {
                    key: key.to_string(),
                    error,
                });
                match policy {
                    LoadPolicy::AbortRemaining => {
                        self.aborted = true;
                        ControlFlow::Break(())
                    }
                    LoadPolicy::SkipFailed => ControlFlow::Continue(()),
                }
            }
        }
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(MemeCommand::name).collect()
    }
}

/// Fetches one meme's schema and derives its command.
pub async fn load_command(
    client: &MemeClient,
    meme: &MemeConfig,
    bot_name: &str,
) -> Result<MemeCommand, LoadError> {
    let info = client.info(&meme.key).await?;
    let spec = CommandSpec::derive(meme, &info.params, bot_name)?;
    Ok(MemeCommand::new(spec, client.clone()))
}

pub async fn load_commands(client: &MemeClient, config: &Config) -> Registration {
    let mut registration = Registration::default();
    for meme in &config.memes {
        let result = load_command(client, meme, &config.name).await;
        if registration
            .record(&meme.key, result, config.on_schema_error)
            .is_break()
        {
            break;
        }
    }
    registration
}

/// Loads every configured meme and registers the resulting commands with
/// `host`, in configuration order. An empty meme list does nothing.
///
/// A command the host refuses counts as a failure of its meme and goes
/// through the same policy as a failed load.
pub async fn register_all<H: CommandHost>(
    client: &MemeClient,
    config: &Config,
    host: &mut H,
) -> Registration {
    let mut registration = Registration::default();
    if config.memes.is_empty() {
        return registration;
    }

    for meme in &config.memes {
        let result = match load_command(client, meme, &config.name).await {
            Ok(command) => host
                .register(command.clone())
                .map(|()| command)
                .map_err(LoadError::from),
            Err(error) => Err(error),
        };
        if registration
            .record(&meme.key, result, config.on_schema_error)
            .is_break()
        {
            break;
        }
    }
    if !registration.aborted {
        info!("{} meme(s) loaded.", registration.commands.len());
    }
    registration
}
