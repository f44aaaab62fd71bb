use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::home_dir;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:2233";
pub const DEFAULT_BOT_NAME: &str = "bot";

/// One configured meme: the key used in the remote API path and the
/// display name exposed as an alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemeConfig {
    pub key: String,
    pub name: String,
}

impl MemeConfig {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

/// What registration does after a meme's schema cannot be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadPolicy {
    /// Stop at the first failure; memes after it are never registered.
    #[default]
    #[serde(rename = "abort")]
    AbortRemaining,
    /// Skip the failed meme and keep going.
    #[serde(rename = "skip")]
    SkipFailed,
}

/// Base URL of the remote meme service, with one trailing slash removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Endpoint(String);

impl Endpoint {
    pub fn new(raw: impl Into<String>) -> Self {
        let mut raw = raw.into();
        if raw.ends_with('/') {
            raw.pop();
        }
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `path` must start with `/`.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl From<String> for Endpoint {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bot persona name, used in usage examples (`@name /meme ...`).
    pub name: String,
    pub endpoint: Endpoint,
    pub memes: Vec<MemeConfig>,
    pub on_schema_error: LoadPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: DEFAULT_BOT_NAME.to_string(),
            endpoint: Endpoint::default(),
            memes: Vec::new(),
            on_schema_error: LoadPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ConfigFile {
    pub name: Option<String>,
    pub endpoint: Option<String>,
    pub memes: Option<Vec<MemeConfig>>,
    pub on_schema_error: Option<LoadPolicy>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_with_path(None)
    }

    /// Merges every default config layer that exists, then `explicit`,
    /// which must exist when given.
    pub fn load_with_path(explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::load_from_paths(&default_config_paths())?;
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(anyhow!("config file not found: {}", path.display()));
            }
            config.merge(load_config_file(path)?);
        }
        Ok(config)
    }

    pub fn load_from_paths(paths: &[PathBuf]) -> Result<Self> {
        let mut config = Config::default();
        for path in paths {
            if path.exists() {
                let file = load_config_file(path)?;
                config.merge(file);
            }
        }
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let parsed: ConfigFile = toml::from_str(content).context("parse config")?;
        let mut config = Config::default();
        config.merge(parsed);
        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Endpoint::new(endpoint);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_meme(mut self, key: impl Into<String>, name: impl Into<String>) -> Self {
        self.memes.push(MemeConfig::new(key, name));
        self
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.on_schema_error = policy;
        self
    }

    fn merge(&mut self, other: ConfigFile) {
        if let Some(name) = other.name {
            self.name = name;
        }
        if let Some(endpoint) = other.endpoint {
            self.endpoint = Endpoint::new(endpoint);
        }
        if let Some(memes) = other.memes {
            self.memes = memes;
        }
        if let Some(policy) = other.on_schema_error {
            self.on_schema_error = policy;
        }
    }
}

fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let parsed: ConfigFile =
        toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))?;
    Ok(parsed)
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(home) = home_dir() {
        paths.push(home.join(".memegen/config.toml"));
        paths.push(home.join(".config/memegen/config.toml"));
    }
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        paths.push(PathBuf::from(xdg).join("memegen/config.toml"));
    }
    paths.push(PathBuf::from("./memegen.toml"));

    if let Ok(custom) = env::var("MEMEGEN_CONFIG_PATH") {
        paths.push(PathBuf::from(custom));
    }
    paths
}
