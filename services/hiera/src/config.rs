//! Service configuration from environment variables

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_PORT: u16 = 9080;
const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PORT must be a valid number: {0}")]
    InvalidPort(#[from] ParseIntError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// `PORT`
    pub port: u16,
    /// `NODES_DIR`. When set, nodes are mirrored to one file per node here
    /// and reloaded on startup.
    pub nodes_dir: Option<PathBuf>,
    /// `STATIC_DIR`. Served for any path the API does not handle.
    pub static_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            nodes_dir: None,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(p) => p.trim().parse()?,
            None => defaults.port,
        };
        let nodes_dir = lookup("NODES_DIR")
            .filter(|d| !d.is_empty())
            .map(PathBuf::from);
        let static_dir = lookup("STATIC_DIR")
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        Ok(Self {
            port,
            nodes_dir,
            static_dir,
        })
    }
}
