//! Layered configuration: defaults, then an optional TOML file, then
//! `MTFS_`-prefixed environment variables.

use crate::error::SetupError;
use crate::logging::LoggingConfig;
use crate::types::{self, DEFAULT_CHUNK_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Chunk size in bytes for file hashing
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from the given file (or `mtfs.toml` in the working
    /// directory when none is given) plus environment overrides.
    ///
    /// Nested keys use a double underscore in the environment, e.g.
    /// `MTFS_LOGGING__LEVEL=debug`.
    pub fn load(path: Option<&Path>) -> Result<Settings, SetupError> {
        let mut builder = config::Config::builder()
            .set_default("chunk_size", DEFAULT_CHUNK_SIZE as u64)?;

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path.to_path_buf())),
            None => builder.add_source(config::File::with_name("mtfs").required(false)),
        };

        let settings: Settings = builder
            .add_source(
                config::Environment::with_prefix("MTFS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        types::validate_chunk_size(settings.chunk_size)?;

        Ok(settings)
    }
}
