//! Optional JSON configuration file.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use xmldigest_canonical::{C14nMethod, ValidationError};
use xmldigest_source::{SaveOptions, DEFAULT_CAUTION_THRESHOLD};

/// Errors raised while loading configuration or resolving configured values.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config \"{path}\": {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config \"{path}\": {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown canonicalization method \"{key}\": {source}")]
    Method {
        key: String,
        #[source]
        source: ValidationError,
    },
}

/// Settings shared by every command. CLI flags take precedence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Method used when `--method` is absent (name, URI or text).
    pub default_method: Option<String>,
    /// Files longer than this are flagged by `info`.
    pub caution_threshold_bytes: u64,
    /// fsync saved files.
    pub sync_writes: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_method: None,
            caution_threshold_bytes: DEFAULT_CAUTION_THRESHOLD,
            sync_writes: false,
        }
    }
}

impl CliConfig {
    /// Loads `path`, or returns defaults when no file was given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Resolves the method from the flag, then the config file, then `NONE`.
    pub fn method(&self, flag: Option<&str>) -> Result<C14nMethod, ConfigError> {
        match flag.or(self.default_method.as_deref()) {
            Some(key) => C14nMethod::resolve(key).map_err(|source| ConfigError::Method {
                key: key.to_string(),
                source,
            }),
            None => Ok(C14nMethod::None),
        }
    }

    pub fn save_options(&self) -> SaveOptions {
        SaveOptions {
            sync: self.sync_writes,
            ..SaveOptions::default()
        }
    }
}
