//! Import settings loaded from TOML and refined by command-line flags.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use intern_map::ParseOptions;
use intern_reconcile::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MAX_ERROR_DETAILS, ReconcileMode, ReconcileOptions,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_STORE_DIR: &str = "./data";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("chunk_size must be at least 1")]
    ZeroChunkSize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportConfig {
    pub chunk_size: usize,
    pub max_error_details: usize,
    /// Unset means the current calendar year at parse time.
    pub fallback_year: Option<i32>,
    pub store_dir: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_error_details: DEFAULT_MAX_ERROR_DETAILS,
            fallback_year: None,
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
        }
    }
}

/// Flag values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub store_dir: Option<PathBuf>,
    pub chunk_size: Option<usize>,
    pub fallback_year: Option<i32>,
}

impl ImportConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded import config");
        Ok(config)
    }

    /// Loads `path` when given, otherwise the defaults, then applies `overrides`.
    pub fn resolve(path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        base.with_overrides(overrides)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(dir) = overrides.store_dir {
            self.store_dir = dir;
        }
        if let Some(size) = overrides.chunk_size {
            self.chunk_size = size;
        }
        if overrides.fallback_year.is_some() {
            self.fallback_year = overrides.fallback_year;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        Ok(())
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            fallback_year: self.fallback_year,
        }
    }

    pub fn reconcile_options(&self, mode: ReconcileMode) -> ReconcileOptions {
        ReconcileOptions {
            mode,
            chunk_size: self.chunk_size,
            max_error_details: self.max_error_details,
        }
    }
}
