//! Tool configuration.
//!
//! Read from the YAML file named by `CMDFLAG_CONFIG`, or from `cmdflag.yml`
//! in the working directory when that exists. Every key is optional.
//!
//! ```yaml
//! format: json
//! log_filter: cmdflag_core=debug
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::output::OutputFormat;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "CMDFLAG_CONFIG";

/// File looked up in the working directory when `CMDFLAG_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "cmdflag.yml";

/// Errors loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be opened or read.
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File is not valid YAML for [`CliConfig`].
    #[error("invalid config {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// How command results are printed.
    pub format: OutputFormat,
    /// `tracing` filter directives, used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
}

impl CliConfig {
    /// Loads configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the configured file, the default file, or built-in defaults.
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(path);
        }
        let default = Path::new(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            return Self::load(default);
        }
        Ok(Self::default())
    }
}
