/// TOML parsing and validation
pub mod parser;

use crate::{
    CONFIG_ENV_VAR, DEFAULT_CONFIG_PATH, DEFAULT_EXTENSION, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_FILE,
    DEFAULT_SHEET_NAME,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings read from `config.toml`; every section is optional
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// `[input]` section
    #[serde(default)]
    pub input: InputConfig,

    /// `[output]` section
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where group export files are read from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InputConfig {
    /// Directory holding the group files
    #[serde(default = "default_input_dir")]
    pub dir: PathBuf,
    /// File extension (without the dot) identifying group files
    #[serde(default = "default_extension")]
    pub extension: String,
}

/// Where and how the workbook is written
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Workbook path
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    /// Worksheet name
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    /// Append the LDAP creation/modification date columns
    #[serde(default)]
    pub ldap_dates: bool,
}

/// Default for `input.dir`
fn default_input_dir() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_DIR)
}

/// Default for `input.extension`
fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

/// Default for `output.path`
fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_FILE)
}

/// Default for `output.sheet_name`
fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            dir: default_input_dir(),
            extension: default_extension(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            sheet_name: default_sheet_name(),
            ldap_dates: false,
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The file contains invalid TOML
    /// - A value fails validation
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }
        parser::parse_config_file(path)
    }

    /// Resolve and load the configuration for a run.
    ///
    /// An explicit path (or `REALM_EXPORT_CONFIG`) must exist. The default
    /// location under the home directory is optional; when it is missing the
    /// built-in defaults are used. Returns the path that was read, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file is missing or if the
    /// selected file cannot be loaded.
    pub fn load_resolved(explicit: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        let explicit = explicit.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
        if let Some(path) = explicit {
            let config = Self::load(&path)?;
            debug!(path = %path.display(), "Loaded explicit configuration");
            return Ok((config, Some(path)));
        }

        match dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_PATH)) {
            Some(path) if path.exists() => {
                let config = Self::load(&path)?;
                debug!(path = %path.display(), "Loaded configuration");
                Ok((config, Some(path)))
            }
            _ => {
                debug!("No configuration file, using defaults");
                Ok((Self::default(), None))
            }
        }
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create config file: {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}
