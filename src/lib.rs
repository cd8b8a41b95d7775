#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # realm-export - Group Export Merger
//!
//! realm-export reads the per-group user exports of an identity provider realm
//! (one `<group>.json` file per group), merges them into a single deduplicated
//! user list annotated with group membership, and writes the result to an
//! `.xlsx` workbook with French column labels.
//!
//! ## Architecture
//!
//! - [`users`]: user records, group source loading, and the group-file merger
//! - [`export`]: row projection and workbook writing
//! - [`config`]: configuration file parsing and validation
//! - [`commands`]: the export driver
//! - [`output`]: colored, verbosity-aware status messages
//! - [`utils`]: date formatting and value helpers
//!
//! ## Example Usage
//!
//! ```no_run
//! use realm_export::ExportContext;
//!
//! # fn main() -> anyhow::Result<()> {
//! let ctx = ExportContext::new(realm_export::config::Config::default());
//! let summary = realm_export::commands::export::execute(&ctx)?;
//! println!("{} users written to {}", summary.users, summary.output.display());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Command implementations.
pub mod commands;

/// Configuration parsing, validation, and management.
pub mod config;

/// Row projection and workbook output.
pub mod export;

/// Output formatting for status messages.
pub mod output;

/// User records, group sources, and merging.
pub mod users;

/// Utility functions and helpers.
pub mod utils;

use std::path::PathBuf;

/// Current version of the realm-export binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default directory holding the per-group JSON exports.
pub const DEFAULT_INPUT_DIR: &str = "./groupes";

/// Default extension of group export files.
pub const DEFAULT_EXTENSION: &str = "json";

/// Default output workbook path.
pub const DEFAULT_OUTPUT_FILE: &str = "users_realm_random.xlsx";

/// Default worksheet name.
pub const DEFAULT_SHEET_NAME: &str = "Users";

/// Default configuration file path relative to the home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/realm-export/config.toml";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "REALM_EXPORT_CONFIG";

/// Central context for an export run.
///
/// Holds the resolved configuration (file values with CLI overrides applied)
/// and exposes the effective paths the driver works with.
///
/// # Examples
///
/// ```
/// use realm_export::ExportContext;
/// use realm_export::config::Config;
///
/// let ctx = ExportContext::new(Config::default());
/// assert_eq!(ctx.output_path().to_str(), Some("users_realm_random.xlsx"));
/// ```
#[derive(Debug, Clone)]
pub struct ExportContext {
    /// Resolved configuration settings.
    pub config: config::Config,

    /// Path the configuration was loaded from, if any file was read.
    pub config_path: Option<PathBuf>,
}

impl ExportContext {
    /// Creates a context from an already resolved configuration.
    #[must_use]
    pub const fn new(config: config::Config) -> Self {
        Self {
            config,
            config_path: None,
        }
    }

    /// Creates a context by loading the configuration from `explicit`, the
    /// `REALM_EXPORT_CONFIG` environment variable, or the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named configuration file is missing,
    /// or if any configuration file cannot be read, parsed, or validated.
    pub fn load(explicit: Option<PathBuf>) -> anyhow::Result<Self> {
        let (config, config_path) = config::Config::load_resolved(explicit)?;
        Ok(Self {
            config,
            config_path,
        })
    }

    /// Directory the group export files are read from.
    #[must_use]
    pub fn input_dir(&self) -> &std::path::Path {
        &self.config.input.dir
    }

    /// Path the workbook is written to.
    #[must_use]
    pub fn output_path(&self) -> &std::path::Path {
        &self.config.output.path
    }
}
