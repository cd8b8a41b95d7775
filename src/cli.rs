//! Command-line interface definitions.
//!
//! Shared by the binary and `xtask` (man page generation).

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// Arguments of the `realm-export` binary.
///
/// Every flag is optional: a bare invocation reads `./groupes` and writes
/// `users_realm_random.xlsx`.
#[derive(Debug, Parser)]
#[command(
    name = "realm-export",
    version = crate::VERSION,
    about = "Merge per-group user exports into one spreadsheet",
    long_about = "Reads every <group>.json user export of a directory, merges users by id \
                  with the list of groups they belong to, and writes an .xlsx workbook"
)]
pub struct Cli {
    /// Directory holding the group export files
    #[arg(short, long, env = "REALM_EXPORT_INPUT")]
    pub input: Option<PathBuf>,

    /// Workbook to write
    #[arg(short, long, env = "REALM_EXPORT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Worksheet name
    #[arg(long)]
    pub sheet: Option<String>,

    /// Add the LDAP creation and modification date columns
    #[arg(long)]
    pub ldap_dates: bool,

    /// Configuration file
    #[arg(short, long, env = "REALM_EXPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show debug logs and verbose messages
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print warnings, errors and the final confirmation
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Overlay the flags that were given onto a loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input.dir.clone_from(input);
        }
        if let Some(output) = &self.output {
            config.output.path.clone_from(output);
        }
        if let Some(sheet) = &self.sheet {
            config.output.sheet_name.clone_from(sheet);
        }
        if self.ldap_dates {
            config.output.ldap_dates = true;
        }
    }
}
