use anyhow::Result;
use clap::Parser;
use realm_export::cli::Cli;
use realm_export::output::{self, Verbosity};
use realm_export::{ExportContext, commands};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        output::error(&format!("Error: {e:#}"));
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    output::set_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose));

    let mut ctx = ExportContext::load(cli.config.clone())?;
    cli.apply_to(&mut ctx.config);
    realm_export::config::parser::validate_config(&ctx.config)?;

    if let Some(path) = &ctx.config_path {
        output::verbose(&format!("using config {}", path.display()));
    }

    commands::export::execute(&ctx)?;
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` takes precedence over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}
