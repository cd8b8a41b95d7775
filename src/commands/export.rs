use crate::ExportContext;
use crate::export::{Column, project_all, workbook};
use crate::output;
use crate::users::{merge, source};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Counts reported after a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Group files read
    pub groups: usize,
    /// User entries across all files, duplicates included
    pub records: usize,
    /// Distinct users written
    pub users: usize,
    /// Workbook path
    pub output: PathBuf,
}

/// Read every group file, merge, and write the workbook
///
/// # Errors
///
/// Returns an error if:
/// - The input directory cannot be listed
/// - A group file cannot be read or decoded
/// - A user entry has no string `id`
/// - The workbook cannot be written
pub fn execute(ctx: &ExportContext) -> Result<ExportSummary> {
    let config = &ctx.config;
    let input_dir = ctx.input_dir();

    let files = source::list_group_files(input_dir, &config.input.extension)?;
    if files.is_empty() {
        output::warning(&format!(
            "No .{} group files found in {}",
            config.input.extension,
            input_dir.display()
        ));
    }

    let mut sources = Vec::with_capacity(files.len());
    for path in &files {
        output::verbose(&format!("reading {}", path.display()));
        sources.push(source::load_group_file(path)?);
    }
    let records: usize = sources.iter().map(|s| s.users.len()).sum();

    let merged = merge::merge_groups(&sources).context("Failed to merge group files")?;
    debug!(groups = sources.len(), records, users = merged.len(), "Merge complete");

    let rows = project_all(&merged);
    let columns = Column::selection(config.output.ldap_dates);
    workbook::write_workbook(
        ctx.output_path(),
        &config.output.sheet_name,
        columns,
        &rows,
    )?;

    output::action(
        "Merged",
        &format!(
            "{} users from {} groups ({records} entries)",
            merged.len(),
            sources.len()
        ),
    );
    info!(output = %ctx.output_path().display(), users = merged.len(), "Export finished");
    super::print_generated(ctx.output_path());

    Ok(ExportSummary {
        groups: sources.len(),
        records,
        users: merged.len(),
        output: ctx.output_path().to_path_buf(),
    })
}
