use super::{CellValue, Column, OutputRow};
use crate::config::parser::validate_sheet_name;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, NamedTempFile};
use tracing::{Level, debug, span};

/// Render rows as an in-memory `.xlsx` file with one worksheet.
///
/// Row 0 holds the column labels; each output row follows in order.
///
/// # Errors
///
/// Returns an error if the sheet name is invalid, the row count exceeds the
/// worksheet limits, or the workbook cannot be serialized.
pub fn render_workbook(
    sheet_name: &str,
    columns: &[Column],
    rows: &[OutputRow],
) -> Result<Vec<u8>> {
    validate_sheet_name(sheet_name)?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .with_context(|| format!("Invalid worksheet name: {sheet_name}"))?;

    for (col, column) in columns.iter().enumerate() {
        worksheet.write_string(0, column_index(col)?, column.label())?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_num = u32::try_from(index + 1).context("Too many rows for one worksheet")?;
        for (col, column) in columns.iter().enumerate() {
            write_cell(worksheet, row_num, column_index(col)?, &row.cell(*column))?;
        }
    }

    workbook
        .save_to_buffer()
        .context("Failed to serialize workbook")
}

/// Write rows to `path` as a single-sheet workbook.
///
/// The file is rendered in memory and, through a temporary file in the same
/// directory, renamed into place. On error the target path is untouched.
///
/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written.
pub fn write_workbook(
    path: &Path,
    sheet_name: &str,
    columns: &[Column],
    rows: &[OutputRow],
) -> Result<()> {
    let span = span!(Level::DEBUG, "write_workbook", path = %path.display());
    let _guard = span.enter();

    let bytes = render_workbook(sheet_name, columns, rows)?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut temp = create_temp_file(dir, path)?;
    temp.write_all(&bytes)
        .context("Failed to write workbook contents")?;
    temp.as_file()
        .sync_all()
        .context("Failed to flush workbook contents")?;
    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write workbook: {}", path.display()))?;

    debug!(rows = rows.len(), bytes = bytes.len(), "Workbook written");
    Ok(())
}

/// Temporary file next to `path` with the mode a plain write would give it.
///
/// A new file gets `0o666` minus the umask; an existing target keeps its
/// current permissions.
#[cfg_attr(not(unix), allow(unused_mut, unused_variables))]
fn create_temp_file(dir: &Path, path: &Path) -> Result<NamedTempFile> {
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let temp = builder
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    #[cfg(unix)]
    if let Ok(existing) = std::fs::metadata(path) {
        temp.as_file()
            .set_permissions(existing.permissions())
            .with_context(|| format!("Failed to copy permissions of {}", path.display()))?;
    }

    Ok(temp)
}

/// Worksheet column number for a position in the column list
fn column_index(col: usize) -> Result<u16> {
    u16::try_from(col).context("Too many columns for one worksheet")
}

/// Empty cells are left unwritten
fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, value: &CellValue) -> Result<()> {
    match value {
        CellValue::Empty => {}
        CellValue::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
    }
    Ok(())
}
