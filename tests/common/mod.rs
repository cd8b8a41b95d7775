#![allow(dead_code)]

use anyhow::{Result, anyhow};
use calamine::{Data, Reader, Xlsx, open_workbook};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary working directory with a `groupes/` input folder
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub input_dir: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let input_dir = temp_dir.path().join("groupes");
        fs::create_dir(&input_dir)?;
        Ok(Self {
            temp_dir,
            input_dir,
        })
    }

    /// Working directory root
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `<group>.json` into the input folder
    pub fn write_group(&self, group: &str, contents: &str) -> Result<PathBuf> {
        let path = self.input_dir.join(format!("{group}.json"));
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// The two-group fixture shared by several tests
    pub fn write_admins_and_users(&self) -> Result<()> {
        self.write_group(
            "admins",
            r#"[{"id": "1", "username": "alice", "enabled": true}]"#,
        )?;
        self.write_group(
            "users",
            r#"[
                {"id": "1", "username": "alice", "enabled": true},
                {"id": "2", "username": "bob", "enabled": false}
            ]"#,
        )?;
        Ok(())
    }
}

/// Read a worksheet back as rows of raw cells
pub fn read_sheet(path: &Path, sheet: &str) -> Result<Vec<Vec<Data>>> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| anyhow!("{e}"))?;
    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| anyhow!("{e}"))?;
    Ok(range.rows().map(<[Data]>::to_vec).collect())
}

/// Read a worksheet back as text, blank cells becoming `""`
pub fn read_sheet_text(path: &Path, sheet: &str) -> Result<Vec<Vec<String>>> {
    Ok(read_sheet(path, sheet)?
        .iter()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Bool(b) => b.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        other => format!("{other:?}"),
    }
}
