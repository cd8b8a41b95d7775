/// The export run
pub mod export;

use std::path::Path;

/// Confirmation line printed on stdout once the workbook is written
pub fn print_generated(path: &Path) {
    println!("✅ Fichier Excel généré : {}", path.display());
}
