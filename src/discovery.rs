//! Input discovery.
//!
//! Expands command-line inputs into source sheet paths. Directories are
//! walked recursively for `.png` files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, TilepadError};

/// True for `.png` files, case-insensitively.
pub fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}

/// True for an atlas written by a previous build: `<stem>/<stem>.png`.
pub fn is_generated_atlas(path: &Path) -> bool {
    let stem = path.file_stem().and_then(|s| s.to_str());
    let parent = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str());
    matches!((stem, parent), (Some(s), Some(p)) if s == p)
}

/// Scan a directory for source sheets, sorted by path.
pub fn scan_directory(root: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_png(p) && !is_generated_atlas(p))
        .collect();
    found.sort();
    found
}

/// Resolve inputs to source sheet paths.
///
/// Files are taken as given; directories contribute every sheet beneath
/// them. Missing paths are an error.
pub fn discover_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut sheets = Vec::new();
    for input in inputs {
        if input.is_dir() {
            sheets.extend(scan_directory(input));
        } else if input.is_file() {
            sheets.push(input.clone());
        } else {
            return Err(TilepadError::Io {
                path: input.clone(),
                message: format!("File not found: {}", input.display()),
            });
        }
    }
    Ok(sheets)
}
