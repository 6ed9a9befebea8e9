//! Init command implementation.
//!
//! Writes a commented `tilepad.yaml` with every setting at its default.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{Result, TilepadError};
use crate::manifest::{MANIFEST_FILENAME, MANIFEST_TEMPLATE};
use crate::output::{display_path, Printer};

/// Write a default tilepad.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write the config into
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing tilepad.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<PathBuf> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(TilepadError::Build {
            message: format!("{} already exists", display_path(&manifest_path)),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    fs::write(&manifest_path, MANIFEST_TEMPLATE).map_err(|e| TilepadError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.status("Created", &display_path(&manifest_path));
    Ok(manifest_path)
}
