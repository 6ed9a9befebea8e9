//! Watch command implementation.
//!
//! Builds a sheet once, then again every time the file is written. Build
//! errors are reported and watching continues.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::Args;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::error::{Result, TilepadError};
use crate::output::{display_path, Printer};

use super::build::{build_sheet, Settings, SheetArgs};

/// Quiet period that groups the several events one save produces.
const DEBOUNCE: Duration = Duration::from_millis(150);

/// Rebuild a sprite sheet whenever it changes
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// PNG sheet to watch
    pub input: PathBuf,

    #[command(flatten)]
    pub sheet: SheetArgs,
}

pub fn run(args: WatchArgs, printer: &Printer) -> Result<()> {
    let input = args.input.canonicalize().map_err(|e| TilepadError::Io {
        path: args.input.clone(),
        message: format!("Cannot watch file: {}", e),
    })?;
    let settings = args.sheet.resolve(printer)?;

    rebuild(&input, &settings, printer);

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).map_err(|e| TilepadError::Build {
        message: format!("Failed to create file watcher: {}", e),
        help: None,
    })?;

    // Watch the directory: editors often replace the file instead of writing it.
    let dir = input.parent().unwrap_or(Path::new("."));
    watcher
        .watch(dir, RecursiveMode::NonRecursive)
        .map_err(|e| TilepadError::Io {
            path: dir.to_path_buf(),
            message: format!("Failed to watch directory: {}", e),
        })?;

    printer.info("Watching", &display_path(&input));

    while let Ok(received) = rx.recv() {
        match received {
            Ok(event) if touches(&event, &input) => {
                while rx.recv_timeout(DEBOUNCE).is_ok() {}
                rebuild(&input, &settings, printer);
            }
            Ok(_) => {}
            Err(e) => printer.error("Error", &format!("watch failed: {}", e)),
        }
    }

    Ok(())
}

fn rebuild(input: &Path, settings: &Settings, printer: &Printer) {
    if let Err(e) = build_sheet(input, settings, printer) {
        printer.error("Error", &e.to_string());
    }
}

/// True when `event` creates or modifies `target`.
fn touches(event: &Event, target: &Path) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == target.file_name())
}
