//! Terminal status output for the tilepad CLI.
//!
//! Cargo-style lines with a right-aligned coloured verb, written to stderr.
//! Colour is used only when stderr is a terminal.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width of the verb column.
const VERB_WIDTH: usize = 12;

/// Status printer.
pub struct Printer {
    color: bool,
    verbose: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            verbose: false,
        }
    }

    /// Also print lines sent to [`Printer::verbose`].
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// e.g. "    Building grass.png (4x3 tiles)"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    /// Detail line, shown only in verbose mode.
    pub fn verbose(&self, verb: &str, message: &str) {
        if self.verbose {
            let message = self.dim(message);
            self.print_line(DIM, verb, &message);
        }
    }

    /// Format text as dim when colour is on.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        let _ = if self.color {
            writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}")
        } else {
            writeln!(stderr, "{verb:>VERB_WIDTH$} {message}")
        };
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// `plural(1, "tile", "tiles")` is "1 tile".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    format!("{} {}", n, if n == 1 { singular } else { pluralized })
}

/// A path relative to the working directory when possible.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));

    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}
