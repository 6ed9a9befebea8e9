use miette::Diagnostic;
use thiserror::Error;

/// Main error type for tilepad operations
#[derive(Error, Diagnostic, Debug)]
pub enum TilepadError {
    #[error("IO error: {0}")]
    #[diagnostic(code(tilepad::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tilepad::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(tilepad::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(tilepad::config))]
    InvalidConfig {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Out of bounds: {message}")]
    #[diagnostic(
        code(tilepad::bounds),
        help("the tile grid does not match the buffer it is applied to")
    )]
    OutOfBounds { message: String },

    #[error("Build error: {message}")]
    #[diagnostic(code(tilepad::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl TilepadError {
    pub(crate) fn invalid_config(message: impl Into<String>, help: Option<&str>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
            help: help.map(str::to_string),
        }
    }

    pub(crate) fn out_of_bounds(message: impl Into<String>) -> Self {
        Self::OutOfBounds {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TilepadError>;
