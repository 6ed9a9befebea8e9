pub mod build;
pub mod completions;
pub mod init;
pub mod watch;

use clap::{Parser, Subcommand};

/// tilepad - padded tile atlases and slice sheets from gridded sprite sheets
#[derive(Parser, Debug)]
#[command(name = "tilepad")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print detailed progress
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build padded atlases and slice metadata from sprite sheets
    Build(build::BuildArgs),

    /// Rebuild a sprite sheet whenever it changes
    Watch(watch::WatchArgs),

    /// Write a default tilepad.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
