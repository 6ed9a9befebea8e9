use clap::Parser;
use miette::Result;
use tilepad::cli::{Cli, Commands};
use tilepad::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new().with_verbose(cli.verbose);

    match cli.command {
        Commands::Build(args) => {
            tilepad::cli::build::run(args, &printer)?;
        }
        Commands::Watch(args) => tilepad::cli::watch::run(args, &printer)?,
        Commands::Init(args) => {
            tilepad::cli::init::run(args, &printer)?;
        }
        Commands::Completions(args) => tilepad::cli::completions::run(args)?,
    }

    Ok(())
}
