use clap::Parser;

use crate::{Result, logger};

mod build;
mod detect;

#[derive(clap::Parser)]
#[clap(name = "shwire", version = env!("CARGO_PKG_VERSION"), about = env!("CARGO_PKG_DESCRIPTION"))]
struct Cli {
    /// Enables verbose output
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    Build(Box<build::Build>),
    Detect(Box<detect::Detect>),
}

pub fn run() -> Result<()> {
    let args = Cli::parse();
    logger::init(args.verbose);
    match args.command {
        Commands::Build(cmd) => cmd.run(),
        Commands::Detect(cmd) => cmd.run(),
    }
}
