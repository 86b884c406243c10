//! sidebyside CLI entry point.

use clap::Parser;

use sidebyside::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init(args) => sidebyside::cli::commands::init::execute(args, cli.json).await,
        Commands::Serve(args) => sidebyside::cli::commands::serve::execute(args, cli.json).await,
        Commands::Read(args) => sidebyside::cli::commands::read::execute(args, cli.json).await,
    };

    if let Err(err) = result {
        sidebyside::cli::handle_error(err, cli.json);
    }
}
