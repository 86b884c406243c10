//! Command-line interface.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use commands::init::InitArgs;
use commands::read::ReadArgs;
use commands::serve::ServeArgs;

#[derive(Parser, Debug)]
#[command(name = "sidebyside")]
#[command(about = "Side-by-side OData extension service", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create .sidebyside/ with a demo configuration and the book database
    Init(InitArgs),

    /// Serve the OData endpoints until Ctrl-C
    Serve(ServeArgs),

    /// Run one read through the entity handlers and print the result
    Read(ReadArgs),
}

/// Report a failed command and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "success": false,
            "error": format!("{err:#}"),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1)
}
