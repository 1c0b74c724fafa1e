//! Critiquer CLI entry point.

use clap::Parser;

use critiquer::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // `run` installs logging once its configuration is loaded
    let result = match cli.command {
        Commands::Run(args) => critiquer::cli::commands::run::execute(args, cli.json).await,
        Commands::Validate(args) => critiquer::cli::commands::validate::execute(args, cli.json),
        Commands::Personas => critiquer::cli::commands::personas::execute(cli.json),
    };

    if let Err(err) = result {
        critiquer::cli::handle_error(err, cli.json);
    }
}
