//! Stock Tally command-line entry point.

use std::process::ExitCode;

use clap::Parser;
use stocktally_cli::cli::Cli;
use stocktally_cli::logging::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init_tracing(cli.verbose) {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }

    match stocktally_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}
