//! mafcheck CLI - validate mutation annotation files.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use logging::LogConfig;

/// Exit code when the file was validated but contains errors.
const EXIT_INVALID: i32 = 2;

fn main() {
    let cli = Cli::parse();

    let log_config =
        LogConfig::from_verbosity(cli.verbose, cli.quiet).with_format(cli.log_format.into());
    if let Err(e) = logging::init_logging(&log_config) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = match cli.command {
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Rules { json } => commands::rules::run(json).map(|()| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_INVALID),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
