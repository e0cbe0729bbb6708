mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use std::io;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::error::CliError;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let result = commands::run(&cli)?;
    let stdout = io::stdout();
    output::render(&mut stdout.lock(), &result, cli.format, cli.pretty)?;

    Ok(ExitCode::SUCCESS)
}
