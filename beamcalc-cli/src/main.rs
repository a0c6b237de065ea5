//! The `beamcalc` binary.

mod app;
mod cli;
mod error;
mod logger;

use std::{error::Error, io, process::ExitCode};

use clap::Parser;
use log::error;

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    if let Err(e) = logger::init(args.verbose) {
        eprintln!("warning: logging unavailable: {e}");
    }

    let mut stdout = io::stdout().lock();
    match app::run(&args.command, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            let mut source = e.source();
            while let Some(cause) = source {
                error!("caused by: {cause}");
                source = cause.source();
            }
            eprintln!("Error: Something went wrong. Please try again");
            ExitCode::FAILURE
        }
    }
}
