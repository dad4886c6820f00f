use std::process::ExitCode;

use clap::Parser;

mod announce;
mod cli;
mod config;
mod engine;
mod error;
mod interpreter;
mod library;
mod queue;
mod router;
mod runtime;
mod session;

fn main() -> ExitCode {
    let args = cli::Args::parse();
    runtime::logging::init(args.verbose);

    match runtime::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("shuffleplay: {e:#}");
            ExitCode::FAILURE
        }
    }
}
