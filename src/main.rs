// src/main.rs
use std::process::ExitCode;

use clap::Parser;
use deckhand::{app, cli::Args};

fn main() -> ExitCode {
    let args = Args::parse();
    app::init_logging(&args.log_level);

    match app::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
