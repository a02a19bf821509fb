#![allow(clippy::print_stderr)]

use clap::Parser;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use coolc_cli::args::CliArgs;
use coolc_cli::driver::{self, EXIT_INPUT_FAILURE};

fn main() -> ExitCode {
    // Initialize tracing if COOLC_LOG or RUST_LOG is set (zero cost otherwise).
    coolc_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    // Diagnostics go to stderr, so color follows stderr rather than stdout.
    if args.pretty {
        colored::control::set_override(io::stderr().is_terminal());
    }

    let stdout = io::stdout();
    let stderr = io::stderr();
    match driver::run(&args, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_INPUT_FAILURE)
        }
    }
}
