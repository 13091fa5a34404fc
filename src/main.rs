#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! logparse: hand recovered log files to pluggable parser modules.

mod cli;
mod commands;
mod config;
mod dispatch;
mod logging;
mod plugin;
mod types;

use clap::Parser;

use cli::{Cli, OutputCtx, write_error};
use types::ErrorOutput;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = OutputCtx::new(cli.json, cli.verbose);

    match commands::run(&cli, &ctx) {
        Ok(()) => {}
        Err(err) => {
            let error_output = ErrorOutput::from_dispatch_error(&err, cli.verbose);
            write_error(&error_output, cli.json);
            std::process::exit(err.exit_code());
        }
    }
}
