mod app;
mod cli;
mod color;
mod data;
mod geometry;
mod report;
mod session;
mod state;
mod ui;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();

    cli::run(cli)
}
