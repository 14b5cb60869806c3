//! Command-line interface.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use crate::app::WindowVisualizer;
use crate::geometry::AngleStyle;
use crate::session::{
    run_session, FixedPair, NoPair, NoPlot, Outcome, PairSource, PromptPair, SessionOptions,
    Visualizer,
};

/// File read when none is given.
pub const DEFAULT_FILE: &str = "traverse_data.csv";

#[derive(Parser, Debug)]
#[command(name = "traverse-panda")]
#[command(about = "Report extents, distance and bearing for survey traverse points", version)]
pub struct Cli {
    /// Traverse CSV with a `Point,Easting,Northing` header
    #[arg(default_value = DEFAULT_FILE)]
    pub file: PathBuf,

    /// Measure distance and bearing from point FROM to point TO
    #[arg(
        long,
        num_args = 2,
        value_names = ["FROM", "TO"],
        allow_negative_numbers = true,
        conflicts_with = "interactive"
    )]
    pub pair: Option<Vec<i64>>,

    /// Prompt for the two point numbers to measure between
    #[arg(short, long)]
    pub interactive: bool,

    /// Open the traverse plot window after printing
    #[arg(long)]
    pub plot: bool,

    /// Print bearings as degrees, minutes and seconds
    #[arg(long)]
    pub dms: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log filter; `RUST_LOG` takes precedence.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    fn session_options(&self) -> SessionOptions {
        SessionOptions {
            angle_style: if self.dms {
                AngleStyle::Dms
            } else {
                AngleStyle::Decimal
            },
            json: self.json,
        }
    }

    fn pair_source(&self) -> Box<dyn PairSource> {
        match (self.pair.as_deref(), self.interactive) {
            (Some([from, to]), _) => Box::new(FixedPair(*from, *to)),
            (_, true) => Box::new(PromptPair::new(io::stdin().lock(), io::stderr())),
            _ => Box::new(NoPair),
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let options = cli.session_options();
    let mut pairs = cli.pair_source();
    let mut visualizer: Box<dyn Visualizer> = if cli.plot {
        Box::new(WindowVisualizer)
    } else {
        Box::new(NoPlot)
    };

    let mut out = io::stdout().lock();
    match run_session(
        &cli.file,
        &options,
        pairs.as_mut(),
        visualizer.as_mut(),
        &mut out,
    ) {
        Ok(Outcome::Reported) => ExitCode::SUCCESS,
        Ok(outcome) => {
            log::debug!("Session ended with {outcome:?}");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["traverse-panda"]).unwrap();
        assert_eq!(cli.file, PathBuf::from(DEFAULT_FILE));
        assert!(cli.pair.is_none());
        assert!(!cli.interactive && !cli.plot && !cli.json);
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn test_pair_and_flags() {
        let cli = Cli::try_parse_from([
            "traverse-panda",
            "site.csv",
            "--pair",
            "3",
            "-7",
            "--dms",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.file, PathBuf::from("site.csv"));
        assert_eq!(cli.pair, Some(vec![3, -7]));
        assert_eq!(cli.session_options().angle_style, AngleStyle::Dms);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn test_pair_conflicts_with_interactive() {
        let result = Cli::try_parse_from(["traverse-panda", "--pair", "1", "2", "-i"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pair_needs_two_ids() {
        let result = Cli::try_parse_from(["traverse-panda", "--pair", "1"]);
        assert!(result.is_err());
    }
}
