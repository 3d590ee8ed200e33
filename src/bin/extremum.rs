//! Searches the extremum of `x³ - 6xy + 8y³ + 5`.
//!
//! ```text
//! extremum [CONFIG] [--verbose] [--dump] [--json]
//! ```
//!
//! Without a config file the defaults are used (minimization, 100
//! individuals, 2000 generations). With `--json` stdout carries only the
//! JSON summary; generation dumps go to stderr.

use anyhow::{Context, Result};
use clap::{ArgMatches, Command, arg};
use std::{fs, io, path::PathBuf};
use symbios_extremum::{ConsoleReporter, GaConfig, RouletteGA};
use tracing::Level;

fn cli() -> Command {
    Command::new("extremum")
        .about("Genetic search for the extremum of x^3 - 6xy + 8y^3 + 5")
        .arg(
            arg!([CONFIG] "Path to a JSON config file; defaults are used when omitted")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(-v --verbose "Log every generation at debug level"))
        .arg(arg!(--dump "Print X/Y/Z rows for every generation"))
        .arg(arg!(--json "Print the run summary as JSON on stdout"))
}

fn load_config(path: Option<&PathBuf>) -> Result<GaConfig> {
    let Some(path) = path else {
        return Ok(GaConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn execute(matches: &ArgMatches) -> Result<()> {
    let dump = matches.get_flag("dump");
    let json = matches.get_flag("json");

    let config = load_config(matches.get_one::<PathBuf>("CONFIG"))?;
    let mut ga = RouletteGA::new(config);

    if json {
        let mut reporter = ConsoleReporter::new(io::stderr(), dump).without_summary();
        let summary = ga.run_with(&mut reporter);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        ga.run_with(&mut ConsoleReporter::stdout(dump));
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    execute(&matches)
}
