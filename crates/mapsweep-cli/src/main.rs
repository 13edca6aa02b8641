//! Mapsweep CLI
//!
//! Command-line interface for pattern-based bulk removal of map layers
//! from the current mapset.

use clap::{Arg, ArgAction, ArgMatches, Command};
use mapsweep_core::{RemoveRequest, RunStatus, run};
use mapsweep_gis::{MapType, Session, config};
use std::process;

fn main() {
    let matches = cli().get_matches();

    let result = config::session_from_env()
        .map_err(anyhow::Error::from)
        .and_then(|session| execute(&session, &matches));

    match result {
        Ok(status) => {
            if !status.stdout.is_empty() {
                print!("{}", status.stdout);
            }
            if !status.stderr.is_empty() {
                eprint!("{}", status.stderr);
            }
            process::exit(status.code);
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            process::exit(1);
        }
    }
}

fn cli() -> Command {
    Command::new("mapsweep")
        .version("0.1.0")
        .about("Removes map layers from the current mapset by wildcard pattern")
        .arg(
            Arg::new("type")
                .short('t')
                .long("type")
                .value_name("TYPE")
                .help("Map type to operate on")
                .default_value("rast"),
        )
        .arg(
            Arg::new("pattern")
                .short('p')
                .long("pattern")
                .value_name("PATTERN")
                .help("Comma-separated patterns selecting maps")
                .required(true),
        )
        .arg(
            Arg::new("exclude")
                .short('x')
                .long("exclude")
                .value_name("PATTERN")
                .help("Wildcard pattern of maps to keep"),
        )
        .arg(
            Arg::new("force")
                .short('f')
                .long("force")
                .action(ArgAction::SetTrue)
                .help("Actually remove the maps instead of listing them"),
        )
        .arg(
            Arg::new("regex")
                .short('r')
                .long("regex")
                .action(ArgAction::SetTrue)
                .help("Interpret the pattern as a basic regular expression"),
        )
        .arg(
            Arg::new("extended")
                .short('e')
                .long("extended-regex")
                .action(ArgAction::SetTrue)
                .help("Interpret the pattern as an extended regular expression"),
        )
        .arg(
            Arg::new("ignore-case")
                .short('i')
                .long("ignore-case")
                .action(ArgAction::SetTrue)
                .help("Ignore case when matching"),
        )
}

fn execute(session: &Session, matches: &ArgMatches) -> Result<RunStatus, anyhow::Error> {
    session.open()?;

    let alias = matches
        .get_one::<String>("type")
        .cloned()
        .unwrap_or_default();
    let pattern = matches
        .get_one::<String>("pattern")
        .cloned()
        .unwrap_or_default();

    let mut request = RemoveRequest::new(MapType::from_alias(&alias)?, pattern);
    request.exclude = matches.get_one::<String>("exclude").cloned();
    request.force = matches.get_flag("force");
    request.regex = matches.get_flag("regex");
    request.extended = matches.get_flag("extended");
    request.ignore_case = matches.get_flag("ignore-case");

    Ok(run(session, &request)?)
}
