//! CLI argument parsing and validation module
//!
//! Handles command-line interface using clap, including:
//! - Repeatable filter options (mitigation type, process name, PID, command line)
//! - Display mode flags (show all mitigations, JSON output)
//! - Help and version commands

use anyhow::{anyhow, Result};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command};
use listmit::models::ReportConfig;
use std::ffi::OsString;

fn command() -> Command {
    Command::new("listmit")
        .version(env!("LISTMIT_VERSION"))
        .about("List exploit mitigation policies for running processes")
        .long_about(
            "A command-line tool to report which exploit mitigation policies \
             (DEP, ASLR, CFG, dynamic code, handle, font and image load \
             hardening) are active for running Windows processes.",
        )
        .arg(
            Arg::new("type")
                .short('t')
                .long("type")
                .value_name("NAME")
                .help("Filter for processes with a specific mitigation to display")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("filter")
                .short('f')
                .long("filter")
                .value_name("NAME")
                .help("Filter for the name of a process to display")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("pid")
                .short('p')
                .long("pid")
                .value_name("PID")
                .help("Filter for a specific PID to display")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("cmd")
                .short('c')
                .long("cmd")
                .value_name("TEXT")
                .help("Filter for the command line of a process to display")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("all")
                .short('a')
                .long("all")
                .help("When filtering on mitigation, show all process mitigations")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
}

/// Parse command line arguments and return configuration.
/// Returns None when help or version output was requested; normal
/// processing is suppressed in that case.
pub fn parse_args() -> Result<Option<ReportConfig>> {
    parse_from(std::env::args_os())
}

fn parse_from<I, T>(args: I) -> Result<Option<ReportConfig>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(None);
        }
        // Bad option syntax surfaces through the same top-level path as
        // every other failure
        Err(err) => return Err(anyhow!(err.to_string())),
    };

    let mut config = ReportConfig::default();

    if let Some(values) = matches.get_many::<String>("type") {
        for value in values {
            config.criteria.add_mitigation(value);
        }
    }

    if let Some(values) = matches.get_many::<String>("filter") {
        for value in values {
            config.criteria.add_name(value);
        }
    }

    if let Some(values) = matches.get_many::<String>("pid") {
        for value in values {
            let pid: u32 = value
                .trim()
                .parse()
                .map_err(|_| anyhow!("invalid PID '{}': expected an integer", value))?;
            config.criteria.add_pid(pid);
        }
    }

    if let Some(values) = matches.get_many::<String>("cmd") {
        for value in values {
            config.criteria.add_cmdline_substring(value);
        }
    }

    config.all_mitigations = matches.get_flag("all");
    config.json_output = matches.get_flag("json");

    Ok(Some(config))
}
