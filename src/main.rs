//! listmit - report exploit mitigation policies for running processes
//!
//! Takes a single snapshot of the live process list, applies the
//! user-supplied filters and prints one mitigation block per surviving
//! process.

#![cfg_attr(not(windows), forbid(unsafe_code))]

mod cli;
mod provider;

use anyhow::Result;
use listmit::filter;
use listmit::output;
use listmit::schema::MitigationSchema;

fn main() {
    // Every failure is reported the same way: a plain message on stdout
    // with a uniform exit status
    if let Err(err) = run() {
        println!("{err}");
    }
}

fn run() -> Result<()> {
    let Some(config) = cli::parse_args()? else {
        return Ok(());
    };

    let schema = MitigationSchema::build();
    let directory = provider::ProcessDirectory::snapshot();
    let processes = directory.processes()?;

    let show_all = config.show_all();
    let mut criteria = config.criteria;

    if !criteria.cmdline_substrings.is_empty() {
        let cmdlines = directory.command_lines();
        filter::resolve_command_line_matches(&mut criteria, &cmdlines, directory.own_pid());
    }

    let selected = filter::select(processes, &criteria, &schema);

    if config.json_output {
        let report = output::build_report(&schema, &selected, &criteria.mitigations, show_all);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in &selected {
            print!(
                "{}",
                output::render_entry(&schema, entry, &criteria.mitigations, show_all)
            );
        }
    }

    Ok(())
}
