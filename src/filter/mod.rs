//! Process filter engine
//!
//! Maps the user-supplied criteria onto the enumerated process snapshot.
//! Filter kinds compose with AND semantics; values within one kind compose
//! with OR semantics. Each stage runs only when its criterion set is
//! non-empty and narrows the sequence without reordering or mutating it.

use crate::models::{FilterCriteria, MitigationRecord, ProcessEntry};
use crate::schema::MitigationSchema;
use std::collections::HashMap;

/// Fold command-line substring matches into the PID filter.
///
/// For every process except this tool itself, a command line containing any
/// of the supplied substrings (case-insensitively) adds that PID to the PID
/// set. Existing PID filter entries are kept; matches accumulate.
pub fn resolve_command_line_matches(
    criteria: &mut FilterCriteria,
    cmdlines: &HashMap<u32, String>,
    own_pid: u32,
) {
    for (&pid, cmdline) in cmdlines {
        if pid == own_pid {
            continue;
        }
        let cmdline = cmdline.to_lowercase();
        if criteria
            .cmdline_substrings
            .iter()
            .any(|substring| cmdline.contains(substring))
        {
            criteria.pids.insert(pid);
        }
    }
}

/// True iff at least one of `names` is a known schema attribute whose value
/// is set on `record`. Unknown names contribute false, never an error.
pub fn has_any_mitigation_set<'a, I>(
    schema: &MitigationSchema,
    record: &MitigationRecord,
    names: I,
) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    names
        .into_iter()
        .any(|name| schema.get(name).is_some_and(|attr| attr.value(record)))
}

/// Apply the PID, name and mitigation filter stages in order.
pub fn select(
    processes: Vec<ProcessEntry>,
    criteria: &FilterCriteria,
    schema: &MitigationSchema,
) -> Vec<ProcessEntry> {
    let mut selected = processes;

    if !criteria.pids.is_empty() {
        selected.retain(|entry| criteria.pids.contains(&entry.pid));
    }

    if !criteria.names.is_empty() {
        selected.retain(|entry| criteria.names.contains(&entry.name.to_lowercase()));
    }

    if !criteria.mitigations.is_empty() {
        selected.retain(|entry| {
            has_any_mitigation_set(schema, &entry.mitigations, &criteria.mitigations)
        });
    }

    selected
}
