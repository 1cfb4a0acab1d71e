//! Output formatting module
//!
//! Handles:
//! - Human-readable per-process mitigation blocks
//! - JSON output document assembly
//! - Stable, sorted attribute ordering in both formats

use crate::constants::{ATTRIBUTE_COLUMN_WIDTH, PID_COLUMN_WIDTH};
use crate::models::{
    MitigationReportOutput, ProcessEntry, ProcessReport, ReportSummary,
};
use crate::schema::{MitigationAttribute, MitigationSchema};
use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;

/// Attributes to display for an entry: the whole schema when `show_all`,
/// otherwise the intersection of the schema with the mitigation filter.
/// Schema iteration keeps the result sorted by name.
fn displayed_attributes<'a>(
    schema: &'a MitigationSchema,
    mitigation_filter: &HashSet<String>,
    show_all: bool,
) -> Vec<&'a MitigationAttribute> {
    schema
        .attributes()
        .filter(|attr| show_all || mitigation_filter.contains(&attr.name.to_lowercase()))
        .collect()
}

/// Render one process entry as a text block: a header line with the PID and
/// process name, one line per displayed attribute, and a trailing blank line.
/// The header and blank line are printed even when nothing is displayed.
pub fn render_entry(
    schema: &MitigationSchema,
    entry: &ProcessEntry,
    mitigation_filter: &HashSet<String>,
    show_all: bool,
) -> String {
    let mut block = String::new();
    let _ = writeln!(
        block,
        "Process Mitigations: {:>width$} - {}",
        entry.pid,
        entry.name,
        width = PID_COLUMN_WIDTH
    );

    for attr in displayed_attributes(schema, mitigation_filter, show_all) {
        let _ = writeln!(
            block,
            "- {:<width$}: {}",
            attr.name,
            attr.value(&entry.mitigations),
            width = ATTRIBUTE_COLUMN_WIDTH
        );
    }

    block.push('\n');
    block
}

/// Assemble the JSON output document for the surviving entries, applying the
/// same attribute selection as the human format.
pub fn build_report(
    schema: &MitigationSchema,
    entries: &[ProcessEntry],
    mitigation_filter: &HashSet<String>,
    show_all: bool,
) -> MitigationReportOutput {
    let results = entries
        .iter()
        .map(|entry| {
            let mitigations: BTreeMap<String, bool> =
                displayed_attributes(schema, mitigation_filter, show_all)
                    .into_iter()
                    .map(|attr| (attr.name.to_string(), attr.value(&entry.mitigations)))
                    .collect();
            ProcessReport {
                pid: entry.pid,
                name: entry.name.clone(),
                mitigations,
            }
        })
        .collect::<Vec<_>>();

    MitigationReportOutput {
        summary: ReportSummary {
            processes: results.len(),
        },
        results,
    }
}
