//! End-to-end scenarios for the filter pipeline and report formatter,
//! exercised against the library with fabricated process snapshots.

use listmit::filter;
use listmit::models::{FilterCriteria, MitigationRecord, ProcessEntry, ReportConfig};
use listmit::output;
use listmit::schema::MitigationSchema;
use std::collections::HashMap;

fn entry(pid: u32, name: &str, mitigations: MitigationRecord) -> ProcessEntry {
    ProcessEntry {
        pid,
        name: name.to_string(),
        mitigations,
    }
}

/// Two-process snapshot: pid 1 has DEP enabled, pid 2 has bottom-up ASLR.
fn sample_processes() -> Vec<ProcessEntry> {
    vec![
        entry(
            1,
            "a",
            MitigationRecord {
                dep_enabled: true,
                ..Default::default()
            },
        ),
        entry(
            2,
            "b",
            MitigationRecord {
                enable_bottom_up_randomization: true,
                ..Default::default()
            },
        ),
    ]
}

#[test]
fn test_mitigation_filter_selects_and_restricts_display() {
    let schema = MitigationSchema::build();

    let mut config = ReportConfig::default();
    config.criteria.add_mitigation("DepEnabled");
    let show_all = config.show_all();
    assert!(!show_all, "a non-empty mitigation filter disables show-all");

    let selected = filter::select(sample_processes(), &config.criteria, &schema);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].pid, 1);

    let block = output::render_entry(
        &schema,
        &selected[0],
        &config.criteria.mitigations,
        show_all,
    );
    let lines: Vec<&str> = block.lines().collect();
    assert_eq!(lines.len(), 2, "header plus the single filtered attribute");
    assert!(lines[0].contains("1 - a"));
    assert!(lines[1].starts_with("- DepEnabled"));
    assert!(lines[1].ends_with(": true"));
}

#[test]
fn test_pid_filter_ignores_nonexistent_pids() {
    let schema = MitigationSchema::build();

    let mut criteria = FilterCriteria::default();
    criteria.add_pid(2);
    criteria.add_pid(9);

    let selected = filter::select(sample_processes(), &criteria, &schema);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].pid, 2);
}

#[test]
fn test_cmdline_filter_resolves_to_pid_filter() {
    let schema = MitigationSchema::build();

    let mut criteria = FilterCriteria::default();
    criteria.add_cmdline_substring("notepad");

    let mut cmdlines = HashMap::new();
    cmdlines.insert(1, "C:\\win\\notepad.exe".to_string());
    cmdlines.insert(2, "cmd.exe".to_string());

    filter::resolve_command_line_matches(&mut criteria, &cmdlines, 999);

    let selected = filter::select(sample_processes(), &criteria, &schema);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].pid, 1);
}

#[test]
fn test_no_type_flag_matches_explicit_all_flag() {
    let schema = MitigationSchema::build();
    let processes = sample_processes();

    // No -t and no -a
    let plain = ReportConfig::default();
    // -a alone
    let mut all = ReportConfig::default();
    all.all_mitigations = true;

    let render = |config: &ReportConfig| -> String {
        filter::select(processes.clone(), &config.criteria, &schema)
            .iter()
            .map(|e| output::render_entry(&schema, e, &config.criteria.mitigations, config.show_all()))
            .collect()
    };

    assert_eq!(render(&plain), render(&all));
}

#[test]
fn test_show_all_displays_full_schema_for_every_survivor() {
    let schema = MitigationSchema::build();
    let criteria = FilterCriteria::default();

    for entry in filter::select(sample_processes(), &criteria, &schema) {
        let block = output::render_entry(&schema, &entry, &criteria.mitigations, true);
        let attr_count = block.lines().filter(|l| l.starts_with("- ")).count();
        assert_eq!(attr_count, schema.len());
    }
}

#[test]
fn test_json_report_for_filtered_selection() {
    let schema = MitigationSchema::build();

    let mut config = ReportConfig::default();
    config.criteria.add_mitigation("DepEnabled");

    let selected = filter::select(sample_processes(), &config.criteria, &schema);
    let report = output::build_report(
        &schema,
        &selected,
        &config.criteria.mitigations,
        config.show_all(),
    );

    let json = serde_json::to_string_pretty(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["summary"]["processes"], 1);
    assert_eq!(parsed["results"][0]["pid"], 1);
    assert_eq!(parsed["results"][0]["mitigations"]["DepEnabled"], true);
    assert!(parsed["results"][0]["mitigations"]
        .as_object()
        .unwrap()
        .get("EnableBottomUpRandomization")
        .is_none());
}
