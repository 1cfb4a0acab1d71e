//! Data models module
//!
//! Defines core data structures:
//! - MitigationRecord: Per-process exploit mitigation policy flags
//! - ProcessEntry: A running process with its mitigation record
//! - FilterCriteria: Case-normalized filter sets supplied on the command line
//! - ReportConfig: Parsed invocation configuration
//! - MitigationReportOutput: JSON output document

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Exploit mitigation policy flags for a single process, as reported by the
/// OS at snapshot time. Immutable once constructed.
///
/// One boolean per mitigation attribute; the display names live in the
/// schema registration table (`schema::MitigationSchema`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MitigationRecord {
    // Data Execution Prevention
    pub dep_enabled: bool,
    pub disable_atl_thunk_emulation: bool,
    pub dep_permanent: bool,

    // Address Space Layout Randomization
    pub enable_bottom_up_randomization: bool,
    pub enable_force_relocate_images: bool,
    pub enable_high_entropy: bool,
    pub disallow_stripped_images: bool,

    // Dynamic code generation
    pub prohibit_dynamic_code: bool,
    pub allow_thread_opt_out: bool,
    pub allow_remote_downgrade: bool,
    pub audit_prohibit_dynamic_code: bool,

    // Strict handle checks
    pub raise_exception_on_invalid_handle_reference: bool,
    pub handle_exceptions_permanently_enabled: bool,

    // Win32k system call disable
    pub disallow_win32k_system_calls: bool,
    pub audit_disallow_win32k_system_calls: bool,

    // Extension point disable
    pub disable_extension_points: bool,

    // Control Flow Guard
    pub enable_control_flow_guard: bool,
    pub enable_export_suppression: bool,
    pub control_flow_guard_strict_mode: bool,

    // Binary signature policy
    pub microsoft_signed_only: bool,
    pub store_signed_only: bool,
    pub signed_mitigation_opt_in: bool,

    // Font loading
    pub disable_non_system_fonts: bool,
    pub audit_non_system_font_loading: bool,

    // Image load policy
    pub no_remote_images: bool,
    pub no_low_mandatory_label_images: bool,
    pub prefer_system32_images: bool,
}

/// A single live process captured at enumeration time. Not refreshed — the
/// tool takes one snapshot per run.
#[derive(Debug, Clone)]
pub struct ProcessEntry {
    /// Process ID (PID)
    pub pid: u32,
    /// Process name (executable name)
    pub name: String,
    /// Mitigation flags resolved for this process at snapshot time
    pub mitigations: MitigationRecord,
}

/// Filter criteria accumulated from repeatable command-line flags.
///
/// All sets are empty by default (no filtering). String sets are trimmed
/// and lower-cased at insertion so membership checks are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// PIDs to keep (`-p/--pid`), plus PIDs resolved from command-line matches
    pub pids: HashSet<u32>,
    /// Process names to keep (`-f/--filter`)
    pub names: HashSet<String>,
    /// Mitigation attribute names to filter and display on (`-t/--type`)
    pub mitigations: HashSet<String>,
    /// Command-line substrings to resolve into PIDs (`-c/--cmd`)
    pub cmdline_substrings: HashSet<String>,
}

impl FilterCriteria {
    pub fn add_pid(&mut self, pid: u32) {
        self.pids.insert(pid);
    }

    pub fn add_name(&mut self, name: &str) {
        self.names.insert(name.trim().to_lowercase());
    }

    pub fn add_mitigation(&mut self, name: &str) {
        self.mitigations.insert(name.trim().to_lowercase());
    }

    pub fn add_cmdline_substring(&mut self, text: &str) {
        self.cmdline_substrings.insert(text.trim().to_lowercase());
    }
}

/// Configuration for a single report run
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    /// Filter criteria
    pub criteria: FilterCriteria,
    /// Whether `-a/--all` was supplied
    pub all_mitigations: bool,
    /// Whether to output JSON format
    pub json_output: bool,
}

impl ReportConfig {
    /// Effective display mode: with no mitigation filter there is nothing to
    /// select on, so every attribute is reported regardless of `-a`.
    pub fn show_all(&self) -> bool {
        self.all_mitigations || self.criteria.mitigations.is_empty()
    }
}

/// Mitigation report for one process, for JSON serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessReport {
    /// Process ID (PID)
    pub pid: u32,
    /// Process name (executable name)
    pub name: String,
    /// Displayed mitigation attributes, keyed by canonical attribute name
    pub mitigations: BTreeMap<String, bool>,
}

/// Summary statistics for the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Number of processes that survived filtering
    pub processes: usize,
}

/// Complete output structure for JSON serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MitigationReportOutput {
    /// Per-process mitigation reports
    pub results: Vec<ProcessReport>,
    /// Summary statistics
    pub summary: ReportSummary,
}

/// Errors raised by the process directory and mitigation provider.
/// Any of these aborts the entire report; there is no partial-failure mode.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("process mitigation policies are not available on this platform; Windows is required")]
    Unsupported,
    #[error("access denied opening process {pid}")]
    AccessDenied { pid: u32 },
    #[error("failed to query {policy} policy for process {pid}: {message}")]
    Query {
        pid: u32,
        policy: &'static str,
        message: String,
    },
}
