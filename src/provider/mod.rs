//! Process directory adapter
//!
//! Materializes one snapshot of the live process list, annotates each
//! process with its mitigation record, and supplies the auxiliary
//! PID-to-command-line mapping used by command-line filtering. All lookups
//! are blocking; any provider failure aborts the whole run.

use listmit::models::{ProcessEntry, ProviderError};
use std::collections::HashMap;
use sysinfo::{PidExt, ProcessExt, System, SystemExt};

pub mod mitigations;

/// A point-in-time view of the running processes
pub struct ProcessDirectory {
    system: System,
    own_pid: u32,
}

impl ProcessDirectory {
    /// Take the snapshot. Nothing is refreshed afterward.
    pub fn snapshot() -> Self {
        Self {
            system: System::new_all(),
            own_pid: std::process::id(),
        }
    }

    /// Every process in the snapshot with its mitigation record.
    /// The first mitigation query that fails aborts the enumeration.
    pub fn processes(&self) -> Result<Vec<ProcessEntry>, ProviderError> {
        let mut entries = Vec::with_capacity(self.system.processes().len());
        for (pid, process) in self.system.processes() {
            let pid = pid.as_u32();
            let mitigations = mitigations::query(pid)?;
            entries.push(ProcessEntry {
                pid,
                name: process.name().to_string(),
                mitigations,
            });
        }
        // sysinfo's process map is unordered; pin a stable snapshot order
        entries.sort_by_key(|entry| entry.pid);
        Ok(entries)
    }

    /// PID-to-command-line mapping for the same snapshot
    pub fn command_lines(&self) -> HashMap<u32, String> {
        self.system
            .processes()
            .iter()
            .map(|(pid, process)| (pid.as_u32(), process.cmd().join(" ")))
            .collect()
    }

    /// This tool's own PID, excluded from command-line resolution
    pub fn own_pid(&self) -> u32 {
        self.own_pid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_sees_running_processes() {
        let directory = ProcessDirectory::snapshot();
        assert!(!directory.command_lines().is_empty());
    }

    #[test]
    fn test_own_pid_matches_current_process() {
        let directory = ProcessDirectory::snapshot();
        assert_eq!(directory.own_pid(), std::process::id());
    }

    #[cfg(not(windows))]
    #[test]
    fn test_enumeration_is_unsupported_off_windows() {
        let directory = ProcessDirectory::snapshot();
        assert!(matches!(
            directory.processes(),
            Err(ProviderError::Unsupported)
        ));
    }

    #[cfg(windows)]
    #[test]
    fn test_query_own_process_mitigations() {
        let record = mitigations::query(std::process::id());
        assert!(record.is_ok(), "querying our own process should succeed");
    }
}
