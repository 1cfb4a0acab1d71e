//! Global constants for listmit
//!
//! Centralized location for application-wide constants

/// Width the PID is right-justified to in an entry header
pub const PID_COLUMN_WIDTH: usize = 8;

/// Width a mitigation attribute name is padded to in an entry line
pub const ATTRIBUTE_COLUMN_WIDTH: usize = 45;
