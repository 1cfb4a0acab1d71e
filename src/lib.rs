//! listmit - Process Mitigation Reporting Library
//!
//! This library exposes the core data models, the mitigation attribute
//! schema, the filter engine and the report formatter.

#![forbid(unsafe_code)]

mod constants;
pub mod filter;
pub mod models;
pub mod output;
pub mod schema;
