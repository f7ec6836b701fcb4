//! # KVMDEPS
//!
//! Finds which KVM (key value map) names each API proxy bundle references.
//!
//! Every direct subdirectory of the scan root is a proxy. All files below it
//! are searched for each key as a literal, case-sensitive substring, giving a
//! forward mapping (proxy -> keys) and its reverse (key -> proxies).
//!
//! ## Output Formats
//!
//! - **Text**: two-section report, one `name: a, b` line per entry
//! - **JSON**: both mappings as ordered objects
//! - **DOT**: either mapping as a Graphviz digraph with a force-directed layout

pub mod core;
pub mod error;
pub mod formatters;
pub mod logging;

pub use crate::core::{DependencyAnalyzer, DependencyIndex, KeyList};
pub use crate::error::{FileDecodingError, ScanError};
