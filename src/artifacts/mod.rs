//! Data types and algorithms
//!
//! - `branch`: branch names and branch pointers
//! - `checkout`: moving the working tree between snapshots
//! - `core`: user-facing errors and configuration
//! - `log`: history traversal and log formatting
//! - `merge`: split point and per-file merge rules
//! - `objects`: blobs, commits and their fingerprints
//! - `status`: working tree status report

pub mod branch;
pub mod checkout;
pub mod core;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
