//! Working tree status
//!
//! - `file_change`: kinds of unstaged changes
//! - `status_info`: classification of files and the status report

pub mod file_change;
pub mod status_info;
