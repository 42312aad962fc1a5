//! Commit history traversal and display
//!
//! - `rev_list`: first-parent chains and full ancestor walks over the commit DAG
//! - `entry`: the text block printed for one commit by `log` and `global-log`

pub mod entry;
pub mod rev_list;
