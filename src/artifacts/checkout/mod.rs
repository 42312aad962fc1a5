//! Moving the working tree between snapshots
//!
//! - `migration`: plan-then-apply reconciliation shared by branch checkout and reset
//! - `untracked`: detection of untracked files an operation would clobber

pub mod migration;
pub mod untracked;
