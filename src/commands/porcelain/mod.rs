//! User-facing commands
//!
//! Each command is an `impl Repository` block that validates its preconditions before
//! mutating anything, so a user error leaves the repository untouched.
//!
//! ## Commands
//!
//! - `init`: create the repository with its root commit and `master` branch
//! - `add` / `rm`: stage files for addition or removal
//! - `commit`: freeze the staging area into a new commit
//! - `log`: `log`, `global-log` and `find`
//! - `status`: branches, staged files and working tree changes
//! - `checkout`: restore files or switch branches
//! - `branch`: create and delete branches
//! - `reset`: move the current branch to another commit
//! - `merge`: three-way merge of another branch into the current one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod status;
