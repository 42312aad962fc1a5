//! Gitlet: a single-user, local version-control engine
//!
//! The crate snapshots a flat working directory into immutable, content-addressed commits,
//! tracks branch pointers and reconciles divergent histories with a three-way merge.
//!
//! - `areas`: the persistent stores (objects, commits, refs, index, workspace)
//! - `artifacts`: data types and algorithms (objects, merge, checkout, status, log)
//! - `commands`: the user-facing commands, each implemented on [`Repository`]
//!
//! [`Repository`]: areas::repository::Repository

pub mod areas;
pub mod artifacts;
pub mod commands;
