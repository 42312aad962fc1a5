//! Persistent repository components
//!
//! - `database`: compressed, content-addressed file store shared by blobs and commits
//! - `blobs`: file snapshots keyed by content fingerprint
//! - `commits`: immutable commit records and history queries
//! - `refs`: branch pointers and HEAD
//! - `index`: staging area persisted between invocations
//! - `repository`: handle tying the stores together
//! - `workspace`: the user's working directory

pub(crate) mod blobs;
pub(crate) mod commits;
pub(crate) mod database;
pub(crate) mod index;
pub(crate) mod refs;
pub mod repository;
pub(crate) mod workspace;
