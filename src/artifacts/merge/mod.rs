//! Three-way merge building blocks
//!
//! - `split_point`: the common ancestor both branches diverged from
//! - `resolution`: per-file merge rules and conflict rendering

pub mod resolution;
pub mod split_point;
