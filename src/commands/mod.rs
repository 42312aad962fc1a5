//! Command implementations
//!
//! - `porcelain`: the user-facing commands exposed by the binary

pub mod porcelain;
