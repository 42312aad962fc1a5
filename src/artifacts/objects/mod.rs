//! Content-addressed object types
//!
//! Two kinds of immutable objects live in the stores:
//!
//! - **Blob**: the exact bytes of one file snapshot
//! - **Commit**: message, timestamp, parent fingerprints and a manifest of file name to blob
//!
//! Both serialize to `<type> <size>\0<body>`; the SHA-1 of that encoding is the object's
//! fingerprint.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated form shown in merge summaries
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
