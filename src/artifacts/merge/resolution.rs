//! Per-file merge rules
//!
//! For every file name in the union of the split point, HEAD and OTHER manifests, the blob ids
//! `S`, `H` and `O` (absent = `None`) decide what the merge does with that file. Rules are
//! tried in order and the first match wins:
//!
//! | rule | condition                         | action      |
//! |------|-----------------------------------|-------------|
//! | 1    | `S == H`, `S != O`, `O` present    | take OTHER  |
//! | 2    | `S == O`, `S != H`, `H` present    | keep HEAD   |
//! | 3    | `S`, `H`, `O` pairwise distinct    | conflict    |
//! | 4    | `S`, `O` absent, `H` present       | keep HEAD   |
//! | 5    | `S`, `H` absent, `O` present       | take OTHER  |
//! | 6    | `S` present, `S == H`, `O` absent  | remove      |
//! | 7    | `S` present, `S == O`, `H` absent  | stay absent |
//!
//! Anything else (both sides made the same change) leaves the file as it is in HEAD.

use crate::artifacts::objects::commit::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::{BufMut, Bytes, BytesMut};
use std::collections::{BTreeMap, BTreeSet};

pub const CONFLICT_HEAD_MARKER: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_SEPARATOR: &str = "=======\n";
pub const CONFLICT_END_MARKER: &str = ">>>>>>>\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// Check out OTHER's blob and stage it for addition
    TakeOther(ObjectId),
    /// HEAD's version is already the merge result
    KeepHead,
    /// Write conflict markers around both versions and stage the result
    Conflict,
    /// Stage for removal and delete the working file
    Remove,
    /// Nothing to do, including files that stay absent
    Unchanged,
}

impl MergeAction {
    pub fn resolve(
        split: Option<&ObjectId>,
        head: Option<&ObjectId>,
        other: Option<&ObjectId>,
    ) -> Self {
        match (split, head, other) {
            (s, h, Some(o)) if s == h && s != Some(o) => MergeAction::TakeOther(o.clone()),
            (s, Some(h), o) if s == o && s != Some(h) => MergeAction::KeepHead,
            (s, h, o) if s != h && s != o && h != o => MergeAction::Conflict,
            (None, Some(_), None) => MergeAction::KeepHead,
            (None, None, Some(o)) => MergeAction::TakeOther(o.clone()),
            (Some(s), Some(h), None) if s == h => MergeAction::Remove,
            (Some(s), None, Some(o)) if s == o => MergeAction::Unchanged,
            _ => MergeAction::Unchanged,
        }
    }

    /// Whether applying the action writes or deletes the working file
    pub fn touches_working_file(&self) -> bool {
        matches!(
            self,
            MergeAction::TakeOther(_) | MergeAction::Conflict | MergeAction::Remove
        )
    }
}

/// Resolve every file name known to any of the three manifests, keyed by name
pub fn plan(split: &Manifest, head: &Manifest, other: &Manifest) -> BTreeMap<String, MergeAction> {
    let names = split
        .keys()
        .chain(head.keys())
        .chain(other.keys())
        .collect::<BTreeSet<_>>();

    names
        .into_iter()
        .map(|name| {
            let action = MergeAction::resolve(split.get(name), head.get(name), other.get(name));
            (name.clone(), action)
        })
        .collect()
}

/// Contents of a conflicted file; an absent side renders as an empty section
pub fn conflict_content(head: Option<&[u8]>, other: Option<&[u8]>) -> Bytes {
    let head = head.unwrap_or_default();
    let other = other.unwrap_or_default();

    let mut content = BytesMut::with_capacity(
        CONFLICT_HEAD_MARKER.len()
            + head.len()
            + CONFLICT_SEPARATOR.len()
            + other.len()
            + CONFLICT_END_MARKER.len(),
    );
    content.put_slice(CONFLICT_HEAD_MARKER.as_bytes());
    content.put_slice(head);
    content.put_slice(CONFLICT_SEPARATOR.as_bytes());
    content.put_slice(other);
    content.put_slice(CONFLICT_END_MARKER.as_bytes());

    content.freeze()
}
