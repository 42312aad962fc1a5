//! Commit object
//!
//! Commits are immutable snapshots of the tracked files. They contain:
//! - A message
//! - A timestamp with its UTC offset
//! - Zero (root), one, or two (merge) parent commit IDs, primary parent first
//! - A manifest mapping each tracked file name to the blob holding its contents
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! timestamp <unix-seconds> <+hhmm>
//! parent <parent-sha>
//! file <blob-sha> <name>
//!
//! <commit message>
//! ```
//!
//! The manifest is kept sorted, so the encoding (and therefore the fingerprint) is a pure
//! function of the commit's fields.

use crate::artifacts::objects::object::{Object, Packable, Unpackable, encode_with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Tracked file name to blob fingerprint
pub type Manifest = BTreeMap<String, ObjectId>;

pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    message: String,
    timestamp: DateTime<FixedOffset>,
    /// Parent commit IDs (empty for the root commit, two for merge commits)
    parents: Vec<ObjectId>,
    manifest: Manifest,
    /// Computed once from the fields above
    oid: ObjectId,
}

impl Commit {
    pub fn new(
        message: String,
        timestamp: DateTime<FixedOffset>,
        parents: Vec<ObjectId>,
        manifest: Manifest,
    ) -> Self {
        let body = Self::encode_body(&message, &timestamp, &parents, &manifest);
        let header = format!("{} {}\0", ObjectType::Commit.as_str(), body.len());
        let oid = ObjectId::hash_of(format!("{header}{body}").as_bytes());

        Commit {
            message,
            timestamp,
            parents,
            manifest,
            oid,
        }
    }

    /// The root commit every repository starts from: empty manifest, no parent, epoch time
    pub fn initial() -> Self {
        let epoch = DateTime::<Utc>::UNIX_EPOCH.fixed_offset();
        Self::new(
            INITIAL_COMMIT_MESSAGE.to_string(),
            epoch,
            Vec::new(),
            Manifest::new(),
        )
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn secondary_parent(&self) -> Option<&ObjectId> {
        self.parents.get(1)
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Blob tracked under `name`, if any
    pub fn tracked(&self, name: &str) -> Option<&ObjectId> {
        self.manifest.get(name)
    }

    pub fn is_tracked(&self, name: &str) -> bool {
        self.manifest.contains_key(name)
    }

    fn encode_body(
        message: &str,
        timestamp: &DateTime<FixedOffset>,
        parents: &[ObjectId],
        manifest: &Manifest,
    ) -> String {
        let mut lines = vec![format!(
            "timestamp {} {}",
            timestamp.timestamp(),
            timestamp.format("%z")
        )];
        for parent in parents {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        for (name, blob_oid) in manifest {
            lines.push(format!("file {} {}", blob_oid.as_ref(), name));
        }
        lines.push(String::new());
        lines.push(message.to_string());

        lines.join("\n")
    }

    fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        let (seconds, offset) = value
            .split_once(' ')
            .context("Invalid commit object: malformed timestamp")?;
        let seconds = seconds
            .parse::<i64>()
            .context("Invalid commit object: timestamp is not a number")?;
        let offset = Self::parse_offset(offset)?;

        DateTime::from_timestamp(seconds, 0)
            .map(|utc| utc.with_timezone(&offset))
            .context("Invalid commit object: timestamp out of range")
    }

    fn parse_offset(offset: &str) -> anyhow::Result<FixedOffset> {
        let (sign, digits) = match offset.split_at_checked(1) {
            Some(("+", digits)) => (1, digits),
            Some(("-", digits)) => (-1, digits),
            _ => anyhow::bail!("Invalid commit object: malformed offset {offset}"),
        };
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            anyhow::bail!("Invalid commit object: malformed offset {offset}");
        }

        let hours = digits[..2].parse::<i32>()?;
        let minutes = digits[2..].parse::<i32>()?;

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .with_context(|| format!("Invalid commit object: offset out of range {offset}"))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let body = Self::encode_body(&self.message, &self.timestamp, &self.parents, &self.manifest);
        encode_with_header(&self.object_type(), body.as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;
        let mut lines = header.lines();

        let timestamp = lines
            .next()
            .and_then(|line| line.strip_prefix("timestamp "))
            .context("Invalid commit object: missing timestamp line")?;
        let timestamp = Self::parse_timestamp(timestamp)?;

        let mut parents = Vec::new();
        let mut manifest = Manifest::new();
        for line in lines {
            if let Some(parent) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent.to_string())?);
            } else if let Some(entry) = line.strip_prefix("file ") {
                let (blob_oid, name) = entry
                    .split_once(' ')
                    .context("Invalid commit object: invalid file line")?;
                manifest.insert(name.to_string(), ObjectId::try_parse(blob_oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {line:?}");
            }
        }

        Ok(Self::new(message.to_string(), timestamp, parents, manifest))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn object_id(&self) -> anyhow::Result<ObjectId> {
        Ok(self.oid.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{Commit, Manifest};
    use crate::artifacts::objects::object::{Object, Packable, Unpackable};
    use crate::artifacts::objects::object_id::ObjectId;
    use crate::artifacts::objects::object_type::ObjectType;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn sample_commit() -> Commit {
        let timestamp = DateTime::parse_from_rfc3339("2017-11-09T20:00:05-08:00").unwrap();
        let manifest = Manifest::from([
            ("wug.txt".to_string(), ObjectId::hash_of(b"wug")),
            ("notes with spaces.txt".to_string(), ObjectId::hash_of(b"notes")),
        ]);

        Commit::new(
            "A commit message.\nwith a second line".to_string(),
            timestamp,
            vec![Commit::initial().oid().clone()],
            manifest,
        )
    }

    fn decode(commit: &Commit) -> Commit {
        let bytes = commit.serialize().unwrap();
        let mut reader = Cursor::new(bytes);
        assert_eq!(
            ObjectType::parse_object_type(&mut reader).unwrap(),
            ObjectType::Commit
        );

        Commit::deserialize(reader).unwrap()
    }

    #[test]
    fn cached_id_matches_hash_of_encoding() {
        let commit = sample_commit();

        assert_eq!(
            commit.object_id().unwrap(),
            ObjectId::hash_of(&commit.serialize().unwrap())
        );
    }

    #[test]
    fn decoding_preserves_every_field_and_the_id() {
        let commit = sample_commit();

        assert_eq!(decode(&commit), commit);
        assert_eq!(decode(&Commit::initial()), Commit::initial());
    }

    #[test]
    fn identical_fields_produce_identical_ids() {
        assert_eq!(sample_commit().oid(), sample_commit().oid());
        assert_eq!(Commit::initial().oid(), Commit::initial().oid());
    }

    #[test]
    fn changing_any_field_changes_the_id() {
        let base = sample_commit();

        let message = Commit::new(
            "other".to_string(),
            base.timestamp(),
            base.parents().to_vec(),
            base.manifest().clone(),
        );
        let timestamp = Commit::new(
            base.message().to_string(),
            base.timestamp() + chrono::Duration::seconds(1),
            base.parents().to_vec(),
            base.manifest().clone(),
        );
        let parents = Commit::new(
            base.message().to_string(),
            base.timestamp(),
            vec![],
            base.manifest().clone(),
        );
        let mut changed_manifest = base.manifest().clone();
        changed_manifest.insert("wug.txt".to_string(), ObjectId::hash_of(b"changed"));
        let manifest = Commit::new(
            base.message().to_string(),
            base.timestamp(),
            base.parents().to_vec(),
            changed_manifest,
        );

        for variant in [message, timestamp, parents, manifest] {
            assert_ne!(variant.oid(), base.oid());
        }
    }

    #[test]
    fn initial_commit_has_epoch_timestamp_and_no_parent() {
        let root = Commit::initial();

        assert_eq!(root.timestamp().timestamp(), 0);
        assert!(root.parent().is_none());
        assert!(root.manifest().is_empty());
        assert_eq!(root.message(), "initial commit");
    }

    #[test]
    fn merge_commits_expose_both_parents() {
        let first = ObjectId::hash_of(b"first");
        let second = ObjectId::hash_of(b"second");
        let merge = Commit::new(
            "Merged other into master.".to_string(),
            DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset(),
            vec![first.clone(), second.clone()],
            Manifest::new(),
        );

        assert!(merge.is_merge());
        assert_eq!(merge.parent(), Some(&first));
        assert_eq!(merge.secondary_parent(), Some(&second));
        assert_eq!(decode(&merge), merge);
    }
}
