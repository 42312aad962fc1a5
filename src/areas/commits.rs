//! Commit store
//!
//! Persists immutable commits keyed by their fingerprint and answers the history queries the
//! commands need: lookup by full or abbreviated fingerprint, lookup by message, the
//! first-parent chain used by `log`, and the full ancestor walk used by `merge`.

use crate::areas::database::Database;
use crate::artifacts::log::rev_list::{AncestorWalk, FirstParentWalk};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

#[derive(Debug, new)]
pub struct CommitStore {
    database: Database,
}

impl CommitStore {
    pub fn path(&self) -> &std::path::Path {
        self.database.objects_path()
    }

    pub fn save(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        self.database.store(commit)
    }

    pub fn get(&self, commit_oid: &ObjectId) -> anyhow::Result<Option<Commit>> {
        self.database.parse_object_as_commit(commit_oid)
    }

    /// Like `get`, but a missing commit is an integrity error
    pub fn load(&self, commit_oid: &ObjectId) -> anyhow::Result<Commit> {
        self.get(commit_oid)?
            .ok_or_else(|| anyhow::anyhow!("commit {commit_oid} is missing from the store"))
    }

    /// Resolve a full fingerprint or an abbreviation of one.
    ///
    /// An exact match wins; otherwise the prefix must match exactly one stored commit.
    /// Ambiguous prefixes resolve to nothing.
    pub fn get_by_fingerprint(&self, id_or_prefix: &str) -> anyhow::Result<Option<Commit>> {
        if let Ok(commit_oid) = ObjectId::try_parse(id_or_prefix.to_string())
            && let Some(commit) = self.get(&commit_oid)?
        {
            return Ok(Some(commit));
        }

        if id_or_prefix.is_empty() {
            return Ok(None);
        }

        let candidates = self.database.find_objects_by_prefix(id_or_prefix)?;
        match candidates.as_slice() {
            [commit_oid] => self.get(commit_oid),
            [] => Ok(None),
            _ => {
                tracing::warn!(
                    prefix = id_or_prefix,
                    candidates = candidates.len(),
                    "ambiguous commit prefix"
                );
                Ok(None)
            }
        }
    }

    /// Every commit whose message is exactly `message`, ordered by fingerprint
    pub fn get_by_message(&self, message: &str) -> anyhow::Result<Vec<Commit>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|commit| commit.message() == message)
            .collect())
    }

    /// Every stored commit, ordered by fingerprint
    pub fn all(&self) -> anyhow::Result<Vec<Commit>> {
        self.database
            .list_object_ids()?
            .iter()
            .map(|commit_oid| self.load(commit_oid))
            .collect()
    }

    /// `commit` and everything reachable from it, depth-first, primary parent first
    pub fn ancestors(&self, commit: &Commit) -> anyhow::Result<Vec<Commit>> {
        AncestorWalk::new(commit.oid().clone(), |oid| self.load(oid)).collect()
    }

    /// `commit` followed by its primary-parent chain down to the root
    pub fn chain(&self, commit: &Commit) -> anyhow::Result<Vec<Commit>> {
        FirstParentWalk::new(commit.oid().clone(), |oid| self.load(oid)).collect()
    }
}
