//! Working-tree migration between two commits
//!
//! Moving the working tree from the current commit to a target commit (checkout of a branch,
//! reset) happens in two phases:
//!
//! 1. `plan` checks that no untracked working file would be overwritten and loads every blob the
//!    target needs; nothing on disk changes in this phase
//! 2. `apply` deletes the files tracked by the current commit, writes the target's files and
//!    clears the staging area
//!
//! A failed plan therefore leaves the working tree and the index untouched.

use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::checkout::untracked::find_untracked_in_the_way;
use crate::artifacts::core::user_error::UserError;
use crate::artifacts::objects::commit::Commit;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};

pub struct Migration<'r> {
    repository: &'r Repository,
    /// Files tracked by the current commit and absent from the target
    deletions: BTreeSet<String>,
    /// Full contents of the target snapshot
    writes: BTreeMap<String, Bytes>,
}

impl<'r> Migration<'r> {
    pub fn plan(
        repository: &'r Repository,
        current: &Commit,
        target: &Commit,
    ) -> anyhow::Result<Self> {
        let working_files = repository.workspace().list_files()?;
        if let Some(name) =
            find_untracked_in_the_way(&working_files, current.manifest(), target.manifest().keys())
        {
            tracing::debug!(file = %name, target = %target.oid(), "untracked file blocks checkout");
            return Err(UserError::UntrackedFileInTheWay.into());
        }

        let deletions = current
            .manifest()
            .keys()
            .filter(|name| !target.is_tracked(name))
            .cloned()
            .collect::<BTreeSet<_>>();

        let writes = target
            .manifest()
            .iter()
            .map(|(name, blob_oid)| -> anyhow::Result<(String, Bytes)> {
                Ok((name.clone(), repository.blobs().load(blob_oid)?))
            })
            .collect::<anyhow::Result<BTreeMap<_, _>>>()?;

        Ok(Migration {
            repository,
            deletions,
            writes,
        })
    }

    pub fn apply(self, index: &mut Index) -> anyhow::Result<()> {
        let workspace = self.repository.workspace();

        for name in &self.deletions {
            workspace.remove_file(name)?;
        }
        for (name, content) in &self.writes {
            workspace.write_file(name, content)?;
        }

        index.clear();
        index.write_updates()?;

        tracing::debug!(
            deleted = self.deletions.len(),
            written = self.writes.len(),
            "migrated working tree"
        );

        Ok(())
    }
}
