use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::Branch;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::user_error::UserError;
use crate::artifacts::objects::commit::Commit;

impl Repository {
    /// Restore `file` from the current commit; the staging area is left alone
    pub fn checkout_file(&mut self, file: &str) -> anyhow::Result<()> {
        let head = self.head_commit()?;

        self.restore_file(&head, file)
    }

    /// Restore `file` from the commit identified by a full or abbreviated id
    pub fn checkout_file_at(&mut self, commit_id: &str, file: &str) -> anyhow::Result<()> {
        let commit = self.resolve_commit(commit_id)?;

        self.restore_file(&commit, file)
    }

    /// Switch to `branch_name`, replacing the working tree with its tip snapshot
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch = BranchName::lookup(branch_name)
            .map(|name| self.refs().get(&name))
            .transpose()?
            .flatten()
            .ok_or(UserError::NoSuchBranch)?;

        if self.refs().is_current_branch(branch.name())? {
            return Err(UserError::AlreadyOnBranch.into());
        }

        let mut index = self.index();
        // Load the staging area from the disk
        index.rehydrate()?;

        self.switch_branch(&mut index, &branch)
    }

    /// Migrate the working tree to `branch`'s tip and point HEAD at it
    pub(crate) fn switch_branch(&self, index: &mut Index, branch: &Branch) -> anyhow::Result<()> {
        let current = self.head_commit()?;
        let target = self.commits().load(branch.head())?;

        Migration::plan(self, &current, &target)?.apply(index)?;
        self.refs().set_head(branch)?;

        tracing::debug!(branch = %branch.name(), head = %branch.head(), "switched branch");

        Ok(())
    }

    pub(crate) fn resolve_commit(&self, commit_id: &str) -> anyhow::Result<Commit> {
        self.commits()
            .get_by_fingerprint(commit_id)?
            .ok_or_else(|| UserError::NoSuchCommit.into())
    }

    fn restore_file(&self, commit: &Commit, file: &str) -> anyhow::Result<()> {
        let blob_oid = commit.tracked(file).ok_or(UserError::FileNotInCommit)?;
        let content = self.blobs().load(blob_oid)?;

        self.workspace().write_file(file, &content)
    }
}
