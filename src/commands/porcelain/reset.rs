use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Move the current branch to `commit_id` and check out its snapshot
    pub fn reset(&mut self, commit_id: &str) -> anyhow::Result<()> {
        let target = self.resolve_commit(commit_id)?;

        let mut index = self.index();
        // Load the staging area from the disk
        index.rehydrate()?;

        let branch = self.refs().current_branch()?;
        let current = self.commits().load(branch.head())?;

        Migration::plan(self, &current, &target)?.apply(&mut index)?;
        self.refs()
            .save(&branch.advanced_to(target.oid().clone()))?;

        Ok(())
    }
}
