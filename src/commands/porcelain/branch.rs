use crate::areas::repository::Repository;
use crate::artifacts::branch::Branch;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::user_error::UserError;

impl Repository {
    /// Create a branch pointing at the current commit; HEAD does not move
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        if self.refs().contains(&branch_name) {
            return Err(UserError::BranchExists.into());
        }

        let current = self.refs().current_branch()?;
        self.refs()
            .save(&Branch::new(branch_name, current.head().clone()))?;

        Ok(())
    }

    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let branch = BranchName::lookup(branch_name)
            .map(|name| self.refs().get(&name))
            .transpose()?
            .flatten()
            .ok_or(UserError::BranchNotFound)?;

        if self.refs().is_current_branch(branch.name())? {
            return Err(UserError::RemoveCurrentBranch.into());
        }

        self.refs().remove(&branch)?;

        Ok(())
    }
}
