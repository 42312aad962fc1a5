use crate::areas::repository::Repository;
use crate::artifacts::branch::Branch;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::user_error::UserError;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::fs;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.is_initialized() {
            return Err(UserError::AlreadyInitialized.into());
        }

        fs::create_dir_all(self.blobs().path())
            .context("Failed to create .gitlet/objects directory")?;

        fs::create_dir_all(self.commits().path())
            .context("Failed to create .gitlet/commits directory")?;

        fs::create_dir_all(self.refs().branches_path())
            .context("Failed to create .gitlet/branches directory")?;

        {
            let index = self.index();
            fs::create_dir_all(index.additions_path())
                .context("Failed to create .gitlet/index/addition directory")?;
            fs::create_dir_all(index.removals_path())
                .context("Failed to create .gitlet/index/removal directory")?;
        }

        let root = Commit::initial();
        self.commits()
            .save(&root)
            .context("Failed to store the initial commit")?;

        let master = Branch::new(BranchName::default_branch(), root.oid().clone());
        self.refs().save(&master)?;
        self.refs()
            .set_head(&master)
            .context("Failed to create initial HEAD reference")?;

        tracing::debug!(path = %self.path().display(), root = %root.oid(), "initialized repository");

        Ok(())
    }
}
