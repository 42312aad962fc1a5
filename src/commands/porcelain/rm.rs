use crate::areas::repository::Repository;
use crate::artifacts::core::user_error::UserError;

impl Repository {
    pub fn rm(&mut self, file: &str) -> anyhow::Result<()> {
        let mut index = self.index();
        // Load the staging area from the disk
        index.rehydrate()?;

        let head = self.head_commit()?;
        let tracked = head.tracked(file).cloned();

        if !index.is_staged_for_addition(file) && tracked.is_none() {
            return Err(UserError::NoReasonToRemove.into());
        }

        index.unstage_for_addition(file);

        if let Some(blob_oid) = tracked {
            let content = self.blobs().load(&blob_oid)?;
            index.stage_for_removal(file, content);
            self.workspace().remove_file(file)?;
        }

        index.write_updates()?;

        Ok(())
    }
}
