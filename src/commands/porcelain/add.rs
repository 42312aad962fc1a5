use crate::areas::repository::Repository;
use crate::artifacts::core::user_error::UserError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;

impl Repository {
    pub fn add(&mut self, file: &str) -> anyhow::Result<()> {
        if !self.workspace().contains(file) {
            return Err(UserError::FileNotFound.into());
        }

        let mut index = self.index();
        // Load the staging area from the disk
        index.rehydrate()?;

        let content = self.workspace().read_file(file)?;
        let blob_oid = Blob::new(content.clone()).object_id()?;
        let head = self.head_commit()?;

        if head.tracked(file) == Some(&blob_oid) {
            // identical to the tracked version, nothing to stage
            index.unstage_for_addition(file);
        } else {
            index.stage_for_addition(file, content);
        }
        index.unstage_for_removal(file);

        index.write_updates()?;

        Ok(())
    }
}
