use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::Status;
use std::io::Write;

impl Repository {
    pub fn status(&mut self) -> anyhow::Result<()> {
        let mut index = self.index();
        // Load the staging area from the disk
        index.rehydrate()?;

        let status = Status::new(self).initialize(&index)?;

        write!(self.writer(), "{status}")?;

        Ok(())
    }
}
