use crate::areas::repository::Repository;
use crate::artifacts::core::user_error::UserError;
use crate::artifacts::log::entry::format_entry;
use std::io::Write;

impl Repository {
    /// History of the current branch, following primary parents back to the root
    pub fn log(&mut self) -> anyhow::Result<()> {
        let head = self.head_commit()?;

        for commit in self.commits().chain(&head)? {
            write!(self.writer(), "{}", format_entry(&commit))?;
        }

        Ok(())
    }

    /// Every commit ever made, in fingerprint order
    pub fn global_log(&mut self) -> anyhow::Result<()> {
        for commit in self.commits().all()? {
            write!(self.writer(), "{}", format_entry(&commit))?;
        }

        Ok(())
    }

    pub fn find(&mut self, message: &str) -> anyhow::Result<()> {
        let commits = self.commits().get_by_message(message)?;
        if commits.is_empty() {
            return Err(UserError::NoCommitWithMessage.into());
        }

        for commit in commits {
            writeln!(self.writer(), "{}", commit.oid())?;
        }

        Ok(())
    }
}
