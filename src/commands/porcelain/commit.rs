use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::core::user_error::UserError;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let mut index = self.index();
        // Load the staging area from the disk
        index.rehydrate()?;

        self.commit_index(&mut index, message, None)?;

        Ok(())
    }

    /// Freeze the staging area into a commit on top of HEAD and advance the current branch.
    ///
    /// Merge commits pass OTHER's tip as `secondary_parent`; they are recorded even when the
    /// merge staged nothing.
    pub(crate) fn commit_index(
        &self,
        index: &mut Index,
        message: &str,
        secondary_parent: Option<ObjectId>,
    ) -> anyhow::Result<Commit> {
        if message.is_empty() {
            return Err(UserError::EmptyCommitMessage.into());
        }
        if index.is_empty() && secondary_parent.is_none() {
            return Err(UserError::NothingStaged.into());
        }

        let branch = self.refs().current_branch()?;
        let parent = self.commits().load(branch.head())?;

        // owned copy, the parent's manifest stays as persisted
        let mut manifest = parent.manifest().clone();
        for (name, content) in index.additions() {
            let blob_oid = self.blobs().save(content.clone())?;
            manifest.insert(name.clone(), blob_oid);
        }
        for name in index.removals().keys() {
            manifest.remove(name);
        }

        let parents = std::iter::once(parent.oid().clone())
            .chain(secondary_parent)
            .collect::<Vec<_>>();
        let commit = Commit::new(
            message.to_string(),
            self.config().commit_timestamp(),
            parents,
            manifest,
        );

        self.commits().save(&commit)?;
        self.refs()
            .save(&branch.advanced_to(commit.oid().clone()))?;

        index.clear();
        index.write_updates()?;

        tracing::debug!(
            oid = %commit.oid(),
            files = commit.manifest().len(),
            merge = commit.is_merge(),
            "created commit"
        );

        Ok(commit)
    }
}
