use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::untracked::find_untracked_in_the_way;
use crate::artifacts::core::user_error::UserError;
use crate::artifacts::merge::resolution::{self, MergeAction, conflict_content};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::io::Write;

/// Working-tree change decided for one file, with its contents already loaded
enum MergeStep {
    Stage(Bytes),
    Remove(Bytes),
}

impl Repository {
    #[tracing::instrument(skip(self))]
    pub fn merge(&mut self, branch_name: &str) -> anyhow::Result<()> {
        let mut index = self.index();
        // Load the staging area from the disk
        index.rehydrate()?;

        if !index.is_empty() {
            return Err(UserError::UncommittedChanges.into());
        }

        let other_branch = BranchName::lookup(branch_name)
            .map(|name| self.refs().get(&name))
            .transpose()?
            .flatten()
            .ok_or(UserError::BranchNotFound)?;
        let current_branch = self.refs().current_branch()?;

        if other_branch.name() == current_branch.name() {
            return Err(UserError::MergeWithItself.into());
        }

        let head = self.commits().load(current_branch.head())?;
        let other = self.commits().load(other_branch.head())?;

        let split_oid = SplitPointFinder::new(|oid: &ObjectId| self.commits().load(oid))
            .find(head.oid(), other.oid())?
            .ok_or_else(|| {
                anyhow::anyhow!("{} and {} share no history", head.oid(), other.oid())
            })?;

        if &split_oid == other.oid() {
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        if &split_oid == head.oid() {
            self.switch_branch(&mut index, &other_branch)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split = self.commits().load(&split_oid)?;
        let actions = resolution::plan(split.manifest(), head.manifest(), other.manifest());

        let working_files = self.workspace().list_files()?;
        let touched = actions
            .iter()
            .filter(|(_, action)| action.touches_working_file())
            .map(|(name, _)| name);
        if let Some(name) = find_untracked_in_the_way(&working_files, head.manifest(), touched) {
            tracing::debug!(file = %name, "untracked file blocks merge");
            return Err(UserError::UntrackedFileInTheWay.into());
        }

        // load every blob before touching the working tree
        let mut conflicted = false;
        let mut steps = Vec::new();
        for (name, action) in &actions {
            let step = match action {
                MergeAction::TakeOther(blob_oid) => {
                    MergeStep::Stage(self.blobs().load(blob_oid)?)
                }
                MergeAction::Conflict => {
                    let head_content = self.load_tracked(&head, name)?;
                    let other_content = self.load_tracked(&other, name)?;
                    conflicted = true;
                    tracing::debug!(file = %name, "conflict");

                    MergeStep::Stage(conflict_content(
                        head_content.as_deref(),
                        other_content.as_deref(),
                    ))
                }
                MergeAction::Remove => match self.load_tracked(&head, name)? {
                    Some(content) => MergeStep::Remove(content),
                    None => continue,
                },
                MergeAction::KeepHead | MergeAction::Unchanged => continue,
            };
            steps.push((name, step));
        }

        for (name, step) in steps {
            match step {
                MergeStep::Stage(content) => {
                    self.workspace().write_file(name, &content)?;
                    index.stage_for_addition(name, content);
                }
                MergeStep::Remove(content) => {
                    self.workspace().remove_file(name)?;
                    index.stage_for_removal(name, content);
                }
            }
        }

        let message = format!(
            "Merged {} into {}.",
            other_branch.name(),
            current_branch.name()
        );
        self.commit_index(&mut index, &message, Some(other.oid().clone()))?;

        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    fn load_tracked(&self, commit: &Commit, name: &str) -> anyhow::Result<Option<Bytes>> {
        commit
            .tracked(name)
            .map(|blob_oid| self.blobs().load(blob_oid))
            .transpose()
    }
}
