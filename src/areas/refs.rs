//! Branch pointers and HEAD
//!
//! Every branch is a file under `branches/` named after the branch (hierarchical names such
//! as `feature/login` become nested directories) and holding the fingerprint of its tip
//! commit. `HEAD` is a single file holding the name of the checked-out branch; the current
//! commit is always `branch(HEAD).head`.
//!
//! Writes overwrite in place: the last writer wins.

use crate::artifacts::branch::Branch;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::Path;
use walkdir::WalkDir;

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.gitlet`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> Box<Path> {
        self.path.join("HEAD").into_boxed_path()
    }

    pub fn branches_path(&self) -> Box<Path> {
        self.path.join("branches").into_boxed_path()
    }

    /// Name of the checked-out branch
    pub fn head(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;

        BranchName::try_parse(content.trim().to_string())
            .with_context(|| format!("HEAD at {:?} does not name a branch", head_path))
    }

    pub fn set_head(&self, branch: &Branch) -> anyhow::Result<()> {
        self.update_ref_file(self.head_path(), branch.name().as_ref())
    }

    /// The branch HEAD points at
    pub fn current_branch(&self) -> anyhow::Result<Branch> {
        let name = self.head()?;

        self.get(&name)?
            .with_context(|| format!("HEAD points at missing branch {name}"))
    }

    pub fn is_current_branch(&self, name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.head()? == name)
    }

    pub fn get(&self, name: &BranchName) -> anyhow::Result<Option<Branch>> {
        let branch_path = self.branches_path().join(name.as_ref());
        if !branch_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("failed to read branch file at {:?}", branch_path))?;
        let head = ObjectId::try_parse(content.trim().to_string())
            .with_context(|| format!("branch file at {:?} is corrupt", branch_path))?;

        Ok(Some(Branch::new(name.clone(), head)))
    }

    pub fn contains(&self, name: &BranchName) -> bool {
        self.branches_path().join(name.as_ref()).is_file()
    }

    pub fn save(&self, branch: &Branch) -> anyhow::Result<()> {
        let branch_path = self.branches_path().join(branch.name().as_ref());
        tracing::debug!(branch = %branch.name(), head = %branch.head(), "updating branch");

        self.update_ref_file(branch_path.into_boxed_path(), branch.head().as_ref())
    }

    pub fn remove(&self, branch: &Branch) -> anyhow::Result<()> {
        let branch_path = self.branches_path().join(branch.name().as_ref());

        if branch_path.exists() {
            std::fs::remove_file(&branch_path).with_context(|| {
                format!("failed to delete branch file at {:?}", branch_path)
            })?;
            self.prune_branch_empty_parent_dirs(&branch_path)?;
        }

        Ok(())
    }

    /// Every branch, sorted by name
    pub fn all(&self) -> anyhow::Result<Vec<Branch>> {
        let branches_path = self.branches_path();

        let mut names = WalkDir::new(&branches_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&branches_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                BranchName::lookup(&name)
            })
            .collect::<Vec<_>>();
        names.sort();

        names
            .into_iter()
            .map(|name| {
                self.get(&name)?
                    .with_context(|| format!("branch {name} disappeared while listing"))
            })
            .collect()
    }

    fn update_ref_file(&self, path: Box<Path>, raw_ref: &str) -> anyhow::Result<()> {
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        std::fs::write(&path, raw_ref)
            .with_context(|| format!("failed to write ref file at {:?}", path))
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.branches_path().as_ref()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}
