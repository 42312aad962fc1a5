use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Manifest;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

/// Fingerprints of the files currently in the working tree
pub type WorkingSnapshot = BTreeMap<String, ObjectId>;

/// Everything `status` reports, each section sorted by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) branches: Vec<BranchName>,
    pub(crate) current_branch: BranchName,
    pub(crate) staged: BTreeSet<String>,
    pub(crate) removed: BTreeSet<String>,
    pub(crate) unstaged: BTreeMap<String, WorkspaceChangeType>,
    pub(crate) untracked: BTreeSet<String>,
}

impl StatusInfo {
    /// Classify files from the HEAD manifest, the staged additions (by fingerprint), the staged
    /// removals and the working tree.
    pub fn inspect(
        branches: Vec<BranchName>,
        current_branch: BranchName,
        head: &Manifest,
        additions: &BTreeMap<String, ObjectId>,
        removals: &BTreeSet<String>,
        working: &WorkingSnapshot,
    ) -> Self {
        let mut unstaged = BTreeMap::new();

        for (name, staged_oid) in additions {
            match working.get(name) {
                None => {
                    unstaged.insert(name.clone(), WorkspaceChangeType::Deleted);
                }
                Some(working_oid) if working_oid != staged_oid => {
                    unstaged.insert(name.clone(), WorkspaceChangeType::Modified);
                }
                Some(_) => {}
            }
        }

        for (name, tracked_oid) in head {
            if additions.contains_key(name) || removals.contains(name) {
                continue;
            }

            match working.get(name) {
                None => {
                    unstaged.insert(name.clone(), WorkspaceChangeType::Deleted);
                }
                Some(working_oid) if working_oid != tracked_oid => {
                    unstaged.insert(name.clone(), WorkspaceChangeType::Modified);
                }
                Some(_) => {}
            }
        }

        let untracked = working
            .keys()
            .filter(|name| {
                !additions.contains_key(*name)
                    && (!head.contains_key(*name) || removals.contains(*name))
            })
            .cloned()
            .collect();

        StatusInfo {
            branches,
            current_branch,
            staged: additions.keys().cloned().collect(),
            removed: removals.clone(),
            unstaged,
            untracked,
        }
    }
}

impl std::fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Branches ===")?;
        for branch in &self.branches {
            if branch == &self.current_branch {
                writeln!(f, "*{branch}")?;
            } else {
                writeln!(f, "{branch}")?;
            }
        }
        writeln!(f)?;

        writeln!(f, "=== Staged Files ===")?;
        for name in &self.staged {
            writeln!(f, "{name}")?;
        }
        writeln!(f)?;

        writeln!(f, "=== Removed Files ===")?;
        for name in &self.removed {
            writeln!(f, "{name}")?;
        }
        writeln!(f)?;

        writeln!(f, "=== Modifications Not Staged For Commit ===")?;
        for (name, change) in &self.unstaged {
            writeln!(f, "{name} ({change})")?;
        }
        writeln!(f)?;

        writeln!(f, "=== Untracked Files ===")?;
        for name in &self.untracked {
            writeln!(f, "{name}")?;
        }
        writeln!(f)
    }
}

/// Collects a `StatusInfo` from the repository's persisted state
#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let refs = self.repository.refs();
        let branches = refs
            .all()?
            .into_iter()
            .map(|branch| branch.name().clone())
            .collect::<Vec<_>>();
        let current_branch = refs.head()?;
        let head = self.repository.head_commit()?;

        let additions = index
            .additions()
            .iter()
            .map(|(name, content)| -> anyhow::Result<(String, ObjectId)> {
                Ok((name.clone(), Blob::new(content.clone()).object_id()?))
            })
            .collect::<anyhow::Result<BTreeMap<_, _>>>()?;
        let removals = index.removals().keys().cloned().collect::<BTreeSet<_>>();
        let working = self.scan_workspace()?;

        Ok(StatusInfo::inspect(
            branches,
            current_branch,
            head.manifest(),
            &additions,
            &removals,
            &working,
        ))
    }

    fn scan_workspace(&self) -> anyhow::Result<WorkingSnapshot> {
        let workspace = self.repository.workspace();

        workspace
            .list_files()?
            .into_iter()
            .map(|name| -> anyhow::Result<(String, ObjectId)> {
                let blob = Blob::new(workspace.read_file(&name)?);
                Ok((name, blob.object_id()?))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{StatusInfo, WorkingSnapshot};
    use crate::artifacts::branch::branch_name::BranchName;
    use crate::artifacts::objects::commit::Manifest;
    use crate::artifacts::objects::object_id::ObjectId;
    use crate::artifacts::status::file_change::WorkspaceChangeType;
    use pretty_assertions::assert_eq;
    use std::collections::{BTreeMap, BTreeSet};

    fn oid(content: &str) -> ObjectId {
        ObjectId::hash_of(content.as_bytes())
    }

    fn files(entries: &[(&str, &str)]) -> BTreeMap<String, ObjectId> {
        entries
            .iter()
            .map(|(name, content)| (name.to_string(), oid(content)))
            .collect()
    }

    fn names(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn inspect(
        head: &Manifest,
        additions: &BTreeMap<String, ObjectId>,
        removals: &BTreeSet<String>,
        working: &WorkingSnapshot,
    ) -> StatusInfo {
        StatusInfo::inspect(
            vec![BranchName::default_branch()],
            BranchName::default_branch(),
            head,
            additions,
            removals,
            working,
        )
    }

    #[test]
    fn clean_tree_reports_nothing() {
        let head = files(&[("a.txt", "a")]);

        let status = inspect(&head, &BTreeMap::new(), &BTreeSet::new(), &head.clone());

        assert!(status.staged.is_empty());
        assert!(status.removed.is_empty());
        assert!(status.unstaged.is_empty());
        assert!(status.untracked.is_empty());
    }

    #[test]
    fn classifies_unstaged_changes() {
        let head = files(&[("edited.txt", "v1"), ("deleted.txt", "d"), ("same.txt", "s")]);
        let additions = files(&[("staged.txt", "v1"), ("staged-gone.txt", "x")]);
        let working = files(&[
            ("edited.txt", "v2"),
            ("same.txt", "s"),
            ("staged.txt", "v2"),
        ]);

        let status = inspect(&head, &additions, &BTreeSet::new(), &working);

        assert_eq!(
            status.unstaged,
            BTreeMap::from([
                ("deleted.txt".to_string(), WorkspaceChangeType::Deleted),
                ("edited.txt".to_string(), WorkspaceChangeType::Modified),
                ("staged-gone.txt".to_string(), WorkspaceChangeType::Deleted),
                ("staged.txt".to_string(), WorkspaceChangeType::Modified),
            ])
        );
        assert!(status.untracked.is_empty());
    }

    #[test]
    fn removed_then_recreated_files_are_untracked() {
        let head = files(&[("a.txt", "a")]);
        let removals = names(&["a.txt"]);
        let working = files(&[("a.txt", "a"), ("new.txt", "n")]);

        let status = inspect(&head, &BTreeMap::new(), &removals, &working);

        assert_eq!(status.removed, names(&["a.txt"]));
        assert_eq!(status.untracked, names(&["a.txt", "new.txt"]));
        assert!(status.unstaged.is_empty());
    }

    #[test]
    fn renders_five_sections_with_current_branch_marked() {
        let head = files(&[("a.txt", "a")]);
        let additions = files(&[("b.txt", "b")]);
        let working = files(&[("a.txt", "changed"), ("b.txt", "b"), ("c.txt", "c")]);
        let status = StatusInfo::inspect(
            vec![
                BranchName::try_parse("feature".to_string()).unwrap(),
                BranchName::default_branch(),
            ],
            BranchName::default_branch(),
            &head,
            &additions,
            &BTreeSet::new(),
            &working,
        );

        assert_eq!(
            status.to_string(),
            "=== Branches ===\n\
             feature\n\
             *master\n\
             \n\
             === Staged Files ===\n\
             b.txt\n\
             \n\
             === Removed Files ===\n\
             \n\
             === Modifications Not Staged For Commit ===\n\
             a.txt (modified)\n\
             \n\
             === Untracked Files ===\n\
             c.txt\n\
             \n"
        );
    }
}
