use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

/// Walks primary-parent links from a start commit down to the root.
///
/// `load` resolves a fingerprint to its commit; a failed load ends the walk with that error.
pub struct FirstParentWalk<F> {
    load: F,
    next_oid: Option<ObjectId>,
}

impl<F> FirstParentWalk<F>
where
    F: FnMut(&ObjectId) -> anyhow::Result<Commit>,
{
    pub fn new(start: ObjectId, load: F) -> Self {
        FirstParentWalk {
            load,
            next_oid: Some(start),
        }
    }
}

impl<F> Iterator for FirstParentWalk<F>
where
    F: FnMut(&ObjectId) -> anyhow::Result<Commit>,
{
    type Item = anyhow::Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.next_oid.take()?;

        match (self.load)(&commit_oid) {
            Ok(commit) => {
                self.next_oid = commit.parent().cloned();
                Some(Ok(commit))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

/// Depth-first, pre-order walk over every ancestor of a start commit (itself included).
///
/// Primary parents are explored before secondary parents and each commit is yielded at most
/// once, so diamond-shaped histories produced by merges are visited in linear time.
pub struct AncestorWalk<F> {
    load: F,
    stack: Vec<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<F> AncestorWalk<F>
where
    F: FnMut(&ObjectId) -> anyhow::Result<Commit>,
{
    pub fn new(start: ObjectId, load: F) -> Self {
        AncestorWalk {
            load,
            stack: vec![start],
            visited: HashSet::new(),
        }
    }
}

impl<F> Iterator for AncestorWalk<F>
where
    F: FnMut(&ObjectId) -> anyhow::Result<Commit>,
{
    type Item = anyhow::Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(commit_oid) = self.stack.pop() {
            if !self.visited.insert(commit_oid.clone()) {
                continue;
            }

            return match (self.load)(&commit_oid) {
                Ok(commit) => {
                    // reversed so the primary parent is popped first
                    self.stack.extend(
                        commit
                            .parents()
                            .iter()
                            .rev()
                            .filter(|parent| !self.visited.contains(*parent))
                            .cloned(),
                    );
                    Some(Ok(commit))
                }
                Err(err) => {
                    self.stack.clear();
                    Some(Err(err))
                }
            };
        }

        None
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{AncestorWalk, FirstParentWalk};
    use crate::artifacts::objects::commit::{Commit, Manifest};
    use crate::artifacts::objects::object_id::ObjectId;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// In-memory commit graph keyed by label, for traversal tests
    #[derive(Default)]
    pub(crate) struct Graph {
        commits: HashMap<ObjectId, Commit>,
        labels: HashMap<String, ObjectId>,
    }

    impl Graph {
        pub(crate) fn commit(&mut self, label: &str, parents: &[&str]) -> ObjectId {
            let parents = parents.iter().map(|p| self.oid(p)).collect::<Vec<_>>();
            let timestamp = DateTime::from_timestamp(self.commits.len() as i64, 0)
                .unwrap()
                .fixed_offset();
            let commit = Commit::new(label.to_string(), timestamp, parents, Manifest::new());
            let oid = commit.oid().clone();

            self.commits.insert(oid.clone(), commit);
            self.labels.insert(label.to_string(), oid.clone());
            oid
        }

        pub(crate) fn oid(&self, label: &str) -> ObjectId {
            self.labels[label].clone()
        }

        pub(crate) fn loader(&self) -> impl Fn(&ObjectId) -> anyhow::Result<Commit> + '_ {
            |oid| {
                self.commits
                    .get(oid)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("unknown commit {oid}"))
            }
        }

        pub(crate) fn labels_of(commits: Vec<Commit>) -> Vec<String> {
            commits
                .into_iter()
                .map(|commit| commit.message().to_string())
                .collect()
        }
    }

    /// ```text
    ///   A - B - D - M
    ///    \     /   /
    ///     C --+   /
    ///      \     /
    ///       E --+
    /// ```
    fn diamond() -> Graph {
        let mut graph = Graph::default();
        graph.commit("A", &[]);
        graph.commit("B", &["A"]);
        graph.commit("C", &["A"]);
        graph.commit("D", &["B", "C"]);
        graph.commit("E", &["C"]);
        graph.commit("M", &["D", "E"]);
        graph
    }

    #[test]
    fn first_parent_walk_ignores_merged_in_history() {
        let graph = diamond();
        let commits = FirstParentWalk::new(graph.oid("M"), graph.loader())
            .collect::<anyhow::Result<Vec<_>>>()
            .unwrap();

        assert_eq!(Graph::labels_of(commits), vec!["M", "D", "B", "A"]);
    }

    #[test]
    fn ancestor_walk_visits_each_commit_once_primary_parent_first() {
        let graph = diamond();
        let commits = AncestorWalk::new(graph.oid("M"), graph.loader())
            .collect::<anyhow::Result<Vec<_>>>()
            .unwrap();

        assert_eq!(Graph::labels_of(commits), vec!["M", "D", "B", "A", "C", "E"]);
    }

    #[test]
    fn walks_surface_load_failures() {
        let graph = diamond();
        let mut walk = AncestorWalk::new(ObjectId::hash_of(b"missing"), graph.loader());

        assert!(walk.next().unwrap().is_err());
        assert!(walk.next().is_none());
    }
}
