//! Split point finder
//!
//! The split point of two branch tips is found by intersecting ancestor sets: every ancestor of
//! HEAD is collected into a set, then the ancestors of OTHER are walked depth-first (primary
//! parent first) and the first one already in the set wins.
//!
//! This is a "first found" common ancestor rather than the graph-theoretic lowest one. The two
//! coincide for ordinary two-way histories; in criss-cross histories an older ancestor may be
//! picked.

use crate::artifacts::log::rev_list::AncestorWalk;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

pub struct SplitPointFinder<F> {
    load: F,
}

impl<F> SplitPointFinder<F>
where
    F: Fn(&ObjectId) -> anyhow::Result<Commit>,
{
    pub fn new(load: F) -> Self {
        SplitPointFinder { load }
    }

    /// Split point of `head` and `other`, or `None` when their histories share no commit
    pub fn find(&self, head: &ObjectId, other: &ObjectId) -> anyhow::Result<Option<ObjectId>> {
        let head_ancestors = AncestorWalk::new(head.clone(), &self.load)
            .map(|commit| commit.map(|commit| commit.oid().clone()))
            .collect::<anyhow::Result<HashSet<_>>>()?;
        tracing::trace!(%head, ancestors = head_ancestors.len(), "collected HEAD ancestors");

        for commit in AncestorWalk::new(other.clone(), &self.load) {
            let commit = commit?;
            if head_ancestors.contains(commit.oid()) {
                tracing::debug!(%head, %other, split_point = %commit.oid(), "found split point");
                return Ok(Some(commit.oid().clone()));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::SplitPointFinder;
    use crate::artifacts::log::rev_list::tests::Graph;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    /// ```text
    /// A - B - C
    /// ```
    #[fixture]
    fn linear_history() -> Graph {
        let mut graph = Graph::default();
        graph.commit("A", &[]);
        graph.commit("B", &["A"]);
        graph.commit("C", &["B"]);
        graph
    }

    /// ```text
    /// A - B - D      (master)
    ///      \
    ///       C - E    (other)
    /// ```
    #[fixture]
    fn diverged_history() -> Graph {
        let mut graph = Graph::default();
        graph.commit("A", &[]);
        graph.commit("B", &["A"]);
        graph.commit("C", &["B"]);
        graph.commit("D", &["B"]);
        graph.commit("E", &["C"]);
        graph
    }

    /// ```text
    /// A - B ----- M      (master)
    ///  \         /
    ///   C ------+--- D   (other)
    /// ```
    #[fixture]
    fn previously_merged_history() -> Graph {
        let mut graph = Graph::default();
        graph.commit("A", &[]);
        graph.commit("B", &["A"]);
        graph.commit("C", &["A"]);
        graph.commit("M", &["B", "C"]);
        graph.commit("D", &["C"]);
        graph
    }

    fn split_point(graph: &Graph, head: &str, other: &str) -> Option<String> {
        let finder = SplitPointFinder::new(graph.loader());
        finder
            .find(&graph.oid(head), &graph.oid(other))
            .unwrap()
            .map(|oid| {
                let commit = graph.loader()(&oid).unwrap();
                commit.message().to_string()
            })
    }

    #[rstest]
    fn other_is_an_ancestor_of_head(linear_history: Graph) {
        assert_eq!(split_point(&linear_history, "C", "A").as_deref(), Some("A"));
    }

    #[rstest]
    fn head_is_an_ancestor_of_other(linear_history: Graph) {
        assert_eq!(split_point(&linear_history, "A", "C").as_deref(), Some("A"));
    }

    #[rstest]
    fn same_commit_is_its_own_split_point(linear_history: Graph) {
        assert_eq!(split_point(&linear_history, "B", "B").as_deref(), Some("B"));
    }

    #[rstest]
    fn diverged_branches_meet_at_the_fork(diverged_history: Graph) {
        assert_eq!(split_point(&diverged_history, "D", "E").as_deref(), Some("B"));
        assert_eq!(split_point(&diverged_history, "E", "D").as_deref(), Some("B"));
    }

    #[rstest]
    fn merged_in_commits_count_as_head_ancestors(previously_merged_history: Graph) {
        assert_eq!(
            split_point(&previously_merged_history, "M", "D").as_deref(),
            Some("C")
        );
    }

    #[test]
    fn unrelated_histories_have_no_split_point() {
        let mut graph = Graph::default();
        graph.commit("A", &[]);
        graph.commit("B", &["A"]);
        graph.commit("X", &[]);

        assert_eq!(split_point(&graph, "B", "X"), None);
    }
}
