use thiserror::Error;

/// Expected failures caused by user input or repository state.
///
/// Every variant renders to the exact text shown to the user. Commands return these wrapped
/// in `anyhow::Error` before touching any persisted state; the binary prints the message and
/// exits successfully.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,
    #[error("File does not exist.")]
    FileNotFound,
    #[error("Please enter a commit message.")]
    EmptyCommitMessage,
    #[error("No changes added to the commit.")]
    NothingStaged,
    #[error("No reason to remove the file.")]
    NoReasonToRemove,
    #[error("Found no commit with that message.")]
    NoCommitWithMessage,
    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("No such branch exists.")]
    NoSuchBranch,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,
    #[error("A branch with that name already exists.")]
    BranchExists,
    #[error("A branch with that name does not exist.")]
    BranchNotFound,
    #[error("Cannot remove the current branch.")]
    RemoveCurrentBranch,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    MergeWithItself,
    #[error("Incorrect operands.")]
    IncorrectOperands,
    #[error("Invalid branch name: {0}")]
    InvalidBranchName(String),
}
