//! Branches: validated names and the (name, commit) pointers stored under `branches/`

pub mod branch_name;

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

pub const DEFAULT_BRANCH: &str = "master";

/// A named, movable pointer to a commit
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Branch {
    name: BranchName,
    head: ObjectId,
}

impl Branch {
    pub fn name(&self) -> &BranchName {
        &self.name
    }

    pub fn head(&self) -> &ObjectId {
        &self.head
    }

    /// Same branch, now pointing at `head`
    pub fn advanced_to(self, head: ObjectId) -> Self {
        Branch { head, ..self }
    }
}
