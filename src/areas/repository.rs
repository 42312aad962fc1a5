use crate::areas::blobs::BlobStore;
use crate::areas::commits::CommitStore;
use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::config::{Config, GITLET_DIR};
use crate::artifacts::core::user_error::UserError;
use crate::artifacts::objects::commit::Commit;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Handle to one repository, constructed once from its root and threaded through every command
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: RefCell<Index>,
    blobs: BlobStore,
    commits: CommitStore,
    refs: Refs,
    workspace: Workspace,
    config: Config,
}

impl Repository {
    pub fn new(
        path: &Path,
        writer: Box<dyn std::io::Write>,
        config: Config,
    ) -> anyhow::Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;
        let gitlet_path = path.join(GITLET_DIR);

        let index = Index::new(gitlet_path.join("index").into_boxed_path());
        let blobs = BlobStore::new(Database::new(
            gitlet_path.join("objects").into_boxed_path(),
        ));
        let commits = CommitStore::new(Database::new(
            gitlet_path.join("commits").into_boxed_path(),
        ));
        let refs = Refs::new(gitlet_path.clone().into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            blobs,
            commits,
            refs,
            workspace,
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn gitlet_path(&self) -> Box<Path> {
        self.path.join(GITLET_DIR).into_boxed_path()
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    pub fn commits(&self) -> &CommitStore {
        &self.commits
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.gitlet_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.is_initialized() {
            return Err(UserError::NotInitialized.into());
        }

        Ok(())
    }

    /// Tip of the checked-out branch
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        let branch = self.refs.current_branch()?;
        self.commits.load(branch.head())
    }
}
