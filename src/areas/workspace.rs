//! Working-directory adapter
//!
//! The only component that touches files the user owns. The working tree is flat: plain files
//! directly under the repository root are candidates for tracking, subdirectories and the
//! metadata directory are ignored.

use crate::artifacts::core::config::GITLET_DIR;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    /// Names of all plain files at the root of the working tree, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = std::fs::read_dir(&self.path)
            .with_context(|| format!("failed to list working directory {:?}", self.path))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_ok_and(|file_type| file_type.is_file()))
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| self.file_path(name).is_some())
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    /// Whether `name` is a plain file directly under the root
    pub fn contains(&self, name: &str) -> bool {
        self.file_path(name).is_some_and(|path| path.is_file())
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let path = self.require_file_path(name)?;
        let content =
            std::fs::read(&path).with_context(|| format!("failed to read working file {name}"))?;

        Ok(Bytes::from(content))
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let path = self.require_file_path(name)?;
        if path.is_dir() {
            std::fs::remove_dir_all(&path)
                .with_context(|| format!("failed to replace directory {name} with a file"))?;
        }

        std::fs::write(&path, content).with_context(|| format!("failed to write working file {name}"))
    }

    /// Delete `name`; deleting an absent file is not an error
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        if !self.contains(name) {
            return Ok(());
        }

        let path = self.require_file_path(name)?;
        std::fs::remove_file(&path).with_context(|| format!("failed to delete working file {name}"))
    }

    /// Commit manifests are line-oriented, so a name must not span lines
    fn file_path(&self, name: &str) -> Option<PathBuf> {
        if name.contains(['\n', '\r']) {
            return None;
        }

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(file_name)), None) if file_name != GITLET_DIR => {
                Some(self.path.join(file_name))
            }
            _ => None,
        }
    }

    fn require_file_path(&self, name: &str) -> anyhow::Result<PathBuf> {
        self.file_path(name)
            .ok_or_else(|| anyhow::anyhow!("{name:?} is not a file name at the working tree root"))
    }
}
