//! Staging area (index)
//!
//! The index holds two sets of pending changes:
//!
//! - staged for addition: file name to the contents to record in the next commit
//! - staged for removal: file name to the last tracked contents, kept so it can be diffed
//!
//! A name is in at most one of the two sets. The index is loaded with `rehydrate`, mutated in
//! memory, and persisted with `write_updates`, which mirrors both sets into
//! `index/addition/<name>` and `index/removal/<name>`.

use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index directory (typically `.gitlet/index`)
    path: Box<Path>,
    additions: BTreeMap<String, Bytes>,
    removals: BTreeMap<String, Bytes>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            additions: BTreeMap::new(),
            removals: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn additions_path(&self) -> Box<Path> {
        self.path.join("addition").into_boxed_path()
    }

    pub fn removals_path(&self) -> Box<Path> {
        self.path.join("removal").into_boxed_path()
    }

    /// Load both sets from disk, discarding any in-memory state
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.additions = Self::read_entries(&self.additions_path())?;
        self.removals = Self::read_entries(&self.removals_path())?;
        self.changed = false;

        Ok(())
    }

    pub fn stage_for_addition(&mut self, name: &str, content: Bytes) {
        self.removals.remove(name);
        self.additions.insert(name.to_string(), content);
        self.changed = true;
    }

    pub fn stage_for_removal(&mut self, name: &str, content: Bytes) {
        self.additions.remove(name);
        self.removals.insert(name.to_string(), content);
        self.changed = true;
    }

    pub fn unstage_for_addition(&mut self, name: &str) -> Option<Bytes> {
        let removed = self.additions.remove(name);
        self.changed |= removed.is_some();
        removed
    }

    pub fn unstage_for_removal(&mut self, name: &str) -> Option<Bytes> {
        let removed = self.removals.remove(name);
        self.changed |= removed.is_some();
        removed
    }

    pub fn clear(&mut self) {
        self.changed |= !self.is_empty();
        self.additions.clear();
        self.removals.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn is_staged_for_addition(&self, name: &str) -> bool {
        self.additions.contains_key(name)
    }

    pub fn additions(&self) -> &BTreeMap<String, Bytes> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeMap<String, Bytes> {
        &self.removals
    }

    /// Mirror the in-memory sets to disk; a no-op when nothing changed
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        Self::write_entries(&self.additions_path(), &self.additions)?;
        Self::write_entries(&self.removals_path(), &self.removals)?;
        self.changed = false;

        Ok(())
    }

    fn read_entries(dir: &Path) -> anyhow::Result<BTreeMap<String, Bytes>> {
        let mut entries = BTreeMap::new();
        if !dir.exists() {
            return Ok(entries);
        }

        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("failed to list staged files in {:?}", dir))?
        {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let content = std::fs::read(entry.path())
                .with_context(|| format!("failed to read staged file {:?}", entry.path()))?;
            entries.insert(
                entry.file_name().to_string_lossy().to_string(),
                Bytes::from(content),
            );
        }

        Ok(entries)
    }

    fn write_entries(dir: &Path, entries: &BTreeMap<String, Bytes>) -> anyhow::Result<()> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create staging directory {:?}", dir))?;

        // drop files whose entries were unstaged
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if !entries.contains_key(&name) {
                std::fs::remove_file(entry.path())
                    .with_context(|| format!("failed to unstage {:?}", entry.path()))?;
            }
        }

        for (name, content) in entries {
            std::fs::write(dir.join(name), content)
                .with_context(|| format!("failed to stage {name} in {:?}", dir))?;
        }

        Ok(())
    }
}
