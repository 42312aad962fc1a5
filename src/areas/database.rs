//! Content-addressed object database
//!
//! Each object is zlib-compressed and written to `<root>/<xx>/<yyyy...>` where `xxyyyy...` is
//! its fingerprint. Writes go through a temp file and a rename, and are skipped entirely when
//! the object already exists: objects are immutable, so re-storing is always a no-op.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        // write the object to disk unless it already exists
        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
            tracing::trace!(oid = %object_id, kind = %object.object_type(), "stored object");
        }

        Ok(object_id)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Option<Blob>> {
        match self.parse_object_as_bytes(object_id)? {
            Some((ObjectType::Blob, object_reader)) => Ok(Some(Blob::deserialize(object_reader)?)),
            Some((object_type, _)) => {
                anyhow::bail!("object {object_id} is a {object_type}, not a blob")
            }
            None => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Option<Commit>> {
        match self.parse_object_as_bytes(object_id)? {
            Some((ObjectType::Commit, object_reader)) => {
                let commit = Commit::deserialize(object_reader)?;
                if commit.oid() != object_id {
                    anyhow::bail!(
                        "commit object {object_id} is corrupt: content hashes to {}",
                        commit.oid()
                    );
                }
                Ok(Some(commit))
            }
            Some((object_type, _)) => {
                anyhow::bail!("object {object_id} is a {object_type}, not a commit")
            }
            None => Ok(None),
        }
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<Option<(ObjectType, Cursor<Bytes>)>> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.is_file() {
            return Ok(None);
        }

        let object_content = self.read_object(object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok(Some((object_type, object_reader)))
    }

    /// All object IDs in the database, sorted
    pub fn list_object_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut object_ids = WalkDir::new(&self.path)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| {
                let dir_name = entry.path().parent()?.file_name()?.to_string_lossy().to_string();
                let file_name = entry.file_name().to_string_lossy().to_string();
                ObjectId::try_parse(format!("{dir_name}{file_name}")).ok()
            })
            .collect::<Vec<_>>();
        object_ids.sort();

        Ok(object_ids)
    }

    /// Find all objects whose OID starts with the given prefix.
    ///
    /// For prefixes of 2+ characters only the matching fan-out directory is searched;
    /// shorter prefixes fall back to a full listing. If multiple matches are found, all are
    /// returned (indicating an ambiguous prefix).
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        if !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Vec::new());
        }

        if prefix.len() < 2 {
            return Ok(self
                .list_object_ids()?
                .into_iter()
                .filter(|oid| oid.starts_with(&prefix))
                .collect());
        }

        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);
        let mut matches = Vec::new();

        if dir_path.is_dir() {
            for entry in std::fs::read_dir(&dir_path)
                .with_context(|| format!("Unable to list object directory {}", dir_path.display()))?
            {
                let file_name = entry?.file_name();
                let file_name = file_name.to_string_lossy();

                if file_name.starts_with(file_prefix)
                    && let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}"))
                {
                    matches.push(oid);
                }
            }
        }
        matches.sort();

        Ok(matches)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

#[cfg(test)]
mod tests {
    use super::Database;
    use crate::artifacts::objects::blob::Blob;
    use crate::artifacts::objects::commit::Commit;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn database(dir: &TempDir) -> Database {
        Database::new(dir.path().join("objects").into_boxed_path())
    }

    #[test]
    fn missing_objects_are_not_errors() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);

        assert_eq!(
            database
                .parse_object_as_commit(Commit::initial().oid())
                .unwrap(),
            None
        );
        assert!(database.list_object_ids().unwrap().is_empty());
    }

    #[test]
    fn reading_a_blob_as_a_commit_fails_loudly() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);
        let oid = database.store(&Blob::new("text".into())).unwrap();

        assert!(database.parse_object_as_commit(&oid).is_err());
    }

    #[test]
    fn finds_objects_by_short_and_long_prefixes() {
        let dir = TempDir::new().unwrap();
        let database = database(&dir);
        let oid = database.store(&Commit::initial()).unwrap();

        assert_eq!(
            database.find_objects_by_prefix(&oid.as_ref()[..1]).unwrap(),
            vec![oid.clone()]
        );
        assert_eq!(
            database.find_objects_by_prefix(&oid.as_ref()[..8]).unwrap(),
            vec![oid.clone()]
        );
        assert!(database.find_objects_by_prefix("not-hex").unwrap().is_empty());
    }
}
