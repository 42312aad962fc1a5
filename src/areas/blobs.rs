//! Object store for file snapshots
//!
//! `save` is idempotent and `get(save(x)) == x` for every byte sequence `x`. Blobs are never
//! deleted.

use crate::areas::database::Database;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, new)]
pub struct BlobStore {
    database: Database,
}

impl BlobStore {
    pub fn path(&self) -> &std::path::Path {
        self.database.objects_path()
    }

    pub fn save(&self, content: Bytes) -> anyhow::Result<ObjectId> {
        self.database.store(&Blob::new(content))
    }

    pub fn get(&self, blob_oid: &ObjectId) -> anyhow::Result<Option<Bytes>> {
        Ok(self
            .database
            .parse_object_as_blob(blob_oid)?
            .map(Blob::into_content))
    }

    /// Like `get`, but a missing blob is an integrity error
    pub fn load(&self, blob_oid: &ObjectId) -> anyhow::Result<Bytes> {
        self.get(blob_oid)?
            .ok_or_else(|| anyhow::anyhow!("blob {blob_oid} is missing from the object store"))
    }
}
