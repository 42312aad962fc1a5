//! Object identifier (SHA-1 fingerprint)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. They name blobs and commits on
//! disk as `<first-2-chars>/<remaining-38-chars>` below the owning store's directory.

use crate::artifacts::objects::{OBJECT_ID_LENGTH, SHORT_OBJECT_ID_LENGTH};
use sha1::{Digest, Sha1};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Fingerprint of an encoded object
    pub fn hash_of(content: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(SHORT_OBJECT_ID_LENGTH).0.to_string()
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(&prefix.to_ascii_lowercase())
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectId;
    use pretty_assertions::assert_eq;
    use proptest::proptest;
    use std::path::PathBuf;

    #[test]
    fn hash_of_empty_input_is_sha1_of_nothing() {
        assert_eq!(
            ObjectId::hash_of(b"").as_ref(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn splits_into_fan_out_path() {
        let oid = ObjectId::hash_of(b"");

        assert_eq!(
            oid.to_path(),
            PathBuf::from("da").join("39a3ee5e6b4b0d3255bfef95601890afd80709")
        );
        assert_eq!(oid.to_short_oid(), "da39a3e");
    }

    #[test]
    fn rejects_wrong_length_and_non_hex() {
        assert!(ObjectId::try_parse("abc".to_string()).is_err());
        assert!(ObjectId::try_parse("z".repeat(40)).is_err());
    }

    proptest! {
        #[test]
        fn hashes_always_parse_back(content in proptest::collection::vec(proptest::num::u8::ANY, 0..256)) {
            let oid = ObjectId::hash_of(&content);
            assert_eq!(ObjectId::try_parse(oid.to_string()).unwrap(), oid);
        }
    }
}
