use crate::util::compute_digest;
use re_grpc_proto::build::bazel::remote::execution::v2::Digest;
use std::fmt;
use thiserror::Error;

/// Hex lengths of the digest functions an action key may be computed with:
/// MD5, SHA-1, SHA-256, SHA-384 and SHA-512.
const SUPPORTED_HASH_LENGTHS: [usize; 5] = [32, 40, 64, 96, 128];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDigest {
    #[error("digest hash {0:?} is not hex encoded")]
    NotHex(String),

    #[error("digest hash has length {0}, which matches no supported digest function")]
    UnsupportedLength(usize),

    #[error("digest size {0} is negative")]
    NegativeSize(i64),
}

/// Content-derived key of an action, scoped by the caller to one instance.
///
/// Two keys are equal exactly when their digests are byte-equal; the hash is
/// normalised to lowercase on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionKey {
    hash: String,
    size_bytes: i64,
}

impl ActionKey {
    pub fn from_digest(digest: &Digest) -> Result<Self, InvalidDigest> {
        if digest.size_bytes < 0 {
            return Err(InvalidDigest::NegativeSize(digest.size_bytes));
        }

        if !digest.hash.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidDigest::NotHex(digest.hash.clone()));
        }

        if !SUPPORTED_HASH_LENGTHS.contains(&digest.hash.len()) {
            return Err(InvalidDigest::UnsupportedLength(digest.hash.len()));
        }

        Ok(Self {
            hash: digest.hash.to_ascii_lowercase(),
            size_bytes: digest.size_bytes,
        })
    }

    /// Key for a serialized action, hashed with SHA-256.
    pub fn of(action: &[u8]) -> Self {
        let digest = compute_digest(action);
        Self {
            hash: digest.hash,
            size_bytes: digest.size_bytes,
        }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn size_bytes(&self) -> i64 {
        self.size_bytes
    }

    pub fn to_digest(&self) -> Digest {
        Digest {
            hash: self.hash.clone(),
            size_bytes: self.size_bytes,
        }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.hash, self.size_bytes)
    }
}
