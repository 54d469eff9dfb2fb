use re_grpc_proto::build::bazel::remote::execution::v2::Digest;
use sha2::{Digest as _, Sha256};

pub fn compute_digest(data: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let hash = hex::encode(hasher.finalize());

    Digest {
        hash,
        size_bytes: data.len() as i64,
    }
}

/// Renders a digest the way it appears in log lines: `hash/size`.
pub fn format_digest(digest: &Digest) -> String {
    format!("{}/{}", digest.hash, digest.size_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_digest() {
        let data = b"hello world";
        let digest = compute_digest(data);

        assert_eq!(digest.size_bytes, 11);
        assert_eq!(
            digest.hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_format_digest() {
        let digest = Digest {
            hash: "abc123".to_string(),
            size_bytes: 42,
        };

        assert_eq!(format_digest(&digest), "abc123/42");
    }
}
