use sha2::{Digest, Sha256};
use wsp_types::BlobHash;

/// SHA-256 content hasher for blob bodies.
///
/// The on-chain `blob_hash` of a resource is the SHA-256 of the bytes the
/// aggregator serves for it (after any range or patch selection).
pub struct ContentHasher;

impl ContentHasher {
    /// Digest of `data` in the same form as the on-chain hash.
    pub fn digest(data: &[u8]) -> BlobHash {
        let mut out = [0u8; 32];
        out.copy_from_slice(&Sha256::digest(data));
        BlobHash::from_bytes(out)
    }

    /// Compare the base64 presentation of the digest against `expected`.
    pub fn verify(data: &[u8], expected: &BlobHash) -> bool {
        Self::digest(data).to_base64() == expected.to_base64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        // sha256("abc")
        assert_eq!(
            ContentHasher::digest(b"abc").to_base64(),
            "ungWv48Bz+pBQUDeXa4iI7ADYaOWF3qctBD/YfIAFa0="
        );
    }

    #[test]
    fn verify_correct_data() {
        let hash = ContentHasher::digest(b"body");
        assert!(ContentHasher::verify(b"body", &hash));
    }

    #[test]
    fn any_flipped_byte_fails() {
        let body = b"<html>hello</html>".to_vec();
        let hash = ContentHasher::digest(&body);
        for i in 0..body.len() {
            let mut tampered = body.clone();
            tampered[i] ^= 0x01;
            assert!(!ContentHasher::verify(&tampered, &hash), "byte {i}");
        }
    }
}
