use std::fmt;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// URL-safe base64 engine used for blob and patch ids.
///
/// Encodes without padding. Decoding accepts padded and unpadded input.
pub const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode URL-safe base64 (padding optional) into raw bytes.
pub fn decode_base64url(s: &str) -> Result<Vec<u8>, TypeError> {
    URL_SAFE_LENIENT
        .decode(s)
        .map_err(|e| TypeError::InvalidBase64(e.to_string()))
}

/// Encode raw bytes as URL-safe base64 without padding.
pub fn encode_base64url(bytes: &[u8]) -> String {
    URL_SAFE_LENIENT.encode(bytes)
}

fn to_array(bytes: Vec<u8>) -> Result<[u8; 32], TypeError> {
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| TypeError::InvalidLength { expected: 32, actual })
}

/// Walrus blob identifier.
///
/// On chain this is a `u256`; the bytes held here are its little-endian
/// serialization. The external form is URL-safe base64 without padding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlobId([u8; 32]);

impl BlobId {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// A zero blob id marks a record without content.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn to_base64url(&self) -> String {
        encode_base64url(&self.0)
    }

    pub fn from_base64url(s: &str) -> Result<Self, TypeError> {
        Ok(Self(to_array(decode_base64url(s)?)?))
    }
}

impl fmt::Debug for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobId({})", self.to_base64url())
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64url())
    }
}

impl TryFrom<String> for BlobId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_base64url(&value)
    }
}

impl From<BlobId> for String {
    fn from(id: BlobId) -> Self {
        id.to_base64url()
    }
}

/// Expected SHA-256 digest of a blob's content.
///
/// Stored on chain as a `u256`; the external form is standard base64 with
/// padding, which is also how computed digests are compared against it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlobHash([u8; 32]);

impl BlobHash {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    pub fn from_base64(s: &str) -> Result<Self, TypeError> {
        let bytes = STANDARD
            .decode(s)
            .map_err(|e| TypeError::InvalidBase64(e.to_string()))?;
        Ok(Self(to_array(bytes)?))
    }
}

impl fmt::Debug for BlobHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobHash({})", self.to_base64())
    }
}

impl fmt::Display for BlobHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl TryFrom<String> for BlobHash {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_base64(&value)
    }
}

impl From<BlobHash> for String {
    fn from(hash: BlobHash) -> Self {
        hash.to_base64()
    }
}

/// Identifier of a single patch inside a quilt (composite blob).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuiltPatchId(String);

impl QuiltPatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuiltPatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What to fetch from the aggregator for a resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlobReference {
    /// The resource is a whole blob.
    Direct(BlobId),
    /// The resource is one patch of a quilt.
    Patch(QuiltPatchId),
}

impl BlobReference {
    /// The identifier as it appears in the aggregator URL (before encoding).
    pub fn identifier(&self) -> String {
        match self {
            Self::Direct(id) => id.to_base64url(),
            Self::Patch(id) => id.as_str().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_id_is_unpadded_url_safe() {
        let id = BlobId::from_bytes([0xfb; 32]);
        let s = id.to_base64url();
        assert_eq!(s.len(), 43);
        assert!(!s.contains('='));
        assert!(!s.contains('+') && !s.contains('/'));
        assert_eq!(BlobId::from_base64url(&s).unwrap(), id);
    }

    #[test]
    fn blob_id_accepts_padding() {
        let id = BlobId::from_bytes([7; 32]);
        let padded = format!("{}=", id.to_base64url());
        assert_eq!(BlobId::from_base64url(&padded).unwrap(), id);
    }

    #[test]
    fn blob_id_rejects_wrong_length() {
        let short = encode_base64url(&[1, 2, 3]);
        assert_eq!(
            BlobId::from_base64url(&short),
            Err(TypeError::InvalidLength { expected: 32, actual: 3 })
        );
    }

    #[test]
    fn blob_hash_is_standard_padded() {
        let hash = BlobHash::from_bytes([0xfb; 32]);
        let s = hash.to_base64();
        assert_eq!(s.len(), 44);
        assert!(s.ends_with('='));
        assert!(s.contains('+') || s.contains('/'));
        assert_eq!(BlobHash::from_base64(&s).unwrap(), hash);
    }

    #[test]
    fn zero_blob_id() {
        assert!(BlobId::from_bytes([0; 32]).is_zero());
        assert!(!BlobId::from_bytes([1; 32]).is_zero());
    }

    #[test]
    fn reference_identifier() {
        let id = BlobId::from_bytes([3; 32]);
        assert_eq!(BlobReference::Direct(id).identifier(), id.to_base64url());
        let patch = QuiltPatchId::new("abc");
        assert_eq!(BlobReference::Patch(patch).identifier(), "abc");
    }
}
