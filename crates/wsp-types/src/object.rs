use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Address of a Sui ledger object.
///
/// Object ids are 32 bytes. The canonical text form is `0x` followed by 64
/// lower-case hex characters; shorter hex inputs (e.g. `0x2`) are
/// left-padded with zeros the same way the ledger normalizes them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId([u8; 32]);

impl ObjectId {
    /// Length of an object address in bytes.
    pub const LENGTH: usize = 32;

    /// Create an `ObjectId` from raw address bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// The zero address.
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }

    /// The raw 32 address bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full `0x`-prefixed hex representation.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Short hex representation (first 8 characters after `0x`).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string, with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() || digits.len() > Self::LENGTH * 2 {
            return Err(TypeError::InvalidLength {
                expected: Self::LENGTH * 2,
                actual: digits.len(),
            });
        }
        let padded = format!("{digits:0>64}");
        let bytes = hex::decode(padded).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId(0x{}..)", self.short_hex())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.to_hex()
    }
}

impl From<[u8; 32]> for ObjectId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let id = ObjectId::from_bytes([0xab; 32]);
        let parsed = ObjectId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn display_is_prefixed_full_hex() {
        let id = ObjectId::from_bytes([1; 32]);
        let display = format!("{id}");
        assert!(display.starts_with("0x"));
        assert_eq!(display.len(), 66);
    }

    #[test]
    fn short_address_is_left_padded() {
        let id = ObjectId::from_hex("0x2").unwrap();
        let mut expected = [0u8; 32];
        expected[31] = 2;
        assert_eq!(id.as_bytes(), &expected);
    }

    #[test]
    fn accepts_missing_prefix_and_upper_case() {
        let lower = ObjectId::from_hex("0xabcdef").unwrap();
        let upper = ObjectId::from_hex("ABCDEF").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn rejects_overlong_input() {
        let long = format!("0x{}", "1".repeat(65));
        assert!(matches!(
            ObjectId::from_hex(&long),
            Err(TypeError::InvalidLength { .. })
        ));
    }

    #[test]
    fn rejects_empty_and_non_hex() {
        assert!(ObjectId::from_hex("0x").is_err());
        assert!(matches!(
            ObjectId::from_hex("0xzz"),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn serde_uses_hex_string() {
        let id = ObjectId::from_hex("0x5").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.to_hex()));
        let parsed: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
