use wsp_types::blob::{decode_base64url, encode_base64url};
use wsp_types::QuiltPatchId;

use crate::error::{DeriveError, DeriveResult};

/// Length of a quilt patch id string.
pub const QUILT_PATCH_ID_LEN: usize = 50;

const QUILT_ID_BYTES: usize = 32;
const PATCH_ID_BYTES: usize = 37;

/// Location of a patch inside a quilt, as carried in the
/// `x-wal-quilt-patch-internal-id` header.
///
/// Layout: `[version: i8][start_index: u16 le][end_index: u16 le]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuiltPatchInternalId {
    pub version: i8,
    pub start_index: u16,
    pub end_index: u16,
}

impl QuiltPatchInternalId {
    /// Parse from hex, `0x` prefix optional. Extra bytes past the first five
    /// are ignored.
    pub fn from_hex(s: &str) -> DeriveResult<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(digits).map_err(|e| DeriveError::InvalidInternalId(e.to_string()))?;
        if bytes.len() < 5 {
            return Err(DeriveError::InvalidInternalId(format!(
                "need at least 5 bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self {
            version: bytes[0] as i8,
            start_index: u16::from_le_bytes([bytes[1], bytes[2]]),
            end_index: u16::from_le_bytes([bytes[3], bytes[4]]),
        })
    }
}

/// Raw 37-byte patch id: quilt blob id bytes followed by the internal id.
pub fn quilt_patch_bytes(quilt_blob_id: &str, internal: &QuiltPatchInternalId) -> DeriveResult<[u8; 37]> {
    let blob =
        decode_base64url(quilt_blob_id).map_err(|e| DeriveError::InvalidQuiltBlobId(e.to_string()))?;
    let mut buf = [0u8; PATCH_ID_BYTES];
    let n = blob.len().min(QUILT_ID_BYTES);
    buf[..n].copy_from_slice(&blob[..n]);
    buf[32] = internal.version as u8;
    buf[33..35].copy_from_slice(&internal.start_index.to_le_bytes());
    buf[35..37].copy_from_slice(&internal.end_index.to_le_bytes());
    Ok(buf)
}

/// Derive the aggregator id of a quilt patch.
///
/// `quilt_blob_id` is the quilt's URL-safe base64 blob id and `internal_id_hex`
/// the patch's internal id header value.
pub fn derive_quilt_patch_id(quilt_blob_id: &str, internal_id_hex: &str) -> DeriveResult<QuiltPatchId> {
    let internal = QuiltPatchInternalId::from_hex(internal_id_hex)?;
    let bytes = quilt_patch_bytes(quilt_blob_id, &internal)?;
    let mut encoded = encode_base64url(&bytes);
    encoded.truncate(QUILT_PATCH_ID_LEN);
    Ok(QuiltPatchId::new(encoded))
}
