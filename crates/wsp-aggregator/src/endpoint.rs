use wsp_crypto::derive_quilt_patch_id;
use wsp_types::{BlobReference, ResourceRecord};

use crate::error::AggregatorResult;

/// HTTP endpoint paths of the Walrus aggregator.
pub mod endpoints {
    pub const BLOBS: &str = "/v1/blobs/";
    pub const BLOBS_BY_QUILT_PATCH_ID: &str = "/v1/blobs/by-quilt-patch-id/";
}

/// Decide what to fetch for a record: the patch when the quilt header is
/// present, the whole blob otherwise.
pub fn blob_reference(record: &ResourceRecord) -> AggregatorResult<BlobReference> {
    match record.quilt_internal_id() {
        Some(internal_id) => {
            let patch_id = derive_quilt_patch_id(&record.blob_id.to_base64url(), internal_id)?;
            Ok(BlobReference::Patch(patch_id))
        }
        None => Ok(BlobReference::Direct(record.blob_id)),
    }
}

/// Full URL for `reference` on the aggregator at `base_url`.
pub fn endpoint_url(base_url: &str, reference: &BlobReference) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    let path = match reference {
        BlobReference::Direct(_) => endpoints::BLOBS,
        BlobReference::Patch(_) => endpoints::BLOBS_BY_QUILT_PATCH_ID,
    };
    format!("{base}{path}{}", urlencoding::encode(&reference.identifier()))
}
