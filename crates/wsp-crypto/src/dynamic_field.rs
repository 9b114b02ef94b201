use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use wsp_codec::BcsEncode;
use wsp_types::{ObjectId, ResourcePath};

use crate::error::DeriveResult;
use crate::type_tag::TypeTag;

type Blake2b256 = Blake2b<U32>;

/// Hashing intent scope the ledger uses for child object ids.
const CHILD_OBJECT_ID_SCOPE: u8 = 0xf0;

/// Derive the object id of the dynamic field `key` under `parent`.
///
/// Matches the ledger's own scheme:
/// `blake2b256(0xf0 || parent || u64_le(len(key)) || key || bcs(key_type))`.
pub fn derive_dynamic_field_id(parent: &ObjectId, key_type: &TypeTag, key_bcs: &[u8]) -> ObjectId {
    let mut hasher = Blake2b256::new();
    hasher.update([CHILD_OBJECT_ID_SCOPE]);
    hasher.update(parent.as_bytes());
    hasher.update((key_bcs.len() as u64).to_le_bytes());
    hasher.update(key_bcs);
    hasher.update(key_type.to_bcs());
    let digest = hasher.finalize();
    let mut id = [0u8; 32];
    id.copy_from_slice(&digest);
    ObjectId::from_bytes(id)
}

/// Derives resource field ids for one site package.
///
/// The key type `<package>::site::ResourcePath` is parsed once.
#[derive(Clone, Debug)]
pub struct ResourceFieldDeriver {
    key_type: TypeTag,
}

impl ResourceFieldDeriver {
    pub fn new(site_package: &str) -> DeriveResult<Self> {
        let key_type = format!("{site_package}::site::ResourcePath").parse()?;
        Ok(Self { key_type })
    }

    pub fn key_type(&self) -> &TypeTag {
        &self.key_type
    }

    /// Id of the dynamic field holding `path` under the site object `parent`.
    pub fn field_id(&self, parent: &ObjectId, path: &ResourcePath) -> ObjectId {
        derive_dynamic_field_id(parent, &self.key_type, &path.to_bcs())
    }
}
