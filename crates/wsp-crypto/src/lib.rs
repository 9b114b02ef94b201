//! Content addressing for Walrus Sites.
//!
//! - [`derive_dynamic_field_id`]: Sui's canonical child object id for a
//!   dynamic field, used to look a resource up directly by path
//! - [`derive_quilt_patch_id`]: aggregator id of one patch inside a quilt
//! - [`ContentHasher`]: SHA-256 digest compared against the on-chain hash
//!
//! All hashing wraps established libraries (`blake2`, `sha2`).

pub mod dynamic_field;
pub mod error;
pub mod hasher;
pub mod quilt;
pub mod type_tag;

pub use dynamic_field::{derive_dynamic_field_id, ResourceFieldDeriver};
pub use error::{DeriveError, DeriveResult};
pub use hasher::ContentHasher;
pub use quilt::{derive_quilt_patch_id, QuiltPatchInternalId, QUILT_PATCH_ID_LEN};
pub use type_tag::{StructTag, TypeTag};
