//! Foundation types for Walrus Sites resolution.
//!
//! Every other `wsp-*` crate depends on `wsp-types`.
//!
//! # Key Types
//!
//! - [`ObjectId`]: 32-byte Sui object address (`0x`-prefixed hex)
//! - [`BlobId`] / [`BlobHash`]: u256 values with their base64 presentations
//! - [`BlobReference`]: direct blob or quilt patch to fetch from the aggregator
//! - [`ResourcePath`] / [`ResourceRecord`]: on-chain resource metadata
//! - [`FetchResult`]: verified bytes plus response headers

pub mod blob;
pub mod error;
pub mod object;
pub mod resource;

pub use blob::{BlobHash, BlobId, BlobReference, QuiltPatchId};
pub use error::TypeError;
pub use object::ObjectId;
pub use resource::{
    ByteRange, FetchResult, ResourcePath, ResourceRecord, INDEX_PATH, QUILT_PATCH_HEADER,
};
