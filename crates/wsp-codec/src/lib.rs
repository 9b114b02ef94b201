//! BCS codec for Walrus Sites resource records.
//!
//! Site resources live on chain as dynamic fields of the site object:
//! `Field<ResourcePath, Resource>`. The ledger hands back the field's BCS
//! bytes; this crate turns them into a typed [`DynamicFieldEntry`] holding
//! a [`wsp_types::ResourceRecord`].
//!
//! Encoding rules follow BCS: ULEB128 length prefixes for strings, vectors
//! and maps, a `0`/`1` tag for `Option`, little-endian fixed-width integers.

pub mod bcs;
pub mod error;
pub mod record;

pub use bcs::{BcsDecode, BcsEncode, BcsReader, BcsWriter};
pub use error::{DecodeError, DecodeResult};
pub use record::{DynamicFieldEntry, ResourceCodec, ResourceEntry};
