//! Walrus aggregator access for site resources.
//!
//! A resource record names either a whole blob or, when it carries the
//! quilt patch header, one patch of a quilt. [`AggregatorClient`] builds the
//! matching endpoint, applies the record's byte range, and only hands back
//! bytes whose SHA-256 matches the record's on-chain hash.

pub mod client;
pub mod endpoint;
pub mod error;

pub use client::AggregatorClient;
pub use endpoint::{blob_reference, endpoint_url, endpoints};
pub use error::{AggregatorError, AggregatorResult};
