//! Read-only ledger access for Walrus Sites resolution.
//!
//! The resolver treats the ledger as an object store queried by id. Each
//! object comes back with its display attributes and, for Move objects,
//! the raw BCS content.
//!
//! # Backends
//!
//! All backends implement the [`LedgerClient`] trait:
//!
//! - [`SuiRpcClient`] -- Sui full node JSON-RPC (`sui_multiGetObjects`)
//! - [`InMemoryLedger`] -- `HashMap`-based ledger for tests and embedding

pub mod error;
pub mod memory;
pub mod object;
pub mod rpc;
pub mod traits;

pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryLedger;
pub use object::{LedgerObject, ObjectContent, REDIRECT_DISPLAY_KEY};
pub use rpc::SuiRpcClient;
pub use traits::LedgerClient;
