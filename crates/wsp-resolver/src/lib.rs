//! Path resolution for Walrus Sites.
//!
//! [`SiteResolver::resolve`] turns a request path into verified bytes:
//!
//! 1. normalize the path (`/docs/` → `/docs/index.html`)
//! 2. follow the site's redirect chain on the ledger, looking up the
//!    resource's dynamic field at each hop ([`RedirectResolver`])
//! 3. fetch the blob or quilt patch from the aggregator and check it
//!    against the on-chain hash
//! 4. for HTML callers, retry once with `/index.html` when nothing was found
//!
//! # Design Rules
//!
//! 1. Every request starts from the configured root object; nothing is cached.
//! 2. Redirect chains are bounded ([`MAX_REDIRECT_DEPTH`]) and revisiting an
//!    object is an error.
//! 3. Bytes that fail the hash check are never returned.
//! 4. `NotFound` is the only outcome that triggers the fallback.

pub mod config;
pub mod content_type;
pub mod error;
pub mod redirect;
pub mod resolver;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::SiteConfig;
pub use error::{ResolutionError, ResolutionResult};
pub use redirect::{Lookup, RedirectResolver, MAX_REDIRECT_DEPTH};
pub use resolver::{SiteResolver, CACHE_CONTROL_VALUE, SITE_OBJECT_ID_HEADER};
