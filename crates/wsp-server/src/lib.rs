//! Local HTTP preview server for Walrus Sites.
//!
//! Serves one site over plain HTTP: every request path is resolved through
//! [`wsp_resolver::SiteResolver`] and answered with the verified bytes.
//! `GET /__config` reports the configuration in use.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{accepts_html, status_for};
pub use server::PreviewServer;
