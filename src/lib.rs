//! Helper library for building Stremio addon HTTP servers.
//!
//! An addon exposes its [`Manifest`] on `/manifest.json` and answers
//! resource requests (`/{resource}/{type}/{id}.json`, optionally with an
//! extra-arguments segment) through handlers registered per resource name.
//! See [`Addon`] for a complete example.

pub mod addon;
pub mod api;
pub mod config;
pub mod handlers;
pub mod manifest;
pub mod observability;

pub use addon::{Addon, AddonError};
pub use config::AddonConfig;
pub use handlers::{ExtraValue, HandlerError, ResourceHandler, ResourceRequest};
pub use manifest::Manifest;
