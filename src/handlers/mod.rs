//! Resource handlers and request dispatch.
//!
//! ## Key Components
//!
//! - [`ResourceHandler`] - async trait implemented by addon authors
//! - [`HandlerRegistry`] - resource name to handler mapping, filled at setup
//! - [`Dispatcher`] - frozen registry answering resource requests
//! - [`ResourceRequest`] - normalized input passed to handlers
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use stremio_addon::handlers::{Dispatcher, HandlerRegistry, ResourceRequest};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut registry = HandlerRegistry::new();
//! registry
//!     .register_fn("stream", |req: ResourceRequest| async move {
//!         Ok(json!({"streams": [], "id": req.id}))
//!     })
//!     .unwrap();
//!
//! let dispatcher = Dispatcher::new(registry);
//! let response = dispatcher.handle("stream", "movie", "tt123", None).await.unwrap();
//! assert_eq!(response.body["id"], "tt123");
//! # }
//! ```

mod dispatch;
mod registry;
mod traits;
mod types;

pub use dispatch::{DispatchResponse, Dispatcher};
pub use registry::{HandlerRegistry, RegistryError};
pub use traits::{FnHandler, HandlerError, LandingPage, ResourceHandler};
pub use types::{ExtraArgs, ExtraValue, ResourceRequest, parse_extra_args};
