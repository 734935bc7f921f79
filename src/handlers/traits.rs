use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use super::types::ResourceRequest;
use crate::manifest::Manifest;

/// Errors a resource handler may return
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("internal handler error: {0}")]
    Internal(String),
}

/// Asynchronous handler for one resource (`stream`, `meta`, `catalog`...)
///
/// The returned value becomes the JSON response body as is: `stream`
/// handlers usually return `{"streams": [...]}`, `catalog` handlers
/// `{"metas": [...]}`, and so on.
///
/// Only asynchronous handlers can be registered. A plain function is
/// rejected at compile time:
///
/// ```compile_fail
/// use serde_json::{Value, json};
/// use stremio_addon::handlers::{HandlerRegistry, ResourceRequest};
///
/// fn blocking(_req: ResourceRequest) -> Value {
///     json!({"streams": []})
/// }
///
/// let mut registry = HandlerRegistry::new();
/// registry.register_fn("stream", blocking).unwrap();
/// ```
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    async fn handle(&self, request: ResourceRequest) -> Result<Value, HandlerError>;
}

/// Renders the HTML served on `/`
#[async_trait]
pub trait LandingPage: Send + Sync {
    async fn render(&self, manifest: Arc<Manifest>) -> Result<String, HandlerError>;
}

/// Adapter turning an async closure into a [`ResourceHandler`] or a
/// [`LandingPage`]
pub struct FnHandler<F> {
    func: F,
}

impl<F> FnHandler<F> {
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F, Fut> ResourceHandler for FnHandler<F>
where
    F: Fn(ResourceRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Value, HandlerError>> + Send,
{
    async fn handle(&self, request: ResourceRequest) -> Result<Value, HandlerError> {
        (self.func)(request).await
    }
}

#[async_trait]
impl<F, Fut> LandingPage for FnHandler<F>
where
    F: Fn(Arc<Manifest>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, HandlerError>> + Send,
{
    async fn render(&self, manifest: Arc<Manifest>) -> Result<String, HandlerError> {
        (self.func)(manifest).await
    }
}
