use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use super::traits::{FnHandler, HandlerError, ResourceHandler};
use super::types::ResourceRequest;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("handler for {0} already exists")]
    DuplicateHandler(String),
    /// The handler is not asynchronous. Handlers given to
    /// [`HandlerRegistry`] are [`ResourceHandler`] values, and a synchronous
    /// function fails to compile there instead.
    #[error("{0} handler must be asynchronous")]
    InvalidHandlerType(String),
    #[error("invalid resource name '{0}': must be non-empty and contain no '/'")]
    InvalidResourceName(String),
    #[error("handler for resource {0} is missing")]
    MissingHandler(String),
    #[error("landing page handler already exists")]
    LandingPageExists,
}

/// Registry mapping resource names to their handler
///
/// Filled during setup, then frozen inside a
/// [`Dispatcher`](super::Dispatcher).
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, Arc<dyn ResourceHandler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        resource: impl Into<String>,
        handler: Arc<dyn ResourceHandler>,
    ) -> Result<(), RegistryError> {
        let resource = resource.into();

        if resource.is_empty() || resource.contains('/') {
            return Err(RegistryError::InvalidResourceName(resource));
        }
        if self.handlers.contains_key(&resource) {
            return Err(RegistryError::DuplicateHandler(resource));
        }

        tracing::debug!(%resource, "Registered resource handler");
        self.handlers.insert(resource, handler);
        Ok(())
    }

    /// Register an async closure
    pub fn register_fn<F, Fut>(
        &mut self,
        resource: impl Into<String>,
        func: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(ResourceRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
    {
        self.register(resource, Arc::new(FnHandler::new(func)))
    }

    pub fn lookup(&self, resource: &str) -> Option<Arc<dyn ResourceHandler>> {
        self.handlers.get(resource).cloned()
    }

    pub fn has_handler(&self, resource: &str) -> bool {
        self.handlers.contains_key(resource)
    }

    pub fn resources(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Check that every required resource has a handler
    pub fn verify_complete<'a, I>(&self, required: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match required.into_iter().find(|resource| !self.has_handler(resource)) {
            Some(missing) => Err(RegistryError::MissingHandler(missing.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> ResourceRequest {
        ResourceRequest {
            id: "tt1".to_string(),
            content_type: "movie".to_string(),
            extra_args: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_registration_keeps_first_handler() {
        let mut registry = HandlerRegistry::new();
        registry
            .register_fn("stream", |_| async { Ok(json!({"streams": ["first"]})) })
            .unwrap();

        let err = registry
            .register_fn("stream", |_| async { Ok(json!({"streams": ["second"]})) })
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateHandler(ref r) if r == "stream"));

        let handler = registry.lookup("stream").unwrap();
        let body = handler.handle(request()).await.unwrap();
        assert_eq!(body, json!({"streams": ["first"]}));
    }

    #[test]
    fn test_lookup_unknown_resource() {
        let registry = HandlerRegistry::new();
        assert!(registry.lookup("stream").is_none());
        assert!(!registry.has_handler("stream"));
    }

    #[test]
    fn test_rejects_unroutable_names() {
        let mut registry = HandlerRegistry::new();

        for name in ["", "stream/extra"] {
            let err = registry
                .register_fn(name, |_| async { Ok(json!({})) })
                .unwrap_err();
            assert!(matches!(err, RegistryError::InvalidResourceName(_)));
        }
        assert_eq!(registry.resources().count(), 0);
    }

    #[test]
    fn test_open_resource_names() {
        let mut registry = HandlerRegistry::new();
        registry
            .register_fn("addon_catalog", |_| async { Ok(json!({"addons": []})) })
            .unwrap();

        assert!(registry.has_handler("addon_catalog"));
    }

    #[test]
    fn test_verify_complete_reports_missing_resource() {
        let mut registry = HandlerRegistry::new();
        registry
            .register_fn("stream", |_| async { Ok(json!({"streams": []})) })
            .unwrap();

        assert!(registry.verify_complete(["stream"]).is_ok());

        let err = registry.verify_complete(["stream", "catalog"]).unwrap_err();
        assert!(matches!(err, RegistryError::MissingHandler(ref r) if r == "catalog"));
    }
}
