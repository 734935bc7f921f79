use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use std::sync::Arc;

use super::registry::HandlerRegistry;
use super::traits::HandlerError;
use super::types::{ResourceRequest, parse_extra_args};

/// JSON response produced by the dispatcher
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl DispatchResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    /// Fixed answer for a resource nobody registered
    pub fn bad_request() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({"error": "Bad request"}),
        }
    }
}

impl IntoResponse for DispatchResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Routes resource requests to the registered handlers.
///
/// The registry is shared read-only; a dispatcher can be cloned into every
/// request task without locking.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<HandlerRegistry>,
}

impl Dispatcher {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Resolve one resource request.
    ///
    /// `raw_extra` is the trailing path segment without its `.json` suffix,
    /// still percent-encoded. Handler errors are returned untouched.
    pub async fn handle(
        &self,
        resource: &str,
        content_type: &str,
        id: &str,
        raw_extra: Option<&str>,
    ) -> Result<DispatchResponse, HandlerError> {
        let Some(handler) = self.registry.lookup(resource) else {
            tracing::debug!(%resource, "No handler registered for resource");
            return Ok(DispatchResponse::bad_request());
        };

        let request = ResourceRequest {
            id: id.to_string(),
            content_type: content_type.to_string(),
            extra_args: parse_extra_args(raw_extra),
        };

        let body = handler.handle(request).await?;
        Ok(DispatchResponse::ok(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher {
        let mut registry = HandlerRegistry::new();
        registry
            .register_fn("stream", |_| async { Ok(json!({"streams": []})) })
            .unwrap();
        registry
            .register_fn("catalog", |req: ResourceRequest| async move {
                Ok(json!({"metas": [], "request": req}))
            })
            .unwrap();
        registry
            .register_fn("meta", |req: ResourceRequest| async move {
                Err(HandlerError::NotFound(req.id))
            })
            .unwrap();
        Dispatcher::new(registry)
    }

    #[tokio::test]
    async fn test_unknown_resource_is_bad_request() {
        let dispatcher = dispatcher();

        for extra in [None, Some("genre=action")] {
            let response = dispatcher
                .handle("unknown", "movie", "tt123", extra)
                .await
                .unwrap();
            assert_eq!(response, DispatchResponse::bad_request());
            assert_eq!(response.status, StatusCode::BAD_REQUEST);
            assert_eq!(response.body, json!({"error": "Bad request"}));
        }
    }

    #[tokio::test]
    async fn test_handler_value_becomes_body() {
        let response = dispatcher()
            .handle("stream", "movie", "tt123", None)
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, json!({"streams": []}));
    }

    #[tokio::test]
    async fn test_handler_receives_normalized_request() {
        let response = dispatcher()
            .handle("catalog", "movie", "top", Some("genre=action&genre=drama&skip=20"))
            .await
            .unwrap();

        assert_eq!(
            response.body["request"],
            json!({
                "id": "top",
                "type": "movie",
                "extraArgs": {"genre": ["action", "drama"], "skip": "20"}
            })
        );
    }

    #[tokio::test]
    async fn test_missing_extra_is_null() {
        let response = dispatcher()
            .handle("catalog", "movie", "top", None)
            .await
            .unwrap();

        assert_eq!(response.body["request"]["extraArgs"], Value::Null);
    }

    #[tokio::test]
    async fn test_handler_error_propagates() {
        let err = dispatcher()
            .handle("meta", "movie", "tt404", None)
            .await
            .unwrap_err();

        assert!(matches!(err, HandlerError::NotFound(ref id) if id == "tt404"));
    }
}
