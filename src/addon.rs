//! The addon server object.
//!
//! An [`Addon`] owns a validated manifest and collects handlers. Turning it
//! into a router checks that every resource the manifest declares has a
//! handler, then freezes the registry for the lifetime of the server.
//!
//! ```no_run
//! use serde_json::json;
//! use stremio_addon::{Addon, AddonConfig, ResourceRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut addon = Addon::new(
//!     json!({
//!         "id": "org.example.streams",
//!         "version": "1.0.0",
//!         "name": "Example streams",
//!         "resources": ["stream"],
//!         "types": ["movie"],
//!         "catalogs": []
//!     }),
//!     AddonConfig::default(),
//! )?;
//!
//! addon.stream(|req: ResourceRequest| async move {
//!     Ok(json!({"streams": [{"url": format!("https://cdn.example.com/{}.mp4", req.id)}]}))
//! })?;
//!
//! addon.serve().await?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use serde_json::Value;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{self, state::AppState};
use crate::config::{AddonConfig, ConfigError, ValidationError};
use crate::handlers::{
    Dispatcher, FnHandler, HandlerError, HandlerRegistry, LandingPage, RegistryError,
    ResourceHandler, ResourceRequest,
};
use crate::manifest::{Manifest, ManifestError};

#[derive(Debug, Error)]
pub enum AddonError {
    #[error("invalid manifest: {0}")]
    Manifest(#[from] ManifestError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for AddonError {
    fn from(err: ValidationError) -> Self {
        AddonError::Config(ConfigError::ValidationError(err))
    }
}

/// A Stremio addon server under construction
pub struct Addon {
    manifest: Arc<Manifest>,
    config: AddonConfig,
    registry: HandlerRegistry,
    landing: Option<Arc<dyn LandingPage>>,
}

impl Addon {
    /// Validate `manifest` and `config` and create an addon with no handlers
    pub fn new(manifest: Value, config: AddonConfig) -> Result<Self, AddonError> {
        let manifest = Manifest::from_value(manifest)?;
        Self::from_manifest(manifest, config)
    }

    /// Create an addon from an already validated manifest
    pub fn from_manifest(manifest: Manifest, config: AddonConfig) -> Result<Self, AddonError> {
        config.validate()?;

        Ok(Self {
            manifest: Arc::new(manifest),
            config,
            registry: HandlerRegistry::new(),
            landing: None,
        })
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn config(&self) -> &AddonConfig {
        &self.config
    }

    /// Register the handler for `resource`
    pub fn add_handler(
        &mut self,
        resource: impl Into<String>,
        handler: Arc<dyn ResourceHandler>,
    ) -> Result<&mut Self, RegistryError> {
        self.registry.register(resource, handler)?;
        Ok(self)
    }

    /// Register an async closure as the handler for `resource`
    pub fn add_handler_fn<F, Fut>(
        &mut self,
        resource: impl Into<String>,
        func: F,
    ) -> Result<&mut Self, RegistryError>
    where
        F: Fn(ResourceRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
    {
        self.registry.register_fn(resource, func)?;
        Ok(self)
    }

    /// Stream handler; expected to return `{"streams": [...]}`
    pub fn stream<F, Fut>(&mut self, func: F) -> Result<&mut Self, RegistryError>
    where
        F: Fn(ResourceRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
    {
        self.add_handler_fn("stream", func)
    }

    /// Meta handler; expected to return `{"meta": {...}}`
    pub fn meta<F, Fut>(&mut self, func: F) -> Result<&mut Self, RegistryError>
    where
        F: Fn(ResourceRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
    {
        self.add_handler_fn("meta", func)
    }

    /// Catalog handler; expected to return `{"metas": [...]}`
    pub fn catalog<F, Fut>(&mut self, func: F) -> Result<&mut Self, RegistryError>
    where
        F: Fn(ResourceRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
    {
        self.add_handler_fn("catalog", func)
    }

    /// Subtitles handler; expected to return `{"subtitles": [...]}`
    pub fn subtitles<F, Fut>(&mut self, func: F) -> Result<&mut Self, RegistryError>
    where
        F: Fn(ResourceRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
    {
        self.add_handler_fn("subtitles", func)
    }

    /// Register the page served on `/`
    pub fn set_landing_page(
        &mut self,
        page: Arc<dyn LandingPage>,
    ) -> Result<&mut Self, RegistryError> {
        if self.landing.is_some() {
            return Err(RegistryError::LandingPageExists);
        }
        self.landing = Some(page);
        Ok(self)
    }

    /// Register an async closure rendering the landing page HTML
    pub fn landing_page<F, Fut>(&mut self, func: F) -> Result<&mut Self, RegistryError>
    where
        F: Fn(Arc<Manifest>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, HandlerError>> + Send + 'static,
    {
        self.set_landing_page(Arc::new(FnHandler::new(func)))
    }

    /// Check that every declared resource has a handler
    pub fn verify(&self) -> Result<(), RegistryError> {
        self.registry.verify_complete(self.manifest.resource_names())
    }

    /// Freeze the handlers and build the HTTP router
    pub fn router(self) -> Result<Router, AddonError> {
        self.verify()?;

        let state = AppState::new(
            self.manifest,
            Dispatcher::new(self.registry),
            self.landing,
            self.config.http.landing_redirect.as_str(),
        );

        Ok(api::build_router(state, &self.config.http))
    }

    /// Bind the configured address and serve until Ctrl+C or SIGTERM
    pub async fn serve(self) -> Result<(), AddonError> {
        let server = self.config.server.clone();
        let router = self.router()?;

        let listener = TcpListener::bind((server.host.as_str(), server.port)).await?;
        let address = listener.local_addr()?;
        info!(%address, "Server running on http://{}:{}", server.host, server.port);
        if let Some(link) = server.install_link() {
            info!(%link, "Addon installation link");
        }

        api::serve(listener, router, api::shutdown_signal()).await?;
        Ok(())
    }
}
