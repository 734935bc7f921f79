use std::sync::Arc;

use crate::handlers::{Dispatcher, LandingPage};
use crate::manifest::Manifest;

/// Shared, read-only state of a running addon
#[derive(Clone)]
pub struct AppState {
    pub manifest: Arc<Manifest>,
    pub dispatcher: Dispatcher,
    pub landing: Option<Arc<dyn LandingPage>>,
    pub landing_redirect: Arc<str>,
}

impl AppState {
    pub fn new(
        manifest: Arc<Manifest>,
        dispatcher: Dispatcher,
        landing: Option<Arc<dyn LandingPage>>,
        landing_redirect: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            manifest,
            dispatcher,
            landing,
            landing_redirect: landing_redirect.into(),
        }
    }
}
