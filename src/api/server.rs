use std::future::Future;
use std::path::PathBuf;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, header},
    routing::get,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::info;

use super::{
    services::{landing, manifest, resolve_resource, resolve_resource_with_extra},
    state::AppState,
    utils::{POWERED_BY, cache_control},
};
use crate::config::HttpConfig;

const X_POWERED_BY: HeaderName = HeaderName::from_static("x-powered-by");

/// Build the addon router.
///
/// Static directories are mounted under their base name, so
/// `./assets/logo.png` is served as `/assets/logo.png`.
pub fn build_router(state: AppState, http: &HttpConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(landing))
        .route("/manifest.json", get(manifest))
        .route("/{resource}/{type}/{id}", get(resolve_resource))
        .route(
            "/{resource}/{type}/{id}/{extra}",
            get(resolve_resource_with_extra),
        );

    for (mount, dir) in static_mounts(&http.static_dirs) {
        info!(path = %dir.display(), mount = %mount, "Serving static files");
        router = router.nest_service(&format!("/{mount}"), ServeDir::new(dir));
    }

    router.with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                cache_control(http.cache_max_age),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                X_POWERED_BY,
                HeaderValue::from_static(POWERED_BY),
            )),
    )
}

/// Resolve static directories to `(mount, absolute path)` pairs.
///
/// Directories without a usable base name are skipped; configuration
/// validation reports them before a router is ever built.
fn static_mounts(dirs: &[PathBuf]) -> Vec<(String, PathBuf)> {
    dirs.iter()
        .filter_map(|dir| {
            let absolute = std::path::absolute(dir).ok()?;
            let mount = absolute.file_name()?.to_str()?.to_string();
            Some((mount, absolute))
        })
        .collect()
}

/// Serve `router` on `listener` until `shutdown` resolves
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
