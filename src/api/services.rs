use axum::{
    Json,
    extract::State,
    http::Uri,
    response::{Html, IntoResponse, Redirect, Response},
};

use super::{
    error::ApiError,
    state::AppState,
    utils::{decode_segment, raw_trailing_segments, strip_json_suffix},
};
use crate::handlers::DispatchResponse;

/// Landing page (GET /)
///
/// Renders the registered landing page, or redirects to the configured
/// default page when there is none.
pub async fn landing(State(state): State<AppState>) -> Result<Response, ApiError> {
    let Some(page) = &state.landing else {
        return Ok(Redirect::temporary(&state.landing_redirect).into_response());
    };

    let html = page
        .render(state.manifest.clone())
        .await
        .map_err(|source| ApiError::handler("landing page", source))?;

    Ok(Html(html).into_response())
}

/// Manifest endpoint (GET /manifest.json)
pub async fn manifest(State(state): State<AppState>) -> Response {
    Json(state.manifest.as_ref()).into_response()
}

/// Resource resolution (GET /{resource}/{type}/{id}.json)
pub async fn resolve_resource(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<DispatchResponse, ApiError> {
    let [resource, content_type, id] =
        raw_trailing_segments(uri.path()).ok_or_else(|| not_found(&uri))?;
    let id = strip_json_suffix(id).ok_or_else(|| not_found(&uri))?;

    dispatch(&state, resource, content_type, id, None).await
}

/// Resource resolution with extra arguments
/// (GET /{resource}/{type}/{id}/{extra}.json)
///
/// Segments are read from the raw URI. The extra segment is decoded only
/// once, by the query parser, so an encoded `&` or `=` stays inside a value.
/// Invalid UTF-8 escapes are replaced rather than rejected.
pub async fn resolve_resource_with_extra(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<DispatchResponse, ApiError> {
    let [resource, content_type, id, extra] =
        raw_trailing_segments(uri.path()).ok_or_else(|| not_found(&uri))?;
    let extra = strip_json_suffix(extra).ok_or_else(|| not_found(&uri))?;

    dispatch(&state, resource, content_type, id, Some(extra)).await
}

async fn dispatch(
    state: &AppState,
    resource: &str,
    content_type: &str,
    id: &str,
    raw_extra: Option<&str>,
) -> Result<DispatchResponse, ApiError> {
    let resource = decode_segment(resource);

    state
        .dispatcher
        .handle(
            &resource,
            &decode_segment(content_type),
            &decode_segment(id),
            raw_extra,
        )
        .await
        .map_err(|source| ApiError::handler(&*resource, source))
}

fn not_found(uri: &Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}
