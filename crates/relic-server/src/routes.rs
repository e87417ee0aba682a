use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    handler::HandlerWithoutStateExt,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use relic_archive::{Archive, ArchiveError};
use relic_render::page::{channel_listing, render_page, select_channel};
use relic_render::{ChannelRenderer, Directory, EmojiTable, RenderConfig};

use crate::config::EmojiSource;

const STYLESHEET: &str = include_str!("../assets/stylesheet.css");

/// 8x8 grey PNG served in place of media missing from the archive.
const PLACEHOLDER_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAgAAAAIAQMAAAD+wSzIAAAABlBMVEX///+/v7+jQ3Y5AAAADklEQVQI12P4AIX8EAgALgAD/aNpbtEAAAAASUVORK5CYII=";

/// Shared state for all route handlers. Nothing here is mutated; every
/// request re-reads the archive.
#[derive(Clone)]
pub struct AppState {
    pub archive: Archive,
    pub emoji: EmojiSource,
    pub render: Arc<RenderConfig>,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub channel: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let media = ServeDir::new(state.archive.root()).not_found_service(placeholder.into_service());

    Router::new()
        .route("/", get(channel_view))
        .route("/stylesheet.css", get(stylesheet))
        .route("/favicon.ico", get(favicon))
        .nest_service("/public", media)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ── Handlers ────────────────────────────────────────────────────────────

/// GET /?channel=<name>: the full page for one channel.
pub async fn channel_view(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Archive reads are blocking file IO
    let page = tokio::task::spawn_blocking(move || build_page(&state, query.channel.as_deref()))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .map_err(|e| {
            error!("Failed to render channel view: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        page,
    ))
}

fn build_page(state: &AppState, requested: Option<&str>) -> Result<String, ArchiveError> {
    let config = state.render.as_ref();

    let channels = state.archive.channels()?;
    let directory = Directory::new(state.archive.users()?);
    let emoji = EmojiTable::new(state.emoji.load()?);

    let active = select_channel(&channels, requested, config);
    let history = state.archive.history(active)?;
    debug!(
        "Rendering #{} ({} messages, {} users, {} emoji)",
        active,
        history.len(),
        directory.users().len(),
        emoji.len()
    );

    let renderer = ChannelRenderer::new(config, &directory, &emoji, active);
    let messages = renderer.render_history(&history);
    let listing = channel_listing(&channels, active);

    Ok(render_page(config, active, &listing, &messages))
}

pub async fn stylesheet() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        STYLESHEET,
    )
}

pub async fn favicon() -> StatusCode {
    StatusCode::OK
}

/// Fallback for `/public/*` misses. ServeDir forces the status to 404.
async fn placeholder() -> Response {
    match B64.decode(PLACEHOLDER_PNG) {
        Ok(png) => (
            [
                (header::CONTENT_TYPE, "image/png"),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            png,
        )
            .into_response(),
        Err(e) => {
            error!("Placeholder image is corrupt: {}", e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "404 Not found",
    )
}
