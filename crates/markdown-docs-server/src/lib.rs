//! HTTP front end for markdown-docs.
//!
//! Routes:
//! - `GET /` renders the listing view from a fresh catalog build.
//! - `GET {route_prefix}/*slug` renders one document, or the not-found page.
//! - everything else answers with the not-found page.
//!
//! Filesystem work runs on tokio's blocking pool; requests share nothing
//! except the read-only document tree.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use markdown_docs_core::MarkdownDocs;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },
    #[error("server failed: {0}")]
    Serve(#[source] io::Error),
}

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    docs: Arc<MarkdownDocs>,
}

impl AppState {
    pub fn new(docs: MarkdownDocs) -> Self {
        Self {
            docs: Arc::new(docs),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let detail_route = format!("{}/*slug", state.docs.config().site.route_prefix);
    Router::new()
        .route("/", get(index_handler))
        .route(&detail_route, get(document_handler))
        .fallback(fallback_handler)
        .with_state(state)
}

/// Bind the configured address and serve until SIGINT/SIGTERM.
pub async fn serve(docs: MarkdownDocs) -> Result<(), ServerError> {
    let addr = docs.config().server.bind;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    serve_on(listener, docs).await
}

/// Serve on an already bound listener.
pub async fn serve_on(listener: TcpListener, docs: MarkdownDocs) -> Result<(), ServerError> {
    let local = listener.local_addr().map_err(ServerError::Serve)?;
    info!(
        root = %docs.config().docs.root.display(),
        "markdown-docs listening on http://{local}"
    );
    axum::serve(listener, build_router(AppState::new(docs)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;
    info!("markdown-docs stopped");
    Ok(())
}

async fn index_handler(State(state): State<AppState>) -> Response {
    let docs = state.docs.clone();
    match tokio::task::spawn_blocking(move || docs.operations().index_page()).await {
        Ok(page) => Html(page).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn document_handler(
    State(state): State<AppState>,
    slug: Result<Path<String>, PathRejection>,
) -> Response {
    // Undecodable slugs (e.g. invalid UTF-8) address nothing.
    let Path(slug) = match slug {
        Ok(slug) => slug,
        Err(rejection) => {
            info!("slug rejected: {rejection}");
            return not_found(&state);
        }
    };
    info!(slug = %slug, "document requested");
    let docs = state.docs.clone();
    let segments: Vec<String> = slug.split('/').map(str::to_owned).collect();
    match tokio::task::spawn_blocking(move || docs.operations().document_page(&segments)).await {
        Ok(Ok(page)) => Html(page).into_response(),
        Ok(Err(_)) => not_found(&state),
        Err(err) => internal_error(err),
    }
}

async fn fallback_handler(State(state): State<AppState>) -> Response {
    not_found(&state)
}

fn not_found(state: &AppState) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(state.docs.operations().not_found_page()),
    )
        .into_response()
}

fn internal_error(err: tokio::task::JoinError) -> Response {
    error!("request task failed: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("shutdown signal received");
}
