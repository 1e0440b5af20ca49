//! # Upload Server
//!
//! HTTP surface for the analysis pipeline:
//!
//! - `GET /` upload page
//! - `POST /upload` multipart `photo` + `hair_color`, answers with the tier record
//! - `GET /static/img/{filename}` tier images
//!
//! Every response carries a permissive CORS header and is counted in the
//! request metrics.

mod routes;
mod state;
mod ui;

pub use routes::{
    error_response, ANALYSIS_FAILED, FILE_TOO_LARGE, INVALID_REQUEST, NOT_FOUND, NO_FILE_PART,
    NO_SELECTED_FILE,
};
pub use state::AppState;

use crate::config::AppConfig;
use crate::observability;
use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::time::Instant;
use tracing::Instrument;

/// Room for multipart boundaries and the text fields on top of the photo itself
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the application router with its middleware
pub fn build_router(config: &AppConfig) -> Router {
    let state = AppState::new(config);
    let body_limit = config
        .analysis
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(ui::index_page))
        .route("/upload", post(routes::upload_handler))
        .route("/static/img/{filename}", get(routes::static_image_handler))
        .fallback(routes::fallback_handler)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(cors_and_metrics))
        .with_state(state)
}

fn apply_cors_headers(response: &mut Response) {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
}

async fn cors_and_metrics(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = observability::http_span(method.as_str(), &path);

    let mut response = if method == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).instrument(span.clone()).await
    };
    apply_cors_headers(&mut response);

    let status = response.status().as_u16();
    let duration = start_time.elapsed();
    observability::record_request_metrics(method.as_str(), status, duration);
    span.in_scope(|| {
        tracing::debug!(
            status = status,
            duration_ms = duration.as_millis() as u64,
            "Request completed"
        );
    });

    response
}

/// Bind `HOST:PORT` and serve until `shutdown` resolves
pub async fn run_server<F>(config: &AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(config);
    let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
    tracing::info!("Scalp meter listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}
