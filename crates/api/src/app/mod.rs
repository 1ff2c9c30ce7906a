//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: document store selection, lookup and creation pipeline
//! - `body.rs`: create-request body decoding (JSON / multipart)
//! - `render/`: response rendering (JSON, raw, highlighted code, Markdown reader)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: the `{payload, error}` JSON envelope
//! - `errors.rs`: error taxonomy and per-surface error responses

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Extension, Router,
    http::{HeaderValue, header},
};
use tower::ServiceBuilder;
use tower_http::{
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use snipbin_infra::{AppConfig, DocumentStore};

use crate::context::AppState;

pub mod body;
pub mod dto;
pub mod errors;
pub mod render;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Selects the document store from `config.connection_uri`.
pub async fn build_app(config: AppConfig) -> anyhow::Result<Router> {
    let store = services::build_store(&config).await?;
    build_app_with_store(config, store)
}

/// Build the router over an explicit store (used by tests and embedders).
pub fn build_app_with_store(
    config: AppConfig,
    store: Arc<dyn DocumentStore>,
) -> anyhow::Result<Router> {
    let templates = Arc::new(
        render::Templates::load(&config.analytics).context("failed to compile HTML templates")?,
    );
    let highlighter =
        Arc::new(render::Highlighter::new().context("failed to load syntax highlighter")?);
    let renderer = render::Renderer::new(templates.clone(), highlighter);

    let csp = config
        .content_security_policy
        .as_deref()
        .map(HeaderValue::from_str)
        .transpose()
        .context("content security policy is not a valid header value")?;

    let documents = services::DocumentService::new(&config, store);
    let decoder = body::BodyDecoder::new(config.max_body_bytes());
    let state = Arc::new(AppState::new(documents, decoder, templates, renderer));

    Ok(routes::router(config.headless)
        .layer(Extension(state))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // `None` leaves responses untouched.
                .layer(SetResponseHeaderLayer::if_not_present(
                    header::CONTENT_SECURITY_POLICY,
                    csp,
                )),
        ))
}
