use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    response::Response,
};

use snipbin_core::DocumentPath;

use crate::app::dto::DocumentQuery;
use crate::app::errors::{AppError, ErrorSink, Rejection};
use crate::app::render::HtmlMode;
use crate::context::AppState;

/// `GET /{document}[.ext]`: highlighted code view, or reader view with `?reader=true`.
pub async fn static_document(
    Extension(state): Extension<Arc<AppState>>,
    Path(document): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, Rejection> {
    let errors = state.html_errors();
    let query = DocumentQuery::from_pairs(pairs);
    let path = DocumentPath::parse(&document);

    let doc = state
        .documents
        .fetch(path.id)
        .await
        .map_err(|e| errors.reject(e))?;

    state
        .renderer
        .html(doc, HtmlMode::select(query.reader(), path.extension))
        .await
        .map_err(|e| errors.reject(e))
}

/// `GET /api/{document}`: JSON envelope.
pub async fn fetch_document(
    Extension(state): Extension<Arc<AppState>>,
    Path(document): Path<String>,
) -> Result<Response, Rejection> {
    let path = DocumentPath::parse(&document);

    let doc = state
        .documents
        .fetch(path.id)
        .await
        .map_err(|e| ErrorSink::Json.reject(e))?;

    Ok(state.renderer.api(&doc))
}

/// `GET /raw/{document}`: content only, as plain text.
///
/// A malformed id is answered with the JSON envelope; lookup failures with a
/// single plain-text line.
pub async fn fetch_raw_document(
    Extension(state): Extension<Arc<AppState>>,
    Path(document): Path<String>,
) -> Result<Response, Rejection> {
    let path = DocumentPath::parse(&document);

    let doc = state.documents.fetch(path.id).await.map_err(|e| match e {
        AppError::BadIdentifier(_) => ErrorSink::Json.reject(e),
        e => ErrorSink::text(path.id).reject(e),
    })?;

    Ok(state.renderer.raw(doc))
}
