use std::sync::Arc;

use axum::{
    body::Body,
    extract::Extension,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};

use snipbin_core::{Document, Request};

use crate::app::dto;
use crate::app::errors::{AppError, ErrorSink, Rejection};
use crate::context::AppState;

/// `POST /api/`: create a document from a JSON or multipart body.
pub async fn create_document(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, Rejection> {
    let doc = create(&state, &headers, body)
        .await
        .map_err(|e| ErrorSink::Json.reject(e))?;

    Ok(dto::json_ok(StatusCode::OK, doc))
}

/// `POST /`: create from the index page form, then redirect to the new document.
pub async fn create_from_form(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, Rejection> {
    let doc = create(&state, &headers, body)
        .await
        .map_err(|e| state.html_errors().reject(e))?;

    Ok(Redirect::to(&format!("/{}", doc.id)).into_response())
}

async fn create(state: &AppState, headers: &HeaderMap, body: Body) -> Result<Document, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let bytes = state.decoder.read(body).await?;
    let request = state.decoder.decode(content_type, bytes).await?;

    state.documents.create(Request::Create(request)).await
}
