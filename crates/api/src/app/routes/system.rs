use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use minijinja::context;

use crate::app::errors::{AppError, Rejection};
use crate::app::render::templates;
use crate::context::AppState;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// `GET /`: the paste form.
pub async fn index(Extension(state): Extension<Arc<AppState>>) -> Result<Response, Rejection> {
    let page = state
        .templates()
        .render(templates::INDEX, context! {})
        .map_err(|e| state.html_errors().reject(AppError::render(e)))?;

    Ok(Html(page).into_response())
}
