use std::sync::Arc;

use axum::{
    Json,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use minijinja::context;
use thiserror::Error;

use snipbin_core::DomainError;
use snipbin_infra::StoreError;

use crate::app::dto::Envelope;
use crate::app::render::{Templates, templates};

/// Every failure the HTTP layer can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Malformed or wrong-length document identifier.
    #[error("{0}")]
    BadIdentifier(String),
    /// Request fields (or the body as a whole) out of range.
    #[error("{0}")]
    ValidationFailed(String),
    /// No document stored under the identifier.
    #[error("{0}")]
    NotFound(String),
    /// The request body could not be parsed.
    #[error("{0}")]
    DecodeFailed(String),
    /// Template, Markdown or highlighting failure.
    #[error("{0}")]
    RenderFailed(String),
    /// Anything else, including storage errors other than not-found.
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadIdentifier(_) | AppError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            AppError::DecodeFailed(_) | AppError::RenderFailed(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::RenderFailed(err.to_string())
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidId(msg) => AppError::BadIdentifier(msg),
            DomainError::Validation(fields) => AppError::ValidationFailed(fields.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            AppError::NotFound(err.to_string())
        } else {
            AppError::Internal(err.to_string())
        }
    }
}

/// Where an error is reported, and in which shape.
///
/// Each route picks one sink up front; any failure along the way is handed to
/// it via [`ErrorSink::reject`], so call sites never format errors themselves.
#[derive(Clone)]
pub enum ErrorSink {
    /// `{"payload": {}, "error": "<message>"}`.
    Json,
    /// Rendered `error.html` page.
    Html(Arc<Templates>),
    /// Single `text/plain` line naming the document.
    Text { id: String },
}

impl ErrorSink {
    pub fn text(id: impl Into<String>) -> Self {
        Self::Text { id: id.into() }
    }

    pub fn reject(&self, error: impl Into<AppError>) -> Rejection {
        Rejection {
            sink: self.clone(),
            error: error.into(),
        }
    }
}

/// A classified failure bound to its sink; turns into the final response.
pub struct Rejection {
    sink: ErrorSink,
    error: AppError,
}

impl std::fmt::Debug for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rejection").field("error", &self.error).finish()
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let status = self.error.status();
        match self.sink {
            ErrorSink::Json => json_error(status, &self.error),
            ErrorSink::Html(templates) => html_error(&templates, status, &self.error),
            ErrorSink::Text { id } => text_error(&id, status, &self.error),
        }
    }
}

pub fn json_error(status: StatusCode, err: &AppError) -> Response {
    tracing::debug!(error = %err, status = status.as_u16(), "request error");
    (status, Json(Envelope::err(err.to_string()))).into_response()
}

pub fn html_error(templates: &Templates, status: StatusCode, err: &AppError) -> Response {
    let status_line = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    );

    match templates.render(
        templates::ERROR,
        context! { status => status_line, error => err.to_string() },
    ) {
        Ok(page) => (status, Html(page)).into_response(),
        Err(render_err) => {
            tracing::error!(error = %render_err, cause = %err, "error template failed to render");
            status.into_response()
        }
    }
}

pub fn text_error(id: &str, status: StatusCode, err: &AppError) -> Response {
    let line = match status {
        StatusCode::NOT_FOUND => format!("Document with ID {id} not found: {err}"),
        _ => format!("Error fetching document with ID {id}: {err}"),
    };
    (status, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], line).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipbin_core::{CreateRequest, Request};

    async fn body_string(res: Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn status_selection() {
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::BadIdentifier("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::ValidationFailed("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::DecodeFailed("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::RenderFailed("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::Internal("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_errors_classify_binary() {
        assert!(matches!(AppError::from(StoreError::NotFound), AppError::NotFound(_)));
        assert!(matches!(
            AppError::from(StoreError::Backend("db down".into())),
            AppError::Internal(_)
        ));
        assert!(matches!(
            AppError::from(StoreError::Conflict("abc".into())),
            AppError::Internal(_)
        ));
    }

    #[test]
    fn validation_message_lists_fields() {
        let err = Request::from(CreateRequest::default()).validate(10).unwrap_err();
        assert_eq!(
            AppError::from(err),
            AppError::ValidationFailed("content: cannot be blank.".into())
        );
    }

    #[tokio::test]
    async fn json_sink_writes_empty_payload() {
        let res = ErrorSink::Json
            .reject(StoreError::NotFound)
            .into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body: serde_json::Value = serde_json::from_str(&body_string(res).await).unwrap();
        assert_eq!(body, serde_json::json!({"payload": {}, "error": "document not found"}));
    }

    #[tokio::test]
    async fn text_sink_names_document() {
        let res = ErrorSink::text("abc123")
            .reject(StoreError::NotFound)
            .into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_string(res).await,
            "Document with ID abc123 not found: document not found"
        );

        let res = ErrorSink::text("abc123")
            .reject(StoreError::Backend("timeout".into()))
            .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_string(res).await,
            "Error fetching document with ID abc123: storage error: timeout"
        );
    }

    #[tokio::test]
    async fn html_sink_renders_status_line() {
        let templates = Arc::new(Templates::load("").unwrap());
        let res = ErrorSink::Html(templates)
            .reject(AppError::BadIdentifier("id is of length 3, should be 6".into()))
            .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let page = body_string(res).await;
        assert!(page.contains("400 Bad Request"));
        assert!(page.contains("id is of length 3, should be 6"));
    }
}
