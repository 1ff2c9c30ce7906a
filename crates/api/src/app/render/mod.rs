//! Response rendering for fetched documents.
//!
//! One document, four output modes:
//! - **api**: JSON envelope
//! - **raw**: the content bytes as `text/plain`
//! - **reader**: Markdown rendered into `reader.html`
//! - **code**: syntax-highlighted content in `document.html`
//!
//! HTML failures are returned as `AppError::RenderFailed`; callers hand them
//! to the HTML error sink.

use std::sync::Arc;

use axum::{
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use minijinja::{Value, context};

use snipbin_core::Document;

use crate::app::dto;
use crate::app::errors::AppError;

pub mod highlight;
pub mod markdown;
pub mod templates;

pub use highlight::Highlighter;
pub use templates::Templates;

/// Which HTML view to produce for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlMode {
    /// Markdown reader view.
    Reader,
    /// Highlighted code view, with an optional file-extension hint.
    Code { extension: Option<String> },
}

impl HtmlMode {
    /// `reader=true` wins; otherwise code mode with whatever hint the path carried.
    pub fn select(reader: bool, extension: Option<&str>) -> Self {
        if reader {
            HtmlMode::Reader
        } else {
            HtmlMode::Code {
                extension: extension.map(str::to_string),
            }
        }
    }
}

#[derive(Clone)]
pub struct Renderer {
    templates: Arc<Templates>,
    highlighter: Arc<Highlighter>,
}

impl Renderer {
    pub fn new(templates: Arc<Templates>, highlighter: Arc<Highlighter>) -> Self {
        Self {
            templates,
            highlighter,
        }
    }

    pub fn api(&self, document: &Document) -> Response {
        dto::json_ok(StatusCode::OK, document)
    }

    pub fn raw(&self, document: Document) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            document.content,
        )
            .into_response()
    }

    pub async fn html(&self, document: Document, mode: HtmlMode) -> Result<Response, AppError> {
        let page = match mode {
            HtmlMode::Reader => self.reader_page(&document)?,
            HtmlMode::Code { extension } => self.code_page(document, extension).await?,
        };
        Ok((StatusCode::OK, Html(page)).into_response())
    }

    fn reader_page(&self, document: &Document) -> Result<String, AppError> {
        let content = markdown::render(&document.content);
        self.templates
            .render(
                templates::READER,
                context! { content => Value::from_safe_string(content) },
            )
            .map_err(AppError::render)
    }

    async fn code_page(
        &self,
        document: Document,
        extension: Option<String>,
    ) -> Result<String, AppError> {
        // Highlighting is CPU-bound and proportional to document size.
        let highlighter = self.highlighter.clone();
        let (document, extension, highlighted) = tokio::task::spawn_blocking(move || {
            let highlighted = highlighter.highlight(&document.content, extension.as_deref());
            (document, extension, highlighted)
        })
        .await
        .map_err(AppError::internal)?;
        let highlighted = highlighted.map_err(AppError::render)?;

        self.templates
            .render(
                templates::DOCUMENT,
                context! {
                    stylesheet => Value::from_safe_string(highlighted.stylesheet),
                    highlighted => Value::from_safe_string(highlighted.html),
                    content => document.content,
                    extension => extension.unwrap_or_default(),
                },
            )
            .map_err(AppError::render)
    }
}
