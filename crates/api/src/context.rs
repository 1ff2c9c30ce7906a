use std::sync::Arc;

use crate::app::body::BodyDecoder;
use crate::app::errors::ErrorSink;
use crate::app::render::{Renderer, Templates};
use crate::app::services::DocumentService;

/// Shared, read-only state for every request.
///
/// Built once at startup from an immutable `AppConfig`; handlers receive it
/// through an `Extension<Arc<AppState>>`.
pub struct AppState {
    pub documents: DocumentService,
    pub decoder: BodyDecoder,
    pub renderer: Renderer,
    templates: Arc<Templates>,
}

impl AppState {
    pub fn new(
        documents: DocumentService,
        decoder: BodyDecoder,
        templates: Arc<Templates>,
        renderer: Renderer,
    ) -> Self {
        Self {
            documents,
            decoder,
            renderer,
            templates,
        }
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    /// Error sink for browser-facing routes.
    pub fn html_errors(&self) -> ErrorSink {
        ErrorSink::Html(self.templates.clone())
    }
}
