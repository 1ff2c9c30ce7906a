use axum::{
    Router,
    routing::{get, post},
};

pub mod create;
pub mod documents;
pub mod system;

/// Router for every public endpoint.
///
/// Headless deployments expose only the JSON and raw routes (plus `/health`).
pub fn router(headless: bool) -> Router {
    let api = Router::new()
        .route("/health", get(system::health))
        .route("/api/", post(create::create_document))
        .route("/api/:document", get(documents::fetch_document))
        .route("/raw/:document", get(documents::fetch_raw_document));

    if headless {
        return api;
    }

    api.route("/", get(system::index).post(create::create_from_form))
        .route("/:document", get(documents::static_document))
}
