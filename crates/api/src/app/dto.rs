use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

/// Uniform JSON wrapper for every structured API response.
///
/// Success: `{"payload": <T>, "error": ""}`. Failure: `{"payload": {}, "error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub payload: T,
    pub error: String,
}

impl<T> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            payload,
            error: String::new(),
        }
    }
}

impl Envelope<serde_json::Value> {
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            payload: serde_json::Value::Object(Default::default()),
            error: message.into(),
        }
    }
}

pub fn json_ok<T: Serialize>(status: StatusCode, payload: T) -> axum::response::Response {
    (status, Json(Envelope::ok(payload))).into_response()
}

/// Query string of the HTML document route.
///
/// Built from raw pairs so repeated or unknown keys never reject the request;
/// the first `reader` value wins.
#[derive(Debug, Default)]
pub struct DocumentQuery {
    pub reader: Option<String>,
}

impl DocumentQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let reader = pairs
            .into_iter()
            .find(|(key, _)| key == "reader")
            .map(|(_, value)| value);
        Self { reader }
    }

    pub fn reader(&self) -> bool {
        self.reader.as_deref() == Some("true")
    }
}
