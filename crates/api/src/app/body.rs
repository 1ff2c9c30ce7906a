//! Create-request body decoding.
//!
//! The `Content-Type` primary token picks a decoder; parameters such as
//! `charset` or `boundary` never influence the choice. Unknown types decode to
//! an empty request, which then fails field validation downstream.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::body::Body;
use bytes::Bytes;
use multer::{Constraints, Multipart, SizeLimit};

use snipbin_core::CreateRequest;

use crate::app::errors::AppError;

const CONTENT_FIELD: &str = "content";

/// Body encodings understood by the create endpoints.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BodyFormat {
    Json,
    Multipart,
}

impl BodyFormat {
    const TABLE: [(&'static str, BodyFormat); 2] = [
        ("application/json", BodyFormat::Json),
        ("multipart/form-data", BodyFormat::Multipart),
    ];

    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let token = essence(content_type);
        Self::TABLE
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, format)| *format)
    }
}

/// Primary media type token: `multipart/form-data; boundary=x` → `multipart/form-data`.
pub fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

#[derive(Debug, Clone)]
pub struct BodyDecoder {
    max_body_bytes: usize,
}

impl BodyDecoder {
    pub fn new(max_body_bytes: usize) -> Self {
        Self { max_body_bytes }
    }

    /// Buffer the request body, refusing anything past the size bound.
    pub async fn read(&self, body: Body) -> Result<Bytes, AppError> {
        axum::body::to_bytes(body, self.max_body_bytes)
            .await
            .map_err(|e| {
                AppError::ValidationFailed(format!(
                    "request body rejected (limit {} bytes): {e}",
                    self.max_body_bytes
                ))
            })
    }

    /// Decode an already-buffered body according to `content_type`.
    pub async fn decode(
        &self,
        content_type: Option<&str>,
        body: Bytes,
    ) -> Result<CreateRequest, AppError> {
        let Some(content_type) = content_type else {
            return Ok(CreateRequest::default());
        };

        match BodyFormat::from_content_type(content_type) {
            Some(BodyFormat::Json) => decode_json(&body),
            Some(BodyFormat::Multipart) => {
                decode_multipart(content_type, body, self.max_body_bytes).await
            }
            None => Ok(CreateRequest::default()),
        }
    }
}

fn decode_json(body: &[u8]) -> Result<CreateRequest, AppError> {
    let mut fields: HashMap<String, String> =
        serde_json::from_slice(body).map_err(|e| AppError::DecodeFailed(e.to_string()))?;

    Ok(CreateRequest {
        content: fields.remove(CONTENT_FIELD).unwrap_or_default(),
    })
}

async fn decode_multipart(
    content_type: &str,
    body: Bytes,
    limit: usize,
) -> Result<CreateRequest, AppError> {
    let decode_err = |e: multer::Error| AppError::DecodeFailed(e.to_string());

    let boundary = multer::parse_boundary(content_type).map_err(decode_err)?;
    let constraints =
        Constraints::new().size_limit(SizeLimit::new().whole_stream(limit as u64));
    let stream = futures_util::stream::once(async move { Ok::<_, Infallible>(body) });
    let mut multipart = Multipart::with_constraints(stream, boundary, constraints);

    while let Some(field) = multipart.next_field().await.map_err(decode_err)? {
        if field.name() == Some(CONTENT_FIELD) {
            let content = field.text().await.map_err(decode_err)?;
            return Ok(CreateRequest { content });
        }
    }

    Ok(CreateRequest::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder() -> BodyDecoder {
        BodyDecoder::new(1024 * 1024)
    }

    fn multipart_body(boundary: &str, name: &str, value: &str) -> Bytes {
        Bytes::from(format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n--{boundary}--\r\n"
        ))
    }

    #[test]
    fn essence_ignores_parameters_and_case() {
        assert_eq!(essence("Application/JSON; charset=utf-8"), "application/json");
        assert_eq!(
            BodyFormat::from_content_type("multipart/form-data; boundary=abc"),
            Some(BodyFormat::Multipart)
        );
        assert_eq!(BodyFormat::from_content_type("text/plain"), None);
    }

    #[tokio::test]
    async fn json_content_field() {
        let req = decoder()
            .decode(Some("application/json"), Bytes::from_static(br#"{"content":"hello"}"#))
            .await
            .unwrap();
        assert_eq!(req, CreateRequest { content: "hello".into() });
    }

    #[tokio::test]
    async fn json_without_content_field_is_empty() {
        let req = decoder()
            .decode(Some("application/json; charset=utf-8"), Bytes::from_static(br#"{"other":"x"}"#))
            .await
            .unwrap();
        assert_eq!(req, CreateRequest::default());
    }

    #[tokio::test]
    async fn malformed_json_fails_to_decode() {
        let err = decoder()
            .decode(Some("application/json"), Bytes::from_static(b"{not json"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DecodeFailed(_)));
    }

    #[tokio::test]
    async fn unrecognized_type_is_empty_without_error() {
        let req = decoder()
            .decode(Some("text/plain"), Bytes::from_static(b"content=hello"))
            .await
            .unwrap();
        assert_eq!(req, CreateRequest::default());

        let req = decoder().decode(None, Bytes::from_static(b"hello")).await.unwrap();
        assert_eq!(req, CreateRequest::default());
    }

    #[tokio::test]
    async fn multipart_content_field() {
        let body = multipart_body("XyZ", "content", "hello\nworld");
        let req = decoder()
            .decode(Some("multipart/form-data; boundary=XyZ"), body)
            .await
            .unwrap();
        assert_eq!(req.content, "hello\nworld");
    }

    #[tokio::test]
    async fn multipart_without_boundary_fails() {
        let err = decoder()
            .decode(Some("multipart/form-data"), Bytes::from_static(b"--x--"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::DecodeFailed(_)));
    }

    #[tokio::test]
    async fn read_enforces_limit() {
        let small = BodyDecoder::new(4);
        assert!(small.read(Body::from("abcd")).await.is_ok());
        let err = small.read(Body::from("abcde")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationFailed(_)));
    }
}
