use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use jsonapi_core::{ErrorDocument, ErrorObject, APPLICATION_JSON_API};

/// Axum response wrapper that renders an [`ErrorDocument`] with the right
/// status and the JSON:API content type.
#[derive(Debug, Clone)]
pub struct ErrorDocumentResponse {
    pub status: StatusCode,
    pub document: ErrorDocument,
}

impl ErrorDocumentResponse {
    pub fn new(status: StatusCode, document: ErrorDocument) -> Self {
        Self { status, document }
    }

    /// Tag every error that has no id yet, typically with the request id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        for error in self.document.errors.iter_mut().filter(|e| e.id.is_none()) {
            error.id = Some(id.clone());
        }
        self
    }
}

impl From<ErrorDocument> for ErrorDocumentResponse {
    fn from(document: ErrorDocument) -> Self {
        let status = document
            .status()
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self { status, document }
    }
}

impl From<ErrorObject> for ErrorDocumentResponse {
    fn from(error: ErrorObject) -> Self {
        ErrorDocument::single(error).into()
    }
}

impl IntoResponse for ErrorDocumentResponse {
    fn into_response(self) -> Response {
        let mut resp = axum::Json(self.document).into_response();
        *resp.status_mut() = self.status;
        resp.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_JSON_API),
        );
        resp
    }
}

/// Single-error response whose title is the canonical reason phrase.
pub fn error_response(status: StatusCode, detail: impl Into<String>) -> ErrorDocumentResponse {
    let title = status.canonical_reason().unwrap_or("Error");
    ErrorObject::new(status.as_u16(), title)
        .with_detail(detail)
        .into()
}

pub fn not_found(detail: impl Into<String>) -> ErrorDocumentResponse {
    error_response(StatusCode::NOT_FOUND, detail)
}

pub fn internal_error(detail: impl Into<String>) -> ErrorDocumentResponse {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, detail)
}
