use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use jsonapi_core::{filter, ErrorObject};

use crate::api::response::ErrorDocumentResponse;

/// Map filter parsing errors to a 400 JSON:API error document.
pub fn filter_error_to_response(
    e: &filter::Error,
    request_id: Option<&str>,
) -> ErrorDocumentResponse {
    let response = ErrorDocumentResponse::from(ErrorObject::from(e));
    match request_id {
        Some(id) => response.with_id(id),
        None => response,
    }
}

/// A query string axum could not decode at all (e.g. broken percent-encoding).
pub fn query_rejection_to_response(
    rejection: &QueryRejection,
    request_id: Option<&str>,
) -> ErrorDocumentResponse {
    let response = ErrorDocumentResponse::from(
        ErrorObject::new(StatusCode::BAD_REQUEST.as_u16(), "Invalid query string")
            .with_code("QUERY_INVALID")
            .with_detail(rejection.body_text()),
    );
    match request_id {
        Some(id) => response.with_id(id),
        None => response,
    }
}
