use std::ops::Deref;

use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use jsonapi_core::ErrorObject;
use serde::de::DeserializeOwned;

use crate::api::filters::request_id;
use crate::api::response::ErrorDocumentResponse;

/// `Path` extractor whose rejection is a JSON:API error document.
#[derive(Debug)]
pub struct JsonApiPath<T>(pub T);

impl<T> Deref for JsonApiPath<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Path segments that do not deserialize, e.g. `/users/abc` for a numeric id.
pub fn path_rejection_to_response(
    rejection: &PathRejection,
    request_id: Option<&str>,
) -> ErrorDocumentResponse {
    let response = ErrorDocumentResponse::from(
        ErrorObject::new(rejection.status().as_u16(), "Invalid path parameter")
            .with_code("PATH_INVALID")
            .with_detail(rejection.body_text()),
    );
    match request_id {
        Some(id) => response.with_id(id),
        None => response,
    }
}

impl<S, T> FromRequestParts<S> for JsonApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ErrorDocumentResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "path parameters rejected");
                Err(path_rejection_to_response(&rejection, request_id(parts)))
            }
        }
    }
}
