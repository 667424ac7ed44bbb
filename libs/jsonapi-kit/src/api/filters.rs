use std::ops::Deref;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use jsonapi_core::{parse_filter_parameters, FilterParameters};

use crate::api::response::ErrorDocumentResponse;

pub mod error;
pub use error::{filter_error_to_response, query_rejection_to_response};

/// Header carrying the request id; copied into error objects as their `id`.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub(crate) fn request_id(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
}

/// Read the raw query string of a request and parse its `filter[...]` keys.
/// - Repeated keys are kept, one pair per value
/// - Query strings that cannot be decoded are rejected with 400
/// - Unknown operators are rejected with 400, pointing at the offending key
pub async fn extract_filter_parameters<S>(
    parts: &mut Parts,
    state: &S,
) -> Result<FilterParameters, ErrorDocumentResponse>
where
    S: Send + Sync,
{
    let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
        .await
        .map_err(|rejection| {
            tracing::debug!(error = %rejection, "query string rejected");
            query_rejection_to_response(&rejection, request_id(parts))
        })?;

    parse_filter_parameters(pairs).map_err(|e| {
        tracing::debug!(error = %e, "filter parameters rejected");
        filter_error_to_response(&e, request_id(parts))
    })
}

/// Axum extractor for `filter[attribute][OPERATOR]=value` query parameters.
/// Usage in handlers:
///   async fn list_users(Filters(filters): Filters) { /* use `filters` */ }
#[derive(Debug, Clone, Default)]
pub struct Filters(pub FilterParameters);

impl Filters {
    #[inline]
    pub fn into_inner(self) -> FilterParameters {
        self.0
    }
}

impl Deref for Filters {
    type Target = FilterParameters;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<FilterParameters> for Filters {
    #[inline]
    fn as_ref(&self) -> &FilterParameters {
        &self.0
    }
}

impl From<Filters> for FilterParameters {
    #[inline]
    fn from(x: Filters) -> Self {
        x.0
    }
}

impl<S> FromRequestParts<S> for Filters
where
    S: Send + Sync,
{
    type Rejection = ErrorDocumentResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        extract_filter_parameters(parts, state).await.map(Filters)
    }
}

#[cfg(test)]
#[path = "filters_tests.rs"]
mod filters_tests;
