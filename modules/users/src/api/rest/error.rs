use jsonapi_kit::api::not_found;
use jsonapi_kit::{ErrorDocumentResponse, ErrorObject, UnprocessableEntity};

use crate::domain::error::DomainError;

/// Map domain errors to JSON:API error responses
pub fn map_domain_error(error: &DomainError) -> ErrorDocumentResponse {
    match error {
        DomainError::UserNotFound { .. } => not_found(error.to_string()),
        DomainError::UsernameTaken { .. } => {
            ErrorObject::from(&UnprocessableEntity::for_field("username", error.to_string()))
                .with_code("USERNAME_TAKEN")
                .into()
        }
    }
}
