//! Validation failures as JSON:API error documents.
//!
//! Constraint violations become `422 Unprocessable Entity` errors whose
//! `source.pointer` names the offending attribute (`/data/attributes/<field>`).

use std::ops::Deref;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jsonapi_core::{ErrorDocument, ErrorObject, ErrorSource};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::api::response::ErrorDocumentResponse;

/// Convert a source error into a JSON:API error object.
pub trait ErrorConverter<S: ?Sized> {
    fn convert(&self, source: &S) -> ErrorObject;
}

/// One failed constraint on one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldViolation<'a> {
    pub field: &'a str,
    pub error: &'a ValidationError,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FieldViolationConverter;

impl<'a> ErrorConverter<FieldViolation<'a>> for FieldViolationConverter {
    fn convert(&self, violation: &FieldViolation<'a>) -> ErrorObject {
        let title = violation
            .error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("{}: {}", violation.field, violation.error.code));

        ErrorObject::new(StatusCode::UNPROCESSABLE_ENTITY.as_u16(), title)
            .with_code(format!("VALIDATION_{}", violation.error.code.to_uppercase()))
            .with_source(ErrorSource::attribute(violation.field))
    }
}

/// Every field violation of `errors`, ordered by field name.
pub fn validation_document(errors: &ValidationErrors) -> ErrorDocument {
    let converter = FieldViolationConverter;
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut document = ErrorDocument::default();
    for (field, violations) in &fields {
        for error in violations.iter() {
            document.push(converter.convert(&FieldViolation {
                field: &**field,
                error,
            }));
        }
    }
    document
}

/// Rejection of [`ValidatedJson`].
#[derive(Debug)]
pub enum ValidationRejection {
    /// Body is missing, not JSON, or does not fit the target type
    Json(JsonRejection),
    /// Constraints not satisfied
    Validation(ValidationErrors),
}

impl IntoResponse for ValidationRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Json(rejection) => ErrorDocumentResponse::from(
                ErrorObject::new(rejection.status().as_u16(), "Invalid request body")
                    .with_code("BODY_INVALID")
                    .with_detail(rejection.body_text()),
            )
            .into_response(),
            Self::Validation(errors) => {
                ErrorDocumentResponse::from(validation_document(&errors)).into_response()
            }
        }
    }
}

/// JSON body extractor that also runs `validator` constraints.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidationRejection::Json)?;
        value.validate().map_err(ValidationRejection::Validation)?;
        Ok(Self(value))
    }
}

/// A request that is well formed but cannot be processed, e.g. a duplicate
/// username. Optionally names the attribute at fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct UnprocessableEntity {
    pub field: Option<String>,
    pub message: String,
}

impl UnprocessableEntity {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

impl From<&UnprocessableEntity> for ErrorObject {
    fn from(e: &UnprocessableEntity) -> Self {
        let error = ErrorObject::new(StatusCode::UNPROCESSABLE_ENTITY.as_u16(), &e.message);
        match &e.field {
            Some(field) => error.with_source(ErrorSource::attribute(field)),
            None => error,
        }
    }
}

impl IntoResponse for UnprocessableEntity {
    fn into_response(self) -> Response {
        ErrorDocumentResponse::from(ErrorObject::from(&self)).into_response()
    }
}
