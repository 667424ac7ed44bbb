//! axum integration for JSON:API style endpoints: `filter[...]` extraction,
//! validation and error documents rendered as `application/vnd.api+json`.

pub mod api;

pub use api::filters::Filters;
pub use api::path::JsonApiPath;
pub use api::response::ErrorDocumentResponse;
pub use api::validation::{UnprocessableEntity, ValidatedJson};
pub use jsonapi_core::{
    ErrorDocument, ErrorObject, ErrorSource, FilterOperator, FilterParameters, APPLICATION_JSON_API,
};
