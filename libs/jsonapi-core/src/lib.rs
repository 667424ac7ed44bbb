//! Transport-agnostic building blocks for JSON:API endpoints.
//!
//! - [`filter`] turns `filter[attribute][OPERATOR]=value` query parameters into
//!   [`FilterParameters`].
//! - [`document`] models JSON:API error documents.

pub mod document;
pub mod filter;

pub use document::{ErrorDocument, ErrorObject, ErrorSource};
pub use filter::{parse_filter_parameters, Error, FilterOperator, FilterParameters};

/// The JSON:API media type.
pub const APPLICATION_JSON_API: &str = "application/vnd.api+json";
