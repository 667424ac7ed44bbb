//! Request extractors and error responses shared by REST modules.

pub mod filters;
pub mod path;
pub mod response;
pub mod validation;

pub use response::{error_response, internal_error, not_found};
