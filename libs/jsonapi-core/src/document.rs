//! JSON:API error documents (`{"errors": [...]}`).

use serde::{Deserialize, Serialize};

use crate::filter;

/// Points at the part of the request an error refers to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// JSON Pointer into the request document, e.g. `/data/attributes/email`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    /// Name of the query parameter that caused the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl ErrorSource {
    /// Pointer to a primary resource attribute: `/data/attributes/<field>`.
    pub fn attribute(field: &str) -> Self {
        Self {
            pointer: Some(format!("/data/attributes/{field}")),
            parameter: None,
        }
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Self {
            pointer: None,
            parameter: Some(name.into()),
        }
    }
}

/// A single JSON:API error object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Identifier of this occurrence (the request id when one is known).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// HTTP status code, as a string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Application-specific error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

impl ErrorObject {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            status: Some(status.to_string()),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_source(mut self, source: ErrorSource) -> Self {
        self.source = Some(source);
        self
    }

    /// The numeric status, if one is set and well formed.
    pub fn status_code(&self) -> Option<u16> {
        self.status.as_deref()?.parse().ok()
    }
}

impl From<&filter::Error> for ErrorObject {
    fn from(e: &filter::Error) -> Self {
        match e {
            filter::Error::InvalidOperator { key, .. } => ErrorObject::new(400, "Invalid filter")
                .with_code("FILTER_OPERATOR_INVALID")
                .with_detail(e.to_string())
                .with_source(ErrorSource::parameter(key.clone())),
        }
    }
}

/// Top-level document carrying one or more errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

impl ErrorDocument {
    pub fn new(errors: Vec<ErrorObject>) -> Self {
        Self { errors }
    }

    pub fn single(error: ErrorObject) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn push(&mut self, error: ErrorObject) {
        self.errors.push(error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// HTTP status for the whole document.
    ///
    /// A shared status is used as is. Mixed statuses collapse to the most
    /// general one of their class: `500` if any error is a server error,
    /// otherwise `400`. Documents without any usable status yield `None`.
    pub fn status(&self) -> Option<u16> {
        let mut codes = self.errors.iter().filter_map(ErrorObject::status_code);
        let first = codes.next()?;
        let mut server_error = first >= 500;
        let mut uniform = true;
        for code in codes {
            uniform &= code == first;
            server_error |= code >= 500;
        }
        Some(match (uniform, server_error) {
            (true, _) => first,
            (false, true) => 500,
            (false, false) => 400,
        })
    }
}

impl From<ErrorObject> for ErrorDocument {
    fn from(error: ErrorObject) -> Self {
        Self::single(error)
    }
}
