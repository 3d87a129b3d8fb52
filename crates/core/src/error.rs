//! Error model for the utility layer.

use thiserror::Error;

/// Failure while introspecting an object's properties.
///
/// Returned by the comparison and copy helpers in [`crate::util::object`];
/// any such failure terminates the call.
#[derive(Debug, Error)]
pub enum ObjectError {
    /// The value does not serialize to a map of named properties.
    #[error("{type_name} has no named properties (serializes as {kind})")]
    NotAnObject {
        type_name: &'static str,
        kind: &'static str,
    },

    /// A property name was requested that the type does not expose.
    #[error("{type_name} does not have a property: {name}")]
    UnknownProperty { type_name: &'static str, name: String },

    /// The value could not be converted to or from its property table.
    #[error("property introspection failed: {0}")]
    Introspection(#[from] serde_json::Error),
}

/// Failure surfaced by the JSON helpers that do not swallow errors.
#[derive(Debug, Error)]
pub enum JsonError {
    /// The input text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// Process-wide JSON options were already installed.
    #[error("JSON options are already configured")]
    AlreadyConfigured,
}
