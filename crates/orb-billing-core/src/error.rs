//! Error types for the model substrate.

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while decoding, validating, or paginating models.
///
/// Field-level errors are raised lazily: a model built with
/// [`Model::from_raw_unchecked`](crate::Model::from_raw_unchecked) only
/// surfaces them on the first read of the offending field or on `validate()`.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A required field has no key in the raw bag.
    #[error("missing required field `{field}`")]
    MissingField {
        /// The wire name of the field.
        field: String,
    },

    /// The stored JSON could not be decoded as the declared type.
    #[error("invalid value for field `{field}`: {source}")]
    InvalidField {
        /// The wire name of the field.
        field: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// An open enum holds a value outside its known set.
    #[error("unrecognized {enum_name} value `{raw}`")]
    UnrecognizedEnumValue {
        /// The name of the enum type.
        enum_name: &'static str,
        /// The raw wire value.
        raw: String,
    },

    /// No alternative of a union could decode the stored JSON.
    #[error("value did not match any variant of {union}: {detail}")]
    NoMatchingVariant {
        /// The name of the union type.
        union: &'static str,
        /// What went wrong.
        detail: String,
    },

    /// `next()` was called on a page with no cursor.
    #[error("no next page available")]
    PaginationExhausted,

    /// A model was built from JSON that is not an object.
    #[error("expected a JSON object, found {found}")]
    NotAnObject {
        /// The JSON kind that was found instead.
        found: &'static str,
    },

    /// Whole-document JSON parse or encode failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InvalidField {
            field: field.into(),
            source,
        }
    }

    /// Returns `true` for errors caused by the shape of stored data, as opposed
    /// to misuse of the pagination protocol.
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        !matches!(self, Self::PaginationExhausted)
    }
}

/// Name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
