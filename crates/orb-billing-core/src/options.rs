//! Codec configuration passed explicitly through encode and decode calls.

use serde::Serialize;

use crate::error::Result;

/// Options controlling how models are decoded and encoded.
///
/// There is no process-wide default; callers that need non-default behavior
/// pass a value to [`Validate::validate_with`](crate::Validate::validate_with),
/// [`Model::from_raw_with`](crate::Model::from_raw_with),
/// [`Model::to_json_string_with`](crate::Model::to_json_string_with), or
/// [`Optional::get_with`](crate::field::Optional::get_with).
/// Generated getters always read with the defaults.
///
/// [`CodecOptions::default`] reads a present `null` in an optional,
/// non-nullable field as "unset", reports unrecognized open-enum values during
/// validation, and encodes compactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Read `null` in an optional, non-nullable field as unset instead of
    /// raising `InvalidField`.
    pub null_as_unset: bool,
    /// Report open-enum values outside the declared set as
    /// `UnrecognizedEnumValue` during validation.
    pub strict_enums: bool,
    /// Pretty-print encoded JSON documents.
    pub pretty: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            null_as_unset: true,
            strict_enums: true,
            pretty: false,
        }
    }
}

impl CodecOptions {
    /// Options that reject `null` wherever the field is not declared nullable.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            null_as_unset: false,
            ..Self::default()
        }
    }

    /// Options that accept unrecognized open-enum values during validation
    /// while still checking every field's shape.
    #[must_use]
    pub fn shape_only() -> Self {
        Self {
            strict_enums: false,
            ..Self::default()
        }
    }

    /// Enable or disable pretty printing.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Encode `value` as a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be serialized.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_is_lenient_and_compact() {
        let opts = CodecOptions::default();
        assert!(opts.null_as_unset);
        assert!(opts.strict_enums);
        assert_eq!(opts.encode(&json!({"a": 1})).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn strict_rejects_null_as_unset() {
        assert!(!CodecOptions::strict().null_as_unset);
        assert!(CodecOptions::strict().strict_enums);
    }

    #[test]
    fn shape_only_relaxes_enums_only() {
        let opts = CodecOptions::shape_only();
        assert!(!opts.strict_enums);
        assert!(opts.null_as_unset);
    }

    #[test]
    fn pretty_encoding() {
        let opts = CodecOptions::default().with_pretty(true);
        assert_eq!(opts.encode(&json!({"a": 1})).unwrap(), "{\n  \"a\": 1\n}");
    }
}
