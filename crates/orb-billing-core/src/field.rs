//! Typed field accessors over a [`RawBag`].
//!
//! Each field of a model is described by one of four descriptors, chosen by
//! whether the field is required and whether it is nullable:
//!
//! | Descriptor | Read when absent | Read when `null` | Write `None` |
//! |---|---|---|---|
//! | [`Required`] | `MissingField` | `InvalidField` | not accepted |
//! | [`RequiredNullable`] | `MissingField` | `Ok(None)` | stores `null` |
//! | [`Optional`] | `Ok(None)` | `Ok(None)` (see [`CodecOptions::null_as_unset`]) | removes the key |
//! | [`OptionalNullable`] | `Ok(None)` | `Ok(None)` | stores `null` |
//!
//! Reads are never cached: every call decodes the stored JSON again.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::options::CodecOptions;
use crate::raw::RawBag;

fn decode<T: DeserializeOwned>(field: &str, value: &Value) -> Result<T> {
    T::deserialize(value).map_err(|e| ModelError::invalid(field, e))
}

fn encode<T: Serialize>(field: &str, value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| ModelError::invalid(field, e))
}

macro_rules! descriptor {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<T> {
            name: &'static str,
            _type: PhantomData<fn() -> T>,
        }

        impl<T> $name<T> {
            /// Describe the field stored under the wire name `name`.
            #[must_use]
            pub const fn new(name: &'static str) -> Self {
                Self {
                    name,
                    _type: PhantomData,
                }
            }

            /// The wire name of the field.
            #[must_use]
            pub const fn name(&self) -> &'static str {
                self.name
            }

            /// Whether the field's key is present in `raw`.
            #[must_use]
            pub fn has(&self, raw: &RawBag) -> bool {
                raw.has(self.name)
            }
        }

        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<T> Copy for $name<T> {}

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.name)
            }
        }
    };
}

descriptor!(
    /// A field that must be present and must not be `null`.
    Required
);
descriptor!(
    /// A field that must be present but may be `null`.
    RequiredNullable
);
descriptor!(
    /// A field that may be absent but is never written as `null`.
    Optional
);
descriptor!(
    /// A field that may be absent, and may be explicitly set to `null`.
    OptionalNullable
);

impl<T: DeserializeOwned + Serialize> Required<T> {
    /// Decode the field.
    ///
    /// # Errors
    ///
    /// `MissingField` if absent, `InvalidField` if `null` or of the wrong shape.
    pub fn get(&self, raw: &RawBag) -> Result<T> {
        let value = raw.get(self.name).ok_or_else(|| ModelError::missing(self.name))?;
        decode(self.name, value)
    }

    /// Encode and store `value`.
    ///
    /// # Errors
    ///
    /// `InvalidField` if `value` cannot be serialized to JSON.
    pub fn set(&self, raw: &mut RawBag, value: &T) -> Result<()> {
        raw.set(self.name, encode(self.name, value)?);
        Ok(())
    }
}

impl<T: DeserializeOwned + Serialize> RequiredNullable<T> {
    /// Decode the field; a stored `null` reads as `None`.
    ///
    /// # Errors
    ///
    /// `MissingField` if absent, `InvalidField` if of the wrong shape.
    pub fn get(&self, raw: &RawBag) -> Result<Option<T>> {
        match raw.get(self.name) {
            None => Err(ModelError::missing(self.name)),
            Some(Value::Null) => Ok(None),
            Some(value) => decode(self.name, value).map(Some),
        }
    }

    /// Store `value`, writing an explicit `null` for `None`.
    ///
    /// # Errors
    ///
    /// `InvalidField` if `value` cannot be serialized to JSON.
    pub fn set(&self, raw: &mut RawBag, value: Option<&T>) -> Result<()> {
        let encoded = match value {
            Some(value) => encode(self.name, value)?,
            None => Value::Null,
        };
        raw.set(self.name, encoded);
        Ok(())
    }
}

impl<T: DeserializeOwned + Serialize> Optional<T> {
    /// Decode the field with default [`CodecOptions`].
    ///
    /// # Errors
    ///
    /// `InvalidField` if the stored value has the wrong shape.
    pub fn get(&self, raw: &RawBag) -> Result<Option<T>> {
        self.get_with(raw, &CodecOptions::default())
    }

    /// Decode the field.
    ///
    /// A stored `null` reads as `None` when `options.null_as_unset` is set and
    /// is decoded as `T` (normally failing) otherwise.
    ///
    /// # Errors
    ///
    /// `InvalidField` if the stored value has the wrong shape.
    pub fn get_with(&self, raw: &RawBag, options: &CodecOptions) -> Result<Option<T>> {
        match raw.get(self.name) {
            None => Ok(None),
            Some(Value::Null) if options.null_as_unset => Ok(None),
            Some(value) => decode(self.name, value).map(Some),
        }
    }

    /// Store `value`; `None` leaves the field unset, removing any prior value.
    ///
    /// # Errors
    ///
    /// `InvalidField` if `value` cannot be serialized to JSON.
    pub fn set(&self, raw: &mut RawBag, value: Option<&T>) -> Result<()> {
        match value {
            Some(value) => raw.set(self.name, encode(self.name, value)?),
            None => {
                raw.remove(self.name);
            }
        }
        Ok(())
    }
}

impl<T: DeserializeOwned + Serialize> OptionalNullable<T> {
    /// Decode the field; absent and `null` both read as `None`.
    ///
    /// Use [`OptionalNullable::has`] to tell "explicitly cleared" from "never set".
    ///
    /// # Errors
    ///
    /// `InvalidField` if the stored value has the wrong shape.
    pub fn get(&self, raw: &RawBag) -> Result<Option<T>> {
        match raw.get(self.name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => decode(self.name, value).map(Some),
        }
    }

    /// Store `value`, writing an explicit `null` for `None`.
    ///
    /// # Errors
    ///
    /// `InvalidField` if `value` cannot be serialized to JSON.
    pub fn set(&self, raw: &mut RawBag, value: Option<&T>) -> Result<()> {
        let encoded = match value {
            Some(value) => encode(self.name, value)?,
            None => Value::Null,
        };
        raw.set(self.name, encoded);
        Ok(())
    }

    /// Remove the key entirely, returning the field to "never set".
    pub fn unset(&self, raw: &mut RawBag) {
        raw.remove(self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ID: Required<String> = Required::new("id");
    const CURRENCY: RequiredNullable<String> = RequiredNullable::new("currency");
    const LIMIT: Optional<i64> = Optional::new("limit");
    const DURATION: OptionalNullable<i64> = OptionalNullable::new("duration_in_months");

    fn bag(value: Value) -> RawBag {
        RawBag::from_value(value).unwrap()
    }

    #[test]
    fn required_missing_and_null() {
        let raw = bag(json!({}));
        assert!(matches!(ID.get(&raw), Err(ModelError::MissingField { field }) if field == "id"));

        let raw = bag(json!({"id": null}));
        assert!(matches!(ID.get(&raw), Err(ModelError::InvalidField { .. })));
    }

    #[test]
    fn required_round_trip() {
        let mut raw = RawBag::new();
        ID.set(&mut raw, &"cpn_1".to_string()).unwrap();
        let encoded = serde_json::to_string(&raw).unwrap();
        let decoded = RawBag::from_json_str(&encoded).unwrap();
        assert_eq!(ID.get(&decoded).unwrap(), "cpn_1");
    }

    #[test]
    fn required_wrong_shape() {
        let raw = bag(json!({"id": 42}));
        assert!(matches!(ID.get(&raw), Err(ModelError::InvalidField { field, .. }) if field == "id"));
    }

    #[test]
    fn required_nullable_reads_null() {
        let raw = bag(json!({"currency": null}));
        assert_eq!(CURRENCY.get(&raw).unwrap(), None);

        let raw = bag(json!({}));
        assert!(matches!(CURRENCY.get(&raw), Err(ModelError::MissingField { .. })));
    }

    #[test]
    fn required_nullable_set_none_writes_null() {
        let mut raw = RawBag::new();
        CURRENCY.set(&mut raw, None).unwrap();
        assert_eq!(raw.get("currency"), Some(&Value::Null));
    }

    #[test]
    fn optional_set_none_is_noop_when_absent() {
        let mut raw = RawBag::new();
        LIMIT.set(&mut raw, None).unwrap();
        assert!(!LIMIT.has(&raw));
        assert_eq!(LIMIT.get(&raw).unwrap(), None);
        assert!(raw.is_empty());
    }

    #[test]
    fn optional_set_none_clears_prior_value() {
        let mut raw = RawBag::new();
        LIMIT.set(&mut raw, Some(&20)).unwrap();
        assert_eq!(LIMIT.get(&raw).unwrap(), Some(20));

        LIMIT.set(&mut raw, None).unwrap();
        assert!(!LIMIT.has(&raw));
        assert_eq!(LIMIT.get(&raw).unwrap(), None);
    }

    #[test]
    fn optional_null_respects_options() {
        let raw = bag(json!({"limit": null}));
        assert_eq!(LIMIT.get(&raw).unwrap(), None);
        assert!(matches!(
            LIMIT.get_with(&raw, &CodecOptions::strict()),
            Err(ModelError::InvalidField { .. })
        ));
    }

    #[test]
    fn optional_nullable_explicit_null_persists() {
        let mut raw = RawBag::new();
        DURATION.set(&mut raw, None).unwrap();
        assert!(DURATION.has(&raw));
        assert_eq!(DURATION.get(&raw).unwrap(), None);

        let encoded = serde_json::to_string(&raw).unwrap();
        assert_eq!(encoded, r#"{"duration_in_months":null}"#);
        let decoded = RawBag::from_json_str(&encoded).unwrap();
        assert!(DURATION.has(&decoded));
        assert_eq!(DURATION.get(&decoded).unwrap(), None);
    }

    #[test]
    fn optional_nullable_unset_removes_key() {
        let mut raw = RawBag::new();
        DURATION.set(&mut raw, Some(&12)).unwrap();
        DURATION.unset(&mut raw);
        assert!(!DURATION.has(&raw));
    }

    #[test]
    fn reads_are_not_cached() {
        let mut raw = bag(json!({"limit": 5}));
        assert_eq!(LIMIT.get(&raw).unwrap(), Some(5));
        raw.set("limit", json!("five"));
        assert!(LIMIT.get(&raw).is_err());
    }

    #[test]
    fn descriptor_debug_names_field() {
        assert_eq!(format!("{ID:?}"), "Required(id)");
    }
}
