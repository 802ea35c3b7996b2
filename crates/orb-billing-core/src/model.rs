//! The contract shared by every model and parameter type.
//!
//! A model is a thin wrapper around a [`RawBag`]. Construction from server
//! data never fails ([`Model::from_raw_unchecked`]); checking is deferred to
//! field reads or to an explicit [`Validate::validate`] call, which walks every
//! declared field in order and stops at the first error.
//!
//! Concrete models are declared with [`model!`](crate::model):
//!
//! ```
//! use orb_billing_core::{model, Model, Validate};
//!
//! model! {
//!     /// A discount coupon.
//!     pub struct Coupon {
//!         /// Coupon identifier.
//!         required id / set_id: String = "id";
//!         /// Months the discount applies for.
//!         optional_nullable duration_in_months / set_duration_in_months: i64 = "duration_in_months";
//!     }
//! }
//!
//! let coupon = Coupon::from_json_str(r#"{"id":"cpn_1","unknown":true}"#).unwrap();
//! assert_eq!(coupon.id().unwrap(), "cpn_1");
//! assert!(coupon.validate().is_ok());
//! assert_eq!(coupon.to_json_string().unwrap(), r#"{"id":"cpn_1","unknown":true}"#);
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::options::CodecOptions;
use crate::raw::RawBag;

/// Eager structural check of a decoded value.
pub trait Validate {
    /// Check this value with default [`CodecOptions`].
    ///
    /// # Errors
    ///
    /// Returns the first invalid field, unrecognized enum value, or
    /// unmatched union encountered.
    fn validate(&self) -> Result<()> {
        self.validate_with(&CodecOptions::default())
    }

    /// Check this value, recursing into nested models, unions, and
    /// collections with the same `options`.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered under `options`.
    fn validate_with(&self, options: &CodecOptions) -> Result<()>;
}

macro_rules! always_valid {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Validate for $ty {
                fn validate_with(&self, _options: &CodecOptions) -> Result<()> {
                    Ok(())
                }
            }
        )*
    };
}

always_valid!(
    String,
    bool,
    i32,
    i64,
    u32,
    u64,
    f64,
    Value,
    chrono::DateTime<chrono::Utc>,
    chrono::NaiveDate,
);

impl<T: Validate> Validate for Option<T> {
    fn validate_with(&self, options: &CodecOptions) -> Result<()> {
        self.as_ref().map_or(Ok(()), |inner| inner.validate_with(options))
    }
}

impl<T: Validate> Validate for Box<T> {
    fn validate_with(&self, options: &CodecOptions) -> Result<()> {
        (**self).validate_with(options)
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate_with(&self, options: &CodecOptions) -> Result<()> {
        self.iter().try_for_each(|item| item.validate_with(options))
    }
}

impl<T: Validate, S> Validate for HashMap<String, T, S> {
    fn validate_with(&self, options: &CodecOptions) -> Result<()> {
        self.values().try_for_each(|item| item.validate_with(options))
    }
}

impl<T: Validate> Validate for BTreeMap<String, T> {
    fn validate_with(&self, options: &CodecOptions) -> Result<()> {
        self.values().try_for_each(|item| item.validate_with(options))
    }
}

/// A raw-bag-backed model or parameter object.
pub trait Model: Validate + Clone + Serialize + DeserializeOwned {
    /// Wrap `raw` without checking any field.
    fn from_raw_unchecked(raw: RawBag) -> Self;

    /// Borrow the backing bag.
    fn raw(&self) -> &RawBag;

    /// Mutably borrow the backing bag.
    fn raw_mut(&mut self) -> &mut RawBag;

    /// Consume the model, returning its bag.
    fn into_raw(self) -> RawBag;

    /// Wrap `raw` and validate every field.
    ///
    /// # Errors
    ///
    /// Returns the first validation error.
    fn from_raw(raw: RawBag) -> Result<Self> {
        Self::from_raw_with(raw, &CodecOptions::default())
    }

    /// Wrap `raw` and validate every field under `options`.
    ///
    /// # Errors
    ///
    /// Returns the first validation error.
    fn from_raw_with(raw: RawBag, options: &CodecOptions) -> Result<Self> {
        let model = Self::from_raw_unchecked(raw);
        model.validate_with(options)?;
        Ok(model)
    }

    /// Copy of the backing bag.
    fn to_raw(&self) -> RawBag {
        self.raw().clone()
    }

    /// Whether `key` is present in the backing bag.
    fn has(&self, key: &str) -> bool {
        self.raw().has(key)
    }

    /// Return a copy of this model with one raw key overridden.
    #[must_use]
    fn with_raw(&self, key: &str, value: Value) -> Self {
        Self::from_raw_unchecked(self.raw().with(key, value))
    }

    /// Parse a JSON object without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a JSON object.
    fn from_json_str(json: &str) -> Result<Self> {
        RawBag::from_json_str(json).map(Self::from_raw_unchecked)
    }

    /// Encode the backing bag with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    fn to_json_string(&self) -> Result<String> {
        self.to_json_string_with(&CodecOptions::default())
    }

    /// Encode the backing bag.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    fn to_json_string_with(&self, options: &CodecOptions) -> Result<String> {
        options.encode(self.raw())
    }
}

/// Declare a raw-bag-backed model.
///
/// Each field line is `kind getter / setter: Type = "wire_name";` where `kind`
/// is one of `required`, `required_nullable`, `optional`, or
/// `optional_nullable`. Getters decode on every call. Setters for `required`
/// fields take `impl Into<Type>`; the others take `Option<Type>`.
#[macro_export]
macro_rules! model {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $kind:ident $getter:ident / $setter:ident : $ty:ty = $wire:literal;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            raw: $crate::RawBag,
        }

        #[allow(clippy::missing_errors_doc)]
        impl $name {
            /// Create an instance with no fields set.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            $(
                $crate::model!(@accessors $kind, $getter, $setter, $ty, $wire, [$(#[$fmeta])*]);
            )*
        }

        impl $crate::Validate for $name {
            #[allow(unused_variables)]
            fn validate_with(&self, options: &$crate::CodecOptions) -> $crate::Result<()> {
                $(
                    $crate::Validate::validate_with(
                        &$crate::model!(@read $kind, $ty, $wire, &self.raw, options)?,
                        options,
                    )?;
                )*
                Ok(())
            }
        }

        impl $crate::Model for $name {
            fn from_raw_unchecked(raw: $crate::RawBag) -> Self {
                Self { raw }
            }

            fn raw(&self) -> &$crate::RawBag {
                &self.raw
            }

            fn raw_mut(&mut self) -> &mut $crate::RawBag {
                &mut self.raw
            }

            fn into_raw(self) -> $crate::RawBag {
                self.raw
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                $crate::__private::serde::Serialize::serialize(&self.raw, serializer)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                <$crate::RawBag as $crate::__private::serde::Deserialize<'de>>::deserialize(
                    deserializer,
                )
                .map(|raw| Self { raw })
            }
        }
    };

    (@read optional, $ty:ty, $wire:literal, $raw:expr, $options:expr) => {
        $crate::field::Optional::<$ty>::new($wire).get_with($raw, $options)
    };

    (@read required, $ty:ty, $wire:literal, $raw:expr, $options:expr) => {
        $crate::field::Required::<$ty>::new($wire).get($raw)
    };

    (@read required_nullable, $ty:ty, $wire:literal, $raw:expr, $options:expr) => {
        $crate::field::RequiredNullable::<$ty>::new($wire).get($raw)
    };

    (@read optional_nullable, $ty:ty, $wire:literal, $raw:expr, $options:expr) => {
        $crate::field::OptionalNullable::<$ty>::new($wire).get($raw)
    };

    (@accessors required, $getter:ident, $setter:ident, $ty:ty, $wire:literal, [$(#[$m:meta])*]) => {
        $(#[$m])*
        pub fn $getter(&self) -> $crate::Result<$ty> {
            $crate::field::Required::<$ty>::new($wire).get(&self.raw)
        }

        #[doc = concat!("Set `", $wire, "`.")]
        pub fn $setter(&mut self, value: impl Into<$ty>) -> $crate::Result<()> {
            $crate::field::Required::<$ty>::new($wire).set(&mut self.raw, &value.into())
        }
    };

    (@accessors required_nullable, $getter:ident, $setter:ident, $ty:ty, $wire:literal, [$(#[$m:meta])*]) => {
        $(#[$m])*
        pub fn $getter(&self) -> $crate::Result<Option<$ty>> {
            $crate::field::RequiredNullable::<$ty>::new($wire).get(&self.raw)
        }

        #[doc = concat!("Set `", $wire, "`; `None` stores `null`.")]
        pub fn $setter(&mut self, value: Option<$ty>) -> $crate::Result<()> {
            $crate::field::RequiredNullable::<$ty>::new($wire).set(&mut self.raw, value.as_ref())
        }
    };

    (@accessors optional, $getter:ident, $setter:ident, $ty:ty, $wire:literal, [$(#[$m:meta])*]) => {
        $(#[$m])*
        pub fn $getter(&self) -> $crate::Result<Option<$ty>> {
            $crate::field::Optional::<$ty>::new($wire).get(&self.raw)
        }

        #[doc = concat!("Set `", $wire, "`; `None` leaves it unset.")]
        pub fn $setter(&mut self, value: Option<$ty>) -> $crate::Result<()> {
            $crate::field::Optional::<$ty>::new($wire).set(&mut self.raw, value.as_ref())
        }
    };

    (@accessors optional_nullable, $getter:ident, $setter:ident, $ty:ty, $wire:literal, [$(#[$m:meta])*]) => {
        $(#[$m])*
        pub fn $getter(&self) -> $crate::Result<Option<$ty>> {
            $crate::field::OptionalNullable::<$ty>::new($wire).get(&self.raw)
        }

        #[doc = concat!("Set `", $wire, "`; `None` stores an explicit `null`.")]
        pub fn $setter(&mut self, value: Option<$ty>) -> $crate::Result<()> {
            $crate::field::OptionalNullable::<$ty>::new($wire).set(&mut self.raw, value.as_ref())
        }
    };
}
