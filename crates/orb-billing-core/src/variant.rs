//! Tagged unions over alternative payload shapes.
//!
//! Two flavors are supported:
//!
//! - [`tagged_union!`](crate::tagged_union): every alternative is a model that
//!   carries a discriminator field with a distinct literal. Decoding reads the
//!   discriminator and dispatches straight to that alternative.
//! - [`untagged_union!`](crate::untagged_union): alternatives share no
//!   discriminator. Decoding tries each alternative in declared order and
//!   accepts the first one that both deserializes and validates. When none
//!   does, the first alternative that only fails on unrecognized enum values
//!   is kept. Declare the most specific alternative first.
//!
//! Either way the union encodes as its active alternative, with no wrapper.

use serde_json::Value;

/// Common behavior of generated unions.
pub trait Variant: Sized {
    /// Name of the union type, for error messages.
    const UNION_NAME: &'static str;

    /// Alternative names in declared order.
    const VARIANTS: &'static [&'static str];

    /// Name of the active alternative.
    fn variant_name(&self) -> &'static str;

    /// Decode `value` into one alternative.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NoMatchingVariant`](crate::ModelError::NoMatchingVariant)
    /// when no alternative accepts `value`.
    fn decode(value: &Value) -> crate::Result<Self>;
}

/// Declare a union whose alternatives are selected by a discriminator field.
///
/// Every alternative must be a [`Model`](crate::Model). Wrapping an
/// alternative with `From` writes that alternative's discriminator, replacing
/// whatever the bag held.
///
/// ```
/// use orb_billing_core::{model, tagged_union, Model, Variant};
///
/// model! {
///     /// Percent off.
///     pub struct PercentageDiscount {
///         required percentage_discount / set_percentage_discount: f64 = "percentage_discount";
///     }
/// }
///
/// model! {
///     /// Fixed amount off.
///     pub struct AmountDiscount {
///         required amount_discount / set_amount_discount: String = "amount_discount";
///     }
/// }
///
/// tagged_union! {
///     /// Any discount.
///     pub enum Discount {
///         tag = "discount_type";
///         Percentage(PercentageDiscount) = "percentage",
///         Amount(AmountDiscount) = "amount",
///     }
/// }
///
/// let json = serde_json::json!({"discount_type": "amount", "amount_discount": "5.00"});
/// let discount = Discount::decode(&json).unwrap();
/// assert_eq!(discount.variant_name(), "Amount");
/// ```
#[macro_export]
macro_rules! tagged_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            tag = $tag:literal;
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ty) = $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
        }

        impl $name {
            /// Wire name of the discriminator field.
            pub const DISCRIMINATOR: &'static str = $tag;

            /// Discriminator value of the active alternative.
            #[must_use]
            pub fn discriminator(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $wire,)+
                }
            }
        }

        impl $crate::Variant for $name {
            const UNION_NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [&'static str] = &[$(stringify!($variant)),+];

            fn variant_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant),)+
                }
            }

            fn decode(value: &$crate::__private::serde_json::Value) -> $crate::Result<Self> {
                let tag = value
                    .get($tag)
                    .and_then($crate::__private::serde_json::Value::as_str)
                    .ok_or_else(|| $crate::ModelError::NoMatchingVariant {
                        union: stringify!($name),
                        detail: format!("missing string discriminator `{}`", $tag),
                    })?;
                match tag {
                    $(
                        $wire => <$ty as $crate::__private::serde::Deserialize>::deserialize(value)
                            .map(Self::$variant)
                            .map_err(|e| $crate::ModelError::NoMatchingVariant {
                                union: stringify!($name),
                                detail: format!("{} alternative: {e}", stringify!($variant)),
                            }),
                    )+
                    other => Err($crate::ModelError::NoMatchingVariant {
                        union: stringify!($name),
                        detail: format!("unknown {} `{other}`", $tag),
                    }),
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    let mut raw = $crate::Model::into_raw(value);
                    raw.set($tag, $crate::__private::serde_json::Value::from($wire));
                    Self::$variant(<$ty as $crate::Model>::from_raw_unchecked(raw))
                }
            }
        )+

        impl $crate::Validate for $name {
            fn validate_with(&self, options: &$crate::CodecOptions) -> $crate::Result<()> {
                match self {
                    $(Self::$variant(inner) => $crate::Validate::validate_with(inner, options),)+
                }
            }
        }

        $crate::__union_serde!($name, $($variant),+);
    };
}

/// Declare a union decoded by trying each alternative in order.
///
/// An alternative matches when it deserializes and then validates. The first
/// match wins. If nothing matches, the first alternative that validates under
/// [`CodecOptions::shape_only`](crate::CodecOptions::shape_only) is kept, so an
/// enum value added server-side still decodes and only fails `validate`.
/// The generated `matching_variants` lists every alternative that accepts a
/// payload, so ambiguous payloads can be detected.
///
/// ```
/// use chrono::{DateTime, Utc};
/// use orb_billing_core::{open_enum, untagged_union, OpenEnum, Validate, Variant};
///
/// open_enum! {
///     /// Relative start keywords.
///     pub enum StartKeyword {
///         /// Immediately.
///         Now = "now",
///     }
/// }
///
/// untagged_union! {
///     /// A timestamp or a keyword.
///     pub enum StartDate {
///         Timestamp(DateTime<Utc>),
///         Keyword(OpenEnum<StartKeyword>),
///     }
/// }
///
/// let date = StartDate::decode(&serde_json::json!("now")).unwrap();
/// assert_eq!(date.variant_name(), "Keyword");
///
/// let later = StartDate::decode(&serde_json::json!("later")).unwrap();
/// assert_eq!(later.variant_name(), "Keyword");
/// assert!(later.validate().is_err());
/// assert!(StartDate::decode(&serde_json::json!(12)).is_err());
/// ```
#[macro_export]
macro_rules! untagged_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant($ty),
            )+
        }

        impl $name {
            /// Names of every alternative that accepts `value`, in declared order.
            ///
            /// Alternatives that fully validate are listed when there are any;
            /// otherwise those that only fail on unrecognized enum values. More
            /// than one entry means the payload is ambiguous and decoding picks
            /// the first.
            #[must_use]
            pub fn matching_variants(
                value: &$crate::__private::serde_json::Value,
            ) -> Vec<&'static str> {
                let relaxed = $crate::CodecOptions::shape_only();
                let mut exact = Vec::new();
                let mut lenient = Vec::new();
                $(
                    if let Ok(candidate) = <$ty as $crate::__private::serde::Deserialize>::deserialize(value) {
                        if $crate::Validate::validate(&candidate).is_ok() {
                            exact.push(stringify!($variant));
                        } else if $crate::Validate::validate_with(&candidate, &relaxed).is_ok() {
                            lenient.push(stringify!($variant));
                        }
                    }
                )+
                if exact.is_empty() { lenient } else { exact }
            }
        }

        impl $crate::Variant for $name {
            const UNION_NAME: &'static str = stringify!($name);
            const VARIANTS: &'static [&'static str] = &[$(stringify!($variant)),+];

            fn variant_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant),)+
                }
            }

            fn decode(value: &$crate::__private::serde_json::Value) -> $crate::Result<Self> {
                let relaxed = $crate::CodecOptions::shape_only();
                let mut attempts: Vec<String> = Vec::new();
                let mut fallback: Option<Self> = None;
                $(
                    match <$ty as $crate::__private::serde::Deserialize>::deserialize(value) {
                        Ok(candidate) => match $crate::Validate::validate(&candidate) {
                            Ok(()) => return Ok(Self::$variant(candidate)),
                            Err(e) => {
                                attempts.push(format!("{}: {e}", stringify!($variant)));
                                if fallback.is_none()
                                    && $crate::Validate::validate_with(&candidate, &relaxed).is_ok()
                                {
                                    fallback = Some(Self::$variant(candidate));
                                }
                            }
                        },
                        Err(e) => attempts.push(format!("{}: {e}", stringify!($variant))),
                    }
                )+
                fallback.ok_or_else(|| $crate::ModelError::NoMatchingVariant {
                    union: stringify!($name),
                    detail: attempts.join("; "),
                })
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+

        impl $crate::Validate for $name {
            fn validate_with(&self, options: &$crate::CodecOptions) -> $crate::Result<()> {
                match self {
                    $(Self::$variant(inner) => $crate::Validate::validate_with(inner, options),)+
                }
            }
        }

        $crate::__union_serde!($name, $($variant),+);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __union_serde {
    ($name:ident, $($variant:ident),+) => {
        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                match self {
                    $(Self::$variant(inner) => $crate::__private::serde::Serialize::serialize(inner, serializer),)+
                }
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let value = <$crate::__private::serde_json::Value as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::Variant>::decode(&value)
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}
