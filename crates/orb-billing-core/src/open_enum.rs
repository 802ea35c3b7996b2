//! Open-world wire enums.
//!
//! The API adds enum members over time. An [`OpenEnum`] keeps whatever string
//! the server sent, so decoding and re-encoding never loses a value. Only
//! [`OpenEnum::known`] (and therefore validation) cares whether the value is
//! one of the statically declared tags.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ModelError, Result};
use crate::model::Validate;
use crate::options::CodecOptions;

/// The closed set of tags an [`OpenEnum`] recognizes.
///
/// Implemented by [`open_enum!`](crate::open_enum).
pub trait KnownTag: Copy + Sized + 'static {
    /// Type name used in error messages.
    const ENUM_NAME: &'static str;

    /// Every declared tag, in declaration order.
    const ALL: &'static [Self];

    /// Wire string for this tag.
    fn as_wire(self) -> &'static str;

    /// Look up the tag for a wire string.
    fn from_wire(raw: &str) -> Option<Self>;
}

/// A wire enum value that preserves unrecognized members.
pub struct OpenEnum<K> {
    raw: String,
    _tag: PhantomData<fn() -> K>,
}

impl<K: KnownTag> OpenEnum<K> {
    /// Wrap a raw wire string, known or not.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            _tag: PhantomData,
        }
    }

    /// The exact wire string.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The recognized tag.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnrecognizedEnumValue`] for values outside the
    /// declared set.
    pub fn known(&self) -> Result<K> {
        K::from_wire(&self.raw).ok_or_else(|| ModelError::UnrecognizedEnumValue {
            enum_name: K::ENUM_NAME,
            raw: self.raw.clone(),
        })
    }

    /// Whether the value is one of the declared tags.
    #[must_use]
    pub fn is_known(&self) -> bool {
        K::from_wire(&self.raw).is_some()
    }

    /// Consume the value, returning the wire string.
    #[must_use]
    pub fn into_raw(self) -> String {
        self.raw
    }
}

impl<K: KnownTag> From<K> for OpenEnum<K> {
    fn from(tag: K) -> Self {
        Self::from_raw(tag.as_wire())
    }
}

impl<K> Clone for OpenEnum<K> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            _tag: PhantomData,
        }
    }
}

impl<K> PartialEq for OpenEnum<K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K> Eq for OpenEnum<K> {}

impl<K: KnownTag> PartialEq<K> for OpenEnum<K> {
    fn eq(&self, other: &K) -> bool {
        self.raw == other.as_wire()
    }
}

impl<K> Hash for OpenEnum<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<K: KnownTag> fmt::Debug for OpenEnum<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}({})", K::ENUM_NAME, self.raw)
        } else {
            write!(f, "{}(unknown: {})", K::ENUM_NAME, self.raw)
        }
    }
}

impl<K> fmt::Display for OpenEnum<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<K> Serialize for OpenEnum<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de, K: KnownTag> Deserialize<'de> for OpenEnum<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from_raw)
    }
}

impl<K: KnownTag> Validate for OpenEnum<K> {
    fn validate_with(&self, options: &CodecOptions) -> Result<()> {
        if options.strict_enums {
            self.known().map(|_| ())
        } else {
            Ok(())
        }
    }
}

/// Declare the known tags of an open enum.
///
/// ```
/// use orb_billing_core::{open_enum, OpenEnum};
///
/// open_enum! {
///     /// Lifecycle status of a plan.
///     pub enum PlanStatus {
///         /// Available for new subscriptions.
///         Active = "active",
///         /// No longer offered.
///         Archived = "archived",
///     }
/// }
///
/// let status: OpenEnum<PlanStatus> = OpenEnum::from_raw("retired");
/// assert!(status.known().is_err());
/// assert_eq!(status.raw(), "retired");
/// ```
#[macro_export]
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $wire:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant,
            )+
        }

        impl $crate::KnownTag for $name {
            const ENUM_NAME: &'static str = stringify!($name);
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_wire(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            fn from_wire(raw: &str) -> Option<Self> {
                match raw {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::KnownTag::as_wire(*self))
            }
        }
    };
}
