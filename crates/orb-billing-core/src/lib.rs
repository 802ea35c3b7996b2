//! Model substrate for the Orb billing client.
//!
//! Every model and parameter type in the client is built from the pieces in
//! this crate:
//!
//! - **Raw storage**: [`RawBag`], an ordered JSON object that is the sole
//!   storage of a model. Unknown fields survive decode, mutate, and encode.
//! - **Field accessors**: [`field::Required`], [`field::RequiredNullable`],
//!   [`field::Optional`], [`field::OptionalNullable`]. They separate "absent"
//!   from "explicitly `null`".
//! - **Open enums**: [`OpenEnum`] and [`open_enum!`], which keep unknown wire
//!   values instead of failing.
//! - **Unions**: [`tagged_union!`] and [`untagged_union!`].
//! - **Models**: the [`Model`] and [`Validate`] traits and [`model!`].
//! - **Pagination**: [`Page`], [`PageFetcher`], [`CursorParams`].
//!
//! # Lazy checking
//!
//! Construction from server data never fails. A field whose stored JSON does
//! not match its declared type errors on the first read, or on an explicit
//! [`Validate::validate`] call that checks the whole object graph at once.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod field;
pub mod model;
pub mod open_enum;
pub mod options;
pub mod page;
pub mod raw;
pub mod variant;

pub use error::{ModelError, Result};
pub use model::{Model, Validate};
pub use open_enum::{KnownTag, OpenEnum};
pub use options::CodecOptions;
pub use page::{
    list_from_value, CursorParams, Page, PageFetcher, PaginatedList, PaginationMetadata,
};
pub use raw::{RawBag, RawBagBuilder};
pub use variant::Variant;

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
}
