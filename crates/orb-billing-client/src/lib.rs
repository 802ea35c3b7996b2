//! Orb Billing Client SDK.
//!
//! A client for the Orb subscription-billing REST API, built on the
//! raw-bag-backed models of [`orb_billing_core`]. Responses are wrapped
//! without validation; each accessor decodes its field on demand, and fields
//! the client does not know about are kept intact.
//!
//! # Example
//!
//! ```no_run
//! use futures::TryStreamExt;
//! use orb_billing_client::{CouponListParams, OrbClient};
//!
//! # async fn example() -> Result<(), orb_billing_client::ClientError> {
//! let client = OrbClient::new("your-api-key")?;
//!
//! let coupon = client.coupons().fetch("cpn_123").await?;
//! println!("{} redeemed {} times", coupon.redemption_code()?, coupon.times_redeemed()?);
//!
//! // Walk every coupon, one page request at a time.
//! let mut params = CouponListParams::new();
//! params.set_limit(Some(50))?;
//! let coupons: Vec<_> = client
//!     .coupons()
//!     .list(params)
//!     .await?
//!     .into_stream()
//!     .try_collect()
//!     .await?;
//! println!("{} coupons", coupons.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod config;
mod error;
mod query;
pub mod services;
pub mod types;

pub use client::{ListEndpoint, ListPage, OrbClient};
pub use config::{ClientConfig, ClientOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
pub use error::ClientError;
pub use types::*;

pub use orb_billing_core::{Model, ModelError, OpenEnum, Page, RawBag, Validate, Variant};
