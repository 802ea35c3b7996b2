//! Request and response models.
//!
//! Every type here is backed by a [`RawBag`](orb_billing_core::RawBag):
//! fields the client does not declare are kept and sent back unchanged.

mod coupons;
mod customers;
mod plans;
mod subscriptions;

pub use coupons::*;
pub use customers::*;
pub use plans::*;
pub use subscriptions::*;
