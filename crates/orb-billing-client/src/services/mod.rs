//! Per-resource API services.
//!
//! Each service is a cheap handle over a cloned [`OrbClient`](crate::OrbClient),
//! obtained from the client's accessor methods.

mod coupons;
mod customers;
mod plans;
mod subscriptions;

pub use coupons::CouponService;
pub use customers::CustomerService;
pub use plans::PlanService;
pub use subscriptions::SubscriptionService;
