use orb_billing_core::{Model, Page};

use crate::client::{ListPage, OrbClient};
use crate::error::ClientError;
use crate::types::{Coupon, CouponCreateParams, CouponListParams};

/// `/coupons` endpoints.
#[derive(Debug, Clone)]
pub struct CouponService {
    client: OrbClient,
}

impl CouponService {
    pub(crate) fn new(client: OrbClient) -> Self {
        Self { client }
    }

    /// Create a coupon.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn create(&self, params: &CouponCreateParams) -> Result<Coupon, ClientError> {
        self.client.post(&["coupons"], Some(params.raw())).await
    }

    /// Fetch a coupon by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the coupon does not exist.
    pub async fn fetch(&self, coupon_id: &str) -> Result<Coupon, ClientError> {
        self.client.get(&["coupons", coupon_id], None).await
    }

    /// Fetch the first page of coupons.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(
        &self,
        params: CouponListParams,
    ) -> Result<ListPage<CouponListParams, Coupon>, ClientError> {
        Page::first(self.client.list_endpoint(&["coupons"]), params).await
    }

    /// Archive a coupon so it can no longer be redeemed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the coupon does not exist.
    pub async fn archive(&self, coupon_id: &str) -> Result<Coupon, ClientError> {
        self.client.post(&["coupons", coupon_id, "archive"], None).await
    }
}
