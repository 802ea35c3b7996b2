use orb_billing_core::{Model, Page};

use crate::client::{ListPage, OrbClient};
use crate::error::ClientError;
use crate::types::{
    Subscription, SubscriptionCancelParams, SubscriptionCreateParams, SubscriptionListParams,
};

/// `/subscriptions` endpoints.
#[derive(Debug, Clone)]
pub struct SubscriptionService {
    client: OrbClient,
}

impl SubscriptionService {
    pub(crate) fn new(client: OrbClient) -> Self {
        Self { client }
    }

    /// Subscribe a customer to a plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn create(
        &self,
        params: &SubscriptionCreateParams,
    ) -> Result<Subscription, ClientError> {
        self.client.post(&["subscriptions"], Some(params.raw())).await
    }

    /// Fetch a subscription by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the subscription does not exist.
    pub async fn fetch(&self, subscription_id: &str) -> Result<Subscription, ClientError> {
        self.client.get(&["subscriptions", subscription_id], None).await
    }

    /// Fetch the first page of subscriptions.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(
        &self,
        params: SubscriptionListParams,
    ) -> Result<ListPage<SubscriptionListParams, Subscription>, ClientError> {
        Page::first(self.client.list_endpoint(&["subscriptions"]), params).await
    }

    /// Cancel a subscription.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn cancel(
        &self,
        subscription_id: &str,
        params: &SubscriptionCancelParams,
    ) -> Result<Subscription, ClientError> {
        self.client
            .post(&["subscriptions", subscription_id, "cancel"], Some(params.raw()))
            .await
    }
}
