use orb_billing_core::Page;

use crate::client::{ListPage, OrbClient};
use crate::error::ClientError;
use crate::types::{Plan, PlanListParams};

/// `/plans` endpoints.
#[derive(Debug, Clone)]
pub struct PlanService {
    client: OrbClient,
}

impl PlanService {
    pub(crate) fn new(client: OrbClient) -> Self {
        Self { client }
    }

    /// Fetch a plan by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the plan does not exist.
    pub async fn fetch(&self, plan_id: &str) -> Result<Plan, ClientError> {
        self.client.get(&["plans", plan_id], None).await
    }

    /// Fetch the first page of plans.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(
        &self,
        params: PlanListParams,
    ) -> Result<ListPage<PlanListParams, Plan>, ClientError> {
        Page::first(self.client.list_endpoint(&["plans"]), params).await
    }
}
