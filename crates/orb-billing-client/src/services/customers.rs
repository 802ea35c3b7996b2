use orb_billing_core::{Model, Page};

use crate::client::{ListPage, OrbClient};
use crate::error::ClientError;
use crate::types::{Customer, CustomerCreateParams, CustomerListParams, CustomerUpdateParams};

/// `/customers` endpoints.
#[derive(Debug, Clone)]
pub struct CustomerService {
    client: OrbClient,
}

impl CustomerService {
    pub(crate) fn new(client: OrbClient) -> Self {
        Self { client }
    }

    /// Create a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn create(&self, params: &CustomerCreateParams) -> Result<Customer, ClientError> {
        self.client.post(&["customers"], Some(params.raw())).await
    }

    /// Fetch a customer by Orb ID.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] if the customer does not exist.
    pub async fn fetch(&self, customer_id: &str) -> Result<Customer, ClientError> {
        self.client.get(&["customers", customer_id], None).await
    }

    /// Update a customer. Only fields present in `params` are changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects it.
    pub async fn update(
        &self,
        customer_id: &str,
        params: &CustomerUpdateParams,
    ) -> Result<Customer, ClientError> {
        self.client.put(&["customers", customer_id], params.raw()).await
    }

    /// Fetch the first page of customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(
        &self,
        params: CustomerListParams,
    ) -> Result<ListPage<CustomerListParams, Customer>, ClientError> {
        Page::first(self.client.list_endpoint(&["customers"]), params).await
    }

    /// Delete a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the customer does not exist.
    pub async fn delete(&self, customer_id: &str) -> Result<(), ClientError> {
        self.client.delete(&["customers", customer_id]).await
    }
}
