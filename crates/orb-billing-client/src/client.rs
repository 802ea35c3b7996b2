//! Orb HTTP client implementation.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use orb_billing_core::{CursorParams, Model, Page, PageFetcher, PaginatedList, RawBag};
use reqwest::{Client, Method, RequestBuilder, Response, Url};

use crate::config::{ClientConfig, ClientOptions};
use crate::error::{ApiErrorBody, ClientError};
use crate::query::to_query_pairs;
use crate::services::{CouponService, CustomerService, PlanService, SubscriptionService};

/// Orb API client.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct OrbClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl OrbClient {
    /// Create a client for the production API.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the HTTP client cannot be
    /// built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(api_key, ClientOptions::default())
    }

    /// Create a client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty, the base URL is invalid, or
    /// the HTTP client cannot be built.
    pub fn with_options(
        api_key: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ClientError::Configuration("API key is empty".into()));
        }

        let base_url = Url::parse(options.base_url.trim_end_matches('/')).map_err(|e| {
            ClientError::Configuration(format!("invalid base URL {}: {e}", options.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Configuration(format!(
                "base URL cannot have paths appended: {}",
                options.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .user_agent(options.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Create a client from the secrets file or environment variables.
    ///
    /// See [`ClientConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured.
    pub fn from_env() -> Result<Self, ClientError> {
        let config = ClientConfig::from_env()?;
        Self::with_options(config.api_key, config.options)
    }

    /// The API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Coupon endpoints.
    #[must_use]
    pub fn coupons(&self) -> CouponService {
        CouponService::new(self.clone())
    }

    /// Customer endpoints.
    #[must_use]
    pub fn customers(&self) -> CustomerService {
        CustomerService::new(self.clone())
    }

    /// Plan endpoints.
    #[must_use]
    pub fn plans(&self) -> PlanService {
        PlanService::new(self.clone())
    }

    /// Subscription endpoints.
    #[must_use]
    pub fn subscriptions(&self) -> SubscriptionService {
        SubscriptionService::new(self.clone())
    }

    /// A fetcher for the list endpoint at `segments`.
    pub(crate) fn list_endpoint<P, T>(&self, segments: &[&str]) -> ListEndpoint<P, T> {
        ListEndpoint {
            client: self.clone(),
            segments: segments.iter().map(|s| (*s).to_string()).collect(),
            _types: PhantomData,
        }
    }

    /// `GET` a model, with `query` encoded into the query string.
    pub(crate) async fn get<T: Model>(
        &self,
        segments: &[&str],
        query: Option<&RawBag>,
    ) -> Result<T, ClientError> {
        let mut request = self.request(Method::GET, segments);
        if let Some(query) = query {
            request = request.query(&to_query_pairs(query));
        }
        self.execute(request).await
    }

    /// `POST` a bag as the JSON body. Every call carries a fresh idempotency key.
    pub(crate) async fn post<T: Model>(
        &self,
        segments: &[&str],
        body: Option<&RawBag>,
    ) -> Result<T, ClientError> {
        let mut request = self
            .request(Method::POST, segments)
            .header("Idempotency-Key", uuid::Uuid::new_v4().to_string());
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request).await
    }

    /// `PUT` a bag as the JSON body.
    pub(crate) async fn put<T: Model>(
        &self,
        segments: &[&str],
        body: &RawBag,
    ) -> Result<T, ClientError> {
        let request = self.request(Method::PUT, segments).json(body);
        self.execute(request).await
    }

    /// `DELETE` a resource, discarding any response body.
    pub(crate) async fn delete(&self, segments: &[&str]) -> Result<(), ClientError> {
        self.send(self.request(Method::DELETE, segments)).await?;
        Ok(())
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Cannot fail: `with_options` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        self.client
            .request(method, self.url(segments))
            .bearer_auth(&self.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        tracing::debug!(%method, %path, "Sending Orb request");
        let response = self.client.execute(request).await?;
        let status = response.status();
        tracing::debug!(%method, %path, status = status.as_u16(), "Received Orb response");

        if status.is_success() {
            return Ok(response);
        }

        let body: Option<ApiErrorBody> = response.json().await.ok();
        let error = ClientError::from_response(status.as_u16(), body);
        tracing::warn!(%method, %path, status = status.as_u16(), %error, "Orb request failed");
        Err(error)
    }

    /// Send `request` and wrap the body without validating it.
    async fn execute<T: Model>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        let raw = RawBag::from_value(serde_json::from_slice(&body)?)?;
        Ok(T::from_raw_unchecked(raw))
    }
}

/// [`PageFetcher`] for one list endpoint.
pub struct ListEndpoint<P, T> {
    client: OrbClient,
    segments: Vec<String>,
    _types: PhantomData<fn() -> (P, T)>,
}

impl<P, T> Clone for ListEndpoint<P, T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            segments: self.segments.clone(),
            _types: PhantomData,
        }
    }
}

impl<P, T> std::fmt::Debug for ListEndpoint<P, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListEndpoint")
            .field("segments", &self.segments)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<P, T> PageFetcher for ListEndpoint<P, T>
where
    P: CursorParams + Send + Sync + 'static,
    T: Model + Send + Sync + 'static,
{
    type Params = P;
    type Item = T;
    type Error = ClientError;

    async fn fetch_page(&self, params: P) -> Result<PaginatedList<T>, ClientError> {
        let segments: Vec<&str> = self.segments.iter().map(String::as_str).collect();
        self.client.get(&segments, Some(params.raw())).await
    }
}

/// A page of results from a list endpoint.
pub type ListPage<P, T> = Page<ListEndpoint<P, T>>;
