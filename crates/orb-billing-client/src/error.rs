//! Client error types.

use orb_billing_core::ModelError;
use serde::Deserialize;

/// Errors that can occur when using the Orb client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response or parameter object could not be decoded, validated, or
    /// paginated.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The request was malformed or failed validation (400).
    #[error("bad request: {title}")]
    BadRequest {
        /// Short summary.
        title: String,
        /// Longer explanation, if any.
        detail: Option<String>,
    },

    /// The API key is missing or invalid (401).
    #[error("unauthorized: {title}")]
    Unauthorized {
        /// Short summary.
        title: String,
        /// Longer explanation, if any.
        detail: Option<String>,
    },

    /// The resource does not exist (404).
    #[error("not found: {title}")]
    NotFound {
        /// Short summary.
        title: String,
        /// Longer explanation, if any.
        detail: Option<String>,
    },

    /// The request conflicts with current state or a reused idempotency key (409).
    #[error("conflict: {title}")]
    Conflict {
        /// Short summary.
        title: String,
        /// Longer explanation, if any.
        detail: Option<String>,
    },

    /// Too many requests (429).
    #[error("rate limited: {title}")]
    RateLimited {
        /// Short summary.
        title: String,
        /// Longer explanation, if any.
        detail: Option<String>,
    },

    /// Any other error response.
    #[error("API error: {status} - {title}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Short summary.
        title: String,
        /// Longer explanation, if any.
        detail: Option<String>,
    },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// HTTP status of an API error response, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest { .. } => Some(400),
            Self::Unauthorized { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::Conflict { .. } => Some(409),
            Self::RateLimited { .. } => Some(429),
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Model(_) | Self::Serialization(_) | Self::Configuration(_) => None,
        }
    }

    /// Build the typed error for an error response.
    pub(crate) fn from_response(status: u16, body: Option<ApiErrorBody>) -> Self {
        let (title, detail) = match body {
            Some(body) => (body.title, body.detail),
            None => (format!("HTTP {status}"), None),
        };
        match status {
            400 => Self::BadRequest { title, detail },
            401 => Self::Unauthorized { title, detail },
            404 => Self::NotFound { title, detail },
            409 => Self::Conflict { title, detail },
            429 => Self::RateLimited { title, detail },
            _ => Self::Api {
                status,
                title,
                detail,
            },
        }
    }
}

/// Problem-details body returned with error responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    /// Short summary.
    pub title: String,
    /// Longer explanation.
    #[serde(default)]
    pub detail: Option<String>,
}
