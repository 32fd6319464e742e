//! HTTP client used by the field QR scanner to fetch and update weigh
//! tickets.
//!
//! Deployments of the backend have differed in which update route they
//! expose (bare PUT, POST with a method override, legacy `/update` paths),
//! so [`ScannerClient::update_ticket`] walks a fixed table of candidate
//! endpoints. A 404 or 405 means "this route does not exist here" and moves
//! on to the next candidate; any other failure is a real error and stops
//! the walk immediately.
//!
//! Configuration is via environment variables:
//! - `OLIVE_MILL_URL` - Base URL (default: `http://localhost:3001/api`)
//! - `OLIVE_MILL_TOKEN` - Bearer token (optional)

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{BatchWithClient, UpdateBatchInput};

/// Default URL for local development.
const DEFAULT_URL: &str = "http://localhost:3001/api";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ScannerError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: token required or invalid")]
    Unauthorized,

    #[error("Server error: {0}")]
    Server(String),
}

impl ScannerError {
    /// Whether this failure only tells us the probed route does not exist,
    /// so the next candidate endpoint should be tried.
    pub fn is_probe_retryable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::MethodNotAllowed(_))
    }
}

/// Extract the numeric ticket id from a scanned code. Codes come in shapes
/// like `TKT00123`, `ticket-123` or a bare `123`; everything but the digits
/// is decoration.
pub fn ticket_id_from_code(code: &str) -> Option<i64> {
    let digits: String = code.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Post,
    Put,
}

impl Verb {
    fn method(&self) -> Method {
        match self {
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    /// `/batches/{id}`
    Item,
    /// `/batches/update/{id}`
    UpdatePrefix,
    /// `/batches/{id}/update`
    UpdateSuffix,
    /// `/batches/update`, id in the body
    UpdateCollection,
    /// `/batches`, id in the body
    Collection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MethodOverride {
    Patch,
    Put,
}

impl MethodOverride {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Patch => "PATCH",
            Self::Put => "PUT",
        }
    }
}

/// One candidate update endpoint.
#[derive(Debug, Clone, Copy)]
struct UpdateAttempt {
    verb: Verb,
    route: Route,
    method_override: Option<MethodOverride>,
}

impl UpdateAttempt {
    fn path(&self, id: i64) -> String {
        match self.route {
            Route::Item => format!("/batches/{id}"),
            Route::UpdatePrefix => format!("/batches/update/{id}"),
            Route::UpdateSuffix => format!("/batches/{id}/update"),
            Route::UpdateCollection => "/batches/update".to_string(),
            Route::Collection => "/batches".to_string(),
        }
    }

    fn id_in_body(&self) -> bool {
        matches!(self.route, Route::UpdateCollection | Route::Collection)
    }
}

/// The candidate endpoints, in the order historically probed.
const UPDATE_ATTEMPTS: [UpdateAttempt; 8] = [
    UpdateAttempt {
        verb: Verb::Post,
        route: Route::Item,
        method_override: Some(MethodOverride::Patch),
    },
    UpdateAttempt {
        verb: Verb::Put,
        route: Route::Item,
        method_override: None,
    },
    UpdateAttempt {
        verb: Verb::Post,
        route: Route::Item,
        method_override: Some(MethodOverride::Put),
    },
    UpdateAttempt {
        verb: Verb::Post,
        route: Route::UpdatePrefix,
        method_override: None,
    },
    UpdateAttempt {
        verb: Verb::Post,
        route: Route::UpdateSuffix,
        method_override: None,
    },
    UpdateAttempt {
        verb: Verb::Post,
        route: Route::UpdateCollection,
        method_override: None,
    },
    UpdateAttempt {
        verb: Verb::Post,
        route: Route::Collection,
        method_override: Some(MethodOverride::Patch),
    },
    UpdateAttempt {
        verb: Verb::Put,
        route: Route::Collection,
        method_override: None,
    },
];

/// HTTP client for the ticket endpoints.
#[derive(Debug, Clone)]
pub struct ScannerClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl ScannerClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("OLIVE_MILL_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let token = std::env::var("OLIVE_MILL_TOKEN").ok();
        Self::new(base_url, token)
    }

    /// Create with explicit configuration.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            client: Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);
        if let Some(ref token) = self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ScannerError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            match status {
                StatusCode::NOT_FOUND => Err(ScannerError::NotFound(body)),
                StatusCode::METHOD_NOT_ALLOWED => Err(ScannerError::MethodNotAllowed(body)),
                StatusCode::BAD_REQUEST => Err(ScannerError::BadRequest(body)),
                StatusCode::UNAUTHORIZED => Err(ScannerError::Unauthorized),
                _ => Err(ScannerError::Server(format!("{}: {}", status, body))),
            }
        }
    }

    /// Fetch a ticket by id.
    pub async fn fetch_ticket(&self, id: i64) -> Result<BatchWithClient, ScannerError> {
        let response = self
            .request(Method::GET, &format!("/batches/{}", id))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update a ticket, probing the candidate endpoints in order.
    ///
    /// Returns the updated ticket from the first endpoint that accepts the
    /// request. If every candidate answers 404/405 the last such error is
    /// returned; any other failure propagates immediately.
    pub async fn update_ticket(
        &self,
        id: i64,
        input: &UpdateBatchInput,
    ) -> Result<BatchWithClient, ScannerError> {
        let mut last_probe_err = None;

        for attempt in &UPDATE_ATTEMPTS {
            let mut body = serde_json::to_value(input)
                .map_err(|e| ScannerError::Server(e.to_string()))?;
            if let Some(map) = body.as_object_mut() {
                if attempt.id_in_body() {
                    map.insert("id".to_string(), serde_json::json!(id));
                }
                // Legacy servers read the overridden verb out of the body.
                if let Some(over) = attempt.method_override {
                    map.insert("_method".to_string(), serde_json::json!(over.as_str()));
                }
            }

            let response = self
                .request(attempt.verb.method(), &attempt.path(id))
                .json(&body)
                .send()
                .await?;

            match self.handle_response(response).await {
                Ok(ticket) => return Ok(ticket),
                Err(err) if err.is_probe_retryable() => {
                    tracing::debug!("Update endpoint probe failed, trying next: {}", err);
                    last_probe_err = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_probe_err.unwrap_or_else(|| {
            ScannerError::Server("No update endpoint accepted the request".to_string())
        }))
    }
}
