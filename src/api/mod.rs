//! Typed client for the gym management REST API.
//!
//! One [`ApiClient`] per process: base URL + shared `reqwest::Client` +
//! the session store it pulls the bearer token from. Every resource module
//! (members, staff, payments, ...) adds its endpoint methods in an
//! `impl ApiClient` block next to its wire models, so the shapes live beside
//! the calls that produce them.
//!
//! Error mapping is uniform: transport failures become
//! [`ApiError::Transport`], a non-2xx answer has its `{ "message": ... }`
//! body extracted into [`ApiError::Backend`], and a 2xx body that does not
//! decode is [`ApiError::Decode`].

pub mod assignments;
pub mod attendance;
pub mod exercises;
pub mod expenses;
pub mod members;
pub mod modules;
pub mod payments;
pub mod plans;
pub mod roles;
pub mod staff;
pub mod users;

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ConsoleConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

// ─── Pagination ───────────────────────────────────────────────────────────────

/// Pagination block every list endpoint returns alongside its data.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// One page of a listed resource: `{ "data": [...], "pagination": {...} }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

/// `page` / `limit` query parameters for list endpoints.
#[derive(Debug, Clone, Copy)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
}

impl PageQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// First page at the configured default size.
    pub fn first(config: &ConsoleConfig) -> Self {
        Self {
            page: 1,
            limit: config.page_limit,
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// The backend's error body: `{ "message": "..." }`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// HTTP client for the gym management backend.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    sessions: Arc<SessionStore>,
}

impl ApiClient {
    /// Build a client from config. The timeout applies to every request.
    pub fn new(config: &ConsoleConfig, sessions: Arc<SessionStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            http,
            sessions,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token when a session exists. The auth endpoints are
    /// called logged-out, so an absent token is not an error here.
    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.sessions.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send a request and decode the JSON response.
    async fn execute<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let resp = self.authorize(req).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .map(|b| b.message)
                .unwrap_or_default();
            debug!(status = status.as_u16(), message = %message, "backend error");
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ApiError::Decode)
    }

    /// Like [`execute`](Self::execute) but discards the response body —
    /// for endpoints that answer 2xx with nothing useful in it.
    async fn execute_discard(&self, req: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let resp = self.authorize(req).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .map(|b| b.message)
                .unwrap_or_default();
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.execute(self.http.get(self.url(path)).query(query)).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.http.post(self.url(path)).json(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.execute(self.http.put(self.url(path)).json(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(self.http.delete(self.url(path))).await
    }

    /// DELETE where the backend answers with an empty or unspecified body.
    pub(crate) async fn delete_discard(&self, path: &str) -> Result<(), ApiError> {
        self.execute_discard(self.http.delete(self.url(path))).await
    }
}

/// Deletion acknowledgement carrying only a message, e.g.
/// `{ "message": "Exercise deleted" }`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeletedAck {
    #[serde(default)]
    pub message: String,
}
