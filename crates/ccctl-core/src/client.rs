//! Authenticated client for the Camunda Cloud management API
//!
//! The client owns the bearer token obtained at login and the most recently
//! fetched parameter catalog. Clones share both, so one logged-in client can
//! be handed to several tasks.
//!
//! # Example
//!
//! ```rust,no_run
//! use ccctl_core::CamundaCloudClient;
//!
//! # async fn run() -> ccctl_core::Result<()> {
//! let client = CamundaCloudClient::builder().build()?;
//! client.login("my-client-id", "my-client-secret").await?;
//! client.get_cluster_params().await?;
//!
//! let cluster_id = client.create_cluster_default("demo").await?;
//! println!("created {}", cluster_id);
//! # Ok(())
//! # }
//! ```

use crate::auth::{AccessToken, TokenStore};
use crate::error::{CoreError, Result};
use crate::models::{AuthRequest, AuthResponse, ClusterParams, DEFAULT_AUDIENCE};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use url::Url;

pub const DEFAULT_API_URL: &str = "https://api.cloud.camunda.io";
pub const DEFAULT_AUTH_URL: &str = "https://login.cloud.camunda.io";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_USER_AGENT: &str = concat!("ccctl-core/", env!("CARGO_PKG_VERSION"));

/// Longest response excerpt carried in error messages
const BODY_EXCERPT_LEN: usize = 256;

/// Builder for [`CamundaCloudClient`]
#[derive(Debug, Clone)]
pub struct CamundaCloudClientBuilder {
    api_url: String,
    auth_url: String,
    audience: String,
    user_agent: String,
    timeout: Duration,
}

impl Default for CamundaCloudClientBuilder {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CamundaCloudClientBuilder {
    /// Management API base URL
    #[must_use]
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Authorization server base URL (`/oauth/token` is appended)
    #[must_use]
    pub fn auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    #[must_use]
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Deadline applied to every request
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<CamundaCloudClient> {
        let api_url = parse_base_url("API", &self.api_url)?;
        let auth_url = parse_base_url("auth", &self.auth_url)?;

        let http = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to create HTTP client: {}", e)))?;

        debug!(api_url = %api_url, auth_url = %auth_url, "Camunda Cloud client created");

        Ok(CamundaCloudClient {
            http,
            api_url: Arc::new(api_url),
            auth_url: Arc::new(auth_url),
            audience: self.audience,
            timeout: self.timeout,
            tokens: TokenStore::new(),
            catalog: Arc::new(RwLock::new(None)),
        })
    }
}

fn parse_base_url(which: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| CoreError::Config(format!("Invalid {} URL '{}': {}", which, raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(CoreError::Config(format!(
            "Invalid {} URL '{}': not a base URL",
            which, raw
        )));
    }
    Ok(url)
}

/// Client for the Camunda Cloud management API
#[derive(Clone)]
pub struct CamundaCloudClient {
    http: reqwest::Client,
    api_url: Arc<Url>,
    auth_url: Arc<Url>,
    audience: String,
    timeout: Duration,
    tokens: TokenStore,
    catalog: Arc<RwLock<Option<ClusterParams>>>,
}

impl std::fmt::Debug for CamundaCloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CamundaCloudClient")
            .field("api_url", &self.api_url.as_str())
            .field("auth_url", &self.auth_url.as_str())
            .field("audience", &self.audience)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl CamundaCloudClient {
    pub fn builder() -> CamundaCloudClientBuilder {
        CamundaCloudClientBuilder::default()
    }

    /// A handle sharing this client's token and catalog with a different deadline
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout,
            ..self.clone()
        }
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_str()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.is_authenticated().await
    }

    /// Use an already issued token instead of logging in
    pub async fn set_access_token(&self, token: impl Into<String>) {
        self.tokens.set(AccessToken::new(token)).await;
    }

    /// Forget the stored token
    pub async fn logout(&self) {
        self.tokens.clear().await;
    }

    /// Exchange client credentials for a bearer token
    ///
    /// Only an HTTP 200 with a decodable body replaces the stored token; any
    /// other outcome leaves the previous token untouched.
    #[instrument(name = "login", skip(self, client_secret))]
    pub async fn login(&self, client_id: &str, client_secret: &str) -> Result<()> {
        if client_id.is_empty() || client_secret.is_empty() {
            return Err(CoreError::Validation(
                "Client id and client secret should not be empty".to_string(),
            ));
        }

        let url = endpoint(&self.auth_url, &["oauth", "token"])?;
        let payload = AuthRequest::client_credentials(client_id, client_secret, &self.audience);

        let response = self
            .http
            .post(url)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .inspect_err(|e| warn!("failed to reach token endpoint: {}", e))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("HTTP Error trying to login, {}", status);
            return Err(CoreError::AuthenticationFailed {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let auth: AuthResponse =
            serde_json::from_str(&body).map_err(|e| decode_error("login response", &e, &body))?;

        self.tokens.set(AccessToken::new(auth.access_token)).await;
        info!("Logged in to Camunda Cloud");
        Ok(())
    }

    /// Fetch the parameter catalog and replace the stored snapshot
    #[instrument(name = "get_cluster_params", skip(self))]
    pub async fn get_cluster_params(&self) -> Result<ClusterParams> {
        let request = self
            .authorized(Method::GET, &["clusters", "parameters"])
            .await?;
        let params: ClusterParams = decode(self.send(request).await?, "cluster params").await?;

        debug!(
            channels = params.channels.len(),
            plans = params.plan_types.len(),
            regions = params.regions.len(),
            "Fetched cluster params"
        );
        *self.catalog.write().await = Some(params.clone());
        Ok(params)
    }

    /// The catalog from the last [`get_cluster_params`](Self::get_cluster_params) call
    pub async fn cluster_params_snapshot(&self) -> Option<ClusterParams> {
        self.catalog.read().await.clone()
    }

    /// Current snapshot, fetching one first if none exists yet
    pub(crate) async fn catalog(&self) -> Result<ClusterParams> {
        if let Some(params) = self.cluster_params_snapshot().await {
            return Ok(params);
        }
        debug!("No cluster params fetched yet, fetching now");
        self.get_cluster_params().await
    }

    /// Request against the management API carrying the bearer token
    pub(crate) async fn authorized(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let token = self.tokens.get().await.ok_or(CoreError::NotAuthenticated)?;
        let url = endpoint(&self.api_url, segments)?;
        debug!("{} {}", method, url);

        Ok(self
            .http
            .request(method, url)
            .timeout(self.timeout)
            .header(AUTHORIZATION, token.bearer()))
    }

    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request.send().await.map_err(|e| {
            warn!("request failed: {}", e);
            CoreError::Transport(e)
        })
    }
}

/// `base` with `segments` appended as percent-encoded path segments
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| CoreError::Config(format!("'{}' cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Decode a JSON body, turning non-success statuses into errors first
pub(crate) async fn decode<T: DeserializeOwned>(response: Response, context: &str) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(status_error(status, &body));
    }

    serde_json::from_str(&body).map_err(|e| decode_error(context, &e, &body))
}

/// Error for a non-success status
pub(crate) fn status_error(status: StatusCode, body: &str) -> CoreError {
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        excerpt(body)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CoreError::Unauthorized {
            message: format!("HTTP {}: {}", status.as_u16(), message),
        },
        _ => CoreError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

fn decode_error(context: &str, err: &serde_json::Error, body: &str) -> CoreError {
    warn!("failed to parse {}: {}", context, err);
    CoreError::Decode {
        context: context.to_string(),
        message: format!("{} (body: {})", err, excerpt(body)),
    }
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

/// Validation helper for identifiers that end up in request paths
pub(crate) fn require(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(message.to_string()));
    }
    Ok(())
}
