//! HTTP pipeline for Azure Resource Manager.
//!
//! [`ArmClient`] is the single entry point every service crate uses. It owns
//! the HTTP transport, the credential, the target cloud and subscription,
//! and applies authentication, retries and ARM error decoding to each call.
//!
//! # Examples
//!
//! ## Using a pre-acquired token
//! ```rust,no_run
//! use azure_mgmt_core::auth::ArmCredential;
//! use azure_mgmt_core::client::ArmClient;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArmClient::builder()
//!     .subscription_id("00000000-0000-0000-0000-000000000000")
//!     .credential(ArmCredential::access_token("eyJ0eXAi..."))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Using the Azure CLI login
//! ```rust,no_run
//! use azure_mgmt_core::auth::ArmCredential;
//! use azure_mgmt_core::client::ArmClient;
//! use azure_mgmt_core::cloud::CloudConfiguration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArmClient::builder()
//!     .cloud(CloudConfiguration::azure_government())
//!     .credential(ArmCredential::azure_cli()?)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use bytes::Bytes;
use reqwest::header::{
    HeaderMap, ACCEPT, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER, USER_AGENT,
};
use reqwest::{Client as HttpClient, Method};
use serde::de::DeserializeOwned;
use url::Url;

use std::time::Duration;

use crate::auth::ArmCredential;
use crate::cloud::CloudConfiguration;
use crate::error::{ArmError, ArmResult};
use crate::models::parse_error_detail;
use crate::path;
use crate::profile::ApiProfile;

/// Environment variable consulted for the default subscription.
pub const SUBSCRIPTION_ID_ENV: &str = "AZURE_SUBSCRIPTION_ID";

/// Default connection timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default read/response timeout (60 seconds).
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

const USER_AGENT_VALUE: &str = concat!("azure-mgmt-rust/", env!("CARGO_PKG_VERSION"));

/// Determines if an HTTP status code represents a retriable error.
///
/// - 408 Request Timeout
/// - 429 Too Many Requests
/// - 500, 502, 503, 504
#[inline]
pub fn is_retriable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

/// Read the server-requested delay from `retry-after-ms`,
/// `x-ms-retry-after-ms` or `Retry-After` (delta-seconds only).
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let parse = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
    };

    parse("retry-after-ms")
        .or_else(|| parse("x-ms-retry-after-ms"))
        .map(Duration::from_millis)
        .or_else(|| parse(RETRY_AFTER.as_str()).map(Duration::from_secs))
}

/// Configuration for automatic retry behavior on transient errors.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts (not counting the initial request).
    pub max_retries: u32,
    /// Delay before the first retry; doubled on each further attempt.
    pub initial_backoff: Duration,
    /// Upper bound for any single delay, including server-requested ones.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(800),
            max_backoff: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Exponential backoff with ±25% jitter for the given zero-based attempt.
    pub(crate) fn backoff(&self, attempt: u32) -> Duration {
        let base = self
            .initial_backoff
            .saturating_mul(2_u32.saturating_pow(attempt))
            .min(self.max_backoff);
        let jitter = 0.75 + fastrand::f64() * 0.5;
        base.mul_f64(jitter).min(self.max_backoff)
    }
}

/// The client shared by every Resource Manager operation.
///
/// Cheaply cloneable; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ArmClient {
    pub(crate) http: HttpClient,
    pub(crate) endpoint: Url,
    pub(crate) credential: ArmCredential,
    pub(crate) subscription_id: Option<String>,
    pub(crate) cloud: CloudConfiguration,
    pub(crate) profile: Option<ApiProfile>,
    pub(crate) retry_policy: RetryPolicy,
}

/// Builder for constructing an [`ArmClient`].
#[derive(Debug, Default)]
pub struct ArmClientBuilder {
    endpoint: Option<String>,
    subscription_id: Option<String>,
    credential: Option<ArmCredential>,
    cloud: Option<CloudConfiguration>,
    profile: Option<ApiProfile>,
    http_client: Option<HttpClient>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    retry_policy: Option<RetryPolicy>,
}

impl ArmClient {
    /// Create a new builder.
    pub fn builder() -> ArmClientBuilder {
        ArmClientBuilder::default()
    }

    /// The Resource Manager endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The default subscription, if configured.
    pub fn subscription_id(&self) -> Option<&str> {
        self.subscription_id.as_deref()
    }

    /// The target cloud.
    pub fn cloud(&self) -> &CloudConfiguration {
        &self.cloud
    }

    /// The API version profile, if configured.
    pub fn profile(&self) -> Option<&ApiProfile> {
        self.profile.as_ref()
    }

    /// The retry policy.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Resolve `path` against the endpoint. Absolute URLs (next links,
    /// polling URLs) are returned unchanged.
    pub fn url(&self, path: &str) -> ArmResult<Url> {
        self.endpoint
            .join(path)
            .map_err(|e| ArmError::invalid_endpoint_with_source("failed to construct URL", e))
    }

    /// `/subscriptions/{subscriptionId}` for the configured subscription.
    pub fn subscription_path(&self) -> ArmResult<String> {
        let id = self
            .subscription_id
            .as_deref()
            .ok_or_else(|| {
                ArmError::MissingConfig(
                    "subscription ID is required. Set it via builder or AZURE_SUBSCRIPTION_ID env var."
                        .into(),
                )
            })?;
        Ok(format!("/subscriptions/{}", path::encode(id)))
    }

    /// `/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}`.
    pub fn resource_group_path(&self, resource_group: &str) -> ArmResult<String> {
        Ok(format!(
            "{}/resourceGroups/{}",
            self.subscription_path()?,
            path::segment("resourceGroupName", resource_group)?
        ))
    }

    /// `api-version=<v>` for `namespace`, honouring the configured profile.
    pub fn api_version_query(&self, namespace: &str, default: &str) -> String {
        let version = self
            .profile
            .as_ref()
            .and_then(|p| p.api_version(namespace))
            .unwrap_or(default);
        format!("api-version={version}")
    }

    /// Send a GET request.
    pub async fn get(&self, path: &str) -> ArmResult<reqwest::Response> {
        self.execute(Method::GET, path, None).await
    }

    /// Send a PUT request with a JSON body.
    pub async fn put<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> ArmResult<reqwest::Response> {
        let body = Bytes::from(serde_json::to_vec(body)?);
        self.execute(Method::PUT, path, Some(body)).await
    }

    /// Send a PATCH request with a JSON body.
    pub async fn patch<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> ArmResult<reqwest::Response> {
        let body = Bytes::from(serde_json::to_vec(body)?);
        self.execute(Method::PATCH, path, Some(body)).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post<T: serde::Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> ArmResult<reqwest::Response> {
        let body = Bytes::from(serde_json::to_vec(body)?);
        self.execute(Method::POST, path, Some(body)).await
    }

    /// Send a POST request without a body (actions such as `listKeys`).
    pub async fn post_empty(&self, path: &str) -> ArmResult<reqwest::Response> {
        self.execute(Method::POST, path, None).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> ArmResult<reqwest::Response> {
        self.execute(Method::DELETE, path, None).await
    }

    /// Send a HEAD request: `true` on 2xx, `false` on 404.
    pub async fn exists(&self, path: &str) -> ArmResult<bool> {
        match self.execute(Method::HEAD, path, None).await {
            Ok(_) => Ok(true),
            Err(err) if err.status() == Some(404) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Run one logical request through auth, retry and error decoding.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
    ) -> ArmResult<reqwest::Response> {
        let url = self.url(path)?;
        let auth = self.credential.resolve(&self.cloud.token_scope()).await?;

        let mut attempt = 0;
        loop {
            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .header(AUTHORIZATION, &auth)
                .header(ACCEPT, "application/json")
                .header(USER_AGENT, USER_AGENT_VALUE);
            if let Some(body) = &body {
                request = request
                    .header(CONTENT_TYPE, "application/json")
                    .body(body.clone());
            }

            tracing::trace!(method = %method, url = %url, attempt, "sending request");
            let response = request.send().await?;
            let status = response.status().as_u16();

            if response.status().is_success() {
                return Ok(response);
            }

            if !is_retriable_status(status) || attempt >= self.retry_policy.max_retries {
                return Self::check_response(response).await;
            }

            let delay = retry_after(response.headers())
                .map(|d| d.min(self.retry_policy.max_backoff))
                .unwrap_or_else(|| self.retry_policy.backoff(attempt));
            tracing::warn!(
                method = %method,
                status,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "retriable response, backing off"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Maximum length for error messages to prevent sensitive data leaks.
    const MAX_ERROR_MESSAGE_LEN: usize = 1000;

    /// Redact bearer tokens and SAS signatures from a service message.
    pub(crate) fn sanitize_error_message(msg: &str) -> String {
        let stops = |c: char| c.is_whitespace() || matches!(c, '"' | '\'' | ',' | '&');
        let redacted = redact_after(msg, "Bearer ", stops);
        redact_after(&redacted, "sig=", stops)
    }

    /// Sanitize, then cap the message at [`Self::MAX_ERROR_MESSAGE_LEN`] bytes.
    pub(crate) fn truncate_message(msg: &str) -> String {
        let sanitized = Self::sanitize_error_message(msg);

        if sanitized.len() > Self::MAX_ERROR_MESSAGE_LEN {
            let mut end = Self::MAX_ERROR_MESSAGE_LEN;
            while !sanitized.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated)", &sanitized[..end])
        } else {
            sanitized
        }
    }

    /// Turn a non-success response into an [`ArmError`].
    async fn check_response(response: reqwest::Response) -> ArmResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        if let Some(detail) = parse_error_detail(body.as_bytes()) {
            return Err(ArmError::Api {
                status,
                code: detail.code.unwrap_or_else(|| "unknown".into()),
                message: Self::truncate_message(detail.message.as_deref().unwrap_or(&body)),
                target: detail.target,
            });
        }

        Err(ArmError::http(status, Self::truncate_message(&body)))
    }
}

/// Decode a successful response body as JSON.
///
/// A body that does not match `T` is an [`ArmError::Serialization`]; only
/// failures reading the body are reported as [`ArmError::Request`].
pub async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> ArmResult<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Replace whatever follows each `marker` up to a stop character with `[REDACTED]`.
fn redact_after(input: &str, marker: &str, is_stop: impl Fn(char) -> bool) -> String {
    const REDACTED: &str = "[REDACTED]";

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find(marker) {
        let value_start = pos + marker.len();
        out.push_str(&rest[..value_start]);
        let tail = &rest[value_start..];
        let value_len = tail.find(&is_stop).unwrap_or(tail.len());
        if value_len > 0 {
            out.push_str(REDACTED);
        }
        rest = &tail[value_len..];
    }
    out.push_str(rest);
    out
}

impl ArmClientBuilder {
    /// Override the Resource Manager endpoint.
    ///
    /// Defaults to the configured cloud's endpoint.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the default subscription.
    ///
    /// If not set, the builder checks `AZURE_SUBSCRIPTION_ID`. Tenant-level
    /// operations work without a subscription.
    pub fn subscription_id(mut self, subscription_id: impl Into<String>) -> Self {
        self.subscription_id = Some(subscription_id.into());
        self
    }

    /// Set the credential.
    ///
    /// If not set, [`ArmCredential::from_env()`] is used.
    pub fn credential(mut self, credential: ArmCredential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Target a sovereign cloud. Defaults to the Azure public cloud.
    pub fn cloud(mut self, cloud: CloudConfiguration) -> Self {
        self.cloud = Some(cloud);
        self
    }

    /// Pin API versions with a profile.
    pub fn profile(mut self, profile: ApiProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Use a custom HTTP client.
    ///
    /// **Note:** timeouts set on this builder are ignored when a custom
    /// client is supplied.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout covering the full request/response cycle.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the retry policy for transient errors.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Build the `ArmClient`.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid, the HTTP client
    /// cannot be constructed, or no credential can be created from the
    /// environment.
    pub fn build(self) -> ArmResult<ArmClient> {
        let http = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .connect_timeout(self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT))
                .timeout(self.read_timeout.unwrap_or(DEFAULT_READ_TIMEOUT))
                .build()?,
        };

        let cloud = self.cloud.unwrap_or_default();
        let endpoint_str = self
            .endpoint
            .unwrap_or_else(|| cloud.resource_manager_endpoint.clone());
        let endpoint = Url::parse(&endpoint_str)
            .map_err(|e| ArmError::invalid_endpoint_with_source("invalid endpoint URL", e))?;
        if endpoint.cannot_be_a_base() {
            return Err(ArmError::InvalidEndpoint {
                message: format!("endpoint '{endpoint_str}' cannot be used as a base URL"),
                source: None,
            });
        }

        let subscription_id = self
            .subscription_id
            .or_else(|| std::env::var(SUBSCRIPTION_ID_ENV).ok())
            .filter(|id| !id.trim().is_empty());

        let credential = self
            .credential
            .map(Ok)
            .unwrap_or_else(ArmCredential::from_env)?;

        Ok(ArmClient {
            http,
            endpoint,
            credential,
            subscription_id,
            cloud,
            profile: self.profile,
            retry_policy: self.retry_policy.unwrap_or_default(),
        })
    }
}
