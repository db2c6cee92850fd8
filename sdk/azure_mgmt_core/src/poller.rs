//! Long-running operation tracking.
//!
//! Resource Manager reports asynchronous work in one of three ways, and the
//! [`Poller`] picks the right one from the initial response:
//!
//! - an `Azure-AsyncOperation` header pointing at an operation-status
//!   resource whose `status` field moves to `Succeeded`, `Failed` or
//!   `Canceled`;
//! - a `Location` header that answers `202` while the work runs and any
//!   other 2xx once it is done;
//! - for PUT and PATCH without either header, the resource itself, whose
//!   `properties.provisioningState` is polled until terminal. A `201` without
//!   a provisioning state is also polled this way.
//!
//! ```rust,no_run
//! # use azure_mgmt_core::client::ArmClient;
//! # use azure_mgmt_core::poller::{LroMethod, Poller};
//! # async fn example(client: &ArmClient) -> azure_mgmt_core::error::ArmResult<()> {
//! let response = client.delete("/subscriptions/sub/resourcegroups/rg?api-version=2021-04-01").await?;
//! let poller: Poller<()> = Poller::from_response(client, LroMethod::Delete, response, None).await?;
//! poller.poll_until_done().await?;
//! # Ok(())
//! # }
//! ```

use std::marker::PhantomData;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::client::{retry_after, ArmClient};
use crate::error::{ArmError, ArmResult};
use crate::models::parse_error_detail;

const HEADER_ASYNC_OPERATION: &str = "azure-asyncoperation";
const HEADER_LOCATION: &str = "location";

/// Default delay between polls when the service sends no `Retry-After`.
pub const DEFAULT_POLL_FREQUENCY: Duration = Duration::from_secs(30);

/// The HTTP verb that started the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LroMethod {
    Put,
    Patch,
    Post,
    Delete,
}

/// Where the final result of the operation is read from, when the service
/// documents a non-default location (`x-ms-long-running-operation-options`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinalStateVia {
    AzureAsyncOperation,
    Location,
    OriginalUri,
}

/// The state of a long-running operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    InProgress,
    Succeeded,
    Failed,
    Canceled,
}

impl OperationStatus {
    /// Interpret a service status string (case-insensitive). Anything that
    /// is not terminal counts as in progress.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("succeeded") {
            Self::Succeeded
        } else if value.eq_ignore_ascii_case("failed") {
            Self::Failed
        } else if value.eq_ignore_ascii_case("canceled") || value.eq_ignore_ascii_case("cancelled")
        {
            Self::Canceled
        } else {
            Self::InProgress
        }
    }

    /// Whether polling should stop.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
enum PollingMethod {
    AsyncOperation,
    Location,
    Body,
    None,
}

/// Serializable poller state; doubles as the resume token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PollerState {
    method: LroMethod,
    original_url: String,
    polling_method: PollingMethod,
    polling_url: Option<String>,
    location_url: Option<String>,
    final_state_via: Option<FinalStateVia>,
    status: OperationStatus,
}

/// Drives a long-running operation to completion and yields its result.
///
/// `T` is the type of the final result; use `()` for operations without one.
#[derive(Debug)]
pub struct Poller<T> {
    client: ArmClient,
    state: PollerState,
    last_body: Bytes,
    // Latest non-empty resource representation seen while polling a PUT or PATCH.
    resource_body: Bytes,
    frequency: Duration,
    retry_after: Option<Duration>,
    _result: PhantomData<fn() -> T>,
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn provisioning_state(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("properties")?
        .get("provisioningState")?
        .as_str()
        .map(str::to_owned)
}

impl<T: DeserializeOwned> Poller<T> {
    /// Create a poller from the initial response of a long-running call.
    ///
    /// # Errors
    ///
    /// Returns [`ArmError::Poller`] for a `202 Accepted` without polling
    /// headers, which leaves no way to observe completion.
    pub async fn from_response(
        client: &ArmClient,
        method: LroMethod,
        response: reqwest::Response,
        final_state_via: Option<FinalStateVia>,
    ) -> ArmResult<Self> {
        let http_status = response.status().as_u16();
        let original_url = response.url().to_string();
        let async_url = header_value(response.headers(), HEADER_ASYNC_OPERATION);
        let location_url = header_value(response.headers(), HEADER_LOCATION);
        let retry_after = retry_after(response.headers());
        let body = response.bytes().await?;

        let (polling_method, polling_url, status) = if let Some(url) = &async_url {
            (PollingMethod::AsyncOperation, Some(url.clone()), OperationStatus::InProgress)
        } else if let Some(url) = &location_url {
            (PollingMethod::Location, Some(url.clone()), OperationStatus::InProgress)
        } else if http_status == 202 {
            return Err(ArmError::Poller(
                "202 Accepted response carried neither Azure-AsyncOperation nor Location".into(),
            ));
        } else if http_status == 204 {
            (PollingMethod::None, None, OperationStatus::Succeeded)
        } else {
            match (method, provisioning_state(&body)) {
                (LroMethod::Put | LroMethod::Patch, Some(state)) => {
                    let status = OperationStatus::parse(&state);
                    if status.is_terminal() {
                        (PollingMethod::None, None, status)
                    } else {
                        (PollingMethod::Body, Some(original_url.clone()), status)
                    }
                }
                // Created but not yet reporting a state.
                (LroMethod::Put | LroMethod::Patch, None) if http_status == 201 => (
                    PollingMethod::Body,
                    Some(original_url.clone()),
                    OperationStatus::InProgress,
                ),
                _ => (PollingMethod::None, None, OperationStatus::Succeeded),
            }
        };

        tracing::debug!(
            method = ?method,
            polling = ?polling_method,
            status = ?status,
            "long-running operation started"
        );

        let resource_body = match method {
            LroMethod::Put | LroMethod::Patch if !is_blank(&body) => body.clone(),
            _ => Bytes::new(),
        };

        Ok(Self {
            client: client.clone(),
            state: PollerState {
                method,
                original_url,
                polling_method,
                polling_url,
                location_url,
                final_state_via,
                status,
            },
            last_body: body,
            resource_body,
            frequency: DEFAULT_POLL_FREQUENCY,
            retry_after,
            _result: PhantomData,
        })
    }

    /// Rebuild a poller from a token produced by [`Self::resume_token`].
    pub fn from_resume_token(client: &ArmClient, token: &str) -> ArmResult<Self> {
        let state: PollerState = serde_json::from_str(token)
            .map_err(|e| ArmError::Poller(format!("invalid resume token: {e}")))?;
        Ok(Self {
            client: client.clone(),
            state,
            last_body: Bytes::new(),
            resource_body: Bytes::new(),
            frequency: DEFAULT_POLL_FREQUENCY,
            retry_after: None,
            _result: PhantomData,
        })
    }

    /// Set the delay between polls used when the service sends no `Retry-After`.
    pub fn with_frequency(mut self, frequency: Duration) -> Self {
        self.frequency = frequency;
        self
    }

    /// The last observed status.
    pub fn status(&self) -> OperationStatus {
        self.state.status
    }

    /// Whether the operation has reached a terminal state.
    pub fn is_done(&self) -> bool {
        self.state.status.is_terminal()
    }

    /// A token from which polling can be resumed, e.g. in another process.
    ///
    /// # Errors
    ///
    /// Fails once the operation has reached a terminal state.
    pub fn resume_token(&self) -> ArmResult<String> {
        if self.is_done() {
            return Err(ArmError::Poller(
                "cannot create a resume token for a completed operation".into(),
            ));
        }
        Ok(serde_json::to_string(&self.state)?)
    }

    /// Issue one status request and update the state.
    pub async fn poll(&mut self) -> ArmResult<OperationStatus> {
        if self.is_done() {
            return Ok(self.state.status);
        }

        let url = self
            .state
            .polling_url
            .clone()
            .ok_or_else(|| ArmError::Poller("no polling URL for in-progress operation".into()))?;

        let response = self.client.get(&url).await?;
        let http_status = response.status().as_u16();
        self.retry_after = retry_after(response.headers());
        let next_location = header_value(response.headers(), HEADER_LOCATION);
        let body = response.bytes().await?;

        let status = match self.state.polling_method {
            PollingMethod::AsyncOperation => {
                #[derive(Deserialize)]
                struct StatusBody {
                    status: Option<String>,
                }
                let parsed: StatusBody = serde_json::from_slice(&body)?;
                let status = parsed.status.ok_or_else(|| {
                    ArmError::Poller("operation status response is missing 'status'".into())
                })?;
                OperationStatus::parse(&status)
            }
            PollingMethod::Location => {
                if http_status == 202 {
                    if let Some(next) = next_location {
                        self.state.polling_url = Some(next);
                    }
                    OperationStatus::InProgress
                } else {
                    OperationStatus::Succeeded
                }
            }
            // A 204 or a body without a state means the resource is ready.
            PollingMethod::Body => provisioning_state(&body)
                .map(|state| OperationStatus::parse(&state))
                .unwrap_or(OperationStatus::Succeeded),
            PollingMethod::None => self.state.status,
        };

        tracing::debug!(status = ?status, http_status, "polled long-running operation");
        self.state.status = status;
        if self.state.polling_method == PollingMethod::Body && !is_blank(&body) {
            self.resource_body = body.clone();
        }
        self.last_body = body;
        Ok(status)
    }

    /// Poll until the operation reaches a terminal state, then return its result.
    pub async fn poll_until_done(mut self) -> ArmResult<T> {
        while !self.is_done() {
            self.poll().await?;
            if self.is_done() {
                break;
            }
            let delay = self.retry_after.unwrap_or(self.frequency);
            tracing::trace!(delay_ms = delay.as_millis() as u64, "waiting before next poll");
            tokio::time::sleep(delay).await;
        }
        self.result().await
    }

    /// The final result of a completed operation.
    ///
    /// # Errors
    ///
    /// - [`ArmError::OperationFailed`] if the operation failed or was canceled.
    /// - [`ArmError::Poller`] if the operation is still running.
    pub async fn result(self) -> ArmResult<T> {
        match self.state.status {
            OperationStatus::InProgress => Err(ArmError::Poller(
                "operation has not reached a terminal state".into(),
            )),
            OperationStatus::Failed | OperationStatus::Canceled => Err(self.failure()),
            OperationStatus::Succeeded => {
                if self.state.method == LroMethod::Delete {
                    return decode(&[]);
                }
                match self.final_get_url() {
                    Some(url) => {
                        let body = self.client.get(&url).await?.bytes().await?;
                        decode(&body)
                    }
                    None if is_blank(&self.last_body) => decode(&self.resource_body),
                    None => decode(&self.last_body),
                }
            }
        }
    }

    fn final_get_url(&self) -> Option<String> {
        let state = &self.state;
        match (state.method, state.final_state_via) {
            // PUT and PATCH always end on the resource itself.
            (LroMethod::Put | LroMethod::Patch, _)
                if state.polling_method == PollingMethod::AsyncOperation =>
            {
                Some(state.original_url.clone())
            }
            (_, Some(FinalStateVia::AzureAsyncOperation)) => None,
            // Polling the location already fetched the final body.
            (_, Some(FinalStateVia::Location))
                if state.polling_method == PollingMethod::Location =>
            {
                None
            }
            (_, Some(FinalStateVia::Location)) => state.location_url.clone(),
            (_, Some(FinalStateVia::OriginalUri)) => Some(state.original_url.clone()),
            (LroMethod::Put | LroMethod::Patch, None) => match state.polling_method {
                PollingMethod::AsyncOperation | PollingMethod::Location => {
                    Some(state.original_url.clone())
                }
                PollingMethod::Body | PollingMethod::None => None,
            },
            (LroMethod::Post, None) => match state.polling_method {
                PollingMethod::AsyncOperation => state.location_url.clone(),
                _ => None,
            },
            (LroMethod::Delete, None) => None,
        }
    }

    fn failure(&self) -> ArmError {
        let status = match self.state.status {
            OperationStatus::Canceled => "Canceled",
            _ => "Failed",
        };
        let detail = parse_error_detail(&self.last_body).or_else(|| {
            let value: serde_json::Value = serde_json::from_slice(&self.last_body).ok()?;
            let error = value.get("properties")?.get("error")?.clone();
            serde_json::from_value(error).ok()
        });
        let (code, message) = match detail {
            Some(detail) => (
                detail.code.unwrap_or_else(|| status.to_owned()),
                detail.message.unwrap_or_default(),
            ),
            None => (
                status.to_owned(),
                "the long-running operation did not succeed".to_owned(),
            ),
        };
        ArmError::OperationFailed {
            status: status.to_owned(),
            code,
            message,
        }
    }
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

/// Decode a final result body.
///
/// Result types that tolerate absence (`()`, `Option<_>`) accept an empty or
/// unrelated body, e.g. the status document left over from an action.
fn decode<T: DeserializeOwned>(body: &[u8]) -> ArmResult<T> {
    if is_blank(body) {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }
    match serde_json::from_slice(body) {
        Ok(value) => Ok(value),
        Err(err) => serde_json::from_value(serde_json::Value::Null).map_err(|_| err.into()),
    }
}
