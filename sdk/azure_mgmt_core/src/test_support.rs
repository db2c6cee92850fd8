//! Mock-server helpers shared by the service crates' tests.
//!
//! Enabled for this crate's own tests and, for dependants, through the
//! `test-support` feature.

#![allow(clippy::expect_used)]

use std::time::Duration;

use wiremock::MockServer;

use crate::auth::ArmCredential;
use crate::client::{ArmClient, RetryPolicy};

// --- Test constants ---

/// Subscription every mock client is scoped to.
pub const TEST_SUBSCRIPTION_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Bearer token sent by mock clients.
pub const TEST_TOKEN: &str = "test-token";

/// Resource group used across tests.
pub const TEST_RESOURCE_GROUP: &str = "test-rg";

/// Location used across tests.
pub const TEST_LOCATION: &str = "eastus";

/// Create a test client connected to a mock server.
///
/// Retries are kept but shortened so retry tests stay fast.
pub async fn setup_mock_client(server: &MockServer) -> ArmClient {
    ArmClient::builder()
        .endpoint(server.uri())
        .subscription_id(TEST_SUBSCRIPTION_ID)
        .credential(ArmCredential::access_token(TEST_TOKEN))
        .retry_policy(RetryPolicy {
            max_retries: 3,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(10),
        })
        .build()
        .expect("should build client")
}

/// `/subscriptions/{TEST_SUBSCRIPTION_ID}/resourceGroups/{TEST_RESOURCE_GROUP}{suffix}`.
pub fn rg_path(suffix: &str) -> String {
    format!("/subscriptions/{TEST_SUBSCRIPTION_ID}/resourceGroups/{TEST_RESOURCE_GROUP}{suffix}")
}

/// `/subscriptions/{TEST_SUBSCRIPTION_ID}{suffix}`.
pub fn sub_path(suffix: &str) -> String {
    format!("/subscriptions/{TEST_SUBSCRIPTION_ID}{suffix}")
}

/// The `Authorization` header value mock clients send.
pub fn bearer() -> String {
    format!("Bearer {TEST_TOKEN}")
}
