//! Common types shared across all Resource Manager crates.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Resource tags.
pub type Tags = HashMap<String, String>;

/// The kind of identity that created or last modified a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreatedByType {
    User,
    Application,
    ManagedIdentity,
    Key,
    #[serde(other)]
    Unknown,
}

/// Creation and last-modification metadata attached by Resource Manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_type: Option<CreatedByType>,
    /// RFC 3339 timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by_type: Option<CreatedByType>,
    /// RFC 3339 timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<String>,
}

/// Managed identity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagedServiceIdentityType {
    None,
    SystemAssigned,
    UserAssigned,
    #[serde(
        rename = "SystemAssigned, UserAssigned",
        alias = "SystemAssigned,UserAssigned"
    )]
    SystemAssignedUserAssigned,
}

/// A user-assigned identity attached to a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignedIdentity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

/// Managed service identity (system and/or user assigned).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedServiceIdentity {
    #[serde(rename = "type")]
    pub identity_type: ManagedServiceIdentityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// Keyed by the identity's full resource ID. Values are empty objects in requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_assigned_identities: Option<HashMap<String, UserAssignedIdentity>>,
}

impl ManagedServiceIdentity {
    /// A system-assigned identity request.
    pub fn system_assigned() -> Self {
        Self {
            identity_type: ManagedServiceIdentityType::SystemAssigned,
            principal_id: None,
            tenant_id: None,
            user_assigned_identities: None,
        }
    }
}

/// Error detail in the ARM error envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_info: Vec<ErrorAdditionalInfo>,
}

/// Additional, service-specific error information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorAdditionalInfo {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub info_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<serde_json::Value>,
}

/// The ARM error envelope: `{"error": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

/// Extract an error detail from a response body.
///
/// Accepts the standard envelope as well as a bare `{code, message}` object,
/// which some older providers return.
pub fn parse_error_detail(body: &[u8]) -> Option<ErrorDetail> {
    if let Ok(ErrorResponse { error: Some(detail) }) = serde_json::from_slice::<ErrorResponse>(body) {
        return Some(detail);
    }
    serde_json::from_slice::<ErrorDetail>(body)
        .ok()
        .filter(|detail| detail.code.is_some())
}

/// Request body of the common `checkNameAvailability` action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckNameAvailabilityRequest {
    pub name: String,
    /// Fully qualified resource type, e.g. `Microsoft.SignalRService/SignalR`.
    #[serde(rename = "type")]
    pub resource_type: String,
}

impl CheckNameAvailabilityRequest {
    pub fn new(name: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource_type: resource_type.into(),
        }
    }
}

/// Response of the common `checkNameAvailability` action.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckNameAvailabilityResponse {
    pub name_available: Option<bool>,
    /// `Invalid` or `AlreadyExists` when the name is unavailable.
    pub reason: Option<String>,
    pub message: Option<String>,
}
