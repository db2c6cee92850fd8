//! Models for Azure SignalR Service.

use azure_mgmt_core::client::ArmClient;
use azure_mgmt_core::models::{ManagedServiceIdentity, SystemData, Tags};
use serde::{Deserialize, Serialize};

/// Resource provider namespace.
pub const PROVIDER_NAMESPACE: &str = "Microsoft.SignalRService";

/// API version used by this crate unless the client's profile pins another.
pub const API_VERSION: &str = "2023-02-01";

/// Resource type passed to name availability checks.
pub const RESOURCE_TYPE: &str = "Microsoft.SignalRService/SignalR";

pub(crate) fn api_version(client: &ArmClient) -> String {
    client.api_version_query(PROVIDER_NAMESPACE, API_VERSION)
}

// ---------------------------------------------------------------------------
// SKU
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkuTier {
    Free,
    Basic,
    Standard,
    Premium,
}

/// Billing information of a SignalR resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSku {
    /// `Free_F1`, `Standard_S1` or `Premium_P1`.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<SkuTier>,
    /// Unit count: 1 for Free; 1-10, 20-100 in steps of 10 otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(default, skip_serializing)]
    pub family: Option<String>,
    #[serde(default, skip_serializing)]
    pub size: Option<String>,
}

impl ResourceSku {
    pub fn new(name: impl Into<String>, tier: SkuTier, capacity: i32) -> Self {
        Self {
            name: name.into(),
            tier: Some(tier),
            capacity: Some(capacity),
            family: None,
            size: None,
        }
    }

    pub fn free() -> Self {
        Self::new("Free_F1", SkuTier::Free, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ScaleType {
    None,
    Manual,
    Automatic,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuCapacity {
    pub minimum: Option<i32>,
    pub maximum: Option<i32>,
    pub default: Option<i32>,
    #[serde(default)]
    pub allowed_values: Vec<i32>,
    pub scale_type: Option<ScaleType>,
}

/// A SKU available to an existing resource.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub resource_type: Option<String>,
    pub sku: Option<ResourceSku>,
    pub capacity: Option<SkuCapacity>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuList {
    #[serde(default)]
    pub value: Vec<Sku>,
    pub next_link: Option<String>,
}

// ---------------------------------------------------------------------------
// Resource
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceKind {
    SignalR,
    RawWebSockets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureFlag {
    /// `Default`, `Serverless` or `Classic`.
    ServiceMode,
    EnableConnectivityLogs,
    EnableMessagingLogs,
    EnableLiveTrace,
}

/// A feature toggle of the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub flag: FeatureFlag,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<std::collections::HashMap<String, String>>,
}

impl Feature {
    pub fn new(flag: FeatureFlag, value: impl Into<String>) -> Self {
        Self {
            flag,
            value: value.into(),
            properties: None,
        }
    }

    /// `ServiceMode=Serverless`.
    pub fn serverless() -> Self {
        Self::new(FeatureFlag::ServiceMode, "Serverless")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsSettings {
    /// `*` allows all origins.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveTraceCategory {
    pub name: Option<String>,
    /// `"true"` or `"false"`.
    pub enabled: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveTraceConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<LiveTraceCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceLogConfiguration {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<LiveTraceCategory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AclAction {
    Allow,
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalRRequestType {
    ClientConnection,
    ServerConnection,
    #[serde(rename = "RESTAPI")]
    RestApi,
    Trace,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkAcl {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow: Vec<SignalRRequestType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny: Vec<SignalRRequestType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateEndpointAcl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow: Vec<SignalRRequestType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny: Vec<SignalRRequestType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAcls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_action: Option<AclAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_network: Option<NetworkAcl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub private_endpoints: Vec<PrivateEndpointAcl>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerlessSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_timeout_in_seconds: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsSettings {
    /// Free tier ignores this setting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_cert_enabled: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpstreamAuthType {
    None,
    ManagedIdentity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamAuthSettings {
    #[serde(rename = "type")]
    pub auth_type: UpstreamAuthType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_identity: Option<ManagedIdentitySettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedIdentitySettings {
    /// Audience of the issued token, e.g. an app ID URI.
    pub resource: String,
}

/// Where events for matching hubs/categories/events are forwarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamTemplate {
    /// May contain `{hub}`, `{category}` and `{event}` placeholders.
    pub url_template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hub_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<UpstreamAuthSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerlessUpstreamSettings {
    #[serde(default)]
    pub templates: Vec<UpstreamTemplate>,
}

/// SignalR resource properties. Read-only fields are ignored on write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors: Option<CorsSettings>,
    #[serde(rename = "disableAadAuth", skip_serializing_if = "Option::is_none")]
    pub disable_aad_auth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_local_auth: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_trace_configuration: Option<LiveTraceConfiguration>,
    #[serde(rename = "networkACLs", skip_serializing_if = "Option::is_none")]
    pub network_acls: Option<NetworkAcls>,
    /// `Enabled` or `Disabled`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_network_access: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_log_configuration: Option<ResourceLogConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serverless: Option<ServerlessSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream: Option<ServerlessUpstreamSettings>,

    #[serde(skip_serializing)]
    pub provisioning_state: Option<String>,
    #[serde(rename = "externalIP", skip_serializing)]
    pub external_ip: Option<String>,
    #[serde(skip_serializing)]
    pub host_name: Option<String>,
    #[serde(skip_serializing)]
    pub host_name_prefix: Option<String>,
    #[serde(skip_serializing)]
    pub public_port: Option<i32>,
    #[serde(skip_serializing)]
    pub server_port: Option<i32>,
    #[serde(skip_serializing)]
    pub version: Option<String>,
    #[serde(default, skip_serializing)]
    pub private_endpoint_connections: Vec<serde_json::Value>,
    #[serde(default, skip_serializing)]
    pub shared_private_link_resources: Vec<serde_json::Value>,
}

/// A SignalR resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<ResourceSku>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ServiceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<ManagedServiceIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<SignalRProperties>,

    #[serde(skip_serializing)]
    pub id: Option<String>,
    #[serde(skip_serializing)]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing)]
    pub resource_type: Option<String>,
    #[serde(skip_serializing)]
    pub system_data: Option<SystemData>,
}

impl ResourceInfo {
    /// A SignalR resource in `location` with the given SKU.
    pub fn new(location: impl Into<String>, sku: ResourceSku) -> Self {
        Self {
            location: Some(location.into()),
            sku: Some(sku),
            kind: Some(ServiceKind::SignalR),
            ..Default::default()
        }
    }

    pub fn provisioning_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
    }

    pub fn host_name(&self) -> Option<&str> {
        self.properties.as_ref().and_then(|p| p.host_name.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keys {
    pub primary_key: Option<String>,
    pub secondary_key: Option<String>,
    pub primary_connection_string: Option<String>,
    pub secondary_connection_string: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
    Primary,
    Secondary,
    /// Regenerates the salt used to sign access tokens.
    Salt,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateKeyParameters {
    pub key_type: KeyType,
}

// ---------------------------------------------------------------------------
// Usages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageName {
    pub value: Option<String>,
    pub localized_value: Option<String>,
}

/// Quota usage of a location.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRUsage {
    pub id: Option<String>,
    pub current_value: Option<i64>,
    pub limit: Option<i64>,
    pub name: Option<UsageName>,
    pub unit: Option<String>,
}
