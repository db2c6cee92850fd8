//! Models for Azure Web PubSub.

use azure_mgmt_core::client::ArmClient;
use azure_mgmt_core::models::{ManagedServiceIdentity, SystemData, Tags};
use serde::{Deserialize, Serialize};

/// Resource provider namespace.
pub const PROVIDER_NAMESPACE: &str = "Microsoft.SignalRService";

/// API version used by this crate unless the client's profile pins another.
pub const API_VERSION: &str = "2023-02-01";

/// Resource type passed to name availability checks.
pub const RESOURCE_TYPE: &str = "Microsoft.SignalRService/WebPubSub";

pub(crate) fn api_version(client: &ArmClient) -> String {
    client.api_version_query(PROVIDER_NAMESPACE, API_VERSION)
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkuTier {
    Free,
    Basic,
    Standard,
    Premium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSku {
    /// `Free_F1`, `Standard_S1` or `Premium_P1`.
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<SkuTier>,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebPubSubRequestType {
    ClientConnection,
    ServerConnection,
    #[serde(rename = "RESTAPI")]
    RestApi,
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AclAction {
    Allow,
    Deny,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkAcl {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow: Vec<WebPubSubRequestType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny: Vec<WebPubSubRequestType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAcls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_action: Option<AclAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_network: Option<NetworkAcl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub private_endpoints: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogCategory {
    pub name: Option<String>,
    /// `"true"` or `"false"`.
    pub enabled: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveTraceConfiguration {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<LogCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceLogConfiguration {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<LogCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_cert_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPubSubProperties {
    #[serde(rename = "disableAadAuth", skip_serializing_if = "Option::is_none")]
    pub disable_aad_auth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_local_auth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_trace_configuration: Option<LiveTraceConfiguration>,
    #[serde(rename = "networkACLs", skip_serializing_if = "Option::is_none")]
    pub network_acls: Option<NetworkAcls>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_network_access: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_log_configuration: Option<ResourceLogConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsSettings>,

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
}

/// A Web PubSub service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPubSubResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<ResourceSku>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<ManagedServiceIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<WebPubSubProperties>,

    #[serde(skip_serializing)]
    pub id: Option<String>,
    #[serde(skip_serializing)]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing)]
    pub resource_type: Option<String>,
    #[serde(skip_serializing)]
    pub system_data: Option<SystemData>,
}

impl WebPubSubResource {
    pub fn new(location: impl Into<String>, sku: ResourceSku) -> Self {
        Self {
            location: Some(location.into()),
            sku: Some(sku),
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

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebPubSubKeys {
    pub primary_key: Option<String>,
    pub secondary_key: Option<String>,
    pub primary_connection_string: Option<String>,
    pub secondary_connection_string: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
    Primary,
    Secondary,
    Salt,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateKeyParameters {
    pub key_type: KeyType,
}

// ---------------------------------------------------------------------------
// Hubs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnonymousConnectPolicy {
    #[serde(rename = "allow")]
    Allow,
    #[serde(rename = "deny")]
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpstreamAuthType {
    None,
    ManagedIdentity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedIdentitySettings {
    pub resource: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamAuthSettings {
    #[serde(rename = "type")]
    pub auth_type: UpstreamAuthType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_identity: Option<ManagedIdentitySettings>,
}

/// An upstream webhook receiving hub events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHandler {
    /// May contain `{event}` as a placeholder.
    pub url_template: String,
    /// `*`, a comma separated list, or a single event name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_event_pattern: Option<String>,
    /// Any of `connect`, `connected` and `disconnected`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub system_events: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<UpstreamAuthSettings>,
}

impl EventHandler {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            user_event_pattern: None,
            system_events: Vec::new(),
            auth: None,
        }
    }
}

/// Where an event listener sends events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventListenerEndpoint {
    #[serde(rename = "EventHub", rename_all = "camelCase")]
    EventHub {
        event_hub_name: String,
        /// e.g. `example.servicebus.windows.net`.
        fully_qualified_namespace: String,
    },
}

/// Which events an event listener receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventListenerFilter {
    #[serde(rename = "EventName", rename_all = "camelCase")]
    EventName {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        system_events: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        user_event_pattern: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventListener {
    pub endpoint: EventListenerEndpoint,
    pub filter: EventListenerFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous_connect_policy: Option<AnonymousConnectPolicy>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_handlers: Vec<EventHandler>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_listeners: Vec<EventListener>,
}

/// A hub setting of a Web PubSub service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hub {
    pub properties: HubProperties,

    #[serde(skip_serializing)]
    pub id: Option<String>,
    #[serde(skip_serializing)]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing)]
    pub resource_type: Option<String>,
    #[serde(skip_serializing)]
    pub system_data: Option<SystemData>,
}
