//! Models for Microsoft.Cache (Azure Cache for Redis).

use std::collections::HashMap;
use std::fmt;

use azure_mgmt_core::client::ArmClient;
use azure_mgmt_core::models::{ManagedServiceIdentity, SystemData, Tags};
use serde::{Deserialize, Serialize};

/// Resource provider namespace.
pub const PROVIDER_NAMESPACE: &str = "Microsoft.Cache";

/// API version used by this crate unless the client's profile pins another.
pub const API_VERSION: &str = "2023-08-01";

/// Resource type passed to name availability checks.
pub const RESOURCE_TYPE: &str = "Microsoft.Cache/redis";

pub(crate) fn api_version(client: &ArmClient) -> String {
    client.api_version_query(PROVIDER_NAMESPACE, API_VERSION)
}

// ---------------------------------------------------------------------------
// SKU
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkuName {
    Basic,
    Standard,
    Premium,
}

/// `C` for Basic/Standard, `P` for Premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkuFamily {
    C,
    P,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    pub name: SkuName,
    pub family: SkuFamily,
    /// 0-6 for C, 1-5 for P.
    pub capacity: i32,
}

impl Sku {
    pub fn new(name: SkuName, family: SkuFamily, capacity: i32) -> Self {
        Self {
            name,
            family,
            capacity,
        }
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TlsVersion {
    #[serde(rename = "1.0")]
    Tls1_0,
    #[serde(rename = "1.1")]
    Tls1_1,
    #[serde(rename = "1.2")]
    Tls1_2,
}

/// Redis server settings. Keys not modelled here land in `additional`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedisConfiguration {
    #[serde(rename = "maxmemory-policy", skip_serializing_if = "Option::is_none")]
    pub maxmemory_policy: Option<String>,
    #[serde(rename = "maxmemory-reserved", skip_serializing_if = "Option::is_none")]
    pub maxmemory_reserved: Option<String>,
    #[serde(rename = "maxfragmentationmemory-reserved", skip_serializing_if = "Option::is_none")]
    pub maxfragmentationmemory_reserved: Option<String>,
    #[serde(rename = "rdb-backup-enabled", skip_serializing_if = "Option::is_none")]
    pub rdb_backup_enabled: Option<String>,
    #[serde(rename = "aof-backup-enabled", skip_serializing_if = "Option::is_none")]
    pub aof_backup_enabled: Option<String>,
    #[serde(rename = "aad-enabled", skip_serializing_if = "Option::is_none")]
    pub aad_enabled: Option<String>,
    #[serde(flatten)]
    pub additional: HashMap<String, serde_json::Value>,
}

/// Properties accepted on create.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisCreateProperties {
    pub sku: Sku,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_non_ssl_port: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_tls_version: Option<TlsVersion>,
    /// `Enabled` or `Disabled`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_network_access: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis_configuration: Option<RedisConfiguration>,
    /// `6` or `latest`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas_per_primary: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shard_count: Option<i32>,
    /// Virtual network subnet, Premium only.
    #[serde(rename = "subnetId", skip_serializing_if = "Option::is_none")]
    pub subnet_id: Option<String>,
    #[serde(rename = "staticIP", skip_serializing_if = "Option::is_none")]
    pub static_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_settings: Option<HashMap<String, String>>,
}

/// Parameters of [`crate::redis::begin_create`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisCreateParameters {
    pub location: String,
    pub properties: RedisCreateProperties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zones: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<ManagedServiceIdentity>,
}

impl RedisCreateParameters {
    pub fn new(location: impl Into<String>, sku: Sku) -> Self {
        Self {
            location: location.into(),
            properties: RedisCreateProperties {
                sku,
                enable_non_ssl_port: None,
                minimum_tls_version: Some(TlsVersion::Tls1_2),
                public_network_access: None,
                redis_configuration: None,
                redis_version: None,
                replicas_per_primary: None,
                shard_count: None,
                subnet_id: None,
                static_ip: None,
                tenant_settings: None,
            },
            zones: None,
            tags: None,
            identity: None,
        }
    }
}

/// Properties accepted on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisUpdateProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<Sku>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_non_ssl_port: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_tls_version: Option<TlsVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_network_access: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis_configuration: Option<RedisConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas_per_primary: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shard_count: Option<i32>,
}

/// Parameters of [`crate::redis::begin_update`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RedisUpdateParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<RedisUpdateProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<ManagedServiceIdentity>,
}

#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisAccessKeys {
    pub primary_key: Option<String>,
    pub secondary_key: Option<String>,
}

impl fmt::Debug for RedisAccessKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisAccessKeys")
            .field("primary_key", &self.primary_key.as_ref().map(|_| "[REDACTED]"))
            .field("secondary_key", &self.secondary_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisInstanceDetails {
    pub ssl_port: Option<i32>,
    pub non_ssl_port: Option<i32>,
    pub zone: Option<String>,
    pub shard_id: Option<i32>,
    pub is_master: Option<bool>,
    pub is_primary: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RedisLinkedServer {
    pub id: Option<String>,
}

/// Cache properties as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisProperties {
    pub provisioning_state: Option<String>,
    pub sku: Option<Sku>,
    pub host_name: Option<String>,
    pub port: Option<i32>,
    pub ssl_port: Option<i32>,
    pub redis_version: Option<String>,
    pub enable_non_ssl_port: Option<bool>,
    pub minimum_tls_version: Option<TlsVersion>,
    pub public_network_access: Option<String>,
    pub redis_configuration: Option<RedisConfiguration>,
    pub replicas_per_primary: Option<i32>,
    pub shard_count: Option<i32>,
    #[serde(rename = "subnetId")]
    pub subnet_id: Option<String>,
    #[serde(rename = "staticIP")]
    pub static_ip: Option<String>,
    /// Only returned on create.
    pub access_keys: Option<RedisAccessKeys>,
    #[serde(default)]
    pub instances: Vec<RedisInstanceDetails>,
    #[serde(default)]
    pub linked_servers: Vec<RedisLinkedServer>,
}

/// A Redis cache.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisResource {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub location: Option<String>,
    pub tags: Option<Tags>,
    #[serde(default)]
    pub zones: Vec<String>,
    pub identity: Option<ManagedServiceIdentity>,
    pub properties: Option<RedisProperties>,
    pub system_data: Option<SystemData>,
}

impl RedisResource {
    pub fn provisioning_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
    }

    pub fn host_name(&self) -> Option<&str> {
        self.properties.as_ref().and_then(|p| p.host_name.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedisKeyType {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisRegenerateKeyParameters {
    pub key_type: RedisKeyType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RebootType {
    PrimaryNode,
    SecondaryNode,
    AllNodes,
}

/// Parameters of [`crate::redis::force_reboot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisRebootParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reboot_type: Option<RebootType>,
    /// Clustered caches only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shard_id: Option<i32>,
    /// Reboot only the nodes listening on these ports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<i32>>,
}

impl RedisRebootParameters {
    pub fn new(reboot_type: RebootType) -> Self {
        Self {
            reboot_type: Some(reboot_type),
            shard_id: None,
            ports: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RedisForceRebootResponse {
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Firewall rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallRuleProperties {
    #[serde(rename = "startIP")]
    pub start_ip: String,
    #[serde(rename = "endIP")]
    pub end_ip: String,
}

/// An IP range allowed to connect to a cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirewallRule {
    pub properties: FirewallRuleProperties,
    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    #[serde(default, skip_serializing)]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing)]
    pub resource_type: Option<String>,
}

impl FirewallRule {
    pub fn new(start_ip: impl Into<String>, end_ip: impl Into<String>) -> Self {
        Self {
            properties: FirewallRuleProperties {
                start_ip: start_ip.into(),
                end_ip: end_ip.into(),
            },
            id: None,
            name: None,
            resource_type: None,
        }
    }
}
