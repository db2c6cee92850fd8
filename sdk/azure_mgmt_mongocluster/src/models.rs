//! Models for Azure Cosmos DB for MongoDB (vCore) clusters.

use std::fmt;

use azure_mgmt_core::client::ArmClient;
use azure_mgmt_core::models::{SystemData, Tags};
use serde::{Deserialize, Serialize};

/// Resource provider namespace.
pub const PROVIDER_NAMESPACE: &str = "Microsoft.DocumentDB";

/// API version used by this crate unless the client's profile pins another.
pub const API_VERSION: &str = "2024-07-01";

pub const RESOURCE_TYPE: &str = "Microsoft.DocumentDB/mongoClusters";

pub(crate) fn api_version(client: &ArmClient) -> String {
    client.api_version_query(PROVIDER_NAMESPACE, API_VERSION)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreateMode {
    Default,
    PointInTimeRestore,
    GeoReplica,
    Replica,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicNetworkAccess {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighAvailabilityMode {
    Disabled,
    SameZone,
    ZoneRedundantPreferred,
}

/// Cluster administrator. The password is write-only and never returned.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministratorProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl AdministratorProperties {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: Some(user_name.into()),
            password: Some(password.into()),
        }
    }
}

impl fmt::Debug for AdministratorProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdministratorProperties")
            .field("user_name", &self.user_name)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighAvailabilityProperties {
    pub target_mode: HighAvailabilityMode,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_gb: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShardingProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shard_count: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComputeProperties {
    /// e.g. `M30`, `M40`, `M50`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupProperties {
    #[serde(skip_serializing)]
    pub earliest_restore_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoClusterRestoreParameters {
    /// RFC 3339 timestamp.
    #[serde(rename = "pointInTimeUTC")]
    pub point_in_time_utc: String,
    pub source_resource_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoClusterReplicaParameters {
    pub source_resource_id: String,
    pub source_location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationProperties {
    pub source_resource_id: Option<String>,
    /// `Primary`, `AsyncReplica` or `GeoAsyncReplica`.
    pub role: Option<String>,
    pub replication_state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoClusterProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_mode: Option<CreateMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restore_parameters: Option<MongoClusterRestoreParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_parameters: Option<MongoClusterReplicaParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrator: Option<AdministratorProperties>,
    /// MongoDB server version, e.g. `7.0`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_network_access: Option<PublicNetworkAccess>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_availability: Option<HighAvailabilityProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharding: Option<ShardingProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute: Option<ComputeProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<BackupProperties>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preview_features: Vec<String>,

    #[serde(skip_serializing)]
    pub connection_string: Option<String>,
    #[serde(skip_serializing)]
    pub provisioning_state: Option<String>,
    /// `Ready`, `Provisioning`, `Updating`, `Starting`, `Stopping`, `Stopped` or `Dropping`.
    #[serde(skip_serializing)]
    pub cluster_status: Option<String>,
    #[serde(skip_serializing)]
    pub replica: Option<ReplicationProperties>,
    #[serde(skip_serializing)]
    pub infrastructure_version: Option<String>,
}

/// A MongoDB vCore cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoCluster {
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<MongoClusterProperties>,

    #[serde(skip_serializing)]
    pub id: Option<String>,
    #[serde(skip_serializing)]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing)]
    pub resource_type: Option<String>,
    #[serde(skip_serializing)]
    pub system_data: Option<SystemData>,
}

impl MongoCluster {
    pub fn new(location: impl Into<String>, properties: MongoClusterProperties) -> Self {
        Self {
            location: location.into(),
            properties: Some(properties),
            ..Default::default()
        }
    }

    pub fn provisioning_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
    }
}

/// Fields accepted when patching a cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoClusterUpdateProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrator: Option<AdministratorProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_network_access: Option<PublicNetworkAccess>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_availability: Option<HighAvailabilityProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<StorageProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharding: Option<ShardingProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compute: Option<ComputeProperties>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preview_features: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MongoClusterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<MongoClusterUpdateProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionString {
    /// Contains `<user>:<password>` placeholders.
    pub connection_string: Option<String>,
    pub description: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConnectionStringsResult {
    #[serde(default)]
    pub connection_strings: Vec<ConnectionString>,
}

// ---------------------------------------------------------------------------
// Firewall rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallRuleProperties {
    pub start_ip_address: String,
    pub end_ip_address: String,
    #[serde(default, skip_serializing)]
    pub provisioning_state: Option<String>,
}

/// An IPv4 range allowed to reach the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallRule {
    pub properties: FirewallRuleProperties,

    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    #[serde(default, skip_serializing)]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing)]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing)]
    pub system_data: Option<SystemData>,
}

impl FirewallRule {
    pub fn new(start_ip_address: impl Into<String>, end_ip_address: impl Into<String>) -> Self {
        Self {
            properties: FirewallRuleProperties {
                start_ip_address: start_ip_address.into(),
                end_ip_address: end_ip_address.into(),
                provisioning_state: None,
            },
            id: None,
            name: None,
            resource_type: None,
            system_data: None,
        }
    }
}
