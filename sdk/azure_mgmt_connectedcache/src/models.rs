//! Models for Microsoft Connected Cache for Enterprise.

use std::collections::HashMap;
use std::fmt;

use azure_mgmt_core::client::ArmClient;
use azure_mgmt_core::models::{ErrorDetail, SystemData, Tags};
use serde::{Deserialize, Serialize};

/// Resource provider namespace.
pub const PROVIDER_NAMESPACE: &str = "Microsoft.ConnectedCache";

/// API version used by this crate unless the client's profile pins another.
pub const API_VERSION: &str = "2023-05-01-preview";

pub(crate) fn api_version(client: &ArmClient) -> String {
    client.api_version_query(PROVIDER_NAMESPACE, API_VERSION)
}

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_entitled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_version: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enterprise_managed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_migrate: Option<bool>,

    #[serde(skip_serializing)]
    pub fully_qualified_resource_id: Option<String>,
    #[serde(skip_serializing)]
    pub customer_id: Option<String>,
    #[serde(skip_serializing)]
    pub create_async_operation_id: Option<String>,
    #[serde(skip_serializing)]
    pub delete_async_operation_id: Option<String>,
    #[serde(skip_serializing)]
    pub last_sync_with_azure_timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerEntity>,
    /// Free-form provider extras (peering, ISP contact details).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_customer_properties: Option<serde_json::Value>,

    #[serde(skip_serializing)]
    pub provisioning_state: Option<String>,
    #[serde(skip_serializing)]
    pub status: Option<String>,
    #[serde(skip_serializing)]
    pub error: Option<ErrorDetail>,
}

/// An enterprise Connected Cache customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseMccCustomerResource {
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<CustomerProperty>,

    #[serde(skip_serializing)]
    pub id: Option<String>,
    #[serde(skip_serializing)]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing)]
    pub resource_type: Option<String>,
    #[serde(skip_serializing)]
    pub system_data: Option<SystemData>,
}

impl EnterpriseMccCustomerResource {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            properties: Some(CustomerProperty::default()),
            ..Default::default()
        }
    }

    pub fn provisioning_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
    }
}

/// Tag-only patch body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConnectedCachePatchResource {
    pub tags: Tags,
}

impl ConnectedCachePatchResource {
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Cache nodes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheNodeEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_node_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_allowable_egress_in_mbps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_allowable_probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_version: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_migrate: Option<bool>,

    #[serde(skip_serializing)]
    pub fully_qualified_resource_id: Option<String>,
    #[serde(skip_serializing)]
    pub customer_id: Option<String>,
    #[serde(skip_serializing)]
    pub customer_name: Option<String>,
    #[serde(skip_serializing)]
    pub cache_node_id: Option<String>,
    #[serde(skip_serializing)]
    pub create_async_operation_id: Option<String>,
    #[serde(skip_serializing)]
    pub delete_async_operation_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheNodeProperty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_node: Option<CacheNodeEntity>,
    /// Drive, proxy and OS settings of the node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_cache_node_properties: Option<serde_json::Value>,

    #[serde(skip_serializing)]
    pub provisioning_state: Option<String>,
    #[serde(skip_serializing)]
    pub status: Option<String>,
    #[serde(skip_serializing)]
    pub error: Option<ErrorDetail>,
}

/// A cache node belonging to an enterprise customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseMccCacheNodeResource {
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<CacheNodeProperty>,

    #[serde(skip_serializing)]
    pub id: Option<String>,
    #[serde(skip_serializing)]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing)]
    pub resource_type: Option<String>,
    #[serde(skip_serializing)]
    pub system_data: Option<SystemData>,
}

impl EnterpriseMccCacheNodeResource {
    pub fn new(location: impl Into<String>, cache_node: CacheNodeEntity) -> Self {
        Self {
            location: location.into(),
            properties: Some(CacheNodeProperty {
                cache_node: Some(cache_node),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn provisioning_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
    }
}

/// Keys and IDs needed to run the install script on a node.
#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheNodeInstallProperties {
    pub customer_id: Option<String>,
    pub cache_node_id: Option<String>,
    pub mcc_resource_id: Option<String>,
    pub primary_account_key: Option<String>,
    pub secondary_account_key: Option<String>,
    pub registration_key: Option<String>,
}

impl fmt::Debug for CacheNodeInstallProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("CacheNodeInstallProperties")
            .field("customer_id", &self.customer_id)
            .field("cache_node_id", &self.cache_node_id)
            .field("mcc_resource_id", &self.mcc_resource_id)
            .field("primary_account_key", &redact(&self.primary_account_key))
            .field("secondary_account_key", &redact(&self.secondary_account_key))
            .field("registration_key", &redact(&self.registration_key))
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MccCacheNodeInstallDetails {
    pub location: Option<String>,
    pub tags: Option<HashMap<String, String>>,
    pub properties: Option<CacheNodeInstallProperties>,
    pub id: Option<String>,
    pub name: Option<String>,
}
