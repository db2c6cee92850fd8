//! Models for Data Lake Storage Gen1 accounts.

use azure_mgmt_core::client::ArmClient;
use azure_mgmt_core::models::Tags;
use serde::{Deserialize, Serialize};

/// Resource provider namespace.
pub const PROVIDER_NAMESPACE: &str = "Microsoft.DataLakeStore";

/// API version used by this crate unless the client's profile pins another.
pub const API_VERSION: &str = "2016-11-01";

pub const RESOURCE_TYPE: &str = "Microsoft.DataLakeStore/accounts";

pub(crate) fn api_version(client: &ArmClient) -> String {
    client.api_version_query(PROVIDER_NAMESPACE, API_VERSION)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncryptionConfigType {
    UserManaged,
    ServiceManaged,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyVaultMetaInfo {
    pub key_vault_resource_id: String,
    pub encryption_key_name: String,
    pub encryption_key_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionConfig {
    #[serde(rename = "type")]
    pub config_type: EncryptionConfigType,
    /// Required for `UserManaged`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_vault_meta_info: Option<KeyVaultMetaInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnabledState {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierType {
    Consumption,
    #[serde(rename = "Commitment_1TB")]
    Commitment1Tb,
    #[serde(rename = "Commitment_10TB")]
    Commitment10Tb,
    #[serde(rename = "Commitment_100TB")]
    Commitment100Tb,
    #[serde(rename = "Commitment_500TB")]
    Commitment500Tb,
    #[serde(rename = "Commitment_1PB")]
    Commitment1Pb,
    #[serde(rename = "Commitment_5PB")]
    Commitment5Pb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionIdentity {
    /// Always `SystemAssigned`.
    #[serde(rename = "type")]
    pub identity_type: String,
    #[serde(default, skip_serializing)]
    pub principal_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub tenant_id: Option<String>,
}

impl EncryptionIdentity {
    pub fn system_assigned() -> Self {
        Self {
            identity_type: "SystemAssigned".into(),
            principal_id: None,
            tenant_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpRange {
    pub start_ip_address: String,
    pub end_ip_address: String,
}

/// A firewall rule supplied inline when creating an account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateFirewallRuleWithAccountParameters {
    pub name: String,
    pub properties: IpRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNetworkRuleProperties {
    pub subnet_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedVirtualNetworkRule {
    pub name: String,
    pub properties: VirtualNetworkRuleProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedIdProviderProperties {
    pub id_provider: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedTrustedIdProvider {
    pub name: String,
    pub properties: TrustedIdProviderProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDataLakeStoreAccountProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_config: Option<EncryptionConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_state: Option<EnabledState>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub firewall_rules: Vec<CreateFirewallRuleWithAccountParameters>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub virtual_network_rules: Vec<NamedVirtualNetworkRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_state: Option<EnabledState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_allow_azure_ips: Option<EnabledState>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trusted_id_providers: Vec<NamedTrustedIdProvider>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted_id_provider_state: Option<EnabledState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_tier: Option<TierType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateDataLakeStoreAccountParameters {
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<EncryptionIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<CreateDataLakeStoreAccountProperties>,
}

impl CreateDataLakeStoreAccountParameters {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKeyVaultMetaInfo {
    pub encryption_key_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEncryptionConfig {
    pub key_vault_meta_info: UpdateKeyVaultMetaInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDataLakeStoreAccountProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_config: Option<UpdateEncryptionConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_state: Option<EnabledState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall_allow_azure_ips: Option<EnabledState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trusted_id_provider_state: Option<EnabledState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_tier: Option<TierType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateDataLakeStoreAccountParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<UpdateDataLakeStoreAccountProperties>,
}

/// Account properties as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLakeStoreAccountProperties {
    pub account_id: Option<String>,
    pub provisioning_state: Option<String>,
    /// `Active` or `Suspended`.
    pub state: Option<String>,
    pub creation_time: Option<String>,
    pub last_modified_time: Option<String>,
    /// e.g. `account.azuredatalakestore.net`.
    pub endpoint: Option<String>,
    pub default_group: Option<String>,
    pub encryption_config: Option<EncryptionConfig>,
    pub encryption_state: Option<EnabledState>,
    pub encryption_provisioning_state: Option<String>,
    #[serde(default)]
    pub firewall_rules: Vec<FirewallRule>,
    pub firewall_state: Option<EnabledState>,
    pub firewall_allow_azure_ips: Option<EnabledState>,
    pub trusted_id_provider_state: Option<EnabledState>,
    pub new_tier: Option<TierType>,
    pub current_tier: Option<TierType>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLakeStoreAccount {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub location: Option<String>,
    pub tags: Option<Tags>,
    pub identity: Option<EncryptionIdentity>,
    pub properties: Option<DataLakeStoreAccountProperties>,
}

impl DataLakeStoreAccount {
    pub fn provisioning_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
    }
}

/// The reduced account view returned by list calls.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLakeStoreAccountBasic {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub location: Option<String>,
    pub tags: Option<Tags>,
    pub properties: Option<DataLakeStoreAccountPropertiesBasic>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLakeStoreAccountPropertiesBasic {
    pub account_id: Option<String>,
    pub provisioning_state: Option<String>,
    pub state: Option<String>,
    pub creation_time: Option<String>,
    pub last_modified_time: Option<String>,
    pub endpoint: Option<String>,
}

/// OData options for account listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountListOptions {
    pub filter: Option<String>,
    pub top: Option<u32>,
    pub skip: Option<u32>,
    /// Comma separated, e.g. `Name,Location`.
    pub select: Option<String>,
    /// e.g. `LastModifiedTime desc`.
    pub orderby: Option<String>,
    /// Ask the service to include the total match count.
    pub count: Option<bool>,
}

// ---------------------------------------------------------------------------
// Firewall rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallRule {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub properties: Option<IpRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrUpdateFirewallRuleParameters {
    pub properties: IpRange,
}

impl CreateOrUpdateFirewallRuleParameters {
    pub fn new(start_ip_address: impl Into<String>, end_ip_address: impl Into<String>) -> Self {
        Self {
            properties: IpRange {
                start_ip_address: start_ip_address.into(),
                end_ip_address: end_ip_address.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFirewallRuleProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_ip_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateFirewallRuleParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<UpdateFirewallRuleProperties>,
}
