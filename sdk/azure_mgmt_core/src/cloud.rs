//! Sovereign cloud endpoints.

use crate::error::{ArmError, ArmResult};

/// Endpoints that differ between Azure clouds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudConfiguration {
    /// Display name of the cloud.
    pub name: String,
    /// Microsoft Entra ID authority host.
    pub authority_host: String,
    /// Base URL of the Resource Manager endpoint.
    pub resource_manager_endpoint: String,
    /// Token audience for Resource Manager.
    pub audience: String,
}

impl CloudConfiguration {
    /// Azure public cloud.
    pub fn azure_public() -> Self {
        Self {
            name: "AzurePublicCloud".into(),
            authority_host: "https://login.microsoftonline.com/".into(),
            resource_manager_endpoint: "https://management.azure.com".into(),
            audience: "https://management.core.windows.net/".into(),
        }
    }

    /// Azure operated by 21Vianet.
    pub fn azure_china() -> Self {
        Self {
            name: "AzureChinaCloud".into(),
            authority_host: "https://login.chinacloudapi.cn/".into(),
            resource_manager_endpoint: "https://management.chinacloudapi.cn".into(),
            audience: "https://management.core.chinacloudapi.cn".into(),
        }
    }

    /// Azure US Government.
    pub fn azure_government() -> Self {
        Self {
            name: "AzureUSGovernment".into(),
            authority_host: "https://login.microsoftonline.us/".into(),
            resource_manager_endpoint: "https://management.usgovcloudapi.net".into(),
            audience: "https://management.core.usgovcloudapi.net".into(),
        }
    }

    /// Look up a well-known cloud by name (case-insensitive).
    pub fn from_name(name: &str) -> ArmResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "azurepubliccloud" | "azurecloud" | "public" => Ok(Self::azure_public()),
            "azurechinacloud" | "china" => Ok(Self::azure_china()),
            "azureusgovernment" | "azureusgovernmentcloud" | "usgovernment" => {
                Ok(Self::azure_government())
            }
            other => Err(ArmError::MissingConfig(format!("unknown cloud '{other}'"))),
        }
    }

    /// The OAuth scope requested for Resource Manager tokens.
    pub fn token_scope(&self) -> String {
        format!("{}/.default", self.audience.trim_end_matches('/'))
    }
}

impl Default for CloudConfiguration {
    fn default() -> Self {
        Self::azure_public()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_scope_has_no_double_slash() {
        assert_eq!(
            CloudConfiguration::azure_public().token_scope(),
            "https://management.core.windows.net/.default"
        );
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(
            CloudConfiguration::from_name("AzureChinaCloud").unwrap(),
            CloudConfiguration::azure_china()
        );
        assert_eq!(
            CloudConfiguration::from_name("azureusgovernment").unwrap(),
            CloudConfiguration::azure_government()
        );
        assert!(CloudConfiguration::from_name("mars").is_err());
    }
}
