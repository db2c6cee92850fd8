//! Models for Azure Export for Terraform.

use azure_mgmt_core::client::ArmClient;
use azure_mgmt_core::models::ErrorDetail;
use serde::{Deserialize, Serialize};

/// Resource provider namespace.
pub const PROVIDER_NAMESPACE: &str = "Microsoft.AzureTerraform";

/// API version used by this crate unless the client's profile pins another.
pub const API_VERSION: &str = "2023-07-01-preview";

pub(crate) fn api_version(client: &ArmClient) -> String {
    client.api_version_query(PROVIDER_NAMESPACE, API_VERSION)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetProvider {
    #[default]
    Azurerm,
    Azapi,
}

/// Options shared by every export kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_provider: Option<TargetProvider>,
    /// Emit every property, not only required ones.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_properties: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_sensitive: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResource {
    /// Full IDs of the resources to export.
    pub resource_ids: Vec<String>,
    /// Terraform resource name; only used when exporting a single resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_name: Option<String>,
    /// Terraform resource type; only used when exporting a single resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_pattern: Option<String>,
    #[serde(flatten)]
    pub options: ExportOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResourceGroup {
    pub resource_group_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_pattern: Option<String>,
    #[serde(flatten)]
    pub options: ExportOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    /// An Azure Resource Graph `where` predicate.
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_pattern: Option<String>,
    /// Also export child resources of matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recursive: Option<bool>,
    #[serde(flatten)]
    pub options: ExportOptions,
}

/// What to export, discriminated by `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ExportRequest {
    ExportResource(ExportResource),
    ExportResourceGroup(ExportResourceGroup),
    ExportQuery(ExportQuery),
}

impl ExportRequest {
    pub fn resources<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ExportResource(ExportResource {
            resource_ids: ids.into_iter().map(Into::into).collect(),
            ..Default::default()
        })
    }

    pub fn resource_group(name: impl Into<String>) -> Self {
        Self::ExportResourceGroup(ExportResourceGroup {
            resource_group_name: name.into(),
            ..Default::default()
        })
    }

    pub fn query(query: impl Into<String>) -> Self {
        Self::ExportQuery(ExportQuery {
            query: query.into(),
            ..Default::default()
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ExportResource(_) => "ExportResource",
            Self::ExportResourceGroup(_) => "ExportResourceGroup",
            Self::ExportQuery(_) => "ExportQuery",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    /// The generated HCL.
    pub configuration: Option<String>,
    #[serde(default)]
    pub skipped_resources: Vec<String>,
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

/// Final status of an export, carrying the generated configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerraformOperationStatus {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub percent_complete: Option<f64>,
    pub error: Option<ErrorDetail>,
    pub properties: Option<ExportResult>,
}

impl TerraformOperationStatus {
    pub fn configuration(&self) -> Option<&str> {
        self.properties.as_ref().and_then(|p| p.configuration.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_requests_are_tagged_by_type() {
        let mut request = ExportRequest::query("type =~ 'microsoft.network/virtualnetworks'");
        if let ExportRequest::ExportQuery(query) = &mut request {
            query.recursive = Some(true);
            query.options.target_provider = Some(TargetProvider::Azapi);
        }

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "type": "ExportQuery",
                "query": "type =~ 'microsoft.network/virtualnetworks'",
                "recursive": true,
                "targetProvider": "azapi"
            })
        );

        let group = ExportRequest::resource_group("rg1");
        assert_eq!(group.kind(), "ExportResourceGroup");
        assert_eq!(
            serde_json::to_value(&group).unwrap(),
            serde_json::json!({"type": "ExportResourceGroup", "resourceGroupName": "rg1"})
        );
    }
}
