//! Models for Microsoft.Resources.

use azure_mgmt_core::client::ArmClient;
use azure_mgmt_core::error::{ArmError, ArmResult};
use azure_mgmt_core::models::{ErrorDetail, ManagedServiceIdentity, Tags};
use serde::{Deserialize, Serialize};

/// Resource provider namespace.
pub const PROVIDER_NAMESPACE: &str = "Microsoft.Resources";

/// API version used by this crate unless the client's profile pins another.
pub const API_VERSION: &str = "2021-04-01";

pub(crate) fn api_version(client: &ArmClient) -> String {
    client.api_version_query(PROVIDER_NAMESPACE, API_VERSION)
}

// ---------------------------------------------------------------------------
// Resource groups
// ---------------------------------------------------------------------------

/// A resource group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    /// Required on create.
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<ResourceGroupProperties>,

    #[serde(skip_serializing)]
    pub id: Option<String>,
    #[serde(skip_serializing)]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing)]
    pub resource_type: Option<String>,
}

impl ResourceGroup {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Default::default()
        }
    }

    /// Add a tag.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags
            .get_or_insert_with(Tags::new)
            .insert(key.into(), value.into());
        self
    }

    /// The provisioning state reported by the service.
    pub fn provisioning_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupProperties {
    #[serde(skip_serializing)]
    pub provisioning_state: Option<String>,
}

/// Fields of a resource group that can be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroupPatchable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}

/// Resource types whose resources may be force-deleted with their group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceDeletionType {
    VirtualMachines,
    VirtualMachineScaleSets,
}

impl ForceDeletionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VirtualMachines => "Microsoft.Compute/virtualMachines",
            Self::VirtualMachineScaleSets => "Microsoft.Compute/virtualMachineScaleSets",
        }
    }
}

/// Optional parameters for [`crate::resource_groups::list`].
#[derive(Debug, Clone, Default)]
pub struct ResourceGroupListOptions {
    /// OData filter on `tagName`/`tagValue`, e.g. `tagName eq 'env'`.
    pub filter: Option<String>,
    pub top: Option<u32>,
}

/// Request for exporting a resource group as a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTemplateRequest {
    /// Resource IDs to export; `["*"]` exports everything.
    pub resources: Vec<String>,
    /// Comma-separated: `IncludeParameterDefaultValue`, `IncludeComments`,
    /// `SkipResourceNameParameterization`, `SkipAllParameterization`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl ExportTemplateRequest {
    /// Export every resource in the group.
    pub fn all() -> Self {
        Self {
            resources: vec!["*".into()],
            options: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResourceGroupExportResult {
    pub template: Option<serde_json::Value>,
    pub error: Option<ErrorDetail>,
}

// ---------------------------------------------------------------------------
// Deployments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentMode {
    Incremental,
    Complete,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Resource ID of a template spec version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParametersLink {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugSetting {
    /// `none`, `requestContent`, `responseContent` or both, comma-separated.
    pub detail_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnErrorDeploymentType {
    LastSuccessful,
    SpecificDeployment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnErrorDeployment {
    #[serde(rename = "type")]
    pub deployment_type: OnErrorDeploymentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpressionEvaluationScope {
    NotSpecified,
    Outer,
    Inner,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionEvaluationOptions {
    pub scope: ExpressionEvaluationScope,
}

/// Deployment properties sent on create and validate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentProperties {
    pub mode: DeploymentMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_link: Option<TemplateLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters_link: Option<ParametersLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_setting: Option<DebugSetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_error_deployment: Option<OnErrorDeployment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression_evaluation_options: Option<ExpressionEvaluationOptions>,
}

/// A deployment request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deployment {
    /// Required for deployments at tenant, management group and subscription scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub properties: DeploymentProperties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
}

impl Deployment {
    /// Creates a new builder for a deployment request.
    pub fn builder() -> DeploymentBuilder {
        DeploymentBuilder::default()
    }
}

/// Builder for [`Deployment`].
#[derive(Debug, Default)]
pub struct DeploymentBuilder {
    mode: Option<DeploymentMode>,
    location: Option<String>,
    template: Option<serde_json::Value>,
    template_link: Option<TemplateLink>,
    parameters: Option<serde_json::Value>,
    parameters_link: Option<ParametersLink>,
    debug_setting: Option<DebugSetting>,
    on_error_deployment: Option<OnErrorDeployment>,
    tags: Option<Tags>,
}

impl DeploymentBuilder {
    /// Deployment mode (defaults to `Incremental`).
    pub fn mode(mut self, mode: DeploymentMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Inline template content.
    pub fn template(mut self, template: serde_json::Value) -> Self {
        self.template = Some(template);
        self
    }

    pub fn template_link(mut self, link: TemplateLink) -> Self {
        self.template_link = Some(link);
        self
    }

    /// Inline parameter values, `{"name": {"value": ...}}`.
    pub fn parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn parameters_link(mut self, link: ParametersLink) -> Self {
        self.parameters_link = Some(link);
        self
    }

    pub fn debug_setting(mut self, detail_level: impl Into<String>) -> Self {
        self.debug_setting = Some(DebugSetting {
            detail_level: detail_level.into(),
        });
        self
    }

    /// Roll back to the last successful deployment on failure.
    pub fn rollback_on_error(mut self) -> Self {
        self.on_error_deployment = Some(OnErrorDeployment {
            deployment_type: OnErrorDeploymentType::LastSuccessful,
            deployment_name: None,
        });
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags
            .get_or_insert_with(Tags::new)
            .insert(key.into(), value.into());
        self
    }

    /// Build the request.
    ///
    /// # Errors
    ///
    /// Returns [`ArmError::Builder`] unless exactly one of `template` and
    /// `template_link` is set, or if both `parameters` and
    /// `parameters_link` are set.
    pub fn build(self) -> ArmResult<Deployment> {
        match (&self.template, &self.template_link) {
            (None, None) => {
                return Err(ArmError::Builder(
                    "either template or template_link is required".into(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(ArmError::Builder(
                    "template and template_link are mutually exclusive".into(),
                ))
            }
            _ => {}
        }
        if self.parameters.is_some() && self.parameters_link.is_some() {
            return Err(ArmError::Builder(
                "parameters and parameters_link are mutually exclusive".into(),
            ));
        }

        Ok(Deployment {
            location: self.location,
            properties: DeploymentProperties {
                mode: self.mode.unwrap_or(DeploymentMode::Incremental),
                template: self.template,
                template_link: self.template_link,
                parameters: self.parameters,
                parameters_link: self.parameters_link,
                debug_setting: self.debug_setting,
                on_error_deployment: self.on_error_deployment,
                expression_evaluation_options: None,
            },
            tags: self.tags,
        })
    }
}

/// A resource referenced by a deployment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceReference {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResourceType {
    pub resource_type: Option<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub api_versions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: Option<String>,
    pub namespace: Option<String>,
    pub registration_state: Option<String>,
    #[serde(default)]
    pub resource_types: Vec<ProviderResourceType>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicDependency {
    pub id: Option<String>,
    pub resource_name: Option<String>,
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub id: Option<String>,
    pub resource_name: Option<String>,
    pub resource_type: Option<String>,
    #[serde(default)]
    pub depends_on: Vec<BasicDependency>,
}

/// Deployment properties as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentPropertiesExtended {
    pub provisioning_state: Option<String>,
    pub correlation_id: Option<String>,
    pub timestamp: Option<String>,
    /// ISO 8601 duration.
    pub duration: Option<String>,
    pub outputs: Option<serde_json::Value>,
    #[serde(default)]
    pub providers: Vec<Provider>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    pub template_link: Option<TemplateLink>,
    pub parameters: Option<serde_json::Value>,
    pub parameters_link: Option<ParametersLink>,
    pub mode: Option<DeploymentMode>,
    pub debug_setting: Option<DebugSetting>,
    pub on_error_deployment: Option<serde_json::Value>,
    pub template_hash: Option<String>,
    #[serde(default)]
    pub output_resources: Vec<ResourceReference>,
    #[serde(default)]
    pub validated_resources: Vec<ResourceReference>,
    pub error: Option<ErrorDetail>,
}

/// A deployment as returned by the service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeploymentExtended {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    pub location: Option<String>,
    pub properties: Option<DeploymentPropertiesExtended>,
    pub tags: Option<Tags>,
}

impl DeploymentExtended {
    pub fn provisioning_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
    }
}

/// Result of validating a deployment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeploymentValidateResult {
    pub error: Option<ErrorDetail>,
    pub properties: Option<DeploymentPropertiesExtended>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeploymentExportResult {
    pub template: Option<serde_json::Value>,
}

/// Optional parameters for deployment and deployment operation listings.
#[derive(Debug, Clone, Default)]
pub struct DeploymentListOptions {
    /// e.g. `provisioningState eq 'Failed'`.
    pub filter: Option<String>,
    pub top: Option<u32>,
}

// ---------------------------------------------------------------------------
// Deployment operations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetResource {
    pub id: Option<String>,
    pub resource_name: Option<String>,
    pub resource_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpMessage {
    pub content: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessage {
    pub status: Option<String>,
    pub error: Option<ErrorDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentOperationProperties {
    /// `Create`, `Delete`, `Read`, `Action`, ...
    pub provisioning_operation: Option<String>,
    pub provisioning_state: Option<String>,
    pub timestamp: Option<String>,
    pub duration: Option<String>,
    pub service_request_id: Option<String>,
    pub status_code: Option<String>,
    pub status_message: Option<StatusMessage>,
    pub target_resource: Option<TargetResource>,
    pub request: Option<HttpMessage>,
    pub response: Option<HttpMessage>,
}

/// One step of a deployment.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentOperation {
    pub id: Option<String>,
    pub operation_id: Option<String>,
    pub properties: Option<DeploymentOperationProperties>,
}

// ---------------------------------------------------------------------------
// Generic resources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
}

/// Any resource, with provider-specific `properties` left as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericResource {
    #[serde(skip_serializing)]
    pub id: Option<String>,
    #[serde(skip_serializing)]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing)]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_location: Option<ExtendedLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<Sku>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<ManagedServiceIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Plan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,

    /// Only present when listed with `$expand=createdTime`.
    #[serde(skip_serializing)]
    pub created_time: Option<String>,
    /// Only present when listed with `$expand=changedTime`.
    #[serde(skip_serializing)]
    pub changed_time: Option<String>,
    /// Only present when listed with `$expand=provisioningState`.
    #[serde(skip_serializing)]
    pub provisioning_state: Option<String>,
}

/// Optional parameters for resource listings.
#[derive(Debug, Clone, Default)]
pub struct ResourceListOptions {
    /// e.g. `resourceType eq 'Microsoft.Web/sites'` or `tagName eq 'env'`.
    pub filter: Option<String>,
    /// Comma-separated: `createdTime`, `changedTime`, `provisioningState`.
    pub expand: Option<String>,
    pub top: Option<u32>,
}

/// Request to move resources to another resource group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesMoveInfo {
    /// IDs of the resources to move; all must share the source group.
    pub resources: Vec<String>,
    /// Full ID of the target resource group.
    pub target_resource_group: String,
}
