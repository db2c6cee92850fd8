//! The individual steps of a resource group deployment.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;

use crate::deployments::deployment_path;
use crate::models::{api_version, DeploymentOperation};

/// List the operations of a deployment.
#[tracing::instrument(
    name = "arm::deployment_operations::list",
    skip(client),
    fields(resource_group = %resource_group, deployment = %deployment_name)
)]
pub fn list(
    client: &ArmClient,
    resource_group: &str,
    deployment_name: &str,
    top: Option<u32>,
) -> ArmResult<Pager<PagedList<DeploymentOperation>>> {
    let mut path = format!(
        "{}/operations?{}",
        deployment_path(client, resource_group, deployment_name)?,
        api_version(client)
    );
    path::append_optional(&mut path, "$top", top);
    Ok(Pager::new(client, path))
}

/// Get one deployment operation.
#[tracing::instrument(
    name = "arm::deployment_operations::get",
    skip(client),
    fields(resource_group = %resource_group, deployment = %deployment_name, operation_id = %operation_id)
)]
pub async fn get(
    client: &ArmClient,
    resource_group: &str,
    deployment_name: &str,
    operation_id: &str,
) -> ArmResult<DeploymentOperation> {
    let path = format!(
        "{}/operations/{}?{}",
        deployment_path(client, resource_group, deployment_name)?,
        path::segment("operationId", operation_id)?,
        api_version(client)
    );
    let response = client.get(&path).await?;
    let operation = read_json::<DeploymentOperation>(response).await?;

    tracing::debug!(
        state = ?operation.properties.as_ref().and_then(|p| p.provisioning_state.as_deref()),
        "got deployment operation"
    );
    Ok(operation)
}
