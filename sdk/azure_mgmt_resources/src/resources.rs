//! Generic resource operations.
//!
//! Resources of any type can be listed, read, checked and deleted here by
//! their full ID. Because the API version belongs to the resource's own
//! provider, the `*_by_id` functions take it as an argument.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;
use azure_mgmt_core::poller::{LroMethod, Poller};
use azure_mgmt_core::resource_id::ResourceId;

use crate::models::{api_version, GenericResource, ResourceListOptions, ResourcesMoveInfo};

fn apply_list_options(path: &mut String, options: Option<&ResourceListOptions>) {
    if let Some(options) = options {
        path::append_optional(path, "$filter", options.filter.as_deref());
        path::append_optional(path, "$expand", options.expand.as_deref());
        path::append_optional(path, "$top", options.top);
    }
}

/// Path and query for a resource addressed by ID.
fn by_id_path(resource_id: &str, resource_api_version: &str) -> ArmResult<String> {
    let id = ResourceId::parse(resource_id)?;
    let mut path = id.to_string();
    path::append_query(&mut path, "api-version", resource_api_version);
    Ok(path)
}

/// List all resources in the subscription.
#[tracing::instrument(name = "arm::resources::list", skip(client, options))]
pub fn list(
    client: &ArmClient,
    options: Option<&ResourceListOptions>,
) -> ArmResult<Pager<PagedList<GenericResource>>> {
    let mut path = format!("{}/resources?{}", client.subscription_path()?, api_version(client));
    apply_list_options(&mut path, options);
    Ok(Pager::new(client, path))
}

/// List the resources in a resource group.
#[tracing::instrument(
    name = "arm::resources::list_by_resource_group",
    skip(client, options),
    fields(resource_group = %resource_group)
)]
pub fn list_by_resource_group(
    client: &ArmClient,
    resource_group: &str,
    options: Option<&ResourceListOptions>,
) -> ArmResult<Pager<PagedList<GenericResource>>> {
    let mut path = format!(
        "{}/resources?{}",
        client.resource_group_path(resource_group)?,
        api_version(client)
    );
    apply_list_options(&mut path, options);
    Ok(Pager::new(client, path))
}

/// Check whether a resource exists.
#[tracing::instrument(name = "arm::resources::check_existence_by_id", skip(client))]
pub async fn check_existence_by_id(
    client: &ArmClient,
    resource_id: &str,
    resource_api_version: &str,
) -> ArmResult<bool> {
    let path = by_id_path(resource_id, resource_api_version)?;
    client.exists(&path).await
}

/// Get a resource by ID.
#[tracing::instrument(name = "arm::resources::get_by_id", skip(client))]
pub async fn get_by_id(
    client: &ArmClient,
    resource_id: &str,
    resource_api_version: &str,
) -> ArmResult<GenericResource> {
    let path = by_id_path(resource_id, resource_api_version)?;
    let response = client.get(&path).await?;
    read_json::<GenericResource>(response).await
}

/// Delete a resource by ID.
#[tracing::instrument(name = "arm::resources::delete_by_id", skip(client))]
pub async fn begin_delete_by_id(
    client: &ArmClient,
    resource_id: &str,
    resource_api_version: &str,
) -> ArmResult<Poller<()>> {
    tracing::debug!("deleting resource");

    let path = by_id_path(resource_id, resource_api_version)?;
    let response = client.delete(&path).await?;
    Poller::from_response(client, LroMethod::Delete, response, None).await
}

/// Move resources from `source_resource_group` to another group, possibly
/// in another subscription. Both groups are locked while the move runs.
#[tracing::instrument(
    name = "arm::resources::move_resources",
    skip(client, parameters),
    fields(source = %source_resource_group, target = %parameters.target_resource_group)
)]
pub async fn begin_move_resources(
    client: &ArmClient,
    source_resource_group: &str,
    parameters: &ResourcesMoveInfo,
) -> ArmResult<Poller<()>> {
    tracing::debug!(count = parameters.resources.len(), "moving resources");

    let path = format!(
        "{}/moveResources?{}",
        client.resource_group_path(source_resource_group)?,
        api_version(client)
    );
    let response = client.post(&path, parameters).await?;
    Poller::from_response(client, LroMethod::Post, response, None).await
}
