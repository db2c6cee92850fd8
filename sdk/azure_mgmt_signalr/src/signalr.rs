//! SignalR resource lifecycle operations.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::models::{CheckNameAvailabilityRequest, CheckNameAvailabilityResponse};
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;
use azure_mgmt_core::poller::{FinalStateVia, LroMethod, Poller};

use crate::models::{
    api_version, KeyType, Keys, RegenerateKeyParameters, ResourceInfo, SkuList, PROVIDER_NAMESPACE,
    RESOURCE_TYPE,
};

fn signalr_path(client: &ArmClient, resource_group: &str, resource_name: &str) -> ArmResult<String> {
    Ok(format!(
        "{}/providers/{}/signalR/{}",
        client.resource_group_path(resource_group)?,
        PROVIDER_NAMESPACE,
        path::segment("resourceName", resource_name)?
    ))
}

/// Check whether `name` is free in `location`.
#[tracing::instrument(name = "arm::signalr::check_name_availability", skip(client))]
pub async fn check_name_availability(
    client: &ArmClient,
    location: &str,
    name: &str,
) -> ArmResult<CheckNameAvailabilityResponse> {
    let path = format!(
        "{}/providers/{}/locations/{}/checkNameAvailability?{}",
        client.subscription_path()?,
        PROVIDER_NAMESPACE,
        path::segment("location", location)?,
        api_version(client)
    );
    let response = client
        .post(&path, &CheckNameAvailabilityRequest::new(name, RESOURCE_TYPE))
        .await?;
    let result = read_json::<CheckNameAvailabilityResponse>(response).await?;

    tracing::debug!(available = ?result.name_available, "checked name");
    Ok(result)
}

/// Create or replace a SignalR resource.
///
/// # Tracing
///
/// Emits a span named `arm::signalr::create_or_update` with fields
/// `resource_group` and `resource_name`.
#[tracing::instrument(
    name = "arm::signalr::create_or_update",
    skip(client, parameters),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn begin_create_or_update(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
    parameters: &ResourceInfo,
) -> ArmResult<Poller<ResourceInfo>> {
    tracing::debug!(sku = ?parameters.sku.as_ref().map(|s| s.name.as_str()), "creating signalr");

    let path = format!(
        "{}?{}",
        signalr_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.put(&path, parameters).await?;
    Poller::from_response(client, LroMethod::Put, response, None).await
}

/// Update a SignalR resource. Only the fields set in `parameters` change.
#[tracing::instrument(
    name = "arm::signalr::update",
    skip(client, parameters),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn begin_update(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
    parameters: &ResourceInfo,
) -> ArmResult<Poller<ResourceInfo>> {
    tracing::debug!("updating signalr");

    let path = format!(
        "{}?{}",
        signalr_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.patch(&path, parameters).await?;
    Poller::from_response(client, LroMethod::Patch, response, None).await
}

#[tracing::instrument(
    name = "arm::signalr::get",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn get(client: &ArmClient, resource_group: &str, resource_name: &str) -> ArmResult<ResourceInfo> {
    let path = format!(
        "{}?{}",
        signalr_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.get(&path).await?;
    let resource = read_json::<ResourceInfo>(response).await?;

    tracing::debug!(provisioning_state = ?resource.provisioning_state(), "got signalr");
    Ok(resource)
}

#[tracing::instrument(
    name = "arm::signalr::delete",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn begin_delete(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
) -> ArmResult<Poller<()>> {
    tracing::debug!("deleting signalr");

    let path = format!(
        "{}?{}",
        signalr_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.delete(&path).await?;
    Poller::from_response(client, LroMethod::Delete, response, None).await
}

#[tracing::instrument(name = "arm::signalr::list_by_subscription", skip(client))]
pub fn list_by_subscription(client: &ArmClient) -> ArmResult<Pager<PagedList<ResourceInfo>>> {
    let path = format!(
        "{}/providers/{}/signalR?{}",
        client.subscription_path()?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

#[tracing::instrument(
    name = "arm::signalr::list_by_resource_group",
    skip(client),
    fields(resource_group = %resource_group)
)]
pub fn list_by_resource_group(
    client: &ArmClient,
    resource_group: &str,
) -> ArmResult<Pager<PagedList<ResourceInfo>>> {
    let path = format!(
        "{}/providers/{}/signalR?{}",
        client.resource_group_path(resource_group)?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

/// Get the access keys and connection strings.
#[tracing::instrument(
    name = "arm::signalr::list_keys",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn list_keys(client: &ArmClient, resource_group: &str, resource_name: &str) -> ArmResult<Keys> {
    let path = format!(
        "{}/listKeys?{}",
        signalr_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.post_empty(&path).await?;
    read_json::<Keys>(response).await
}

/// Regenerate a key. Existing connections signed with the old key are dropped.
#[tracing::instrument(
    name = "arm::signalr::regenerate_key",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn begin_regenerate_key(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
    key_type: KeyType,
) -> ArmResult<Poller<Keys>> {
    tracing::debug!("regenerating key");

    let path = format!(
        "{}/regenerateKey?{}",
        signalr_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.post(&path, &RegenerateKeyParameters { key_type }).await?;
    Poller::from_response(client, LroMethod::Post, response, Some(FinalStateVia::Location)).await
}

#[tracing::instrument(
    name = "arm::signalr::restart",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn begin_restart(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
) -> ArmResult<Poller<()>> {
    tracing::debug!("restarting signalr");

    let path = format!(
        "{}/restart?{}",
        signalr_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.post_empty(&path).await?;
    Poller::from_response(client, LroMethod::Post, response, None).await
}

/// List the SKUs the resource can scale to.
#[tracing::instrument(
    name = "arm::signalr::list_skus",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn list_skus(client: &ArmClient, resource_group: &str, resource_name: &str) -> ArmResult<SkuList> {
    let path = format!(
        "{}/skus?{}",
        signalr_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.get(&path).await?;
    read_json::<SkuList>(response).await
}
