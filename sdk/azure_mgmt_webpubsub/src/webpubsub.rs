//! Web PubSub service lifecycle operations.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::models::{CheckNameAvailabilityRequest, CheckNameAvailabilityResponse};
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;
use azure_mgmt_core::poller::{FinalStateVia, LroMethod, Poller};

use crate::models::{
    api_version, KeyType, RegenerateKeyParameters, SkuList, WebPubSubKeys, WebPubSubResource,
    PROVIDER_NAMESPACE, RESOURCE_TYPE,
};

pub(crate) fn service_path(client: &ArmClient, resource_group: &str, resource_name: &str) -> ArmResult<String> {
    Ok(format!(
        "{}/providers/{}/webPubSub/{}",
        client.resource_group_path(resource_group)?,
        PROVIDER_NAMESPACE,
        path::segment("resourceName", resource_name)?
    ))
}

/// Check whether `name` is free in `location`.
#[tracing::instrument(name = "arm::webpubsub::check_name_availability", skip(client))]
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
    read_json::<CheckNameAvailabilityResponse>(response).await
}

/// Create or replace a Web PubSub service.
///
/// # Tracing
///
/// Emits a span named `arm::webpubsub::create_or_update` with fields
/// `resource_group` and `resource_name`.
#[tracing::instrument(
    name = "arm::webpubsub::create_or_update",
    skip(client, parameters),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn begin_create_or_update(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
    parameters: &WebPubSubResource,
) -> ArmResult<Poller<WebPubSubResource>> {
    tracing::debug!("creating webpubsub");

    let path = format!(
        "{}?{}",
        service_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.put(&path, parameters).await?;
    Poller::from_response(client, LroMethod::Put, response, None).await
}

#[tracing::instrument(
    name = "arm::webpubsub::update",
    skip(client, parameters),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn begin_update(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
    parameters: &WebPubSubResource,
) -> ArmResult<Poller<WebPubSubResource>> {
    tracing::debug!("updating webpubsub");

    let path = format!(
        "{}?{}",
        service_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.patch(&path, parameters).await?;
    Poller::from_response(client, LroMethod::Patch, response, None).await
}

#[tracing::instrument(
    name = "arm::webpubsub::get",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn get(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
) -> ArmResult<WebPubSubResource> {
    let path = format!(
        "{}?{}",
        service_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.get(&path).await?;
    read_json::<WebPubSubResource>(response).await
}

#[tracing::instrument(
    name = "arm::webpubsub::delete",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn begin_delete(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
) -> ArmResult<Poller<()>> {
    tracing::debug!("deleting webpubsub");

    let path = format!(
        "{}?{}",
        service_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.delete(&path).await?;
    Poller::from_response(client, LroMethod::Delete, response, None).await
}

#[tracing::instrument(name = "arm::webpubsub::list_by_subscription", skip(client))]
pub fn list_by_subscription(client: &ArmClient) -> ArmResult<Pager<PagedList<WebPubSubResource>>> {
    let path = format!(
        "{}/providers/{}/webPubSub?{}",
        client.subscription_path()?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

#[tracing::instrument(
    name = "arm::webpubsub::list_by_resource_group",
    skip(client),
    fields(resource_group = %resource_group)
)]
pub fn list_by_resource_group(
    client: &ArmClient,
    resource_group: &str,
) -> ArmResult<Pager<PagedList<WebPubSubResource>>> {
    let path = format!(
        "{}/providers/{}/webPubSub?{}",
        client.resource_group_path(resource_group)?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

#[tracing::instrument(
    name = "arm::webpubsub::list_keys",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn list_keys(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
) -> ArmResult<WebPubSubKeys> {
    let path = format!(
        "{}/listKeys?{}",
        service_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.post_empty(&path).await?;
    read_json::<WebPubSubKeys>(response).await
}

#[tracing::instrument(
    name = "arm::webpubsub::regenerate_key",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn begin_regenerate_key(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
    key_type: KeyType,
) -> ArmResult<Poller<WebPubSubKeys>> {
    tracing::debug!(key_type = ?key_type, "regenerating key");

    let path = format!(
        "{}/regenerateKey?{}",
        service_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.post(&path, &RegenerateKeyParameters { key_type }).await?;
    Poller::from_response(client, LroMethod::Post, response, Some(FinalStateVia::Location)).await
}

#[tracing::instrument(
    name = "arm::webpubsub::restart",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn begin_restart(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
) -> ArmResult<Poller<()>> {
    let path = format!(
        "{}/restart?{}",
        service_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.post_empty(&path).await?;
    Poller::from_response(client, LroMethod::Post, response, None).await
}

#[tracing::instrument(
    name = "arm::webpubsub::list_skus",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub async fn list_skus(client: &ArmClient, resource_group: &str, resource_name: &str) -> ArmResult<SkuList> {
    let path = format!(
        "{}/skus?{}",
        service_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    let response = client.get(&path).await?;
    read_json::<SkuList>(response).await
}
