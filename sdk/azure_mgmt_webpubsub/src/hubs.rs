//! Hub settings of a Web PubSub service.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;
use azure_mgmt_core::poller::{LroMethod, Poller};

use crate::models::{api_version, Hub};
use crate::webpubsub::service_path;

fn hub_path(client: &ArmClient, resource_group: &str, resource_name: &str, hub_name: &str) -> ArmResult<String> {
    Ok(format!(
        "{}/hubs/{}",
        service_path(client, resource_group, resource_name)?,
        path::segment("hubName", hub_name)?
    ))
}

/// Create or replace a hub setting.
#[tracing::instrument(
    name = "arm::webpubsub::hubs::create_or_update",
    skip(client, parameters),
    fields(resource_group = %resource_group, resource_name = %resource_name, hub = %hub_name)
)]
pub async fn begin_create_or_update(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
    hub_name: &str,
    parameters: &Hub,
) -> ArmResult<Poller<Hub>> {
    tracing::debug!(
        event_handlers = parameters.properties.event_handlers.len(),
        event_listeners = parameters.properties.event_listeners.len(),
        "saving hub"
    );

    let path = format!(
        "{}?{}",
        hub_path(client, resource_group, resource_name, hub_name)?,
        api_version(client)
    );
    let response = client.put(&path, parameters).await?;
    Poller::from_response(client, LroMethod::Put, response, None).await
}

#[tracing::instrument(
    name = "arm::webpubsub::hubs::get",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name, hub = %hub_name)
)]
pub async fn get(client: &ArmClient, resource_group: &str, resource_name: &str, hub_name: &str) -> ArmResult<Hub> {
    let path = format!(
        "{}?{}",
        hub_path(client, resource_group, resource_name, hub_name)?,
        api_version(client)
    );
    let response = client.get(&path).await?;
    read_json::<Hub>(response).await
}

#[tracing::instrument(
    name = "arm::webpubsub::hubs::delete",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name, hub = %hub_name)
)]
pub async fn begin_delete(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
    hub_name: &str,
) -> ArmResult<Poller<()>> {
    let path = format!(
        "{}?{}",
        hub_path(client, resource_group, resource_name, hub_name)?,
        api_version(client)
    );
    let response = client.delete(&path).await?;
    Poller::from_response(client, LroMethod::Delete, response, None).await
}

/// List the hub settings of a service.
#[tracing::instrument(
    name = "arm::webpubsub::hubs::list",
    skip(client),
    fields(resource_group = %resource_group, resource_name = %resource_name)
)]
pub fn list(client: &ArmClient, resource_group: &str, resource_name: &str) -> ArmResult<Pager<PagedList<Hub>>> {
    let path = format!(
        "{}/hubs?{}",
        service_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}
