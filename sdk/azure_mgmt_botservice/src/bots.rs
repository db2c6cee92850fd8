//! Bot registration operations.
//!
//! Bot Service calls complete synchronously; none of these return a poller.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;

use crate::models::{api_version, Bot, CheckNameRequestBody, CheckNameResponseBody, PROVIDER_NAMESPACE, RESOURCE_TYPE};

pub(crate) fn bot_path(client: &ArmClient, resource_group: &str, resource_name: &str) -> ArmResult<String> {
    Ok(format!(
        "{}/providers/{}/botServices/{}",
        client.resource_group_path(resource_group)?,
        PROVIDER_NAMESPACE,
        path::segment("resourceName", resource_name)?
    ))
}

/// Register a bot.
///
/// # Tracing
///
/// Emits a span named `arm::botservice::bots::create` with fields
/// `resource_group` and `bot`.
#[tracing::instrument(
    name = "arm::botservice::bots::create",
    skip(client, parameters),
    fields(resource_group = %resource_group, bot = %resource_name)
)]
pub async fn create(client: &ArmClient, resource_group: &str, resource_name: &str, parameters: &Bot) -> ArmResult<Bot> {
    tracing::debug!(kind = ?parameters.kind, "creating bot");

    let path = format!("{}?{}", bot_path(client, resource_group, resource_name)?, api_version(client));
    let response = client.put(&path, parameters).await?;
    let bot = read_json::<Bot>(response).await?;

    tracing::debug!(provisioning_state = ?bot.provisioning_state(), "bot created");
    Ok(bot)
}

/// Patch a bot registration.
#[tracing::instrument(
    name = "arm::botservice::bots::update",
    skip(client, parameters),
    fields(resource_group = %resource_group, bot = %resource_name)
)]
pub async fn update(client: &ArmClient, resource_group: &str, resource_name: &str, parameters: &Bot) -> ArmResult<Bot> {
    let path = format!("{}?{}", bot_path(client, resource_group, resource_name)?, api_version(client));
    let response = client.patch(&path, parameters).await?;
    read_json::<Bot>(response).await
}

#[tracing::instrument(
    name = "arm::botservice::bots::get",
    skip(client),
    fields(resource_group = %resource_group, bot = %resource_name)
)]
pub async fn get(client: &ArmClient, resource_group: &str, resource_name: &str) -> ArmResult<Bot> {
    let path = format!("{}?{}", bot_path(client, resource_group, resource_name)?, api_version(client));
    let response = client.get(&path).await?;
    read_json::<Bot>(response).await
}

#[tracing::instrument(
    name = "arm::botservice::bots::delete",
    skip(client),
    fields(resource_group = %resource_group, bot = %resource_name)
)]
pub async fn delete(client: &ArmClient, resource_group: &str, resource_name: &str) -> ArmResult<()> {
    let path = format!("{}?{}", bot_path(client, resource_group, resource_name)?, api_version(client));
    client.delete(&path).await?;

    tracing::debug!("bot deleted");
    Ok(())
}

/// List the bots in the subscription.
#[tracing::instrument(name = "arm::botservice::bots::list", skip(client))]
pub fn list(client: &ArmClient) -> ArmResult<Pager<PagedList<Bot>>> {
    let path = format!(
        "{}/providers/{}/botServices?{}",
        client.subscription_path()?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

#[tracing::instrument(
    name = "arm::botservice::bots::list_by_resource_group",
    skip(client),
    fields(resource_group = %resource_group)
)]
pub fn list_by_resource_group(client: &ArmClient, resource_group: &str) -> ArmResult<Pager<PagedList<Bot>>> {
    let path = format!(
        "{}/providers/{}/botServices?{}",
        client.resource_group_path(resource_group)?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

/// Check whether a bot name is valid and unused. Bot names are global, so
/// this call needs no subscription.
#[tracing::instrument(name = "arm::botservice::bots::check_name_availability", skip(client))]
pub async fn check_name_availability(client: &ArmClient, name: &str) -> ArmResult<CheckNameResponseBody> {
    let path = format!(
        "/providers/{}/checkNameAvailability?{}",
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    let body = CheckNameRequestBody {
        name: name.to_owned(),
        resource_type: RESOURCE_TYPE.to_owned(),
    };
    let response = client.post(&path, &body).await?;
    read_json::<CheckNameResponseBody>(response).await
}
