//! Data Lake Store account operations.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::models::{CheckNameAvailabilityRequest, CheckNameAvailabilityResponse};
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;
use azure_mgmt_core::poller::{LroMethod, Poller};

use crate::models::{
    api_version, AccountListOptions, CreateDataLakeStoreAccountParameters, DataLakeStoreAccount,
    DataLakeStoreAccountBasic, UpdateDataLakeStoreAccountParameters, PROVIDER_NAMESPACE, RESOURCE_TYPE,
};

pub(crate) fn account_path(client: &ArmClient, resource_group: &str, account_name: &str) -> ArmResult<String> {
    Ok(format!(
        "{}/providers/{}/accounts/{}",
        client.resource_group_path(resource_group)?,
        PROVIDER_NAMESPACE,
        path::segment("accountName", account_name)?
    ))
}

fn apply_list_options(path: &mut String, options: Option<&AccountListOptions>) {
    if let Some(options) = options {
        path::append_optional(path, "$filter", options.filter.as_deref());
        path::append_optional(path, "$top", options.top);
        path::append_optional(path, "$skip", options.skip);
        path::append_optional(path, "$select", options.select.as_deref());
        path::append_optional(path, "$orderby", options.orderby.as_deref());
        path::append_optional(path, "$count", options.count);
    }
}

/// Create an account.
///
/// # Tracing
///
/// Emits a span named `arm::datalakestore::accounts::create` with fields
/// `resource_group` and `account`.
#[tracing::instrument(
    name = "arm::datalakestore::accounts::create",
    skip(client, parameters),
    fields(resource_group = %resource_group, account = %account_name)
)]
pub async fn begin_create(
    client: &ArmClient,
    resource_group: &str,
    account_name: &str,
    parameters: &CreateDataLakeStoreAccountParameters,
) -> ArmResult<Poller<DataLakeStoreAccount>> {
    tracing::debug!(location = %parameters.location, "creating account");

    let path = format!("{}?{}", account_path(client, resource_group, account_name)?, api_version(client));
    let response = client.put(&path, parameters).await?;
    Poller::from_response(client, LroMethod::Put, response, None).await
}

#[tracing::instrument(
    name = "arm::datalakestore::accounts::update",
    skip(client, parameters),
    fields(resource_group = %resource_group, account = %account_name)
)]
pub async fn begin_update(
    client: &ArmClient,
    resource_group: &str,
    account_name: &str,
    parameters: &UpdateDataLakeStoreAccountParameters,
) -> ArmResult<Poller<DataLakeStoreAccount>> {
    tracing::debug!("updating account");

    let path = format!("{}?{}", account_path(client, resource_group, account_name)?, api_version(client));
    let response = client.patch(&path, parameters).await?;
    Poller::from_response(client, LroMethod::Patch, response, None).await
}

#[tracing::instrument(
    name = "arm::datalakestore::accounts::delete",
    skip(client),
    fields(resource_group = %resource_group, account = %account_name)
)]
pub async fn begin_delete(client: &ArmClient, resource_group: &str, account_name: &str) -> ArmResult<Poller<()>> {
    tracing::debug!("deleting account");

    let path = format!("{}?{}", account_path(client, resource_group, account_name)?, api_version(client));
    let response = client.delete(&path).await?;
    Poller::from_response(client, LroMethod::Delete, response, None).await
}

#[tracing::instrument(
    name = "arm::datalakestore::accounts::get",
    skip(client),
    fields(resource_group = %resource_group, account = %account_name)
)]
pub async fn get(client: &ArmClient, resource_group: &str, account_name: &str) -> ArmResult<DataLakeStoreAccount> {
    let path = format!("{}?{}", account_path(client, resource_group, account_name)?, api_version(client));
    let response = client.get(&path).await?;
    read_json::<DataLakeStoreAccount>(response).await
}

/// List the accounts in the subscription.
#[tracing::instrument(name = "arm::datalakestore::accounts::list", skip(client, options))]
pub fn list(
    client: &ArmClient,
    options: Option<&AccountListOptions>,
) -> ArmResult<Pager<PagedList<DataLakeStoreAccountBasic>>> {
    let mut path = format!(
        "{}/providers/{}/accounts?{}",
        client.subscription_path()?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    apply_list_options(&mut path, options);
    Ok(Pager::new(client, path))
}

#[tracing::instrument(
    name = "arm::datalakestore::accounts::list_by_resource_group",
    skip(client, options),
    fields(resource_group = %resource_group)
)]
pub fn list_by_resource_group(
    client: &ArmClient,
    resource_group: &str,
    options: Option<&AccountListOptions>,
) -> ArmResult<Pager<PagedList<DataLakeStoreAccountBasic>>> {
    let mut path = format!(
        "{}/providers/{}/accounts?{}",
        client.resource_group_path(resource_group)?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    apply_list_options(&mut path, options);
    Ok(Pager::new(client, path))
}

/// Check whether an account name is free in `location`.
#[tracing::instrument(name = "arm::datalakestore::accounts::check_name_availability", skip(client))]
pub async fn check_name_availability(
    client: &ArmClient,
    location: &str,
    account_name: &str,
) -> ArmResult<CheckNameAvailabilityResponse> {
    let path = format!(
        "{}/providers/{}/locations/{}/checkNameAvailability?{}",
        client.subscription_path()?,
        PROVIDER_NAMESPACE,
        path::segment("location", location)?,
        api_version(client)
    );
    let response = client
        .post(&path, &CheckNameAvailabilityRequest::new(account_name, RESOURCE_TYPE))
        .await?;
    read_json::<CheckNameAvailabilityResponse>(response).await
}

/// Retry enabling the Key Vault for a user-managed encryption account.
#[tracing::instrument(
    name = "arm::datalakestore::accounts::enable_key_vault",
    skip(client),
    fields(resource_group = %resource_group, account = %account_name)
)]
pub async fn enable_key_vault(client: &ArmClient, resource_group: &str, account_name: &str) -> ArmResult<()> {
    let path = format!(
        "{}/enableKeyVault?{}",
        account_path(client, resource_group, account_name)?,
        api_version(client)
    );
    client.post_empty(&path).await?;

    tracing::debug!("key vault enabled");
    Ok(())
}
