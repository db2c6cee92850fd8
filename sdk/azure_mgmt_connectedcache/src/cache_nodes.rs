//! Cache nodes registered under an enterprise customer.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;
use azure_mgmt_core::poller::{FinalStateVia, LroMethod, Poller};

use crate::enterprise_mcc_customers::customer_path;
use crate::models::{api_version, EnterpriseMccCacheNodeResource, MccCacheNodeInstallDetails};

fn node_path(
    client: &ArmClient,
    resource_group: &str,
    customer_name: &str,
    cache_node_name: &str,
) -> ArmResult<String> {
    Ok(format!(
        "{}/enterpriseMccCacheNodes/{}",
        customer_path(client, resource_group, customer_name)?,
        path::segment("cacheNodeResourceName", cache_node_name)?
    ))
}

#[tracing::instrument(
    name = "arm::connectedcache::cache_nodes::create_or_update",
    skip(client, resource),
    fields(resource_group = %resource_group, customer = %customer_name, cache_node = %cache_node_name)
)]
pub async fn begin_create_or_update(
    client: &ArmClient,
    resource_group: &str,
    customer_name: &str,
    cache_node_name: &str,
    resource: &EnterpriseMccCacheNodeResource,
) -> ArmResult<Poller<EnterpriseMccCacheNodeResource>> {
    tracing::debug!("saving cache node");

    let path = format!(
        "{}?{}",
        node_path(client, resource_group, customer_name, cache_node_name)?,
        api_version(client)
    );
    let response = client.put(&path, resource).await?;
    Poller::from_response(
        client,
        LroMethod::Put,
        response,
        Some(FinalStateVia::AzureAsyncOperation),
    )
    .await
}

#[tracing::instrument(
    name = "arm::connectedcache::cache_nodes::get",
    skip(client),
    fields(resource_group = %resource_group, customer = %customer_name, cache_node = %cache_node_name)
)]
pub async fn get(
    client: &ArmClient,
    resource_group: &str,
    customer_name: &str,
    cache_node_name: &str,
) -> ArmResult<EnterpriseMccCacheNodeResource> {
    let path = format!(
        "{}?{}",
        node_path(client, resource_group, customer_name, cache_node_name)?,
        api_version(client)
    );
    let response = client.get(&path).await?;
    read_json::<EnterpriseMccCacheNodeResource>(response).await
}

#[tracing::instrument(
    name = "arm::connectedcache::cache_nodes::delete",
    skip(client),
    fields(resource_group = %resource_group, customer = %customer_name, cache_node = %cache_node_name)
)]
pub async fn delete(
    client: &ArmClient,
    resource_group: &str,
    customer_name: &str,
    cache_node_name: &str,
) -> ArmResult<()> {
    let path = format!(
        "{}?{}",
        node_path(client, resource_group, customer_name, cache_node_name)?,
        api_version(client)
    );
    client.delete(&path).await?;
    Ok(())
}

/// List the cache nodes of a customer.
#[tracing::instrument(
    name = "arm::connectedcache::cache_nodes::list",
    skip(client),
    fields(resource_group = %resource_group, customer = %customer_name)
)]
pub fn list_by_customer(
    client: &ArmClient,
    resource_group: &str,
    customer_name: &str,
) -> ArmResult<Pager<PagedList<EnterpriseMccCacheNodeResource>>> {
    let path = format!(
        "{}/enterpriseMccCacheNodes?{}",
        customer_path(client, resource_group, customer_name)?,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

/// Fetch the registration keys used by the node install script.
///
/// The returned keys are secrets; their `Debug` output is redacted.
#[tracing::instrument(
    name = "arm::connectedcache::cache_nodes::get_install_details",
    skip(client),
    fields(resource_group = %resource_group, customer = %customer_name, cache_node = %cache_node_name)
)]
pub async fn get_install_details(
    client: &ArmClient,
    resource_group: &str,
    customer_name: &str,
    cache_node_name: &str,
) -> ArmResult<MccCacheNodeInstallDetails> {
    let path = format!(
        "{}/getCacheNodeInstallDetails?{}",
        node_path(client, resource_group, customer_name, cache_node_name)?,
        api_version(client)
    );
    let response = client.post_empty(&path).await?;
    read_json::<MccCacheNodeInstallDetails>(response).await
}
