//! Mongo cluster lifecycle operations.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::models::{CheckNameAvailabilityRequest, CheckNameAvailabilityResponse};
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;
use azure_mgmt_core::poller::{FinalStateVia, LroMethod, Poller};

use crate::models::{
    api_version, ListConnectionStringsResult, MongoCluster, MongoClusterUpdate, PROVIDER_NAMESPACE,
    RESOURCE_TYPE,
};

pub(crate) fn cluster_path(client: &ArmClient, resource_group: &str, cluster_name: &str) -> ArmResult<String> {
    Ok(format!(
        "{}/providers/{}/mongoClusters/{}",
        client.resource_group_path(resource_group)?,
        PROVIDER_NAMESPACE,
        path::segment("mongoClusterName", cluster_name)?
    ))
}

/// Check whether a cluster name is free in `location`.
#[tracing::instrument(name = "arm::mongocluster::check_name_availability", skip(client))]
pub async fn check_name_availability(
    client: &ArmClient,
    location: &str,
    name: &str,
) -> ArmResult<CheckNameAvailabilityResponse> {
    let path = format!(
        "{}/providers/{}/locations/{}/checkMongoClusterNameAvailability?{}",
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

/// Create or replace a cluster. Also used to restore or replicate one via
/// `create_mode`.
///
/// # Tracing
///
/// Emits a span named `arm::mongocluster::create_or_update` with fields
/// `resource_group` and `cluster`.
#[tracing::instrument(
    name = "arm::mongocluster::create_or_update",
    skip(client, resource),
    fields(resource_group = %resource_group, cluster = %cluster_name)
)]
pub async fn begin_create_or_update(
    client: &ArmClient,
    resource_group: &str,
    cluster_name: &str,
    resource: &MongoCluster,
) -> ArmResult<Poller<MongoCluster>> {
    tracing::debug!(
        create_mode = ?resource.properties.as_ref().and_then(|p| p.create_mode),
        "creating mongo cluster"
    );

    let path = format!(
        "{}?{}",
        cluster_path(client, resource_group, cluster_name)?,
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
    name = "arm::mongocluster::update",
    skip(client, properties),
    fields(resource_group = %resource_group, cluster = %cluster_name)
)]
pub async fn begin_update(
    client: &ArmClient,
    resource_group: &str,
    cluster_name: &str,
    properties: &MongoClusterUpdate,
) -> ArmResult<Poller<MongoCluster>> {
    tracing::debug!("updating mongo cluster");

    let path = format!(
        "{}?{}",
        cluster_path(client, resource_group, cluster_name)?,
        api_version(client)
    );
    let response = client.patch(&path, properties).await?;
    Poller::from_response(client, LroMethod::Patch, response, Some(FinalStateVia::Location)).await
}

#[tracing::instrument(
    name = "arm::mongocluster::get",
    skip(client),
    fields(resource_group = %resource_group, cluster = %cluster_name)
)]
pub async fn get(client: &ArmClient, resource_group: &str, cluster_name: &str) -> ArmResult<MongoCluster> {
    let path = format!(
        "{}?{}",
        cluster_path(client, resource_group, cluster_name)?,
        api_version(client)
    );
    let response = client.get(&path).await?;
    let cluster = read_json::<MongoCluster>(response).await?;

    tracing::debug!(provisioning_state = ?cluster.provisioning_state(), "got mongo cluster");
    Ok(cluster)
}

#[tracing::instrument(
    name = "arm::mongocluster::delete",
    skip(client),
    fields(resource_group = %resource_group, cluster = %cluster_name)
)]
pub async fn begin_delete(client: &ArmClient, resource_group: &str, cluster_name: &str) -> ArmResult<Poller<()>> {
    tracing::debug!("deleting mongo cluster");

    let path = format!(
        "{}?{}",
        cluster_path(client, resource_group, cluster_name)?,
        api_version(client)
    );
    let response = client.delete(&path).await?;
    Poller::from_response(client, LroMethod::Delete, response, Some(FinalStateVia::Location)).await
}

/// List the clusters in the subscription.
#[tracing::instrument(name = "arm::mongocluster::list", skip(client))]
pub fn list(client: &ArmClient) -> ArmResult<Pager<PagedList<MongoCluster>>> {
    let path = format!(
        "{}/providers/{}/mongoClusters?{}",
        client.subscription_path()?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

#[tracing::instrument(
    name = "arm::mongocluster::list_by_resource_group",
    skip(client),
    fields(resource_group = %resource_group)
)]
pub fn list_by_resource_group(
    client: &ArmClient,
    resource_group: &str,
) -> ArmResult<Pager<PagedList<MongoCluster>>> {
    let path = format!(
        "{}/providers/{}/mongoClusters?{}",
        client.resource_group_path(resource_group)?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

/// List the connection strings of a cluster.
#[tracing::instrument(
    name = "arm::mongocluster::list_connection_strings",
    skip(client),
    fields(resource_group = %resource_group, cluster = %cluster_name)
)]
pub async fn list_connection_strings(
    client: &ArmClient,
    resource_group: &str,
    cluster_name: &str,
) -> ArmResult<ListConnectionStringsResult> {
    let path = format!(
        "{}/listConnectionStrings?{}",
        cluster_path(client, resource_group, cluster_name)?,
        api_version(client)
    );
    let response = client.post_empty(&path).await?;
    read_json::<ListConnectionStringsResult>(response).await
}
