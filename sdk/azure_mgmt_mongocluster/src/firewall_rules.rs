//! Firewall rules of a mongo cluster.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;
use azure_mgmt_core::poller::{FinalStateVia, LroMethod, Poller};

use crate::models::{api_version, FirewallRule};
use crate::mongo_clusters::cluster_path;

fn rule_path(client: &ArmClient, resource_group: &str, cluster_name: &str, rule_name: &str) -> ArmResult<String> {
    Ok(format!(
        "{}/firewallRules/{}",
        cluster_path(client, resource_group, cluster_name)?,
        path::segment("firewallRuleName", rule_name)?
    ))
}

/// Create or replace a firewall rule.
#[tracing::instrument(
    name = "arm::mongocluster::firewall_rules::create_or_update",
    skip(client, resource),
    fields(resource_group = %resource_group, cluster = %cluster_name, rule = %rule_name)
)]
pub async fn begin_create_or_update(
    client: &ArmClient,
    resource_group: &str,
    cluster_name: &str,
    rule_name: &str,
    resource: &FirewallRule,
) -> ArmResult<Poller<FirewallRule>> {
    tracing::debug!(
        start_ip = %resource.properties.start_ip_address,
        end_ip = %resource.properties.end_ip_address,
        "saving firewall rule"
    );

    let path = format!(
        "{}?{}",
        rule_path(client, resource_group, cluster_name, rule_name)?,
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
    name = "arm::mongocluster::firewall_rules::get",
    skip(client),
    fields(resource_group = %resource_group, cluster = %cluster_name, rule = %rule_name)
)]
pub async fn get(
    client: &ArmClient,
    resource_group: &str,
    cluster_name: &str,
    rule_name: &str,
) -> ArmResult<FirewallRule> {
    let path = format!(
        "{}?{}",
        rule_path(client, resource_group, cluster_name, rule_name)?,
        api_version(client)
    );
    let response = client.get(&path).await?;
    read_json::<FirewallRule>(response).await
}

#[tracing::instrument(
    name = "arm::mongocluster::firewall_rules::delete",
    skip(client),
    fields(resource_group = %resource_group, cluster = %cluster_name, rule = %rule_name)
)]
pub async fn begin_delete(
    client: &ArmClient,
    resource_group: &str,
    cluster_name: &str,
    rule_name: &str,
) -> ArmResult<Poller<()>> {
    let path = format!(
        "{}?{}",
        rule_path(client, resource_group, cluster_name, rule_name)?,
        api_version(client)
    );
    let response = client.delete(&path).await?;
    Poller::from_response(client, LroMethod::Delete, response, Some(FinalStateVia::Location)).await
}

/// List the firewall rules of a cluster.
#[tracing::instrument(
    name = "arm::mongocluster::firewall_rules::list",
    skip(client),
    fields(resource_group = %resource_group, cluster = %cluster_name)
)]
pub fn list_by_mongo_cluster(
    client: &ArmClient,
    resource_group: &str,
    cluster_name: &str,
) -> ArmResult<Pager<PagedList<FirewallRule>>> {
    let path = format!(
        "{}/firewallRules?{}",
        cluster_path(client, resource_group, cluster_name)?,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}
