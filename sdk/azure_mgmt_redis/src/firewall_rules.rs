//! Firewall rules of a Redis cache.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;

use crate::models::{api_version, FirewallRule};
use crate::redis::cache_path;

fn rule_path(client: &ArmClient, resource_group: &str, cache_name: &str, rule_name: &str) -> ArmResult<String> {
    Ok(format!(
        "{}/firewallRules/{}",
        cache_path(client, resource_group, cache_name)?,
        path::segment("ruleName", rule_name)?
    ))
}

/// Create or replace a firewall rule.
#[tracing::instrument(
    name = "arm::redis::firewall_rules::create_or_update",
    skip(client, parameters),
    fields(resource_group = %resource_group, cache = %cache_name, rule = %rule_name)
)]
pub async fn create_or_update(
    client: &ArmClient,
    resource_group: &str,
    cache_name: &str,
    rule_name: &str,
    parameters: &FirewallRule,
) -> ArmResult<FirewallRule> {
    tracing::debug!(
        start_ip = %parameters.properties.start_ip,
        end_ip = %parameters.properties.end_ip,
        "saving firewall rule"
    );

    let path = format!(
        "{}?{}",
        rule_path(client, resource_group, cache_name, rule_name)?,
        api_version(client)
    );
    let response = client.put(&path, parameters).await?;
    read_json::<FirewallRule>(response).await
}

/// Get a firewall rule.
#[tracing::instrument(
    name = "arm::redis::firewall_rules::get",
    skip(client),
    fields(resource_group = %resource_group, cache = %cache_name, rule = %rule_name)
)]
pub async fn get(
    client: &ArmClient,
    resource_group: &str,
    cache_name: &str,
    rule_name: &str,
) -> ArmResult<FirewallRule> {
    let path = format!(
        "{}?{}",
        rule_path(client, resource_group, cache_name, rule_name)?,
        api_version(client)
    );
    let response = client.get(&path).await?;
    read_json::<FirewallRule>(response).await
}

/// Delete a firewall rule.
#[tracing::instrument(
    name = "arm::redis::firewall_rules::delete",
    skip(client),
    fields(resource_group = %resource_group, cache = %cache_name, rule = %rule_name)
)]
pub async fn delete(
    client: &ArmClient,
    resource_group: &str,
    cache_name: &str,
    rule_name: &str,
) -> ArmResult<()> {
    let path = format!(
        "{}?{}",
        rule_path(client, resource_group, cache_name, rule_name)?,
        api_version(client)
    );
    client.delete(&path).await?;

    tracing::debug!("firewall rule deleted");
    Ok(())
}

/// List the firewall rules of a cache.
#[tracing::instrument(
    name = "arm::redis::firewall_rules::list",
    skip(client),
    fields(resource_group = %resource_group, cache = %cache_name)
)]
pub fn list(
    client: &ArmClient,
    resource_group: &str,
    cache_name: &str,
) -> ArmResult<Pager<PagedList<FirewallRule>>> {
    let path = format!(
        "{}/firewallRules?{}",
        cache_path(client, resource_group, cache_name)?,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}
