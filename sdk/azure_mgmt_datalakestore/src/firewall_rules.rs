//! Firewall rules of a Data Lake Store account.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;

use crate::accounts::account_path;
use crate::models::{api_version, CreateOrUpdateFirewallRuleParameters, FirewallRule, UpdateFirewallRuleParameters};

fn rule_path(client: &ArmClient, resource_group: &str, account_name: &str, rule_name: &str) -> ArmResult<String> {
    Ok(format!(
        "{}/firewallRules/{}?{}",
        account_path(client, resource_group, account_name)?,
        path::segment("firewallRuleName", rule_name)?,
        api_version(client)
    ))
}

/// Create or replace a firewall rule.
#[tracing::instrument(
    name = "arm::datalakestore::firewall_rules::create_or_update",
    skip(client, parameters),
    fields(resource_group = %resource_group, account = %account_name, rule = %rule_name)
)]
pub async fn create_or_update(
    client: &ArmClient,
    resource_group: &str,
    account_name: &str,
    rule_name: &str,
    parameters: &CreateOrUpdateFirewallRuleParameters,
) -> ArmResult<FirewallRule> {
    tracing::debug!(
        start_ip = %parameters.properties.start_ip_address,
        end_ip = %parameters.properties.end_ip_address,
        "saving firewall rule"
    );

    let path = rule_path(client, resource_group, account_name, rule_name)?;
    let response = client.put(&path, parameters).await?;
    read_json::<FirewallRule>(response).await
}

#[tracing::instrument(
    name = "arm::datalakestore::firewall_rules::get",
    skip(client),
    fields(resource_group = %resource_group, account = %account_name, rule = %rule_name)
)]
pub async fn get(
    client: &ArmClient,
    resource_group: &str,
    account_name: &str,
    rule_name: &str,
) -> ArmResult<FirewallRule> {
    let path = rule_path(client, resource_group, account_name, rule_name)?;
    let response = client.get(&path).await?;
    read_json::<FirewallRule>(response).await
}

/// Change one or both ends of a rule's range.
#[tracing::instrument(
    name = "arm::datalakestore::firewall_rules::update",
    skip(client, parameters),
    fields(resource_group = %resource_group, account = %account_name, rule = %rule_name)
)]
pub async fn update(
    client: &ArmClient,
    resource_group: &str,
    account_name: &str,
    rule_name: &str,
    parameters: &UpdateFirewallRuleParameters,
) -> ArmResult<FirewallRule> {
    let path = rule_path(client, resource_group, account_name, rule_name)?;
    let response = client.patch(&path, parameters).await?;
    read_json::<FirewallRule>(response).await
}

#[tracing::instrument(
    name = "arm::datalakestore::firewall_rules::delete",
    skip(client),
    fields(resource_group = %resource_group, account = %account_name, rule = %rule_name)
)]
pub async fn delete(client: &ArmClient, resource_group: &str, account_name: &str, rule_name: &str) -> ArmResult<()> {
    let path = rule_path(client, resource_group, account_name, rule_name)?;
    client.delete(&path).await?;
    Ok(())
}

#[tracing::instrument(
    name = "arm::datalakestore::firewall_rules::list_by_account",
    skip(client),
    fields(resource_group = %resource_group, account = %account_name)
)]
pub fn list_by_account(
    client: &ArmClient,
    resource_group: &str,
    account_name: &str,
) -> ArmResult<Pager<PagedList<FirewallRule>>> {
    let path = format!(
        "{}/firewallRules?{}",
        account_path(client, resource_group, account_name)?,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UpdateFirewallRuleProperties;
    use azure_mgmt_core::test_support::{rg_path, setup_mock_client, TEST_RESOURCE_GROUP};
    use wiremock::matchers::{body_json, method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ACCOUNT: &str = "adls1";

    fn rules_url() -> String {
        rg_path(&format!("/providers/Microsoft.DataLakeStore/accounts/{ACCOUNT}/firewallRules"))
    }

    fn rule_json(end: &str) -> serde_json::Value {
        serde_json::json!({
            "id": format!("{}/office", rules_url()),
            "name": "office",
            "type": "Microsoft.DataLakeStore/accounts/firewallRules",
            "properties": {"startIpAddress": "1.1.1.1", "endIpAddress": end}
        })
    }

    #[tokio::test]
    async fn create_get_and_update() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(url_path(format!("{}/office", rules_url())))
            .and(body_json(serde_json::json!({
                "properties": {"startIpAddress": "1.1.1.1", "endIpAddress": "2.2.2.2"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(rule_json("2.2.2.2")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path(format!("{}/office", rules_url())))
            .respond_with(ResponseTemplate::new(200).set_body_json(rule_json("2.2.2.2")))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(url_path(format!("{}/office", rules_url())))
            .and(body_json(serde_json::json!({"properties": {"endIpAddress": "3.3.3.3"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(rule_json("3.3.3.3")))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let rule = create_or_update(
            &client,
            TEST_RESOURCE_GROUP,
            ACCOUNT,
            "office",
            &CreateOrUpdateFirewallRuleParameters::new("1.1.1.1", "2.2.2.2"),
        )
        .await
        .unwrap();
        assert_eq!(rule.name.as_deref(), Some("office"));

        let fetched = get(&client, TEST_RESOURCE_GROUP, ACCOUNT, "office").await.unwrap();
        assert_eq!(fetched.properties.unwrap().end_ip_address, "2.2.2.2");

        let patch = UpdateFirewallRuleParameters {
            properties: Some(UpdateFirewallRuleProperties {
                end_ip_address: Some("3.3.3.3".into()),
                ..Default::default()
            }),
        };
        let updated = update(&client, TEST_RESOURCE_GROUP, ACCOUNT, "office", &patch).await.unwrap();
        assert_eq!(updated.properties.unwrap().end_ip_address, "3.3.3.3");
    }

    #[tokio::test]
    async fn list_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path(rules_url()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [rule_json("2.2.2.2")]
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(url_path(format!("{}/office", rules_url())))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let rules = list_by_account(&client, TEST_RESOURCE_GROUP, ACCOUNT)
            .unwrap()
            .collect_all()
            .await
            .unwrap();
        assert_eq!(rules.len(), 1);

        delete(&client, TEST_RESOURCE_GROUP, ACCOUNT, "office").await.unwrap();
    }
}
