//! Enterprise Connected Cache customer resources.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;
use azure_mgmt_core::poller::{FinalStateVia, LroMethod, Poller};

use crate::models::{api_version, ConnectedCachePatchResource, EnterpriseMccCustomerResource, PROVIDER_NAMESPACE};

pub(crate) fn customer_path(client: &ArmClient, resource_group: &str, customer_name: &str) -> ArmResult<String> {
    Ok(format!(
        "{}/providers/{}/enterpriseMccCustomers/{}",
        client.resource_group_path(resource_group)?,
        PROVIDER_NAMESPACE,
        path::segment("customerResourceName", customer_name)?
    ))
}

/// Create or replace a customer resource.
///
/// # Tracing
///
/// Emits a span named `arm::connectedcache::customers::create_or_update`
/// with fields `resource_group` and `customer`.
#[tracing::instrument(
    name = "arm::connectedcache::customers::create_or_update",
    skip(client, resource),
    fields(resource_group = %resource_group, customer = %customer_name)
)]
pub async fn begin_create_or_update(
    client: &ArmClient,
    resource_group: &str,
    customer_name: &str,
    resource: &EnterpriseMccCustomerResource,
) -> ArmResult<Poller<EnterpriseMccCustomerResource>> {
    tracing::debug!(location = %resource.location, "saving customer");

    let path = format!("{}?{}", customer_path(client, resource_group, customer_name)?, api_version(client));
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
    name = "arm::connectedcache::customers::get",
    skip(client),
    fields(resource_group = %resource_group, customer = %customer_name)
)]
pub async fn get(
    client: &ArmClient,
    resource_group: &str,
    customer_name: &str,
) -> ArmResult<EnterpriseMccCustomerResource> {
    let path = format!("{}?{}", customer_path(client, resource_group, customer_name)?, api_version(client));
    let response = client.get(&path).await?;
    read_json::<EnterpriseMccCustomerResource>(response).await
}

/// Replace the tags of a customer resource.
#[tracing::instrument(
    name = "arm::connectedcache::customers::update",
    skip(client, properties),
    fields(resource_group = %resource_group, customer = %customer_name)
)]
pub async fn update(
    client: &ArmClient,
    resource_group: &str,
    customer_name: &str,
    properties: &ConnectedCachePatchResource,
) -> ArmResult<EnterpriseMccCustomerResource> {
    let path = format!("{}?{}", customer_path(client, resource_group, customer_name)?, api_version(client));
    let response = client.patch(&path, properties).await?;
    read_json::<EnterpriseMccCustomerResource>(response).await
}

#[tracing::instrument(
    name = "arm::connectedcache::customers::delete",
    skip(client),
    fields(resource_group = %resource_group, customer = %customer_name)
)]
pub async fn delete(client: &ArmClient, resource_group: &str, customer_name: &str) -> ArmResult<()> {
    let path = format!("{}?{}", customer_path(client, resource_group, customer_name)?, api_version(client));
    client.delete(&path).await?;

    tracing::debug!("customer deleted");
    Ok(())
}

#[tracing::instrument(
    name = "arm::connectedcache::customers::list_by_resource_group",
    skip(client),
    fields(resource_group = %resource_group)
)]
pub fn list_by_resource_group(
    client: &ArmClient,
    resource_group: &str,
) -> ArmResult<Pager<PagedList<EnterpriseMccCustomerResource>>> {
    let path = format!(
        "{}/providers/{}/enterpriseMccCustomers?{}",
        client.resource_group_path(resource_group)?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

#[tracing::instrument(name = "arm::connectedcache::customers::list_by_subscription", skip(client))]
pub fn list_by_subscription(client: &ArmClient) -> ArmResult<Pager<PagedList<EnterpriseMccCustomerResource>>> {
    let path = format!(
        "{}/providers/{}/enterpriseMccCustomers?{}",
        client.subscription_path()?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomerEntity, CustomerProperty, API_VERSION};
    use azure_mgmt_core::error::ArmError;
    use azure_mgmt_core::test_support::{rg_path, setup_mock_client, sub_path, TEST_RESOURCE_GROUP};
    use std::time::Duration;
    use tracing_test::traced_test;
    use wiremock::matchers::{body_json, method, path as url_path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CUSTOMER: &str = "contoso";

    fn customer_url() -> String {
        rg_path(&format!("/providers/Microsoft.ConnectedCache/enterpriseMccCustomers/{CUSTOMER}"))
    }

    fn customer_json(state: &str) -> serde_json::Value {
        serde_json::json!({
            "id": customer_url(),
            "name": CUSTOMER,
            "type": "Microsoft.ConnectedCache/enterpriseMccCustomers",
            "location": "westus",
            "tags": {"env": "prod"},
            "properties": {
                "provisioningState": state,
                "customer": {"customerName": "Contoso", "customerId": "cust-1", "isEntitled": true}
            }
        })
    }

    #[tokio::test]
    #[traced_test]
    async fn create_polls_async_operation() {
        let server = MockServer::start().await;
        let op = format!("{}/operationStatuses/cust-op", server.uri());

        Mock::given(method("PUT"))
            .and(url_path(customer_url()))
            .and(query_param("api-version", API_VERSION))
            .and(body_json(serde_json::json!({
                "location": "westus",
                "properties": {"customer": {"customerName": "Contoso"}}
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("Azure-AsyncOperation", op.as_str())
                    .set_body_json(customer_json("Accepted")),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path("/operationStatuses/cust-op"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "Succeeded"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path(customer_url()))
            .respond_with(ResponseTemplate::new(200).set_body_json(customer_json("Succeeded")))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let resource = EnterpriseMccCustomerResource {
            properties: Some(CustomerProperty {
                customer: Some(CustomerEntity {
                    customer_name: Some("Contoso".into()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..EnterpriseMccCustomerResource::new("westus")
        };
        let created = begin_create_or_update(&client, TEST_RESOURCE_GROUP, CUSTOMER, &resource)
            .await
            .unwrap()
            .with_frequency(Duration::from_millis(1))
            .poll_until_done()
            .await
            .unwrap();

        assert_eq!(created.provisioning_state(), Some("Succeeded"));
        let customer = created.properties.unwrap().customer.unwrap();
        assert_eq!(customer.customer_id.as_deref(), Some("cust-1"));
        assert!(logs_contain("saving customer"));
    }

    #[tokio::test]
    async fn update_get_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(url_path(customer_url()))
            .and(body_json(serde_json::json!({"tags": {"env": "prod"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(customer_json("Succeeded")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path(customer_url()))
            .respond_with(ResponseTemplate::new(200).set_body_json(customer_json("Succeeded")))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(url_path(customer_url()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let patch = ConnectedCachePatchResource::default().with_tag("env", "prod");
        let updated = update(&client, TEST_RESOURCE_GROUP, CUSTOMER, &patch).await.unwrap();
        assert_eq!(updated.tags.unwrap().get("env").map(String::as_str), Some("prod"));

        let fetched = get(&client, TEST_RESOURCE_GROUP, CUSTOMER).await.unwrap();
        assert_eq!(fetched.name.as_deref(), Some(CUSTOMER));

        delete(&client, TEST_RESOURCE_GROUP, CUSTOMER).await.unwrap();
    }

    #[tokio::test]
    async fn list_scopes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path(sub_path("/providers/Microsoft.ConnectedCache/enterpriseMccCustomers")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [customer_json("Succeeded"), customer_json("Succeeded")]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path(rg_path("/providers/Microsoft.ConnectedCache/enterpriseMccCustomers")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [customer_json("Succeeded")]
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let all = list_by_subscription(&client).unwrap().collect_all().await.unwrap();
        assert_eq!(all.len(), 2);
        let in_group = list_by_resource_group(&client, TEST_RESOURCE_GROUP)
            .unwrap()
            .collect_all()
            .await
            .unwrap();
        assert_eq!(in_group.len(), 1);
    }

    #[tokio::test]
    async fn empty_customer_name_is_rejected() {
        let server = MockServer::start().await;
        let client = setup_mock_client(&server).await;

        let err = get(&client, TEST_RESOURCE_GROUP, "").await.unwrap_err();
        assert!(matches!(err, ArmError::InvalidParameter(_)));
    }
}
