//! Redis cache lifecycle operations.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::models::CheckNameAvailabilityRequest;
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;
use azure_mgmt_core::poller::{LroMethod, Poller};

use crate::models::{
    api_version, RedisAccessKeys, RedisCreateParameters, RedisForceRebootResponse, RedisKeyType,
    RedisRebootParameters, RedisRegenerateKeyParameters, RedisResource, RedisUpdateParameters,
    PROVIDER_NAMESPACE, RESOURCE_TYPE,
};

pub(crate) fn cache_path(client: &ArmClient, resource_group: &str, name: &str) -> ArmResult<String> {
    Ok(format!(
        "{}/providers/{}/redis/{}",
        client.resource_group_path(resource_group)?,
        PROVIDER_NAMESPACE,
        path::segment("name", name)?
    ))
}

/// Check whether a cache name is available.
///
/// The service answers `200` with no body when the name is free and an
/// error otherwise, so an unavailable name surfaces as `Err`.
#[tracing::instrument(name = "arm::redis::check_name_availability", skip(client))]
pub async fn check_name_availability(client: &ArmClient, name: &str) -> ArmResult<()> {
    let path = format!(
        "{}/providers/{}/CheckNameAvailability?{}",
        client.subscription_path()?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    client
        .post(&path, &CheckNameAvailabilityRequest::new(name, RESOURCE_TYPE))
        .await?;

    tracing::debug!("name is available");
    Ok(())
}

/// Create a cache. Provisioning takes several minutes.
///
/// # Tracing
///
/// Emits a span named `arm::redis::create` with fields `resource_group` and `name`.
#[tracing::instrument(
    name = "arm::redis::create",
    skip(client, parameters),
    fields(resource_group = %resource_group, name = %name)
)]
pub async fn begin_create(
    client: &ArmClient,
    resource_group: &str,
    name: &str,
    parameters: &RedisCreateParameters,
) -> ArmResult<Poller<RedisResource>> {
    tracing::debug!(sku = ?parameters.properties.sku.name, "creating cache");

    let path = format!("{}?{}", cache_path(client, resource_group, name)?, api_version(client));
    let response = client.put(&path, parameters).await?;
    Poller::from_response(client, LroMethod::Put, response, None).await
}

/// Update a cache.
#[tracing::instrument(
    name = "arm::redis::update",
    skip(client, parameters),
    fields(resource_group = %resource_group, name = %name)
)]
pub async fn begin_update(
    client: &ArmClient,
    resource_group: &str,
    name: &str,
    parameters: &RedisUpdateParameters,
) -> ArmResult<Poller<RedisResource>> {
    tracing::debug!("updating cache");

    let path = format!("{}?{}", cache_path(client, resource_group, name)?, api_version(client));
    let response = client.patch(&path, parameters).await?;
    Poller::from_response(client, LroMethod::Patch, response, None).await
}

/// Get a cache.
#[tracing::instrument(
    name = "arm::redis::get",
    skip(client),
    fields(resource_group = %resource_group, name = %name)
)]
pub async fn get(client: &ArmClient, resource_group: &str, name: &str) -> ArmResult<RedisResource> {
    let path = format!("{}?{}", cache_path(client, resource_group, name)?, api_version(client));
    let response = client.get(&path).await?;
    let cache = read_json::<RedisResource>(response).await?;

    tracing::debug!(provisioning_state = ?cache.provisioning_state(), "got cache");
    Ok(cache)
}

/// Delete a cache.
#[tracing::instrument(
    name = "arm::redis::delete",
    skip(client),
    fields(resource_group = %resource_group, name = %name)
)]
pub async fn begin_delete(client: &ArmClient, resource_group: &str, name: &str) -> ArmResult<Poller<()>> {
    tracing::debug!("deleting cache");

    let path = format!("{}?{}", cache_path(client, resource_group, name)?, api_version(client));
    let response = client.delete(&path).await?;
    Poller::from_response(client, LroMethod::Delete, response, None).await
}

/// List the caches in a resource group.
#[tracing::instrument(
    name = "arm::redis::list_by_resource_group",
    skip(client),
    fields(resource_group = %resource_group)
)]
pub fn list_by_resource_group(
    client: &ArmClient,
    resource_group: &str,
) -> ArmResult<Pager<PagedList<RedisResource>>> {
    let path = format!(
        "{}/providers/{}/redis?{}",
        client.resource_group_path(resource_group)?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

/// List the caches in the subscription.
#[tracing::instrument(name = "arm::redis::list_by_subscription", skip(client))]
pub fn list_by_subscription(client: &ArmClient) -> ArmResult<Pager<PagedList<RedisResource>>> {
    let path = format!(
        "{}/providers/{}/redis?{}",
        client.subscription_path()?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

/// Retrieve the access keys of a cache.
#[tracing::instrument(
    name = "arm::redis::list_keys",
    skip(client),
    fields(resource_group = %resource_group, name = %name)
)]
pub async fn list_keys(client: &ArmClient, resource_group: &str, name: &str) -> ArmResult<RedisAccessKeys> {
    let path = format!(
        "{}/listKeys?{}",
        cache_path(client, resource_group, name)?,
        api_version(client)
    );
    let response = client.post_empty(&path).await?;
    read_json::<RedisAccessKeys>(response).await
}

/// Regenerate one access key and return both keys.
#[tracing::instrument(
    name = "arm::redis::regenerate_key",
    skip(client),
    fields(resource_group = %resource_group, name = %name)
)]
pub async fn regenerate_key(
    client: &ArmClient,
    resource_group: &str,
    name: &str,
    key_type: RedisKeyType,
) -> ArmResult<RedisAccessKeys> {
    tracing::debug!("regenerating key");

    let path = format!(
        "{}/regenerateKey?{}",
        cache_path(client, resource_group, name)?,
        api_version(client)
    );
    let response = client
        .post(&path, &RedisRegenerateKeyParameters { key_type })
        .await?;
    read_json::<RedisAccessKeys>(response).await
}

/// Reboot cache nodes. Data may be lost.
#[tracing::instrument(
    name = "arm::redis::force_reboot",
    skip(client, parameters),
    fields(resource_group = %resource_group, name = %name)
)]
pub async fn force_reboot(
    client: &ArmClient,
    resource_group: &str,
    name: &str,
    parameters: &RedisRebootParameters,
) -> ArmResult<RedisForceRebootResponse> {
    tracing::debug!(reboot_type = ?parameters.reboot_type, "rebooting cache");

    let path = format!(
        "{}/forceReboot?{}",
        cache_path(client, resource_group, name)?,
        api_version(client)
    );
    let response = client.post(&path, parameters).await?;
    read_json::<RedisForceRebootResponse>(response).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RebootType, Sku, SkuFamily, SkuName, API_VERSION};
    use azure_mgmt_core::error::ArmError;
    use azure_mgmt_core::test_support::{rg_path, setup_mock_client, sub_path, TEST_RESOURCE_GROUP};
    use std::time::Duration;
    use wiremock::matchers::{body_json, body_partial_json, method, path as url_path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CACHE: &str = "cache1";

    fn cache_url() -> String {
        rg_path(&format!("/providers/Microsoft.Cache/redis/{CACHE}"))
    }

    fn cache_json(state: &str) -> serde_json::Value {
        serde_json::json!({
            "id": cache_url(),
            "name": CACHE,
            "type": "Microsoft.Cache/Redis",
            "location": "West US",
            "properties": {
                "provisioningState": state,
                "hostName": "cache1.redis.cache.windows.net",
                "port": 6379,
                "sslPort": 6380,
                "redisVersion": "6.0",
                "sku": {"name": "Basic", "family": "C", "capacity": 0},
                "instances": [{"sslPort": 15000, "nonSslPort": 13000, "isPrimary": true}]
            }
        })
    }

    #[tokio::test]
    async fn check_name_availability_posts_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(url_path(sub_path("/providers/Microsoft.Cache/CheckNameAvailability")))
            .and(query_param("api-version", API_VERSION))
            .and(body_json(serde_json::json!({"name": CACHE, "type": "Microsoft.Cache/redis"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        check_name_availability(&client, CACHE).await.unwrap();
    }

    #[tokio::test]
    async fn taken_name_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(url_path(sub_path("/providers/Microsoft.Cache/CheckNameAvailability")))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "error": {"code": "NameNotAvailable", "message": "The name is already in use"}
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        match check_name_availability(&client, CACHE).await.unwrap_err() {
            ArmError::Api { code, .. } => assert_eq!(code, "NameNotAvailable"),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_polls_provisioning_state() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(url_path(cache_url()))
            .and(body_partial_json(serde_json::json!({
                "location": "westus",
                "properties": {"sku": {"name": "Basic", "family": "C", "capacity": 0}}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(cache_json("Creating")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path(cache_url()))
            .respond_with(ResponseTemplate::new(200).set_body_json(cache_json("Succeeded")))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let params = RedisCreateParameters::new("westus", Sku::new(SkuName::Basic, SkuFamily::C, 0));
        let cache = begin_create(&client, TEST_RESOURCE_GROUP, CACHE, &params)
            .await
            .unwrap()
            .with_frequency(Duration::from_millis(1))
            .poll_until_done()
            .await
            .unwrap();

        assert_eq!(cache.provisioning_state(), Some("Succeeded"));
        assert_eq!(cache.host_name(), Some("cache1.redis.cache.windows.net"));
        assert_eq!(cache.properties.unwrap().instances.len(), 1);
    }

    #[tokio::test]
    async fn update_sends_patch() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(url_path(cache_url()))
            .and(body_json(serde_json::json!({"properties": {"enableNonSslPort": true}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(cache_json("Succeeded")))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let params = RedisUpdateParameters {
            properties: Some(crate::models::RedisUpdateProperties {
                enable_non_ssl_port: Some(true),
                ..Default::default()
            }),
            ..Default::default()
        };
        let poller = begin_update(&client, TEST_RESOURCE_GROUP, CACHE, &params).await.unwrap();
        assert!(poller.is_done());
        assert_eq!(poller.result().await.unwrap().name.as_deref(), Some(CACHE));
    }

    #[tokio::test]
    async fn get_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path(cache_url()))
            .respond_with(ResponseTemplate::new(200).set_body_json(cache_json("Succeeded")))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(url_path(cache_url()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let cache = get(&client, TEST_RESOURCE_GROUP, CACHE).await.unwrap();
        assert_eq!(cache.location.as_deref(), Some("West US"));

        begin_delete(&client, TEST_RESOURCE_GROUP, CACHE)
            .await
            .unwrap()
            .poll_until_done()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn list_scopes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path(rg_path("/providers/Microsoft.Cache/redis")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": [cache_json("Succeeded")]})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path(sub_path("/providers/Microsoft.Cache/redis")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [cache_json("Succeeded"), cache_json("Updating")]
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let in_group = list_by_resource_group(&client, TEST_RESOURCE_GROUP)
            .unwrap()
            .collect_all()
            .await
            .unwrap();
        let in_sub = list_by_subscription(&client).unwrap().collect_all().await.unwrap();
        assert_eq!(in_group.len(), 1);
        assert_eq!(in_sub.len(), 2);
    }

    #[tokio::test]
    async fn key_management() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(url_path(format!("{}/listKeys", cache_url())))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "primaryKey": "p1", "secondaryKey": "s1"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(url_path(format!("{}/regenerateKey", cache_url())))
            .and(body_json(serde_json::json!({"keyType": "Secondary"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "primaryKey": "p1", "secondaryKey": "s2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let keys = list_keys(&client, TEST_RESOURCE_GROUP, CACHE).await.unwrap();
        assert_eq!(keys.secondary_key.as_deref(), Some("s1"));

        let keys = regenerate_key(&client, TEST_RESOURCE_GROUP, CACHE, RedisKeyType::Secondary)
            .await
            .unwrap();
        assert_eq!(keys.secondary_key.as_deref(), Some("s2"));
    }

    #[tokio::test]
    async fn force_reboot_sends_reboot_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(url_path(format!("{}/forceReboot", cache_url())))
            .and(body_json(serde_json::json!({"rebootType": "AllNodes", "shardId": 0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Reboot operation triggered."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let mut params = RedisRebootParameters::new(RebootType::AllNodes);
        params.shard_id = Some(0);
        let result = force_reboot(&client, TEST_RESOURCE_GROUP, CACHE, &params).await.unwrap();
        assert_eq!(result.message.as_deref(), Some("Reboot operation triggered."));
    }

    #[tokio::test]
    async fn empty_cache_name_is_rejected() {
        let server = MockServer::start().await;
        let client = setup_mock_client(&server).await;
        let err = list_keys(&client, TEST_RESOURCE_GROUP, "").await.unwrap_err();
        assert!(err.to_string().contains("parameter name cannot be empty"));
    }
}
