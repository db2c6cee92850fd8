//! Per-location quota usage.

use azure_mgmt_core::client::ArmClient;
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;

use crate::models::{api_version, SignalRUsage, PROVIDER_NAMESPACE};

/// List resource usage and quota for `location`.
#[tracing::instrument(name = "arm::signalr::usages::list", skip(client))]
pub fn list(client: &ArmClient, location: &str) -> ArmResult<Pager<PagedList<SignalRUsage>>> {
    let path = format!(
        "{}/providers/{}/locations/{}/usages?{}",
        client.subscription_path()?,
        PROVIDER_NAMESPACE,
        path::segment("location", location)?,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use azure_mgmt_core::test_support::{setup_mock_client, sub_path};
    use wiremock::matchers::{method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn list_usages_for_location() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path(sub_path("/providers/Microsoft.SignalRService/locations/westus/usages")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{
                    "id": "/subscriptions/s/providers/Microsoft.SignalRService/locations/westus/usages/FreeTierInstances",
                    "currentValue": 0,
                    "limit": 1,
                    "name": {"value": "FreeTierInstances", "localizedValue": "Free Tier Instances"},
                    "unit": "Count"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let usages = list(&client, "westus").unwrap().collect_all().await.unwrap();
        assert_eq!(usages.len(), 1);
        assert_eq!(usages[0].limit, Some(1));
        assert_eq!(
            usages[0].name.as_ref().and_then(|n| n.value.as_deref()),
            Some("FreeTierInstances")
        );
    }
}
