//! Operations offered by `Microsoft.SignalRService`.

use azure_mgmt_core::client::ArmClient;
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::operations::Operation;
use azure_mgmt_core::pager::{PagedList, Pager};

use crate::models::{API_VERSION, PROVIDER_NAMESPACE};

pub fn list(client: &ArmClient) -> ArmResult<Pager<PagedList<Operation>>> {
    azure_mgmt_core::operations::list(client, PROVIDER_NAMESPACE, API_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use azure_mgmt_core::test_support::setup_mock_client;
    use wiremock::matchers::{method, path as url_path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn lists_provider_operations() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/providers/Microsoft.SignalRService/operations"))
            .and(query_param("api-version", API_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{
                    "name": "Microsoft.SignalRService/SignalR/read",
                    "isDataAction": false,
                    "display": {"provider": "Microsoft SignalR Service", "resource": "SignalR", "operation": "Read"}
                }]
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let ops = list(&client).unwrap().collect_all().await.unwrap();
        assert_eq!(ops[0].name.as_deref(), Some("Microsoft.SignalRService/SignalR/read"));
        assert_eq!(ops[0].is_data_action, Some(false));
    }
}
