//! The provider operation catalogue (`GET /providers/{namespace}/operations`).
//!
//! Every resource provider publishes the list of REST operations it
//! supports. Service crates expose this through their own `operations::list`
//! with the right namespace and API version.

use serde::Deserialize;

use crate::client::ArmClient;
use crate::error::ArmResult;
use crate::pager::{PagedList, Pager};
use crate::path;

/// Localized display information for an operation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OperationDisplay {
    pub provider: Option<String>,
    pub resource: Option<String>,
    pub operation: Option<String>,
    pub description: Option<String>,
}

/// A REST operation offered by a resource provider.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// e.g. `Microsoft.Cache/redis/read`.
    pub name: Option<String>,
    pub is_data_action: Option<bool>,
    pub display: Option<OperationDisplay>,
    /// `user`, `system` or `user,system`.
    pub origin: Option<String>,
    /// Provider-specific extras (service specifications, metrics).
    pub properties: Option<serde_json::Value>,
}

/// List the operations offered by `namespace`.
#[tracing::instrument(name = "arm::operations::list", skip(client))]
pub fn list(
    client: &ArmClient,
    namespace: &str,
    api_version: &str,
) -> ArmResult<Pager<PagedList<Operation>>> {
    let path = format!(
        "/providers/{}/operations?{}",
        path::segment("resourceProviderNamespace", namespace)?,
        client.api_version_query(namespace, api_version)
    );
    tracing::debug!(path = %path, "listing provider operations");
    Ok(Pager::new(client, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{bearer, setup_mock_client};
    use wiremock::matchers::{header, method, path as url_path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn lists_provider_operations() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/providers/Microsoft.Cache/operations"))
            .and(query_param("api-version", "2023-08-01"))
            .and(header("Authorization", bearer().as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{
                    "name": "Microsoft.Cache/redis/read",
                    "isDataAction": false,
                    "display": {"provider": "Microsoft Cache", "operation": "Read"},
                    "origin": "user,system"
                }]
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let ops = list(&client, "Microsoft.Cache", "2023-08-01")
            .unwrap()
            .collect_all()
            .await
            .unwrap();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].name.as_deref(), Some("Microsoft.Cache/redis/read"));
        assert_eq!(ops[0].is_data_action, Some(false));
        assert_eq!(
            ops[0].display.as_ref().and_then(|d| d.operation.as_deref()),
            Some("Read")
        );
    }

    #[tokio::test]
    async fn profile_overrides_api_version() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/providers/Microsoft.Resources/operations"))
            .and(query_param("api-version", "2019-10-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = crate::client::ArmClient::builder()
            .endpoint(server.uri())
            .credential(crate::auth::ArmCredential::access_token("t"))
            .profile(
                crate::profile::ApiProfile::new("hybrid")
                    .with_version("Microsoft.Resources", "2019-10-01"),
            )
            .build()
            .unwrap();

        let ops = list(&client, "Microsoft.Resources", "2021-04-01")
            .unwrap()
            .collect_all()
            .await
            .unwrap();
        assert!(ops.is_empty());
    }

    #[test]
    fn empty_namespace_is_rejected() {
        let client = crate::client::ArmClient::builder()
            .credential(crate::auth::ArmCredential::access_token("t"))
            .build()
            .unwrap();
        assert!(list(&client, "", "1").is_err());
    }
}
