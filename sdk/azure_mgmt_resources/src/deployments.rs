//! Template deployments at resource group scope.
//!
//! ## Example
//!
//! ```rust,no_run
//! use azure_mgmt_core::client::{read_json, ArmClient};
//! use azure_mgmt_resources::deployments;
//! use azure_mgmt_resources::models::{Deployment, DeploymentMode};
//!
//! # async fn example(client: &ArmClient) -> azure_mgmt_core::error::ArmResult<()> {
//! let deployment = Deployment::builder()
//!     .mode(DeploymentMode::Incremental)
//!     .template(serde_json::json!({
//!         "$schema": "https://schema.management.azure.com/schemas/2015-01-01/deploymentTemplate.json#",
//!         "contentVersion": "1.0.0.0",
//!         "resources": []
//!     }))
//!     .build()?;
//!
//! let result = deployments::begin_create_or_update(client, "my-rg", "my-deployment", &deployment)
//!     .await?
//!     .poll_until_done()
//!     .await?;
//! println!("{:?}", result.provisioning_state());
//! # Ok(())
//! # }
//! ```

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;
use azure_mgmt_core::poller::{LroMethod, Poller};

use crate::models::{
    api_version, Deployment, DeploymentExportResult, DeploymentExtended, DeploymentListOptions,
    DeploymentValidateResult,
};

pub(crate) fn deployments_root(client: &ArmClient, resource_group: &str) -> ArmResult<String> {
    Ok(format!(
        "{}/providers/Microsoft.Resources/deployments",
        client.resource_group_path(resource_group)?
    ))
}

pub(crate) fn deployment_path(
    client: &ArmClient,
    resource_group: &str,
    deployment_name: &str,
) -> ArmResult<String> {
    Ok(format!(
        "{}/{}",
        deployments_root(client, resource_group)?,
        path::segment("deploymentName", deployment_name)?
    ))
}

/// Deploy a template to a resource group.
///
/// # Tracing
///
/// Emits a span named `arm::deployments::create_or_update` with fields
/// `resource_group` and `deployment`.
#[tracing::instrument(
    name = "arm::deployments::create_or_update",
    skip(client, parameters),
    fields(resource_group = %resource_group, deployment = %deployment_name)
)]
pub async fn begin_create_or_update(
    client: &ArmClient,
    resource_group: &str,
    deployment_name: &str,
    parameters: &Deployment,
) -> ArmResult<Poller<DeploymentExtended>> {
    tracing::debug!(mode = ?parameters.properties.mode, "starting deployment");

    let path = format!(
        "{}?{}",
        deployment_path(client, resource_group, deployment_name)?,
        api_version(client)
    );
    let response = client.put(&path, parameters).await?;
    Poller::from_response(client, LroMethod::Put, response, None).await
}

/// Get a deployment.
#[tracing::instrument(
    name = "arm::deployments::get",
    skip(client),
    fields(resource_group = %resource_group, deployment = %deployment_name)
)]
pub async fn get(
    client: &ArmClient,
    resource_group: &str,
    deployment_name: &str,
) -> ArmResult<DeploymentExtended> {
    let path = format!(
        "{}?{}",
        deployment_path(client, resource_group, deployment_name)?,
        api_version(client)
    );
    let response = client.get(&path).await?;
    let deployment = read_json::<DeploymentExtended>(response).await?;

    tracing::debug!(provisioning_state = ?deployment.provisioning_state(), "got deployment");
    Ok(deployment)
}

/// Check whether a deployment exists.
#[tracing::instrument(
    name = "arm::deployments::check_existence",
    skip(client),
    fields(resource_group = %resource_group, deployment = %deployment_name)
)]
pub async fn check_existence(
    client: &ArmClient,
    resource_group: &str,
    deployment_name: &str,
) -> ArmResult<bool> {
    let path = format!(
        "{}?{}",
        deployment_path(client, resource_group, deployment_name)?,
        api_version(client)
    );
    client.exists(&path).await
}

/// Delete a deployment from the history. Deployed resources are kept.
#[tracing::instrument(
    name = "arm::deployments::delete",
    skip(client),
    fields(resource_group = %resource_group, deployment = %deployment_name)
)]
pub async fn begin_delete(
    client: &ArmClient,
    resource_group: &str,
    deployment_name: &str,
) -> ArmResult<Poller<()>> {
    tracing::debug!("deleting deployment");

    let path = format!(
        "{}?{}",
        deployment_path(client, resource_group, deployment_name)?,
        api_version(client)
    );
    let response = client.delete(&path).await?;
    Poller::from_response(client, LroMethod::Delete, response, None).await
}

/// Cancel a deployment that is `Accepted` or `Running`.
#[tracing::instrument(
    name = "arm::deployments::cancel",
    skip(client),
    fields(resource_group = %resource_group, deployment = %deployment_name)
)]
pub async fn cancel(client: &ArmClient, resource_group: &str, deployment_name: &str) -> ArmResult<()> {
    tracing::debug!("canceling deployment");

    let path = format!(
        "{}/cancel?{}",
        deployment_path(client, resource_group, deployment_name)?,
        api_version(client)
    );
    client.post_empty(&path).await?;
    Ok(())
}

/// Validate a template without deploying it.
///
/// A template the service rejects surfaces as [`azure_mgmt_core::error::ArmError::Api`]
/// (typically code `InvalidTemplate`).
#[tracing::instrument(
    name = "arm::deployments::validate",
    skip(client, parameters),
    fields(resource_group = %resource_group, deployment = %deployment_name)
)]
pub async fn begin_validate(
    client: &ArmClient,
    resource_group: &str,
    deployment_name: &str,
    parameters: &Deployment,
) -> ArmResult<Poller<DeploymentValidateResult>> {
    let path = format!(
        "{}/validate?{}",
        deployment_path(client, resource_group, deployment_name)?,
        api_version(client)
    );
    let response = client.post(&path, parameters).await?;
    Poller::from_response(client, LroMethod::Post, response, None).await
}

/// Export the template used by a deployment.
#[tracing::instrument(
    name = "arm::deployments::export_template",
    skip(client),
    fields(resource_group = %resource_group, deployment = %deployment_name)
)]
pub async fn export_template(
    client: &ArmClient,
    resource_group: &str,
    deployment_name: &str,
) -> ArmResult<DeploymentExportResult> {
    let path = format!(
        "{}/exportTemplate?{}",
        deployment_path(client, resource_group, deployment_name)?,
        api_version(client)
    );
    let response = client.post_empty(&path).await?;
    read_json::<DeploymentExportResult>(response).await
}

/// List the deployments of a resource group.
#[tracing::instrument(
    name = "arm::deployments::list_by_resource_group",
    skip(client, options),
    fields(resource_group = %resource_group)
)]
pub fn list_by_resource_group(
    client: &ArmClient,
    resource_group: &str,
    options: Option<&DeploymentListOptions>,
) -> ArmResult<Pager<PagedList<DeploymentExtended>>> {
    let mut path = format!("{}/?{}", deployments_root(client, resource_group)?, api_version(client));
    if let Some(options) = options {
        path::append_optional(&mut path, "$filter", options.filter.as_deref());
        path::append_optional(&mut path, "$top", options.top);
    }
    Ok(Pager::new(client, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeploymentMode, API_VERSION};
    use azure_mgmt_core::error::ArmError;
    use azure_mgmt_core::poller::OperationStatus;
    use azure_mgmt_core::test_support::{rg_path, setup_mock_client, TEST_RESOURCE_GROUP};
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path as url_path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DEPLOYMENT: &str = "deploy-1";

    fn deployment_url() -> String {
        rg_path(&format!("/providers/Microsoft.Resources/deployments/{DEPLOYMENT}"))
    }

    fn template() -> serde_json::Value {
        serde_json::json!({
            "$schema": "https://schema.management.azure.com/schemas/2015-01-01/deploymentTemplate.json#",
            "contentVersion": "1.0.0.0",
            "resources": []
        })
    }

    fn extended(state: &str) -> serde_json::Value {
        serde_json::json!({
            "id": deployment_url(),
            "name": DEPLOYMENT,
            "properties": {
                "provisioningState": state,
                "mode": "Incremental",
                "outputs": {"greeting": {"type": "String", "value": "hello"}}
            }
        })
    }

    #[tokio::test]
    async fn create_or_update_polls_async_operation() {
        let server = MockServer::start().await;
        let op = format!("{}/operationStatuses/op-1", server.uri());

        Mock::given(method("PUT"))
            .and(url_path(deployment_url()))
            .and(query_param("api-version", API_VERSION))
            .and(body_partial_json(serde_json::json!({"properties": {"mode": "Incremental"}})))
            .respond_with(
                ResponseTemplate::new(201)
                    .insert_header("Azure-AsyncOperation", op.as_str())
                    .set_body_json(extended("Accepted")),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path("/operationStatuses/op-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "Succeeded"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path(deployment_url()))
            .respond_with(ResponseTemplate::new(200).set_body_json(extended("Succeeded")))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let deployment = Deployment::builder()
            .mode(DeploymentMode::Incremental)
            .template(template())
            .build()
            .unwrap();

        let poller = begin_create_or_update(&client, TEST_RESOURCE_GROUP, DEPLOYMENT, &deployment)
            .await
            .unwrap();
        assert_eq!(poller.status(), OperationStatus::InProgress);

        let result = poller
            .with_frequency(Duration::from_millis(1))
            .poll_until_done()
            .await
            .unwrap();
        assert_eq!(result.provisioning_state(), Some("Succeeded"));
        let outputs = result.properties.unwrap().outputs.unwrap();
        assert_eq!(outputs["greeting"]["value"], "hello");
    }

    #[tokio::test]
    async fn get_and_check_existence() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path(deployment_url()))
            .respond_with(ResponseTemplate::new(200).set_body_json(extended("Running")))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(url_path(deployment_url()))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let deployment = get(&client, TEST_RESOURCE_GROUP, DEPLOYMENT).await.unwrap();
        assert_eq!(deployment.provisioning_state(), Some("Running"));
        assert!(check_existence(&client, TEST_RESOURCE_GROUP, DEPLOYMENT).await.unwrap());
    }

    #[tokio::test]
    async fn cancel_posts_to_cancel_action() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(url_path(format!("{}/cancel", deployment_url())))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        cancel(&client, TEST_RESOURCE_GROUP, DEPLOYMENT).await.unwrap();
    }

    #[tokio::test]
    async fn cancel_of_finished_deployment_is_a_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(url_path(format!("{}/cancel", deployment_url())))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "error": {"code": "DeploymentCannotBeCancelled", "message": "already completed"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let err = cancel(&client, TEST_RESOURCE_GROUP, DEPLOYMENT).await.unwrap_err();
        assert_eq!(err.status(), Some(409));
    }

    #[tokio::test]
    async fn validate_returns_result_synchronously() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(url_path(format!("{}/validate", deployment_url())))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "properties": {"provisioningState": "Succeeded", "validatedResources": []}
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let deployment = Deployment::builder().template(template()).build().unwrap();
        let poller = begin_validate(&client, TEST_RESOURCE_GROUP, DEPLOYMENT, &deployment)
            .await
            .unwrap();
        assert!(poller.is_done());

        let result = poller.result().await.unwrap();
        assert!(result.error.is_none());
        assert_eq!(
            result.properties.and_then(|p| p.provisioning_state).as_deref(),
            Some("Succeeded")
        );
    }

    #[tokio::test]
    async fn invalid_template_is_an_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(url_path(format!("{}/validate", deployment_url())))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": "InvalidTemplate", "message": "Deployment template validation failed"}
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let deployment = Deployment::builder()
            .template(serde_json::json!({"resources": [{"type": "bogus"}]}))
            .build()
            .unwrap();
        match begin_validate(&client, TEST_RESOURCE_GROUP, DEPLOYMENT, &deployment)
            .await
            .unwrap_err()
        {
            ArmError::Api { status, code, .. } => {
                assert_eq!(status, 400);
                assert_eq!(code, "InvalidTemplate");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn export_template_returns_template() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(url_path(format!("{}/exportTemplate", deployment_url())))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"template": template()})))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let result = export_template(&client, TEST_RESOURCE_GROUP, DEPLOYMENT).await.unwrap();
        assert_eq!(result.template.unwrap()["contentVersion"], "1.0.0.0");
    }

    #[tokio::test]
    async fn delete_completes_on_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(url_path(deployment_url()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let poller = begin_delete(&client, TEST_RESOURCE_GROUP, DEPLOYMENT).await.unwrap();
        assert!(poller.is_done());
        poller.result().await.unwrap();
    }

    #[tokio::test]
    async fn list_by_resource_group_follows_next_link() {
        let server = MockServer::start().await;
        let root = rg_path("/providers/Microsoft.Resources/deployments/");
        Mock::given(method("GET"))
            .and(url_path(root.clone()))
            .and(query_param("$filter", "provisioningState eq 'Failed'"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [extended("Failed")],
                "nextLink": format!("{}{}?api-version={}&$skiptoken=2", server.uri(), root, API_VERSION)
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path(root.clone()))
            .and(query_param("$skiptoken", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [extended("Failed")]
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let options = DeploymentListOptions {
            filter: Some("provisioningState eq 'Failed'".into()),
            top: None,
        };
        let all = list_by_resource_group(&client, TEST_RESOURCE_GROUP, Some(&options))
            .unwrap()
            .collect_all()
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }
}
