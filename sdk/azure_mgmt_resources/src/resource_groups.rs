//! Resource group management.
//!
//! ## Example
//!
//! ```rust,no_run
//! use azure_mgmt_core::client::{read_json, ArmClient};
//! use azure_mgmt_resources::models::{ResourceGroup, ResourceGroupListOptions};
//! use azure_mgmt_resources::resource_groups;
//!
//! # async fn example(client: &ArmClient) -> azure_mgmt_core::error::ArmResult<()> {
//! let group = ResourceGroup::new("westus").with_tag("env", "dev");
//! resource_groups::create_or_update(client, "my-rg", &group).await?;
//!
//! if resource_groups::check_existence(client, "my-rg").await? {
//!     let options = ResourceGroupListOptions {
//!         filter: Some("tagName eq 'env'".into()),
//!         ..Default::default()
//!     };
//!     for group in resource_groups::list(client, Some(&options))?.collect_all().await? {
//!         println!("{:?}", group.name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;
use azure_mgmt_core::poller::{FinalStateVia, LroMethod, Poller};

use crate::models::{
    api_version, ExportTemplateRequest, ForceDeletionType, ResourceGroup,
    ResourceGroupExportResult, ResourceGroupListOptions, ResourceGroupPatchable,
};

fn group_path(client: &ArmClient, resource_group: &str) -> ArmResult<String> {
    client.resource_group_path(resource_group)
}

/// Create a resource group, or update its location-independent fields.
///
/// # Tracing
///
/// Emits a span named `arm::resource_groups::create_or_update` with field `resource_group`.
#[tracing::instrument(
    name = "arm::resource_groups::create_or_update",
    skip(client, parameters),
    fields(resource_group = %resource_group)
)]
pub async fn create_or_update(
    client: &ArmClient,
    resource_group: &str,
    parameters: &ResourceGroup,
) -> ArmResult<ResourceGroup> {
    tracing::debug!("creating or updating resource group");

    let path = format!("{}?{}", group_path(client, resource_group)?, api_version(client));
    let response = client.put(&path, parameters).await?;
    let group = read_json::<ResourceGroup>(response).await?;

    tracing::debug!(provisioning_state = ?group.provisioning_state(), "resource group saved");
    Ok(group)
}

/// Get a resource group.
#[tracing::instrument(
    name = "arm::resource_groups::get",
    skip(client),
    fields(resource_group = %resource_group)
)]
pub async fn get(client: &ArmClient, resource_group: &str) -> ArmResult<ResourceGroup> {
    tracing::debug!("getting resource group");

    let path = format!("{}?{}", group_path(client, resource_group)?, api_version(client));
    let response = client.get(&path).await?;
    read_json::<ResourceGroup>(response).await
}

/// Check whether a resource group exists.
#[tracing::instrument(
    name = "arm::resource_groups::check_existence",
    skip(client),
    fields(resource_group = %resource_group)
)]
pub async fn check_existence(client: &ArmClient, resource_group: &str) -> ArmResult<bool> {
    let path = format!("{}?{}", group_path(client, resource_group)?, api_version(client));
    let exists = client.exists(&path).await?;

    tracing::debug!(exists, "checked resource group existence");
    Ok(exists)
}

/// Update tags or `managedBy` of a resource group.
#[tracing::instrument(
    name = "arm::resource_groups::update",
    skip(client, parameters),
    fields(resource_group = %resource_group)
)]
pub async fn update(
    client: &ArmClient,
    resource_group: &str,
    parameters: &ResourceGroupPatchable,
) -> ArmResult<ResourceGroup> {
    tracing::debug!("updating resource group");

    let path = format!("{}?{}", group_path(client, resource_group)?, api_version(client));
    let response = client.patch(&path, parameters).await?;
    read_json::<ResourceGroup>(response).await
}

/// Delete a resource group and everything in it.
///
/// `force_deletion_types` asks the service to force-delete resources of
/// those types (virtual machines, scale sets) instead of shutting them down.
#[tracing::instrument(
    name = "arm::resource_groups::delete",
    skip(client, force_deletion_types),
    fields(resource_group = %resource_group)
)]
pub async fn begin_delete(
    client: &ArmClient,
    resource_group: &str,
    force_deletion_types: Option<&[ForceDeletionType]>,
) -> ArmResult<Poller<()>> {
    tracing::debug!("deleting resource group");

    let mut path = format!("{}?{}", group_path(client, resource_group)?, api_version(client));
    if let Some(types) = force_deletion_types.filter(|t| !t.is_empty()) {
        let joined = types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",");
        path::append_query(&mut path, "forceDeletionTypes", &joined);
    }
    let response = client.delete(&path).await?;
    Poller::from_response(client, LroMethod::Delete, response, None).await
}

/// List resource groups in the subscription.
#[tracing::instrument(name = "arm::resource_groups::list", skip(client, options))]
pub fn list(
    client: &ArmClient,
    options: Option<&ResourceGroupListOptions>,
) -> ArmResult<Pager<PagedList<ResourceGroup>>> {
    let mut path = format!("{}/resourcegroups?{}", client.subscription_path()?, api_version(client));
    if let Some(options) = options {
        path::append_optional(&mut path, "$filter", options.filter.as_deref());
        path::append_optional(&mut path, "$top", options.top);
    }
    Ok(Pager::new(client, path))
}

/// Capture a resource group as a template.
#[tracing::instrument(
    name = "arm::resource_groups::export_template",
    skip(client, parameters),
    fields(resource_group = %resource_group)
)]
pub async fn begin_export_template(
    client: &ArmClient,
    resource_group: &str,
    parameters: &ExportTemplateRequest,
) -> ArmResult<Poller<ResourceGroupExportResult>> {
    tracing::debug!(resources = parameters.resources.len(), "exporting template");

    let path = format!(
        "{}/exportTemplate?{}",
        group_path(client, resource_group)?,
        api_version(client)
    );
    let response = client.post(&path, parameters).await?;
    Poller::from_response(client, LroMethod::Post, response, Some(FinalStateVia::Location)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::API_VERSION;
    use azure_mgmt_core::error::ArmError;
    use azure_mgmt_core::models::Tags;
    use azure_mgmt_core::test_support::{bearer, rg_path, setup_mock_client, sub_path, TEST_RESOURCE_GROUP};
    use std::time::Duration;
    use tracing_test::traced_test;
    use wiremock::matchers::{body_json, header, method, path as url_path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn group_json() -> serde_json::Value {
        serde_json::json!({
            "id": rg_path(""),
            "name": TEST_RESOURCE_GROUP,
            "type": "Microsoft.Resources/resourceGroups",
            "location": "westus",
            "tags": {"env": "test"},
            "properties": {"provisioningState": "Succeeded"}
        })
    }

    // --- create / get / update ---

    #[tokio::test]
    async fn create_or_update_sends_location_and_tags() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(url_path(rg_path("")))
            .and(query_param("api-version", API_VERSION))
            .and(header("Authorization", bearer().as_str()))
            .and(body_json(serde_json::json!({"location": "westus", "tags": {"env": "test"}})))
            .respond_with(ResponseTemplate::new(201).set_body_json(group_json()))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let group = create_or_update(
            &client,
            TEST_RESOURCE_GROUP,
            &ResourceGroup::new("westus").with_tag("env", "test"),
        )
        .await
        .unwrap();

        assert_eq!(group.name.as_deref(), Some(TEST_RESOURCE_GROUP));
        assert_eq!(group.provisioning_state(), Some("Succeeded"));
    }

    #[tokio::test]
    async fn get_surfaces_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path(rg_path("")))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": {"code": "ResourceGroupNotFound", "message": "Resource group 'test-rg' could not be found."}
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let err = get(&client, TEST_RESOURCE_GROUP).await.unwrap_err();
        assert!(err.is_not_found());
        match err {
            ArmError::Api { code, .. } => assert_eq!(code, "ResourceGroupNotFound"),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_resource_group_is_rejected_before_sending() {
        let server = MockServer::start().await;
        let client = setup_mock_client(&server).await;

        let err = get(&client, "").await.unwrap_err();
        assert!(err.to_string().contains("resourceGroupName"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_patches_tags() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(url_path(rg_path("")))
            .and(body_json(serde_json::json!({"tags": {"owner": "me"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(group_json()))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let mut tags = Tags::new();
        tags.insert("owner".into(), "me".into());
        let patch = ResourceGroupPatchable {
            tags: Some(tags),
            ..Default::default()
        };
        update(&client, TEST_RESOURCE_GROUP, &patch).await.unwrap();
    }

    #[tokio::test]
    #[traced_test]
    async fn operations_emit_debug_events() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(url_path(rg_path("")))
            .respond_with(ResponseTemplate::new(200).set_body_json(group_json()))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        update(&client, TEST_RESOURCE_GROUP, &ResourceGroupPatchable::default())
            .await
            .unwrap();

        assert!(logs_contain("updating resource group"));
    }

    // --- existence ---

    #[tokio::test]
    async fn check_existence_maps_head_status() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(url_path(rg_path("")))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(url_path(sub_path("/resourceGroups/missing")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        assert!(check_existence(&client, TEST_RESOURCE_GROUP).await.unwrap());
        assert!(!check_existence(&client, "missing").await.unwrap());
    }

    // --- delete ---

    #[tokio::test]
    async fn delete_polls_location_until_done() {
        let server = MockServer::start().await;
        let location = format!("{}/operationresults/del-1", server.uri());

        Mock::given(method("DELETE"))
            .and(url_path(rg_path("")))
            .and(query_param(
                "forceDeletionTypes",
                "Microsoft.Compute/virtualMachines,Microsoft.Compute/virtualMachineScaleSets",
            ))
            .respond_with(
                ResponseTemplate::new(202)
                    .insert_header("Location", location.as_str())
                    .insert_header("Retry-After", "0"),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path("/operationresults/del-1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let poller = begin_delete(
            &client,
            TEST_RESOURCE_GROUP,
            Some(&[
                ForceDeletionType::VirtualMachines,
                ForceDeletionType::VirtualMachineScaleSets,
            ]),
        )
        .await
        .unwrap();

        poller
            .with_frequency(Duration::from_millis(1))
            .poll_until_done()
            .await
            .unwrap();
    }

    // --- list ---

    #[tokio::test]
    async fn list_applies_filter_and_top() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path(sub_path("/resourcegroups")))
            .and(query_param("$filter", "tagName eq 'env'"))
            .and(query_param("$top", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [group_json()]
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let options = ResourceGroupListOptions {
            filter: Some("tagName eq 'env'".into()),
            top: Some(5),
        };
        let groups = list(&client, Some(&options))
            .unwrap()
            .collect_all()
            .await
            .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].location, "westus");
    }

    // --- export ---

    #[tokio::test]
    async fn export_template_reads_final_location() {
        let server = MockServer::start().await;
        let location = format!("{}/operationresults/export-1", server.uri());

        Mock::given(method("POST"))
            .and(url_path(rg_path("/exportTemplate")))
            .and(body_json(serde_json::json!({"resources": ["*"]})))
            .respond_with(ResponseTemplate::new(202).insert_header("Location", location.as_str()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path("/operationresults/export-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "template": {"$schema": "https://schema.management.azure.com/schemas/2015-01-01/deploymentTemplate.json#", "resources": []}
            })))
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let result = begin_export_template(&client, TEST_RESOURCE_GROUP, &ExportTemplateRequest::all())
            .await
            .unwrap()
            .with_frequency(Duration::from_millis(1))
            .poll_until_done()
            .await
            .unwrap();

        let template = result.template.unwrap();
        assert_eq!(template["resources"], serde_json::json!([]));
        assert!(result.error.is_none());
    }
}
