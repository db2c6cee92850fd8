//! Export existing Azure resources as Terraform configuration.

use azure_mgmt_core::client::ArmClient;
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::poller::{FinalStateVia, LroMethod, Poller};

use crate::models::{api_version, ExportRequest, TerraformOperationStatus, PROVIDER_NAMESPACE};

/// Start an export. The final operation status carries the generated HCL.
///
/// # Tracing
///
/// Emits a span named `arm::terraform::export` with field `kind`.
#[tracing::instrument(
    name = "arm::terraform::export",
    skip(client, request),
    fields(kind = request.kind())
)]
pub async fn begin_export_terraform(
    client: &ArmClient,
    request: &ExportRequest,
) -> ArmResult<Poller<TerraformOperationStatus>> {
    tracing::debug!("starting terraform export");

    let path = format!(
        "{}/providers/{}/exportTerraform?{}",
        client.subscription_path()?,
        PROVIDER_NAMESPACE,
        api_version(client)
    );
    let response = client.post(&path, request).await?;
    Poller::from_response(
        client,
        LroMethod::Post,
        response,
        Some(FinalStateVia::AzureAsyncOperation),
    )
    .await
}
