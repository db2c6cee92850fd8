//! The newest API version of every provider shipped by this SDK.

use azure_mgmt_core::client::ArmClientBuilder;
use azure_mgmt_core::profile::ApiProfile;

pub use azure_mgmt_botservice as botservice;
pub use azure_mgmt_connectedcache as connectedcache;
pub use azure_mgmt_datalakestore as datalakestore;
pub use azure_mgmt_mongocluster as mongocluster;
pub use azure_mgmt_redis as redis;
pub use azure_mgmt_resources as resources;
pub use azure_mgmt_signalr as signalr;
pub use azure_mgmt_terraform as terraform;
pub use azure_mgmt_webpubsub as webpubsub;

/// Profile name reported by [`ApiProfile::name`].
pub const NAME: &str = "latest";

/// Pins every provider to the version its crate was built against.
///
/// SignalR and Web PubSub share `Microsoft.SignalRService` and the same
/// version, so one entry covers both.
pub fn profile() -> ApiProfile {
    [
        (botservice::PROVIDER_NAMESPACE, botservice::API_VERSION),
        (connectedcache::PROVIDER_NAMESPACE, connectedcache::API_VERSION),
        (datalakestore::PROVIDER_NAMESPACE, datalakestore::API_VERSION),
        (mongocluster::PROVIDER_NAMESPACE, mongocluster::API_VERSION),
        (redis::PROVIDER_NAMESPACE, redis::API_VERSION),
        (resources::PROVIDER_NAMESPACE, resources::API_VERSION),
        (signalr::PROVIDER_NAMESPACE, signalr::API_VERSION),
        (terraform::PROVIDER_NAMESPACE, terraform::API_VERSION),
        (webpubsub::PROVIDER_NAMESPACE, webpubsub::API_VERSION),
    ]
    .into_iter()
    .fold(ApiProfile::new(NAME), |profile, (namespace, version)| {
        profile.with_version(namespace, version)
    })
}

/// A client builder with [`profile`] applied.
pub fn client_builder() -> ArmClientBuilder {
    azure_mgmt_core::client::ArmClient::builder().profile(profile())
}
