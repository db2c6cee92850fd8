//! The `2020-09-01-hybrid` profile served by Azure Stack Hub.
//!
//! Only providers available on Azure Stack Hub are exposed here.

use azure_mgmt_core::client::ArmClientBuilder;
use azure_mgmt_core::profile::ApiProfile;

pub use azure_mgmt_resources as resources;

/// Profile name reported by [`ApiProfile::name`].
pub const NAME: &str = "2020-09-01-hybrid";

/// `Microsoft.Resources` version served by this profile.
pub const RESOURCES_API_VERSION: &str = "2019-10-01";

pub fn profile() -> ApiProfile {
    ApiProfile::new(NAME).with_version(resources::PROVIDER_NAMESPACE, RESOURCES_API_VERSION)
}

/// A client builder with [`profile`] applied. Azure Stack Hub callers still
/// need to set the stamp's endpoint and cloud configuration.
pub fn client_builder() -> ArmClientBuilder {
    azure_mgmt_core::client::ArmClient::builder().profile(profile())
}
