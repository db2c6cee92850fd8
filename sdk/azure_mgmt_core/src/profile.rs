//! API version profiles.
//!
//! A profile pins the `api-version` used for each resource provider, so a
//! client can target an environment (such as Azure Stack Hub) that only
//! serves older API versions.

use std::collections::HashMap;

/// A named set of pinned API versions keyed by provider namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiProfile {
    name: String,
    versions: HashMap<String, String>,
}

impl ApiProfile {
    /// Create an empty profile.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            versions: HashMap::new(),
        }
    }

    /// Pin `version` for the provider `namespace` (e.g. `Microsoft.Resources`).
    pub fn with_version(mut self, namespace: &str, version: impl Into<String>) -> Self {
        self.versions
            .insert(namespace.to_ascii_lowercase(), version.into());
        self
    }

    /// The profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pinned version for `namespace`, if any.
    pub fn api_version(&self, namespace: &str) -> Option<&str> {
        self.versions
            .get(&namespace.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_lookup_is_case_insensitive() {
        let profile = ApiProfile::new("hybrid").with_version("Microsoft.Resources", "2019-10-01");
        assert_eq!(profile.api_version("microsoft.resources"), Some("2019-10-01"));
        assert_eq!(profile.api_version("Microsoft.Cache"), None);
        assert_eq!(profile.name(), "hybrid");
    }
}
