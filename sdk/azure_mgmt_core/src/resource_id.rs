//! Parsing of fully qualified Resource Manager resource IDs.
//!
//! ```text
//! /subscriptions/{sub}/resourceGroups/{rg}/providers/{ns}/{type}/{name}[/{childType}/{childName}...]
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{ArmError, ArmResult};

const SUBSCRIPTIONS: &str = "subscriptions";
const RESOURCE_GROUPS: &str = "resourceGroups";
const PROVIDERS: &str = "providers";

/// A parsed resource ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    id: String,
    subscription_id: Option<String>,
    resource_group: Option<String>,
    provider_namespace: Option<String>,
    types: Vec<String>,
    names: Vec<String>,
}

impl ResourceId {
    /// Parse a resource ID.
    ///
    /// Accepts subscription, resource group, provider, child and
    /// tenant-level (`/providers/...`) IDs.
    ///
    /// # Errors
    ///
    /// Returns [`ArmError::InvalidResourceId`] when the ID is not rooted at
    /// `/`, has an empty segment, or a provider type has no name.
    pub fn parse(id: &str) -> ArmResult<Self> {
        let invalid = |reason: &str| ArmError::InvalidResourceId {
            id: id.to_owned(),
            reason: reason.to_owned(),
        };

        let trimmed = id.trim_end_matches('/');
        let rest = trimmed
            .strip_prefix('/')
            .ok_or_else(|| invalid("must start with '/'"))?;
        if rest.is_empty() {
            return Err(invalid("is empty"));
        }

        let segments: Vec<&str> = rest.split('/').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(invalid("contains an empty segment"));
        }

        let mut parsed = Self {
            id: trimmed.to_owned(),
            subscription_id: None,
            resource_group: None,
            provider_namespace: None,
            types: Vec::new(),
            names: Vec::new(),
        };

        let mut i = 0;
        if segments[i].eq_ignore_ascii_case(SUBSCRIPTIONS) {
            let sub = segments
                .get(i + 1)
                .ok_or_else(|| invalid("missing subscription ID"))?;
            parsed.subscription_id = Some((*sub).to_owned());
            i += 2;

            if let Some(seg) = segments.get(i) {
                if seg.eq_ignore_ascii_case(RESOURCE_GROUPS) {
                    let rg = segments
                        .get(i + 1)
                        .ok_or_else(|| invalid("missing resource group name"))?;
                    parsed.resource_group = Some((*rg).to_owned());
                    i += 2;
                }
            }
        }

        if i == segments.len() {
            return Ok(parsed);
        }

        if !segments[i].eq_ignore_ascii_case(PROVIDERS) {
            return Err(invalid("expected 'providers' segment"));
        }
        let namespace = segments
            .get(i + 1)
            .ok_or_else(|| invalid("missing provider namespace"))?;
        parsed.provider_namespace = Some((*namespace).to_owned());
        i += 2;

        let remaining = &segments[i..];
        if remaining.is_empty() {
            return Err(invalid("missing resource type"));
        }
        if remaining.len() % 2 != 0 {
            return Err(invalid("resource type without a name"));
        }
        for pair in remaining.chunks(2) {
            parsed.types.push(pair[0].to_owned());
            parsed.names.push(pair[1].to_owned());
        }

        Ok(parsed)
    }

    /// The subscription, if the ID is subscription-scoped.
    pub fn subscription_id(&self) -> Option<&str> {
        self.subscription_id.as_deref()
    }

    /// The resource group, if any.
    pub fn resource_group(&self) -> Option<&str> {
        self.resource_group.as_deref()
    }

    /// The provider namespace, e.g. `Microsoft.Cache`.
    pub fn provider_namespace(&self) -> Option<&str> {
        self.provider_namespace.as_deref()
    }

    /// Fully qualified type, e.g. `Microsoft.Cache/redis/firewallRules`.
    pub fn resource_type(&self) -> String {
        match &self.provider_namespace {
            Some(ns) => std::iter::once(ns.as_str())
                .chain(self.types.iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join("/"),
            None if self.resource_group.is_some() => "Microsoft.Resources/resourceGroups".into(),
            None => "Microsoft.Resources/subscriptions".into(),
        }
    }

    /// The name of the innermost resource.
    pub fn name(&self) -> Option<&str> {
        self.names
            .last()
            .map(String::as_str)
            .or(self.resource_group.as_deref())
            .or(self.subscription_id.as_deref())
    }

    /// Whether this is a child resource (nested under another provider resource).
    pub fn is_child(&self) -> bool {
        self.names.len() > 1
    }

    /// The enclosing resource: the parent for a child resource, the resource
    /// group for a top-level resource, the subscription for a resource group.
    pub fn parent(&self) -> Option<ResourceId> {
        let segments: Vec<&str> = self.id.trim_start_matches('/').split('/').collect();
        let drop = if self.is_child() {
            2
        } else if self.provider_namespace.is_some() {
            4
        } else if self.resource_group.is_some() {
            2
        } else {
            return None;
        };
        if segments.len() <= drop {
            return None;
        }
        let parent = format!("/{}", segments[..segments.len() - drop].join("/"));
        ResourceId::parse(&parent).ok()
    }

    /// The ID as a string.
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl FromStr for ResourceId {
    type Err = ArmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
