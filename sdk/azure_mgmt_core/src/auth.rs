use std::sync::Arc;

use azure_core::credentials::TokenCredential;
use azure_identity::{AzureCliCredential, DeveloperToolsCredential};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{ArmError, ArmResult};

/// Environment variable holding a pre-acquired ARM bearer token.
pub const ACCESS_TOKEN_ENV: &str = "AZURE_ACCESS_TOKEN";

/// Credential types supported by the Resource Manager clients.
#[derive(Clone)]
pub enum ArmCredential {
    /// A bearer token acquired out of band (for example `az account get-access-token`).
    AccessToken(SecretString),

    /// Any `azure_core` token credential, such as those from `azure_identity`.
    TokenCredential(Arc<dyn TokenCredential>),
}

impl ArmCredential {
    /// Create a credential from the environment.
    ///
    /// Uses `AZURE_ACCESS_TOKEN` when it is set and non-empty, otherwise
    /// falls back to the developer tools credential chain.
    pub fn from_env() -> ArmResult<Self> {
        match std::env::var(ACCESS_TOKEN_ENV) {
            Ok(token) if !token.is_empty() => Ok(Self::AccessToken(SecretString::from(token))),
            _ => Self::developer_tools(),
        }
    }

    /// Create a static bearer token credential.
    pub fn access_token(token: impl Into<String>) -> Self {
        Self::AccessToken(SecretString::from(token.into()))
    }

    /// Wrap an existing token credential.
    pub fn token_credential(credential: Arc<dyn TokenCredential>) -> Self {
        Self::TokenCredential(credential)
    }

    /// Authenticate through the Azure CLI's logged-in account.
    pub fn azure_cli() -> ArmResult<Self> {
        let credential = AzureCliCredential::new(None).map_err(|e| ArmError::Auth(e.to_string()))?;
        Ok(Self::TokenCredential(credential))
    }

    /// Authenticate through the first available developer tool (Azure CLI, azd).
    pub fn developer_tools() -> ArmResult<Self> {
        let credential =
            DeveloperToolsCredential::new(None).map_err(|e| ArmError::Auth(e.to_string()))?;
        Ok(Self::TokenCredential(credential))
    }

    /// Resolve the credential to an `Authorization` header value for `scope`.
    pub async fn resolve(&self, scope: &str) -> ArmResult<String> {
        match self {
            Self::AccessToken(token) => Ok(format!("Bearer {}", token.expose_secret())),
            Self::TokenCredential(credential) => {
                let token = credential
                    .get_token(&[scope], None)
                    .await
                    .map_err(|e| ArmError::Auth(e.to_string()))?;
                Ok(format!("Bearer {}", token.token.secret()))
            }
        }
    }
}

impl std::fmt::Debug for ArmCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessToken(_) => write!(f, "ArmCredential::AccessToken(****)"),
            Self::TokenCredential(_) => write!(f, "ArmCredential::TokenCredential"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn debug_hides_token() {
        let credential = ArmCredential::access_token("super-secret");
        let debug = format!("{:?}", credential);
        assert_eq!(debug, "ArmCredential::AccessToken(****)");
        assert!(!debug.contains("super-secret"));
    }

    #[tokio::test]
    async fn access_token_resolves_to_bearer_header() {
        let credential = ArmCredential::access_token("abc");
        let header = credential
            .resolve("https://management.core.windows.net/.default")
            .await
            .expect("should resolve");
        assert_eq!(header, "Bearer abc");
    }

    #[test]
    #[serial]
    fn from_env_prefers_access_token() {
        let original = std::env::var(ACCESS_TOKEN_ENV).ok();
        std::env::set_var(ACCESS_TOKEN_ENV, "env-token");

        let credential = ArmCredential::from_env().expect("should build");
        assert!(matches!(credential, ArmCredential::AccessToken(_)));

        match original {
            Some(val) => std::env::set_var(ACCESS_TOKEN_ENV, val),
            None => std::env::remove_var(ACCESS_TOKEN_ENV),
        }
    }
}
