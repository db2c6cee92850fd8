use thiserror::Error;

/// Errors that can occur when calling Azure Resource Manager.
#[derive(Error, Debug)]
pub enum ArmError {
    /// The service returned a non-success status without a parseable ARM error body.
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// The service returned an ARM error envelope.
    #[error("API error ({status} {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        target: Option<String>,
    },

    /// A bearer token could not be acquired.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A request or response payload could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The HTTP request failed at the transport level.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint URL is invalid.
    #[error("Invalid endpoint URL: {message}")]
    InvalidEndpoint {
        message: String,
        #[source]
        source: Option<url::ParseError>,
    },

    /// A required configuration value is missing.
    #[error("Missing configuration: {0}")]
    MissingConfig(String),

    /// A required path parameter was empty.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A request builder was missing a required field or had an invalid value.
    #[error("Invalid request: {0}")]
    Builder(String),

    /// A resource ID string could not be parsed.
    #[error("Invalid resource ID '{id}': {reason}")]
    InvalidResourceId { id: String, reason: String },

    /// A long-running operation reached the `Failed` or `Canceled` state.
    #[error("Operation {status}: {code} - {message}")]
    OperationFailed {
        status: String,
        code: String,
        message: String,
    },

    /// A long-running operation could not be tracked.
    #[error("Poller error: {0}")]
    Poller(String),
}

impl ArmError {
    /// Construct an [`ArmError::Http`].
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Construct an [`ArmError::InvalidEndpoint`] carrying the URL parse error.
    pub fn invalid_endpoint_with_source(message: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidEndpoint {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Construct the error returned for an empty required path parameter.
    pub fn empty_parameter(name: &str) -> Self {
        Self::InvalidParameter(format!("parameter {name} cannot be empty"))
    }

    /// The HTTP status code, when the error came from a service response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the error means the addressed resource does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api { status, code, .. } => {
                *status == 404
                    || matches!(
                        code.as_str(),
                        "ResourceNotFound" | "ResourceGroupNotFound" | "NotFound"
                    )
            }
            Self::Http { status, .. } => *status == 404,
            _ => false,
        }
    }
}

/// Result type alias for Resource Manager operations.
pub type ArmResult<T> = std::result::Result<T, ArmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_parameter_message_names_the_parameter() {
        let err = ArmError::empty_parameter("resourceGroupName");
        assert_eq!(
            err.to_string(),
            "Invalid parameter: parameter resourceGroupName cannot be empty"
        );
    }

    #[test]
    fn not_found_detection() {
        assert!(ArmError::http(404, "").is_not_found());
        assert!(!ArmError::http(409, "").is_not_found());

        let by_code = ArmError::Api {
            status: 400,
            code: "ResourceGroupNotFound".into(),
            message: "gone".into(),
            target: None,
        };
        assert!(by_code.is_not_found());

        let conflict = ArmError::Api {
            status: 409,
            code: "Conflict".into(),
            message: "busy".into(),
            target: None,
        };
        assert!(!conflict.is_not_found());
        assert_eq!(conflict.status(), Some(409));
    }

    #[test]
    fn operation_failed_display() {
        let err = ArmError::OperationFailed {
            status: "Failed".into(),
            code: "QuotaExceeded".into(),
            message: "no capacity".into(),
        };
        assert_eq!(err.to_string(), "Operation Failed: QuotaExceeded - no capacity");
        assert_eq!(err.status(), None);
    }
}
