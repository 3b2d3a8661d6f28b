use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Authentication failed: {message}")]
    AuthenticationError { message: String },

    #[error("Quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("Control plane rejected the request (HTTP {status}): {body}")]
    RemoteRejected { status: u16, body: String },

    #[error("Deployment {deployment_id} ended with status {status}")]
    RolloutFailed {
        deployment_id: String,
        status: String,
    },

    #[error("Gave up waiting for deployment {deployment_id} after {waited:?}")]
    WaitTimeout {
        deployment_id: String,
        waited: Duration,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Authentication,
    Platform,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DeployError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeployError::ApiError(_) | DeployError::WaitTimeout { .. } => ErrorCategory::Network,
            DeployError::ConfigError { .. }
            | DeployError::MissingConfigError { .. }
            | DeployError::InvalidConfigValueError { .. }
            | DeployError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            DeployError::AuthenticationError { .. } => ErrorCategory::Authentication,
            DeployError::QuotaExceeded { .. }
            | DeployError::RemoteRejected { .. }
            | DeployError::RolloutFailed { .. } => ErrorCategory::Platform,
            DeployError::IoError(_) | DeployError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // the deployment was accepted, only our wait gave up
            DeployError::WaitTimeout { .. } => ErrorSeverity::Low,
            DeployError::ApiError(_) | DeployError::QuotaExceeded { .. } => ErrorSeverity::Medium,
            DeployError::ConfigError { .. }
            | DeployError::MissingConfigError { .. }
            | DeployError::InvalidConfigValueError { .. }
            | DeployError::ConfigValidationError { .. }
            | DeployError::AuthenticationError { .. }
            | DeployError::RemoteRejected { .. }
            | DeployError::RolloutFailed { .. } => ErrorSeverity::High,
            DeployError::IoError(_) | DeployError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DeployError::ApiError(_) => "Check network connectivity and the TFY_HOST setting",
            DeployError::IoError(_) => "Check that the manifest file exists and is readable",
            DeployError::SerializationError(_) => {
                "The service descriptor could not be encoded; check field values"
            }
            DeployError::ConfigError { .. }
            | DeployError::InvalidConfigValueError { .. }
            | DeployError::ConfigValidationError { .. } => {
                "Fix the reported field in the manifest or environment and retry"
            }
            DeployError::MissingConfigError { .. } => {
                "Set the missing value (e.g. TFY_HOST, TFY_API_KEY) and retry"
            }
            DeployError::AuthenticationError { .. } => {
                "Regenerate the API key and export it as TFY_API_KEY"
            }
            DeployError::QuotaExceeded { .. } => {
                "Lower resource requests or ask for a larger workspace quota"
            }
            DeployError::RemoteRejected { .. } => {
                "Inspect the response body; the platform rejected the descriptor"
            }
            DeployError::RolloutFailed { .. } => {
                "Open the deployment in the platform dashboard to read build and pod logs"
            }
            DeployError::WaitTimeout { .. } => {
                "The deployment is still running; check its status in the dashboard"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DeployError::ApiError(e) if e.is_timeout() => {
                "The control plane did not answer in time".to_string()
            }
            DeployError::ApiError(e) if e.is_connect() => {
                "Could not connect to the control plane".to_string()
            }
            DeployError::MissingConfigError { field } => {
                format!("Required setting '{}' is not configured", field)
            }
            DeployError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            DeployError::AuthenticationError { .. } => {
                "The API key was rejected by the control plane".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn invalid_value(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        DeployError::InvalidConfigValueError {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
