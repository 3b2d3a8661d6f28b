use crate::domain::model::Service;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Rollout state reported by the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentStatus {
    Initialized,
    Building,
    BuildSuccess,
    Deploying,
    Success,
    Failed,
    BuildFailed,
    Cancelled,
    Paused,
    #[serde(other)]
    Unknown,
}

impl DeploymentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeploymentStatus::Success
                | DeploymentStatus::Failed
                | DeploymentStatus::BuildFailed
                | DeploymentStatus::Cancelled
                | DeploymentStatus::Paused
        )
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            DeploymentStatus::Failed | DeploymentStatus::BuildFailed | DeploymentStatus::Cancelled
        )
    }
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            DeploymentStatus::Initialized => "INITIALIZED",
            DeploymentStatus::Building => "BUILDING",
            DeploymentStatus::BuildSuccess => "BUILD_SUCCESS",
            DeploymentStatus::Deploying => "DEPLOYING",
            DeploymentStatus::Success => "SUCCESS",
            DeploymentStatus::Failed => "FAILED",
            DeploymentStatus::BuildFailed => "BUILD_FAILED",
            DeploymentStatus::Cancelled => "CANCELLED",
            DeploymentStatus::Paused => "PAUSED",
            DeploymentStatus::Unknown => "UNKNOWN",
        };
        f.write_str(text)
    }
}

/// A deployment accepted by the control plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: String,
    pub application_id: String,
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default = "initial_status")]
    pub status: DeploymentStatus,
}

fn initial_status() -> DeploymentStatus {
    DeploymentStatus::Initialized
}

/// Submits service descriptors to a deployment control plane.
#[async_trait]
pub trait DeployClient: Send + Sync {
    /// Sends `service` to the workspace `workspace_fqn`.
    ///
    /// With `wait == false` this returns as soon as the request is accepted;
    /// otherwise it blocks until the rollout reaches a terminal state.
    async fn deploy(
        &self,
        service: &Service,
        workspace_fqn: &str,
        wait: bool,
    ) -> Result<Deployment>;
}
