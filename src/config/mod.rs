#[cfg(feature = "cli")]
pub mod cli;
pub mod manifest;
pub mod platform;

use crate::adapters::http::HttpDeployClient;
use crate::domain::model::Service;
use crate::utils::error::Result;
use crate::utils::validation::{validate_workspace_fqn, Validate};

/// A resolved deployment request: the descriptor plus its submission options.
#[derive(Debug, Clone)]
pub struct DeployPlan {
    pub service: Service,
    pub workspace_fqn: String,
    pub wait: bool,
}

impl DeployPlan {
    /// Validated manifest JSON, exactly as it would be submitted.
    pub fn render_manifest(&self) -> Result<String> {
        self.validate()?;
        let manifest = HttpDeployClient::manifest_json(&self.service)?;
        Ok(serde_json::to_string_pretty(&manifest)?)
    }
}

impl Validate for DeployPlan {
    fn validate(&self) -> Result<()> {
        validate_workspace_fqn("workspace_fqn", &self.workspace_fqn)?;
        self.service.validate()
    }
}
