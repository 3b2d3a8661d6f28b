use crate::config::manifest::ServiceManifest;
use crate::config::DeployPlan;
use crate::core::descriptor::{fast_mcp_service, FAST_MCP_WORKSPACE_FQN};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "service-deploy")]
#[command(about = "Submit a service descriptor to the deployment control plane")]
pub struct CliConfig {
    /// TOML service manifest; the built-in fast-mcp descriptor is used when omitted
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Target workspace as <cluster>:<workspace>
    #[arg(long)]
    pub workspace_fqn: Option<String>,

    /// Block until the rollout reaches a terminal state
    #[arg(long)]
    pub wait: bool,

    /// Print the manifest JSON instead of submitting it
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Resolves what to deploy, where, and whether to wait.
    ///
    /// Command-line flags win over the manifest's `[deploy]` section.
    pub fn plan(&self) -> Result<DeployPlan> {
        let (service, manifest_fqn, manifest_wait) = match &self.manifest {
            Some(path) => {
                tracing::info!("📁 Loading service manifest from: {}", path.display());
                let manifest = ServiceManifest::from_file(path)?;
                (
                    manifest.service,
                    manifest.deploy.workspace_fqn,
                    manifest.deploy.wait,
                )
            }
            None => (fast_mcp_service(), None, false),
        };

        let workspace_fqn = self
            .workspace_fqn
            .clone()
            .or(manifest_fqn)
            .unwrap_or_else(|| FAST_MCP_WORKSPACE_FQN.to_string());

        Ok(DeployPlan {
            service,
            workspace_fqn,
            wait: self.wait || manifest_wait,
        })
    }

    /// With `--dry-run`, the manifest to print instead of deploying.
    ///
    /// Only the plan is resolved; no platform settings are read.
    pub fn dry_run_manifest(&self) -> Result<Option<String>> {
        if !self.dry_run {
            return Ok(None);
        }
        self.plan()?.render_manifest().map(Some)
    }
}
