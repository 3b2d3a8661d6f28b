use crate::domain::model::Service;
use crate::domain::ports::{DeployClient, Deployment};
use crate::utils::error::Result;
use crate::utils::validation::{validate_workspace_fqn, Validate};

/// Runs one submission of a service descriptor through a [`DeployClient`].
pub struct Deployer<C: DeployClient> {
    client: C,
}

impl<C: DeployClient> Deployer<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub async fn run(
        &self,
        service: &Service,
        workspace_fqn: &str,
        wait: bool,
    ) -> Result<Deployment> {
        validate_workspace_fqn("workspace_fqn", workspace_fqn)?;
        service.validate()?;

        tracing::info!(
            "🚀 Deploying service '{}' to workspace {} ({} port(s), {} replica(s))",
            service.name,
            workspace_fqn,
            service.ports.len(),
            service.replicas
        );
        for port in &service.ports {
            tracing::debug!(
                "Port {}/{} expose={} app_protocol={} host={:?} path={:?}",
                port.port,
                port.protocol,
                port.expose,
                port.app_protocol,
                port.host,
                port.path
            );
        }

        let deployment = self.client.deploy(service, workspace_fqn, wait).await?;

        if wait {
            tracing::info!(
                "✅ Deployment {} finished with status {}",
                deployment.id,
                deployment.status
            );
        } else {
            tracing::info!(
                "📨 Deployment {} accepted (application {}), not waiting for rollout",
                deployment.id,
                deployment.application_id
            );
        }

        Ok(deployment)
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}
