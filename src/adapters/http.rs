use crate::config::platform::PlatformConfig;
use crate::domain::model::Service;
use crate::domain::ports::{DeployClient, Deployment};
use crate::utils::error::{DeployError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use tokio::time::{sleep, Instant};
use url::Url;

const DEPLOYMENT_PATH: &str = "api/svc/v1/deployment";

/// Body of a deployment request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeployRequest<'a> {
    manifest: Manifest<'a>,
    workspace_fqn: &'a str,
    force_deploy: bool,
}

/// Adds the application `"type"` discriminator to the descriptor.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Manifest<'a> {
    Service(&'a Service),
}

/// [`DeployClient`] speaking the control plane's REST API.
pub struct HttpDeployClient {
    config: PlatformConfig,
    client: Client,
}

impl HttpDeployClient {
    pub fn new(config: PlatformConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.host.trim_end_matches('/'), path)
    }

    fn authorized(&self, mut request: RequestBuilder) -> RequestBuilder {
        request = request.bearer_auth(&self.config.api_key);
        if let Some(timeout) = self.config.request_timeout {
            request = request.timeout(timeout);
        }
        request
    }

    /// Encodes `service` exactly as it is sent to the control plane.
    pub fn manifest_json(service: &Service) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(Manifest::Service(service))?)
    }

    async fn submit(&self, service: &Service, workspace_fqn: &str) -> Result<Deployment> {
        let endpoint = self.endpoint(DEPLOYMENT_PATH);
        let body = DeployRequest {
            manifest: Manifest::Service(service),
            workspace_fqn,
            force_deploy: false,
        };

        tracing::debug!("Submitting deployment to: {}", endpoint);
        let response = self
            .authorized(self.client.post(&endpoint))
            .json(&body)
            .send()
            .await?;
        tracing::debug!("Control plane response status: {}", response.status());

        let deployment: Deployment = check_status(response).await?.json().await?;
        Ok(deployment)
    }

    /// Status URL for one deployment; the id is percent-encoded as a single segment.
    pub fn deployment_url(&self, deployment_id: &str) -> Result<Url> {
        let host = &self.config.host;
        let mut url = Url::parse(host).map_err(|e| {
            DeployError::invalid_value("TFY_HOST", host, format!("Invalid URL: {}", e))
        })?;
        url.path_segments_mut()
            .map_err(|_| DeployError::invalid_value("TFY_HOST", host, "URL cannot be a base"))?
            .pop_if_empty()
            .extend(DEPLOYMENT_PATH.split('/'))
            .push(deployment_id);
        Ok(url)
    }

    pub async fn fetch_deployment(&self, deployment_id: &str) -> Result<Deployment> {
        let endpoint = self.deployment_url(deployment_id)?;
        let response = self.authorized(self.client.get(endpoint)).send().await?;
        let deployment: Deployment = check_status(response).await?.json().await?;
        Ok(deployment)
    }

    /// Polls until the deployment reaches a terminal state or the wait budget runs out.
    async fn wait_for_rollout(&self, mut deployment: Deployment) -> Result<Deployment> {
        let started = Instant::now();

        loop {
            if deployment.status.is_terminal() {
                if deployment.status.is_failure() {
                    return Err(DeployError::RolloutFailed {
                        deployment_id: deployment.id,
                        status: deployment.status.to_string(),
                    });
                }
                return Ok(deployment);
            }

            let remaining = self.config.wait_timeout.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                return Err(DeployError::WaitTimeout {
                    deployment_id: deployment.id,
                    waited: started.elapsed(),
                });
            }

            let delay = self.config.poll_interval.min(remaining);
            tracing::info!(
                "⏳ Deployment {} is {}, checking again in {:?}",
                deployment.id,
                deployment.status,
                delay
            );
            sleep(delay).await;
            deployment = self.fetch_deployment(&deployment.id).await?;
        }
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            DeployError::AuthenticationError { message: body }
        }
        StatusCode::TOO_MANY_REQUESTS => DeployError::QuotaExceeded { message: body },
        _ => DeployError::RemoteRejected {
            status: status.as_u16(),
            body,
        },
    })
}

#[async_trait]
impl DeployClient for HttpDeployClient {
    async fn deploy(
        &self,
        service: &Service,
        workspace_fqn: &str,
        wait: bool,
    ) -> Result<Deployment> {
        let deployment = self.submit(service, workspace_fqn).await?;
        if !wait {
            return Ok(deployment);
        }
        self.wait_for_rollout(deployment).await
    }
}
