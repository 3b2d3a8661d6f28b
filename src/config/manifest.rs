use crate::domain::model::Service;
use crate::utils::error::{DeployError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A service descriptor stored as TOML.
///
/// ```toml
/// [deploy]
/// workspace_fqn = "cluster:workspace"
///
/// [service]
/// name = "my-service"
/// # ...
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceManifest {
    #[serde(default)]
    pub deploy: DeploySection,
    pub service: Service,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploySection {
    pub workspace_fqn: Option<String>,
    #[serde(default)]
    pub wait: bool,
}

impl ServiceManifest {
    /// 從 TOML 檔案載入
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeployError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DeployError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DeployError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for ServiceManifest {
    fn validate(&self) -> Result<()> {
        if let Some(fqn) = &self.deploy.workspace_fqn {
            validation::validate_workspace_fqn("deploy.workspace_fqn", fqn)?;
        }
        self.service.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AppProtocol, Image, Node, Protocol};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FAST_MCP_TOML: &str = r#"
[deploy]
workspace_fqn = "tfy-ea-dev-eo-az:rishi-ws"

[service]
name = "fast-mcp"
replicas = 1

[service.image]
type = "build"

[service.image.build_source]
type = "local"
project_root_path = "./"
local_build = true

[service.image.build_spec]
type = "dockerfile"
dockerfile_path = "./Dockerfile"
build_context_path = "./"

[service.resources]
cpu_request = 0.5
cpu_limit = 0.5
memory_request = 1000
memory_limit = 1000
ephemeral_storage_request = 500
ephemeral_storage_limit = 500

[service.resources.node]
type = "node_selector"

[[service.ports]]
port = 8096
protocol = "TCP"
expose = true
app_protocol = "http"
host = "ml.tfy-eo.truefoundry.cloud"
path = "/fast-mcp-rishi-ws-8096/"
"#;

    #[test]
    fn test_parse_service_manifest() {
        let manifest = ServiceManifest::from_toml_str(FAST_MCP_TOML).unwrap();

        assert_eq!(
            manifest.deploy.workspace_fqn.as_deref(),
            Some("tfy-ea-dev-eo-az:rishi-ws")
        );
        assert!(!manifest.deploy.wait);

        let service = &manifest.service;
        assert_eq!(service.name, "fast-mcp");
        assert_eq!(service.replicas, 1.0);
        assert!(matches!(service.image, Image::Build(_)));
        assert!(matches!(
            service.resources.node,
            Some(Node::NodeSelector(_))
        ));
        assert_eq!(service.ports[0].protocol, Protocol::Tcp);
        assert_eq!(service.ports[0].app_protocol, AppProtocol::Http);
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_matches_built_in_descriptor() {
        let manifest = ServiceManifest::from_toml_str(FAST_MCP_TOML).unwrap();
        assert_eq!(manifest.service, crate::core::descriptor::fast_mcp_service());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SERVICE_DEPLOY_TEST_IMAGE", "nginx:1.27");

        let toml_content = r#"
[service]
name = "web-app"
replicas = 2
ports = []

[service.image]
type = "image"
image_uri = "${SERVICE_DEPLOY_TEST_IMAGE}"

[service.resources]
cpu_request = 0.1
cpu_limit = 0.2
memory_request = 128
memory_limit = 256
ephemeral_storage_request = 100
ephemeral_storage_limit = 200
"#;

        let manifest = ServiceManifest::from_toml_str(toml_content).unwrap();
        match &manifest.service.image {
            Image::Image(image) => assert_eq!(image.image_uri, "nginx:1.27"),
            other => panic!("expected prebuilt image, got {:?}", other),
        }
        assert!(manifest.deploy.workspace_fqn.is_none());

        std::env::remove_var("SERVICE_DEPLOY_TEST_IMAGE");
    }

    #[test]
    fn test_unknown_protocol_is_a_parse_error() {
        let broken = FAST_MCP_TOML.replace("protocol = \"TCP\"", "protocol = \"SCTP\"");

        match ServiceManifest::from_toml_str(&broken) {
            Err(DeployError::ConfigValidationError { field, .. }) => {
                assert_eq!(field, "toml_parsing")
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_and_inf_cpu_fail_validation() {
        let broken = FAST_MCP_TOML
            .replace("cpu_request = 0.5", "cpu_request = nan")
            .replace("cpu_limit = 0.5", "cpu_limit = inf");
        let manifest = ServiceManifest::from_toml_str(&broken).unwrap();

        assert!(manifest.service.resources.cpu_request.is_nan());
        match manifest.validate() {
            Err(DeployError::InvalidConfigValueError { field, .. }) => {
                assert_eq!(field, "resources.cpu_request")
            }
            other => panic!("expected cpu error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_workspace_fails_validation() {
        let broken = FAST_MCP_TOML.replace("tfy-ea-dev-eo-az:rishi-ws", "rishi-ws");
        let manifest = ServiceManifest::from_toml_str(&broken).unwrap();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_manifest_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(FAST_MCP_TOML.as_bytes()).unwrap();

        let manifest = ServiceManifest::from_file(temp_file.path()).unwrap();
        assert_eq!(manifest.service.name, "fast-mcp");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ServiceManifest::from_file("/nonexistent/service.toml");
        assert!(matches!(result, Err(DeployError::IoError(_))));
    }
}
