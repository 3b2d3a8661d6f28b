use crate::utils::error::{DeployError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// A long-running containerized service as the control plane understands it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub image: Image,
    pub resources: Resources,
    pub ports: Vec<Port>,
    pub replicas: f64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// Where the container image comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Image {
    /// Built by the platform from source.
    Build(Build),
    /// A prebuilt image pulled as-is.
    Image(ImageRef),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub build_source: BuildSource,
    pub build_spec: BuildSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub image_uri: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildSource {
    Local(LocalSource),
}

/// The directory the deploy command is run from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalSource {
    pub project_root_path: String,
    pub local_build: bool,
}

impl Default for LocalSource {
    fn default() -> Self {
        Self {
            project_root_path: "./".to_string(),
            local_build: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuildSpec {
    Dockerfile(DockerFileBuild),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockerFileBuild {
    pub dockerfile_path: String,
    pub build_context_path: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub build_args: BTreeMap<String, String>,
}

/// CPU is in cores, memory and ephemeral storage in MB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub cpu_request: f64,
    pub cpu_limit: f64,
    pub memory_request: u32,
    pub memory_limit: u32,
    pub ephemeral_storage_request: u32,
    pub ephemeral_storage_limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<Node>,
}

/// Node placement constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    NodeSelector(NodeSelector),
    NodepoolSelector(NodepoolSelector),
}

/// An empty selector lets the platform pick any node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_families: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_type: Option<CapacityType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodepoolSelector {
    #[serde(default)]
    pub nodepools: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityType {
    OnDemand,
    SpotFallbackOnDemand,
    Spot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub port: u16,
    pub protocol: Protocol,
    pub expose: bool,
    pub app_protocol: AppProtocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Tcp,
    Udp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppProtocol {
    Http,
    Grpc,
    Tcp,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Tcp => write!(f, "TCP"),
            Protocol::Udp => write!(f, "UDP"),
        }
    }
}

impl std::fmt::Display for AppProtocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppProtocol::Http => write!(f, "http"),
            AppProtocol::Grpc => write!(f, "grpc"),
            AppProtocol::Tcp => write!(f, "tcp"),
        }
    }
}

impl Validate for Service {
    fn validate(&self) -> Result<()> {
        validation::validate_resource_name("name", &self.name)?;
        self.image.validate()?;
        self.resources.validate()?;

        let mut seen = HashSet::new();
        for (index, port) in self.ports.iter().enumerate() {
            port.validate().map_err(|e| match e {
                DeployError::InvalidConfigValueError {
                    field,
                    value,
                    reason,
                } => DeployError::InvalidConfigValueError {
                    field: format!("ports[{}].{}", index, field),
                    value,
                    reason,
                },
                other => other,
            })?;
            if !seen.insert(port.port) {
                return Err(DeployError::invalid_value(
                    format!("ports[{}].port", index),
                    port.port,
                    "Port is declared more than once",
                ));
            }
        }

        if !self.replicas.is_finite() || self.replicas < 0.0 {
            return Err(DeployError::invalid_value(
                "replicas",
                self.replicas,
                "Replicas must be a non-negative number",
            ));
        }
        Ok(())
    }
}

impl Validate for Image {
    fn validate(&self) -> Result<()> {
        match self {
            Image::Build(build) => {
                let BuildSpec::Dockerfile(spec) = &build.build_spec;
                validation::validate_non_empty_string(
                    "image.build_spec.dockerfile_path",
                    &spec.dockerfile_path,
                )?;
                validation::validate_non_empty_string(
                    "image.build_spec.build_context_path",
                    &spec.build_context_path,
                )
            }
            Image::Image(image) => {
                validation::validate_non_empty_string("image.image_uri", &image.image_uri)
            }
        }
    }
}

impl Validate for Resources {
    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("resources.cpu_request", self.cpu_request),
            ("resources.cpu_limit", self.cpu_limit),
        ] {
            if !value.is_finite() {
                return Err(DeployError::invalid_value(
                    field,
                    value,
                    "CPU must be a finite number",
                ));
            }
        }
        if self.cpu_limit <= 0.0 {
            return Err(DeployError::invalid_value(
                "resources.cpu_limit",
                self.cpu_limit,
                "CPU limit must be greater than zero",
            ));
        }
        validation::validate_request_limit("resources.cpu", self.cpu_request, self.cpu_limit)?;
        validation::validate_request_limit(
            "resources.memory",
            self.memory_request,
            self.memory_limit,
        )?;
        validation::validate_request_limit(
            "resources.ephemeral_storage",
            self.ephemeral_storage_request,
            self.ephemeral_storage_limit,
        )
    }
}

impl Validate for Port {
    fn validate(&self) -> Result<()> {
        validation::validate_range("port", self.port, 1, u16::MAX)?;

        if let Some(host) = &self.host {
            validation::validate_hostname("host", host)?;
        }
        if let Some(path) = &self.path {
            if self.host.is_none() {
                return Err(DeployError::invalid_value(
                    "path",
                    path,
                    "A path prefix requires a host",
                ));
            }
            validation::validate_path_prefix("path", path)?;
        }
        Ok(())
    }
}
