use crate::domain::model::{
    AppProtocol, Build, BuildSource, BuildSpec, DockerFileBuild, Image, LocalSource, Node,
    NodeSelector, Port, Protocol, Resources, Service,
};
use std::collections::BTreeMap;

pub const FAST_MCP_WORKSPACE_FQN: &str = "tfy-ea-dev-eo-az:rishi-ws";

/// The `fast-mcp` service: built from the local Dockerfile and served at
/// `ml.tfy-eo.truefoundry.cloud/fast-mcp-rishi-ws-8096/`.
pub fn fast_mcp_service() -> Service {
    Service {
        name: "fast-mcp".to_string(),
        image: Image::Build(Build {
            build_source: BuildSource::Local(LocalSource::default()),
            build_spec: BuildSpec::Dockerfile(DockerFileBuild {
                dockerfile_path: "./Dockerfile".to_string(),
                build_context_path: "./".to_string(),
                build_args: BTreeMap::new(),
            }),
        }),
        resources: Resources {
            cpu_request: 0.5,
            cpu_limit: 0.5,
            memory_request: 1000,
            memory_limit: 1000,
            ephemeral_storage_request: 500,
            ephemeral_storage_limit: 500,
            node: Some(Node::NodeSelector(NodeSelector::default())),
        },
        ports: vec![Port {
            port: 8096,
            protocol: Protocol::Tcp,
            expose: true,
            app_protocol: AppProtocol::Http,
            host: Some("ml.tfy-eo.truefoundry.cloud".to_string()),
            path: Some("/fast-mcp-rishi-ws-8096/".to_string()),
        }],
        replicas: 1.0,
        env: BTreeMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::{validate_workspace_fqn, Validate};

    #[test]
    fn test_fast_mcp_name() {
        assert_eq!(fast_mcp_service().name, "fast-mcp");
    }

    #[test]
    fn test_fast_mcp_single_http_port() {
        let service = fast_mcp_service();
        assert_eq!(service.ports.len(), 1);

        let port = &service.ports[0];
        assert_eq!(port.port, 8096);
        assert_eq!(port.protocol, Protocol::Tcp);
        assert_eq!(port.protocol.to_string(), "TCP");
        assert!(port.expose);
        assert_eq!(port.app_protocol.to_string(), "http");
        assert_eq!(port.host.as_deref(), Some("ml.tfy-eo.truefoundry.cloud"));
        assert_eq!(port.path.as_deref(), Some("/fast-mcp-rishi-ws-8096/"));
    }

    #[test]
    fn test_fast_mcp_resources() {
        let resources = fast_mcp_service().resources;
        assert_eq!(resources.cpu_request, 0.5);
        assert_eq!(resources.cpu_limit, 0.5);
        assert_eq!(resources.memory_request, 1000);
        assert_eq!(resources.memory_limit, 1000);
        assert_eq!(resources.ephemeral_storage_request, 500);
        assert_eq!(resources.ephemeral_storage_limit, 500);
    }

    #[test]
    fn test_fast_mcp_replicas() {
        assert_eq!(fast_mcp_service().replicas, 1.0);
    }

    #[test]
    fn test_fast_mcp_builds_from_local_dockerfile() {
        let Image::Build(build) = fast_mcp_service().image else {
            panic!("expected a build image");
        };
        let BuildSource::Local(source) = build.build_source;
        assert!(source.local_build);

        let BuildSpec::Dockerfile(spec) = build.build_spec;
        assert_eq!(spec.dockerfile_path, "./Dockerfile");
        assert_eq!(spec.build_context_path, "./");
    }

    #[test]
    fn test_fast_mcp_passes_client_validation() {
        assert!(fast_mcp_service().validate().is_ok());
        assert!(validate_workspace_fqn("workspace_fqn", FAST_MCP_WORKSPACE_FQN).is_ok());
    }
}
