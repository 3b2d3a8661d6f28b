pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::HttpDeployClient;
pub use config::{manifest::ServiceManifest, platform::PlatformConfig, DeployPlan};
pub use core::deploy::Deployer;
pub use utils::error::{DeployError, Result};
