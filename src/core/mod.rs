pub mod deploy;
pub mod descriptor;

pub use crate::domain::model::Service;
pub use crate::domain::ports::{DeployClient, Deployment, DeploymentStatus};
pub use crate::utils::error::Result;
