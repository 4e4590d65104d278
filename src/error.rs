//! Error types for the orchestrator

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("invalid image ID: {0}")]
    InvalidImageId(String),

    #[error("failed to pull image {image}: {message}")]
    ImagePull { image: String, message: String },

    #[error("failed to create container: {0}")]
    ContainerCreate(String),

    #[error("failed to start container {container}: {message}")]
    ContainerStart { container: String, message: String },

    #[error("failed to inspect container {container}: {message}")]
    Inspect { container: String, message: String },

    #[error("unable to register with service discovery: {service}: {message}")]
    Registration { service: String, message: String },

    #[error("failed to kill container {container}: {message}")]
    Kill { container: String, message: String },

    #[error("container {0} not found")]
    RecordNotFound(String),

    #[error("failed to remove container {container}: {message}")]
    Remove { container: String, message: String },

    #[error("failed to deregister service {service}: {message}")]
    Deregistration { service: String, message: String },

    #[error("docker connection failed: {0}")]
    DockerConnect(String),

    #[error("failed to prepare network {network}: {message}")]
    Network { network: String, message: String },

    #[error("error receiving docker events: {0}")]
    EventStream(String),
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
