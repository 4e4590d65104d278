pub mod job;
#[allow(clippy::module_inception)]
pub mod manager;
pub mod types;

pub use types::{ContainerRequest, Manager, ProvisionSettings, Submission};
