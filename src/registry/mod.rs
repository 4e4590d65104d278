//! Service discovery client.

pub mod consul;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

pub use consul::ConsulClient;
pub use types::{ServiceCheck, ServiceRegistration};

use crate::error::Result;

#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// Upserts one service with its health check.
    async fn register(&self, registration: &ServiceRegistration) -> Result<()>;

    async fn deregister(&self, service_id: &str) -> Result<()>;
}
