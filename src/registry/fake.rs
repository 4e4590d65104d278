use std::{collections::BTreeMap, sync::Mutex};

use async_trait::async_trait;

use super::{ServiceRegistry, types::ServiceRegistration};
use crate::error::{OrchestratorError, Result};

/// Records registrations in memory. Registration fails for any service
/// whose name starts with `fail_prefix`.
#[derive(Default)]
pub struct FakeRegistry {
    pub fail_prefix: Option<String>,
    pub registered: Mutex<BTreeMap<String, ServiceRegistration>>,
    pub deregistered: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn failing_for(prefix: &str) -> Self {
        FakeRegistry {
            fail_prefix: Some(prefix.to_string()),
            ..FakeRegistry::default()
        }
    }

    /// Registered services whose ID mentions `short_id`.
    pub fn services_for(&self, short_id: &str) -> Vec<ServiceRegistration> {
        self.registered
            .lock()
            .unwrap()
            .values()
            .filter(|registration| registration.id.contains(short_id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ServiceRegistry for FakeRegistry {
    async fn register(&self, registration: &ServiceRegistration) -> Result<()> {
        if let Some(prefix) = &self.fail_prefix {
            if registration.name.starts_with(prefix.as_str()) {
                return Err(OrchestratorError::Registration {
                    service: registration.id.clone(),
                    message: "status: 500 Internal Server Error".to_string(),
                });
            }
        }
        self.registered
            .lock()
            .unwrap()
            .insert(registration.id.clone(), registration.clone());
        Ok(())
    }

    async fn deregister(&self, service_id: &str) -> Result<()> {
        self.registered.lock().unwrap().remove(service_id);
        self.deregistered
            .lock()
            .unwrap()
            .push(service_id.to_string());
        Ok(())
    }
}
