use std::{collections::HashMap, sync::Arc};

use tracing::{error, info, instrument, warn};

use super::types::{CHAT_API_PORT, NOVNC_PORT, ProvisionSettings, VNC_PORT};
use crate::{
    catalog::ImageInfo,
    config::EndpointProfile,
    error::Result,
    registry::{ServiceRegistration, ServiceRegistry},
    status::StatusStore,
    tasks::{
        docker::ContainerRuntime,
        state::valid_state_transition,
        types::{
            ContainerEndpoints, ContainerHandle, ContainerSpec, ContainerStatus, JobId,
            SHORT_ID_LABEL, ShortId, State,
        },
        vnc::{self, RuntimeEnv, VncConfig},
    },
};

/// Resources a job has acquired so far, released in reverse on failure.
#[derive(Debug, Default)]
struct Acquired {
    container: Option<ContainerHandle>,
    services: Vec<String>,
}

/// One accepted request, driven from `Initializing` to a terminal state.
pub struct ProvisionJob {
    pub job_id: JobId,
    pub short_id: ShortId,
    pub image: &'static ImageInfo,
    pub vnc: VncConfig,
    pub runtime: Arc<dyn ContainerRuntime>,
    pub registry: Arc<dyn ServiceRegistry>,
    pub store: Arc<dyn StatusStore>,
    pub settings: Arc<ProvisionSettings>,
}

/// Services registered for one sandbox, in registration order.
pub fn endpoint_set(
    short_id: &ShortId,
    address: &str,
    profile: EndpointProfile,
    interval: &str,
) -> Vec<ServiceRegistration> {
    let mut services = Vec::with_capacity(3);
    if profile == EndpointProfile::Full {
        services.push(ServiceRegistration::http(
            format!("chat-api-{short_id}"),
            address,
            CHAT_API_PORT,
            format!("urlprefix-/{short_id}/chat/"),
            interval,
        ));
    }
    services.push(ServiceRegistration::tcp(
        format!("novnc-{short_id}"),
        address,
        NOVNC_PORT,
        format!("urlprefix-/{short_id}/novnc/"),
        interval,
    ));
    services.push(ServiceRegistration::tcp(
        format!("vnc-{short_id}"),
        address,
        VNC_PORT,
        format!("urlprefix-/{short_id}/vnc/"),
        interval,
    ));
    services
}

pub fn endpoints(short_id: &ShortId, password: &str, profile: EndpointProfile) -> ContainerEndpoints {
    ContainerEndpoints {
        container_id: short_id.to_string(),
        chat_api_path: (profile == EndpointProfile::Full).then(|| format!("/{short_id}/chat/")),
        novnc_path: format!("/{short_id}/novnc/vnc_lite.html?password={password}"),
        vnc_path: format!("/{short_id}/novnc/vnc.html?password={password}"),
    }
}

impl ProvisionJob {
    #[instrument(name = "provision", skip_all, fields(short_id = %self.short_id, image = self.image.id))]
    pub async fn run(self) {
        let mut acquired = Acquired::default();

        match self.provision(&mut acquired).await {
            Ok(endpoints) => {
                let applied = self.transition(State::Ready, |record| {
                    record.message = "Container is ready".to_string();
                    record.endpoints = Some(endpoints);
                });
                if applied {
                    info!("container is ready");
                } else {
                    // The reconciler dropped the record: the container is gone.
                    warn!("container went away before it was ready, releasing resources");
                    self.rollback(acquired).await;
                }
            }
            Err(err) => {
                error!(error = %err, "container creation failed");
                self.transition(State::Failed, |record| {
                    record.message = "Container creation failed".to_string();
                    record.error = Some(err.to_string());
                });
                self.rollback(acquired).await;
            }
        }
    }

    async fn provision(&self, acquired: &mut Acquired) -> Result<ContainerEndpoints> {
        self.runtime.ensure_image(self.image.name).await?;

        let runtime_env = vnc::build(&self.vnc, &self.settings.default_vnc);
        let handle = self.create_and_start(&runtime_env, acquired).await?;
        let address = self.runtime.inspect_address(&handle).await?;
        self.register_endpoints(&address, acquired).await?;

        Ok(endpoints(
            &self.short_id,
            &runtime_env.password,
            self.settings.profile,
        ))
    }

    async fn create_and_start(
        &self,
        runtime_env: &RuntimeEnv,
        acquired: &mut Acquired,
    ) -> Result<ContainerHandle> {
        let spec = ContainerSpec {
            name: format!("sandbox-{}", self.job_id.as_str()),
            image: self.image.name.to_string(),
            env: runtime_env.to_env_list(),
            exposed_ports: self.settings.exposed_ports(),
            network: self.settings.network.clone(),
            labels: HashMap::from([(SHORT_ID_LABEL.to_string(), self.short_id.to_string())]),
        };

        let handle = self.runtime.create(&spec).await?;
        acquired.container = Some(handle.clone());
        self.store.update(&self.short_id, &mut |record| {
            if record.status == State::Initializing {
                record.container = Some(handle.id.clone());
            }
        });

        self.runtime.start(&handle).await?;
        Ok(handle)
    }

    async fn register_endpoints(&self, address: &str, acquired: &mut Acquired) -> Result<()> {
        let services = endpoint_set(
            &self.short_id,
            address,
            self.settings.profile,
            &self.settings.check_interval,
        );

        for service in &services {
            self.registry.register(service).await?;
            acquired.services.push(service.id.clone());
        }

        info!(services = services.len(), "registered services with consul");
        Ok(())
    }

    /// Applies `apply` and moves the record to `next` only when the move is
    /// a legal transition. Returns whether it was applied.
    fn transition(&self, next: State, apply: impl FnOnce(&mut ContainerStatus)) -> bool {
        let mut apply = Some(apply);
        let mut applied = false;
        let found = self.store.update(&self.short_id, &mut |record| {
            if !valid_state_transition(&record.status, &next) {
                return;
            }
            record.status = next;
            if let Some(apply) = apply.take() {
                apply(record);
            }
            applied = true;
        });

        if !found {
            warn!(state = ?next, "status record disappeared before the job finished");
        } else if !applied {
            warn!(state = ?next, "ignoring transition out of a terminal state");
        }
        applied
    }

    async fn rollback(&self, acquired: Acquired) {
        for service in acquired.services.iter().rev() {
            if let Err(err) = self.registry.deregister(service).await {
                warn!(service = %service, error = %err, "rollback: deregistration failed");
            }
        }

        if let Some(handle) = acquired.container {
            match self.runtime.remove(&handle).await {
                Ok(()) => info!(container = %handle.id, "rollback: removed container"),
                Err(err) => warn!(container = %handle.id, error = %err, "rollback: removal failed"),
            }
        }
    }
}

