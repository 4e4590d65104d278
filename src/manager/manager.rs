use std::sync::Arc;

use tracing::{error, info, warn};

use super::{
    job::ProvisionJob,
    types::{ContainerRequest, Manager, ProvisionSettings, Submission},
};
use crate::{
    catalog::{self, ImageInfo},
    error::{OrchestratorError, Result},
    registry::ServiceRegistry,
    status::StatusStore,
    tasks::{
        docker::ContainerRuntime,
        types::{ContainerStatus, JobId, ShortId},
    },
};

impl Manager {
    pub fn new(
        runtime: Arc<dyn ContainerRuntime>,
        registry: Arc<dyn ServiceRegistry>,
        store: Arc<dyn StatusStore>,
        settings: ProvisionSettings,
    ) -> Self {
        Manager {
            runtime,
            registry,
            store,
            settings: Arc::new(settings),
        }
    }

    /// Validates the image, records the job as `Initializing` and spawns the
    /// provisioning work without waiting for it. Only an unknown image is
    /// reported here; every later failure lands in the status record.
    pub fn submit(&self, request: ContainerRequest) -> Result<Submission> {
        let image = catalog::lookup(&request.image_id)?;

        let (job_id, short_id) = loop {
            let job_id = JobId::generate();
            let short_id = job_id.short();
            if self
                .store
                .insert(ContainerStatus::initializing(short_id.clone()))
            {
                break (job_id, short_id);
            }
            warn!(short_id = %short_id, "short ID collision, regenerating");
        };

        info!(short_id = %short_id, image = image.id, "accepted provisioning request");

        let job = ProvisionJob {
            job_id,
            short_id: short_id.clone(),
            image,
            vnc: request.vnc_config.unwrap_or_default(),
            runtime: self.runtime.clone(),
            registry: self.registry.clone(),
            store: self.store.clone(),
            settings: self.settings.clone(),
        };
        tokio::spawn(job.run());

        Ok(Submission {
            container_id: short_id.to_string(),
            status_url: format!("/containers/{short_id}/status"),
        })
    }

    pub fn status(&self, id: &str) -> Result<ContainerStatus> {
        ShortId::parse(id)
            .and_then(|short_id| self.store.get(&short_id))
            .ok_or_else(|| OrchestratorError::RecordNotFound(id.to_string()))
    }

    pub fn images(&self) -> &'static [ImageInfo] {
        catalog::list()
    }

    /// Sends SIGKILL to `container` (an engine ID or name). The status record
    /// is left to the event reconciler.
    pub async fn kill(&self, container: &str) -> Result<()> {
        match self.runtime.kill(container).await {
            Ok(()) => {
                info!(container, "container killed");
                Ok(())
            }
            Err(err) => {
                error!(container, error = %err, "kill failed");
                Err(err)
            }
        }
    }
}
