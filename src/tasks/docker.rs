use std::collections::HashMap;

use async_trait::async_trait;
use bollard::{
    Docker,
    errors::Error as BollardError,
    models::{
        ContainerCreateBody, EventMessage, EventMessageTypeEnum, HostConfig,
        NetworkCreateRequest, PortBinding,
    },
    query_parameters::{
        CreateContainerOptionsBuilder, CreateImageOptionsBuilder, EventsOptions,
        InspectContainerOptions, InspectNetworkOptions, KillContainerOptionsBuilder,
        RemoveContainerOptionsBuilder, StartContainerOptions,
    },
};
use futures_util::stream::{BoxStream, StreamExt};
use tracing::{debug, info};

use super::types::{ContainerHandle, ContainerSpec, RuntimeEvent, SHORT_ID_LABEL, ShortId};
use crate::error::{OrchestratorError, Result};

/// Adapter over the container engine. Every engine error is translated into
/// an [`OrchestratorError`] at this boundary.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Pulls `reference` unless it is already present locally.
    async fn ensure_image(&self, reference: &str) -> Result<()>;

    async fn create(&self, spec: &ContainerSpec) -> Result<ContainerHandle>;

    async fn start(&self, handle: &ContainerHandle) -> Result<()>;

    /// IP address of the container on its shared network.
    async fn inspect_address(&self, handle: &ContainerHandle) -> Result<String>;

    /// Force removal. A container that is already gone counts as removed.
    async fn remove(&self, handle: &ContainerHandle) -> Result<()>;

    async fn kill(&self, container: &str) -> Result<()>;

    /// Container lifecycle events, in engine order.
    fn events(&self) -> BoxStream<'_, Result<RuntimeEvent>>;
}

#[derive(Debug, Clone)]
pub struct DockerClient {
    pub client: Docker,
}

fn is_not_found_error(error: &BollardError) -> bool {
    matches!(
        error,
        BollardError::DockerResponseServerError {
            status_code: 404,
            ..
        }
    )
}

fn split_reference(reference: &str) -> (&str, &str) {
    match reference.rsplit_once(':') {
        Some((image, tag)) if !tag.contains('/') => (image, tag),
        _ => (reference, "latest"),
    }
}

pub(crate) fn translate_event(message: EventMessage) -> Option<RuntimeEvent> {
    if message.typ != Some(EventMessageTypeEnum::CONTAINER) {
        return None;
    }
    let action = message.action?;
    let actor = message.actor?;
    let short_id = actor
        .attributes
        .as_ref()
        .and_then(|attributes| attributes.get(SHORT_ID_LABEL))
        .and_then(|value| ShortId::parse(value));

    Some(RuntimeEvent {
        action,
        actor_id: actor.id.unwrap_or_default(),
        short_id,
    })
}

impl DockerClient {
    pub fn new() -> Result<Self> {
        let client = Docker::connect_with_local_defaults()
            .map_err(|e| OrchestratorError::DockerConnect(e.to_string()))?;
        Ok(DockerClient { client })
    }

    /// Creates the shared bridge network when it does not exist yet.
    pub async fn ensure_network(&self, name: &str) -> Result<()> {
        let network_error = |e: BollardError| OrchestratorError::Network {
            network: name.to_string(),
            message: e.to_string(),
        };

        match self
            .client
            .inspect_network(name, None::<InspectNetworkOptions>)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if is_not_found_error(&e) => {
                self.client
                    .create_network(NetworkCreateRequest {
                        name: name.to_string(),
                        driver: Some("bridge".to_string()),
                        ..Default::default()
                    })
                    .await
                    .map_err(network_error)?;
                info!(network = name, "created docker network");
                Ok(())
            }
            Err(e) => Err(network_error(e)),
        }
    }
}

#[async_trait]
impl ContainerRuntime for DockerClient {
    async fn ensure_image(&self, reference: &str) -> Result<()> {
        if self.client.inspect_image(reference).await.is_ok() {
            return Ok(());
        }

        info!(image = reference, "pulling image");
        let (from_image, tag) = split_reference(reference);
        let mut stream = self.client.create_image(
            Some(
                CreateImageOptionsBuilder::new()
                    .from_image(from_image)
                    .tag(tag)
                    .build(),
            ),
            None,
            None,
        );

        while let Some(msg) = stream.next().await {
            match msg {
                Ok(info) => {
                    if let Some(status) = info.status {
                        debug!(image = reference, %status, "pull progress");
                    }
                }
                Err(e) => {
                    return Err(OrchestratorError::ImagePull {
                        image: reference.to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        info!(image = reference, "image pulled");
        Ok(())
    }

    async fn create(&self, spec: &ContainerSpec) -> Result<ContainerHandle> {
        let ports: Vec<String> = spec
            .exposed_ports
            .iter()
            .map(|port| format!("{port}/tcp"))
            .collect();

        // An empty host port asks the engine for an ephemeral one.
        let host_config = HostConfig {
            port_bindings: Some(
                ports
                    .iter()
                    .map(|port| {
                        (
                            port.clone(),
                            Some(vec![PortBinding {
                                host_ip: None,
                                host_port: Some(String::new()),
                            }]),
                        )
                    })
                    .collect(),
            ),
            network_mode: Some(spec.network.clone()),
            ..Default::default()
        };

        let container_config = ContainerCreateBody {
            image: Some(spec.image.clone()),
            env: Some(spec.env.clone()),
            exposed_ports: Some(
                ports
                    .into_iter()
                    .map(|port| (port, HashMap::new()))
                    .collect(),
            ),
            labels: Some(spec.labels.clone()),
            host_config: Some(host_config),
            ..Default::default()
        };

        let options = CreateContainerOptionsBuilder::new()
            .name(&spec.name)
            .build();

        let resp = self
            .client
            .create_container(Some(options), container_config)
            .await
            .map_err(|e| OrchestratorError::ContainerCreate(e.to_string()))?;

        info!(container = %resp.id, name = %spec.name, "container created");
        Ok(ContainerHandle {
            id: resp.id,
            network: spec.network.clone(),
        })
    }

    async fn start(&self, handle: &ContainerHandle) -> Result<()> {
        self.client
            .start_container(&handle.id, None::<StartContainerOptions>)
            .await
            .map_err(|e| OrchestratorError::ContainerStart {
                container: handle.id.clone(),
                message: e.to_string(),
            })?;
        info!(container = %handle.id, "container started");
        Ok(())
    }

    async fn inspect_address(&self, handle: &ContainerHandle) -> Result<String> {
        let inspect_error = |message: String| OrchestratorError::Inspect {
            container: handle.id.clone(),
            message,
        };

        let inspect = self
            .client
            .inspect_container(&handle.id, None::<InspectContainerOptions>)
            .await
            .map_err(|e| inspect_error(e.to_string()))?;

        inspect
            .network_settings
            .and_then(|settings| settings.networks)
            .and_then(|mut networks| networks.remove(&handle.network))
            .and_then(|endpoint| endpoint.ip_address)
            .filter(|ip| !ip.is_empty())
            .ok_or_else(|| inspect_error(format!("no IP address on network {}", handle.network)))
    }

    async fn remove(&self, handle: &ContainerHandle) -> Result<()> {
        match self
            .client
            .remove_container(
                &handle.id,
                Some(RemoveContainerOptionsBuilder::new().force(true).build()),
            )
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if is_not_found_error(&e) => Ok(()),
            Err(e) => Err(OrchestratorError::Remove {
                container: handle.id.clone(),
                message: e.to_string(),
            }),
        }
    }

    async fn kill(&self, container: &str) -> Result<()> {
        self.client
            .kill_container(
                container,
                Some(KillContainerOptionsBuilder::new().signal("SIGKILL").build()),
            )
            .await
            .map_err(|e| OrchestratorError::Kill {
                container: container.to_string(),
                message: e.to_string(),
            })
    }

    fn events(&self) -> BoxStream<'_, Result<RuntimeEvent>> {
        let options = EventsOptions {
            filters: Some(HashMap::from([(
                "type".to_string(),
                vec!["container".to_string()],
            )])),
            ..Default::default()
        };

        self.client
            .events(Some(options))
            .filter_map(|message| async move {
                match message {
                    Ok(message) => translate_event(message).map(Ok),
                    Err(e) => Some(Err(OrchestratorError::EventStream(e.to_string()))),
                }
            })
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use bollard::models::EventActor;

    use super::*;

    fn container_event(action: &str, label: Option<&str>) -> EventMessage {
        EventMessage {
            typ: Some(EventMessageTypeEnum::CONTAINER),
            action: Some(action.to_string()),
            actor: Some(EventActor {
                id: Some("f00dfeedbeef0123456789".to_string()),
                attributes: label.map(|value| {
                    HashMap::from([(SHORT_ID_LABEL.to_string(), value.to_string())])
                }),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn split_reference_defaults_to_latest() {
        assert_eq!(
            split_reference("accetto/ubuntu-vnc-xfce-g3"),
            ("accetto/ubuntu-vnc-xfce-g3", "latest")
        );
        assert_eq!(split_reference("redis:7"), ("redis", "7"));
        assert_eq!(
            split_reference("registry:5000/desk"),
            ("registry:5000/desk", "latest")
        );
    }

    #[test]
    fn translate_event_reads_correlation_label() {
        let event = translate_event(container_event("die", Some("abc123def456"))).unwrap();
        assert_eq!(event.action, "die");
        assert_eq!(event.short_id, ShortId::parse("abc123def456"));
    }

    #[test]
    fn translate_event_keeps_unlabelled_containers_uncorrelated() {
        let event = translate_event(container_event("stop", None)).unwrap();
        assert_eq!(event.short_id, None);
    }

    #[test]
    fn translate_event_skips_non_container_events() {
        let mut message = container_event("die", Some("abc123def456"));
        message.typ = Some(EventMessageTypeEnum::NETWORK);
        assert!(translate_event(message).is_none());
    }
}
