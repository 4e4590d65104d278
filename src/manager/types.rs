use std::sync::Arc;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    config::{Args, EndpointProfile},
    registry::ServiceRegistry,
    status::StatusStore,
    tasks::{docker::ContainerRuntime, vnc::VncConfig},
};

pub const CHAT_API_PORT: u16 = 8080;
pub const NOVNC_PORT: u16 = 6901;
pub const VNC_PORT: u16 = 5901;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ContainerRequest {
    pub image_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vnc_config: Option<VncConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Submission {
    pub container_id: String,
    pub status_url: String,
}

#[derive(Debug, Clone)]
pub struct ProvisionSettings {
    pub network: String,
    pub profile: EndpointProfile,
    pub check_interval: String,
    pub default_vnc: VncConfig,
}

impl ProvisionSettings {
    pub fn from_args(args: &Args) -> Self {
        ProvisionSettings {
            network: args.network.clone(),
            profile: args.profile,
            check_interval: args.check_interval.clone(),
            default_vnc: args.default_vnc_config(),
        }
    }

    pub fn exposed_ports(&self) -> Vec<u16> {
        match self.profile {
            EndpointProfile::Full => vec![CHAT_API_PORT, NOVNC_PORT, VNC_PORT],
            EndpointProfile::Vnc => vec![NOVNC_PORT, VNC_PORT],
        }
    }
}

impl Default for ProvisionSettings {
    fn default() -> Self {
        ProvisionSettings {
            network: "fabio_network".to_string(),
            profile: EndpointProfile::Full,
            check_interval: "10s".to_string(),
            default_vnc: VncConfig::default(),
        }
    }
}

#[derive(Clone)]
pub struct Manager {
    pub runtime: Arc<dyn ContainerRuntime>,
    pub registry: Arc<dyn ServiceRegistry>,
    pub store: Arc<dyn StatusStore>,
    pub settings: Arc<ProvisionSettings>,
}
