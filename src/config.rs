//! Command line and environment configuration

use clap::{Parser, ValueEnum};

use crate::{registry::consul::DEFAULT_CONSUL_ADDR, tasks::vnc::VncConfig};

/// Which services each sandbox exposes through discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EndpointProfile {
    /// noVNC and raw VNC only
    Vnc,
    /// noVNC, raw VNC and the chat command API
    Full,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "sandbox-orchestrator")]
#[command(author, version, about = "Provision VNC sandbox containers on demand", long_about = None)]
pub struct Args {
    /// Address the HTTP API listens on
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8090")]
    pub listen: String,

    /// Docker network shared by every sandbox and the router
    #[arg(long, env = "ORCHESTRATOR_NETWORK", default_value = "fabio_network")]
    pub network: String,

    /// Consul agent address
    #[arg(long, env = "FABIO_REGISTRY_CONSUL_ADDR", default_value = DEFAULT_CONSUL_ADDR)]
    pub consul_addr: String,

    /// Serve the Swagger UI with a relative document URL
    #[arg(long, env = "BEHIND_PROXY")]
    pub behind_proxy: bool,

    #[arg(long, env = "ENDPOINT_PROFILE", value_enum, default_value_t = EndpointProfile::Full)]
    pub profile: EndpointProfile,

    /// Consul health check interval
    #[arg(long, env = "HEALTH_CHECK_INTERVAL", default_value = "10s")]
    pub check_interval: String,

    /// Default VNC password. A random one is generated per sandbox when unset
    #[arg(long, env = "VNC_PASSWORD")]
    pub vnc_password: Option<String>,

    #[arg(long, env = "VNC_RESOLUTION", default_value = "1360x768")]
    pub vnc_resolution: String,

    #[arg(long, env = "VNC_COL_DEPTH", default_value = "24")]
    pub vnc_col_depth: u32,

    #[arg(long, env = "VNC_VIEW_ONLY")]
    pub vnc_view_only: bool,

    #[arg(long, env = "VNC_DISPLAY", default_value = ":1")]
    pub vnc_display: String,
}

impl Args {
    pub fn default_vnc_config(&self) -> VncConfig {
        VncConfig {
            password: self.vnc_password.clone(),
            resolution: Some(self.vnc_resolution.clone()),
            col_depth: Some(self.vnc_col_depth),
            view_only: Some(self.vnc_view_only),
            display: Some(self.vnc_display.clone()),
        }
    }
}
