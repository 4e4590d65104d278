//! Turns a partial VNC session configuration into container environment.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display-session settings. Unset fields fall back to the process defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct VncConfig {
    pub password: Option<String>,
    pub resolution: Option<String>,
    pub col_depth: Option<u32>,
    pub view_only: Option<bool>,
    pub display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEnv {
    pub env: BTreeMap<String, String>,
    pub password: String,
}

impl RuntimeEnv {
    pub fn to_env_list(&self) -> Vec<String> {
        self.env
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

/// 128 bits from the thread-local CSPRNG, hex encoded.
pub fn generate_password() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode(bytes)
}

pub fn build(requested: &VncConfig, defaults: &VncConfig) -> RuntimeEnv {
    let password = non_empty(&requested.password)
        .or_else(|| non_empty(&defaults.password))
        .unwrap_or_else(generate_password);
    let resolution = non_empty(&requested.resolution).or_else(|| non_empty(&defaults.resolution));
    let col_depth = requested
        .col_depth
        .filter(|depth| *depth != 0)
        .or(defaults.col_depth.filter(|depth| *depth != 0));
    let view_only = requested.view_only.or(defaults.view_only).unwrap_or(false);
    let display = non_empty(&requested.display).or_else(|| non_empty(&defaults.display));

    let mut env = BTreeMap::new();
    env.insert("VNC_PW".to_string(), password.clone());
    if let Some(resolution) = resolution {
        env.insert("VNC_RESOLUTION".to_string(), resolution);
    }
    if let Some(depth) = col_depth {
        env.insert("VNC_COL_DEPTH".to_string(), depth.to_string());
    }
    if let Some(display) = display {
        env.insert("DISPLAY".to_string(), display);
    }
    if view_only {
        env.insert("VNC_VIEW_ONLY".to_string(), "true".to_string());
    }

    RuntimeEnv { env, password }
}
