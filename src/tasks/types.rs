use std::{collections::HashMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Length of the externally visible short ID, in hex characters.
pub const SHORT_ID_LEN: usize = 12;

/// Container label carrying the short ID, used to correlate engine events.
pub const SHORT_ID_LABEL: &str = "orchestrator.short_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Initializing,
    Ready,
    Failed,
}

impl State {
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Ready | State::Failed)
    }
}

/// Full identifier of a provisioning job: 32 random hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn generate() -> Self {
        JobId(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn short(&self) -> ShortId {
        ShortId(self.0[..SHORT_ID_LEN].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fixed-length handle for a job, shared by the status store key, the
/// container label and every registered endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShortId(String);

impl ShortId {
    pub fn parse(value: &str) -> Option<Self> {
        let valid = value.len() == SHORT_ID_LEN
            && value
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        valid.then(|| ShortId(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ShortId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ShortId::parse(&value).ok_or_else(|| format!("invalid short ID: {value}"))
    }
}

impl From<ShortId> for String {
    fn from(id: ShortId) -> Self {
        id.0
    }
}

impl fmt::Display for ShortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Routing information for a ready container. Every path starts with
/// `/{short_id}/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ContainerEndpoints {
    pub container_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_api_path: Option<String>,
    pub novnc_path: String,
    pub vnc_path: String,
}

impl ContainerEndpoints {
    pub fn paths(&self) -> Vec<&str> {
        self.chat_api_path
            .iter()
            .map(String::as_str)
            .chain([self.novnc_path.as_str(), self.vnc_path.as_str()])
            .collect()
    }
}

/// A job's provisioning progress as seen by polling clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ContainerStatus {
    #[schema(value_type = String)]
    pub short_id: ShortId,
    pub status: State,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<ContainerEndpoints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Engine container ID, known once the container has been created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ContainerStatus {
    pub fn initializing(short_id: ShortId) -> Self {
        ContainerStatus {
            short_id,
            status: State::Initializing,
            message: "Starting container creation".to_string(),
            endpoints: None,
            error: None,
            container: None,
            created_at: Utc::now(),
        }
    }
}

/// Everything the engine needs to create one sandbox container.
#[derive(Debug, Clone, Default)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub env: Vec<String>,
    pub exposed_ports: Vec<u16>,
    pub network: String,
    pub labels: HashMap<String, String>,
}

/// A container created by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHandle {
    pub id: String,
    pub network: String,
}

/// A container-scoped lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEvent {
    pub action: String,
    pub actor_id: String,
    pub short_id: Option<ShortId>,
}
