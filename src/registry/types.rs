use serde::{Deserialize, Serialize};

/// Health check attached to a registered service. Exactly one of `http` or
/// `tcp` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceCheck {
    #[serde(rename = "HTTP", skip_serializing_if = "Option::is_none")]
    pub http: Option<String>,
    #[serde(rename = "TCP", skip_serializing_if = "Option::is_none")]
    pub tcp: Option<String>,
    pub interval: String,
}

/// Consul agent service registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRegistration {
    pub name: String,
    #[serde(rename = "ID")]
    pub id: String,
    pub address: String,
    pub port: u16,
    pub tags: Vec<String>,
    pub check: ServiceCheck,
}

impl ServiceRegistration {
    pub fn http(name: String, address: &str, port: u16, tag: String, interval: &str) -> Self {
        ServiceRegistration {
            id: name.clone(),
            name,
            address: address.to_string(),
            port,
            tags: vec![tag],
            check: ServiceCheck {
                http: Some(format!("http://{address}:{port}/health")),
                tcp: None,
                interval: interval.to_string(),
            },
        }
    }

    pub fn tcp(name: String, address: &str, port: u16, tag: String, interval: &str) -> Self {
        ServiceRegistration {
            id: name.clone(),
            name,
            address: address.to_string(),
            port,
            tags: vec![tag],
            check: ServiceCheck {
                http: None,
                tcp: Some(format!("{address}:{port}")),
                interval: interval.to_string(),
            },
        }
    }
}
