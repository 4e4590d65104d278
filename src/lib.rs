//! On-demand VNC sandbox provisioning: containers are created on the local
//! engine, published through Consul, and tracked in an in-memory status store
//! that clients poll.

pub mod catalog;
pub mod config;
pub mod error;
pub mod manager;
pub mod registry;
pub mod status;
pub mod tasks;
pub mod worker;
