pub mod api;
pub mod events;
pub mod openapi;
pub mod types;

pub use events::EventReconciler;
pub use types::ApiServer;
