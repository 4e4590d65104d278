//! Keeps the status store consistent with containers that disappear outside
//! the provisioning pipeline.

use std::{sync::Arc, time::Duration};

use futures_util::StreamExt;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    status::StatusStore,
    tasks::{docker::ContainerRuntime, types::RuntimeEvent},
};

const RESUBSCRIBE_DELAY: Duration = Duration::from_secs(1);

/// Engine actions that mean the container is gone or going.
const TERMINAL_ACTIONS: [&str; 4] = ["die", "kill", "stop", "destroy"];

pub struct EventReconciler {
    runtime: Arc<dyn ContainerRuntime>,
    store: Arc<dyn StatusStore>,
}

impl EventReconciler {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, store: Arc<dyn StatusStore>) -> Self {
        EventReconciler { runtime, store }
    }

    /// Deletes the record correlated with `event` when the engine reports
    /// its container gone. Returns whether a record was removed.
    pub fn handle_event(&self, event: &RuntimeEvent) -> bool {
        if !TERMINAL_ACTIONS.contains(&event.action.as_str()) {
            return false;
        }
        let Some(short_id) = &event.short_id else {
            return false;
        };

        match self.store.delete(short_id) {
            Some(record) => {
                info!(
                    short_id = %short_id,
                    container = %event.actor_id,
                    action = %event.action,
                    state = ?record.status,
                    "removed container from status tracking"
                );
                true
            }
            None => false,
        }
    }

    /// Drains engine events until `shutdown` flips to `true`. Stream errors
    /// are logged and skipped; an ended stream is re-subscribed.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!("docker event listener started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            let mut events = self.runtime.events();
            loop {
                tokio::select! {
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            info!("stopping docker event listener");
                            return;
                        }
                    }
                    next = events.next() => match next {
                        Some(Ok(event)) => {
                            self.handle_event(&event);
                        }
                        Some(Err(err)) => warn!(error = %err, "error receiving docker events"),
                        None => break,
                    },
                }
            }
            drop(events);

            warn!("docker event stream ended, resubscribing");
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                () = tokio::time::sleep(RESUBSCRIBE_DELAY) => {}
            }
        }

        info!("stopping docker event listener");
    }
}
