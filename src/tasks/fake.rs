//! In-memory engine used by the orchestrator and reconciler tests.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::sync::{Notify, mpsc};

use super::{
    docker::ContainerRuntime,
    types::{ContainerHandle, ContainerSpec, RuntimeEvent, SHORT_ID_LABEL, ShortId},
};
use crate::error::{OrchestratorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailStep {
    Pull,
    Create,
    Start,
    Inspect,
}

pub struct FakeRuntime {
    pub fail_on: Mutex<Option<FailStep>>,
    pub pull_gate: Option<Arc<Notify>>,
    pub live: Mutex<HashMap<String, ContainerSpec>>,
    pub removed: Mutex<Vec<String>>,
    pub pulls: AtomicUsize,
    next_id: AtomicUsize,
    events_tx: mpsc::UnboundedSender<Result<RuntimeEvent>>,
    events_rx: Mutex<Option<mpsc::UnboundedReceiver<Result<RuntimeEvent>>>>,
}

impl Default for FakeRuntime {
    fn default() -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        FakeRuntime {
            fail_on: Mutex::new(None),
            pull_gate: None,
            live: Mutex::new(HashMap::new()),
            removed: Mutex::new(Vec::new()),
            pulls: AtomicUsize::new(0),
            next_id: AtomicUsize::new(1),
            events_tx,
            events_rx: Mutex::new(Some(events_rx)),
        }
    }
}

impl FakeRuntime {
    pub fn failing_at(step: FailStep) -> Self {
        let runtime = FakeRuntime::default();
        *runtime.fail_on.lock().unwrap() = Some(step);
        runtime
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        FakeRuntime {
            pull_gate: Some(gate),
            ..FakeRuntime::default()
        }
    }

    pub fn emit(&self, event: Result<RuntimeEvent>) {
        let _ = self.events_tx.send(event);
    }

    pub fn live_ids(&self) -> Vec<String> {
        self.live.lock().unwrap().keys().cloned().collect()
    }

    fn fails_at(&self, step: FailStep) -> bool {
        *self.fail_on.lock().unwrap() == Some(step)
    }

    fn emit_for(&self, action: &str, id: &str, spec: &ContainerSpec) {
        self.emit(Ok(RuntimeEvent {
            action: action.to_string(),
            actor_id: id.to_string(),
            short_id: spec
                .labels
                .get(SHORT_ID_LABEL)
                .and_then(|value| ShortId::parse(value)),
        }));
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn ensure_image(&self, reference: &str) -> Result<()> {
        if let Some(gate) = &self.pull_gate {
            gate.notified().await;
        }
        self.pulls.fetch_add(1, Ordering::SeqCst);
        if self.fails_at(FailStep::Pull) {
            return Err(OrchestratorError::ImagePull {
                image: reference.to_string(),
                message: "manifest unknown".to_string(),
            });
        }
        Ok(())
    }

    async fn create(&self, spec: &ContainerSpec) -> Result<ContainerHandle> {
        if self.fails_at(FailStep::Create) {
            return Err(OrchestratorError::ContainerCreate("no space left".to_string()));
        }
        let id = format!("{:064x}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.live.lock().unwrap().insert(id.clone(), spec.clone());
        Ok(ContainerHandle {
            id,
            network: spec.network.clone(),
        })
    }

    async fn start(&self, handle: &ContainerHandle) -> Result<()> {
        if self.fails_at(FailStep::Start) {
            return Err(OrchestratorError::ContainerStart {
                container: handle.id.clone(),
                message: "port already allocated".to_string(),
            });
        }
        Ok(())
    }

    async fn inspect_address(&self, handle: &ContainerHandle) -> Result<String> {
        if self.fails_at(FailStep::Inspect) {
            return Err(OrchestratorError::Inspect {
                container: handle.id.clone(),
                message: "no such container".to_string(),
            });
        }
        Ok("172.20.0.5".to_string())
    }

    async fn remove(&self, handle: &ContainerHandle) -> Result<()> {
        let spec = self.live.lock().unwrap().remove(&handle.id);
        self.removed.lock().unwrap().push(handle.id.clone());
        if let Some(spec) = spec {
            self.emit_for("destroy", &handle.id, &spec);
        }
        Ok(())
    }

    async fn kill(&self, container: &str) -> Result<()> {
        let spec = self.live.lock().unwrap().get(container).cloned();
        match spec {
            Some(spec) => {
                self.emit_for("kill", container, &spec);
                self.emit_for("die", container, &spec);
                Ok(())
            }
            None => Err(OrchestratorError::Kill {
                container: container.to_string(),
                message: "No such container".to_string(),
            }),
        }
    }

    fn events(&self) -> BoxStream<'_, Result<RuntimeEvent>> {
        match self.events_rx.lock().unwrap().take() {
            Some(rx) => stream::unfold(rx, |mut rx| async move {
                rx.recv().await.map(|event| (event, rx))
            })
            .boxed(),
            None => stream::pending::<Result<RuntimeEvent>>().boxed(),
        }
    }
}
