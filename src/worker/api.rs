use std::{future::Future, time::Duration};

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use super::{
    openapi,
    types::{ApiError, ApiServer, ErrorResponse, MessageResponse},
};
use crate::{
    catalog::ImageInfo,
    manager::{ContainerRequest, Manager, Submission},
    tasks::types::ContainerStatus,
};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health() -> &'static str {
    "OK"
}

#[utoipa::path(
    get,
    path = "/containers/images",
    responses((status = 200, description = "Launchable images", body = [ImageInfo])),
    tag = "containers"
)]
pub async fn list_images(AxumState(manager): AxumState<Manager>) -> Json<&'static [ImageInfo]> {
    Json(manager.images())
}

#[utoipa::path(
    post,
    path = "/containers",
    request_body = ContainerRequest,
    responses(
        (status = 200, description = "Provisioning started", body = Submission),
        (status = 400, description = "Unknown image", body = ErrorResponse),
    ),
    tag = "containers"
)]
pub async fn create_container(
    AxumState(manager): AxumState<Manager>,
    Json(request): Json<ContainerRequest>,
) -> Result<Json<Submission>, ApiError> {
    let submission = manager.submit(request)?;
    Ok(Json(submission))
}

#[utoipa::path(
    get,
    path = "/containers/{id}/status",
    params(("id" = String, Path, description = "Short container ID")),
    responses(
        (status = 200, description = "Provisioning status", body = ContainerStatus),
        (status = 404, description = "Unknown container", body = ErrorResponse),
    ),
    tag = "containers"
)]
pub async fn container_status(
    AxumState(manager): AxumState<Manager>,
    Path(id): Path<String>,
) -> Result<Json<ContainerStatus>, ApiError> {
    Ok(Json(manager.status(&id)?))
}

#[utoipa::path(
    post,
    path = "/containers/{id}/kill",
    params(("id" = String, Path, description = "Engine container ID or name")),
    responses(
        (status = 200, description = "Container killed", body = MessageResponse),
        (status = 500, description = "Kill failed", body = ErrorResponse),
    ),
    tag = "containers"
)]
pub async fn kill_container(
    AxumState(manager): AxumState<Manager>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    manager.kill(&id).await?;
    Ok(Json(MessageResponse {
        message: "Container killed successfully".to_string(),
    }))
}

/// Layers wrapping every route, docs included.
fn with_layers<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
}

impl ApiServer {
    pub fn new(manager: Manager, address: &str, behind_proxy: bool) -> Self {
        Self {
            manager,
            address: address.to_string(),
            behind_proxy,
        }
    }

    pub fn router(manager: Manager, behind_proxy: bool) -> Router {
        let routes = Router::new()
            .route("/health", get(health))
            .route("/containers/images", get(list_images))
            .route("/containers", post(create_container))
            .route("/containers/{id}/status", get(container_status))
            .route("/containers/{id}/kill", post(kill_container))
            .merge(openapi::swagger_ui(behind_proxy));

        with_layers(routes, REQUEST_TIMEOUT).with_state(manager)
    }

    pub async fn start_server(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> std::io::Result<()> {
        let app = ApiServer::router(self.manager, self.behind_proxy);

        let listener = TcpListener::bind(&self.address).await?;
        info!(address = %self.address, "server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
