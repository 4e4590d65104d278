use utoipa::OpenApi;
use utoipa_swagger_ui::{Config, SwaggerUi};

use super::{
    api,
    types::{ErrorResponse, MessageResponse},
};
use crate::{
    catalog::ImageInfo,
    manager::{ContainerRequest, Submission},
    tasks::{
        types::{ContainerEndpoints, ContainerStatus, State},
        vnc::VncConfig,
    },
};

pub const SWAGGER_PATH: &str = "/swagger";
pub const DOC_PATH: &str = "/swagger/doc.json";
const RELATIVE_DOC_URL: &str = "swagger/doc.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Orchestrator API",
        version = "1.0",
        description = "A container orchestration service API"
    ),
    paths(
        api::health,
        api::list_images,
        api::create_container,
        api::container_status,
        api::kill_container,
    ),
    components(schemas(
        ImageInfo,
        VncConfig,
        ContainerRequest,
        Submission,
        State,
        ContainerEndpoints,
        ContainerStatus,
        ErrorResponse,
        MessageResponse,
    )),
    tags((name = "containers", description = "Sandbox provisioning"))
)]
pub struct ApiDoc;

/// URL the Swagger UI fetches the document from. Behind a reverse proxy the
/// path prefix is unknown, so the URL is relative to the UI page.
pub fn doc_url(behind_proxy: bool) -> &'static str {
    if behind_proxy { RELATIVE_DOC_URL } else { DOC_PATH }
}

pub fn swagger_ui(behind_proxy: bool) -> SwaggerUi {
    SwaggerUi::new(SWAGGER_PATH)
        .url(DOC_PATH, ApiDoc::openapi())
        .config(
            Config::new([doc_url(behind_proxy)])
                .deep_linking(true)
                .doc_expansion("none"),
        )
}
