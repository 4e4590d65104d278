use serde::Serialize;
use utoipa::ToSchema;

/// A launchable desktop image. `name` is the reference handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ImageInfo {
    #[schema(value_type = String)]
    pub id: &'static str,
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = String)]
    pub description: &'static str,
    #[schema(value_type = String)]
    pub category: &'static str,
    #[schema(value_type = Vec<String>)]
    pub tags: &'static [&'static str],
}
