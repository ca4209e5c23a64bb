use std::path::Path;

use rust_mcp_sdk::macros::{JsonSchema, mcp_tool};
use rust_mcp_sdk::schema::{CallToolResult, schema_utils::CallToolError};

use crate::media_service::{MediaService, media_info::ImageInfo};
use crate::tools::tool_result::{PathSubject, ToolResultItem, json_call_result};

#[mcp_tool(
    name = "get_images_info",
    title="Get image information",
    description = concat!("Returns metadata about multiple image files: format, color mode, width, height, ",
    "resolution (dpi) when recorded, file size and file name. No image processing or modification is performed. ",
    "Every path gets its own entry with a `success` flag; a failing path does not stop the others. ",
    "Only works within permitted directories."),
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(::serde::Deserialize, ::serde::Serialize, Clone, Debug, JsonSchema)]
pub struct GetImagesInfo {
    /// The list of image file paths to describe.
    #[serde(rename = "imagePaths")]
    pub image_paths: Vec<String>,
}

impl GetImagesInfo {
    pub async fn describe(
        params: Self,
        context: &MediaService,
    ) -> Vec<ToolResultItem<PathSubject, ImageInfo>> {
        let mut items = Vec::with_capacity(params.image_paths.len());
        for path in params.image_paths {
            tracing::debug!(path = %path, "get_images_info");
            let result = context.get_image_info(Path::new(&path)).await;
            items.push(ToolResultItem::from_result(PathSubject { path }, result));
        }
        items
    }

    pub async fn run_tool(
        params: Self,
        context: &MediaService,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        json_call_result(&Self::describe(params, context).await)
    }
}
