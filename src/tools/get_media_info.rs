use std::path::Path;

use rust_mcp_sdk::macros::{JsonSchema, mcp_tool};
use rust_mcp_sdk::schema::{CallToolResult, schema_utils::CallToolError};

use serde::Serialize;

use crate::error::ServiceError;
use crate::media_service::{MediaService, media_info::MediaInfo};
use crate::tools::tool_result::{ToolResultItem, json_call_result};

pub const UNKNOWN_MEDIA_TYPE: &str = "UNKNOWN";

/// Input path of a `get_media_info` item. Items whose content no probe recognized
/// are tagged `UNKNOWN`; described items carry their tag in the record instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaSubject {
    pub path: String,
    #[serde(rename = "mediaType", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<&'static str>,
}

#[mcp_tool(
    name = "get_media_info",
    title="Get media information",
    description = concat!("Identifies each file as an image or a video by inspecting its content (file extensions are not trusted) ",
    "and returns its metadata. Images report format, color mode, width, height, resolution and size. ",
    "Videos report the container format, video and audio streams, duration, size, bit rate and frame rate. ",
    "Every path gets its own entry with a `success` flag; a failing path does not stop the others. ",
    "Only works within permitted directories."),
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(::serde::Deserialize, ::serde::Serialize, Clone, Debug, JsonSchema)]
pub struct GetMediaInfo {
    /// The list of image or video file paths to describe.
    #[serde(rename = "mediaPaths")]
    pub media_paths: Vec<String>,
}

impl GetMediaInfo {
    pub async fn describe(
        params: Self,
        context: &MediaService,
    ) -> Vec<ToolResultItem<MediaSubject, MediaInfo>> {
        let mut items = Vec::with_capacity(params.media_paths.len());
        for path in params.media_paths {
            tracing::debug!(path = %path, "get_media_info");
            let result = context.get_media_info(Path::new(&path)).await;
            let media_type = match &result {
                Err(ServiceError::UnrecognizedMedia(_)) => Some(UNKNOWN_MEDIA_TYPE),
                _ => None,
            };
            items.push(ToolResultItem::from_result(
                MediaSubject { path, media_type },
                result,
            ));
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
