use std::path::Path;

use rust_mcp_sdk::macros::{JsonSchema, mcp_tool};
use rust_mcp_sdk::schema::{CallToolResult, schema_utils::CallToolError};

use crate::media_service::{MediaService, media_info::VideoInfo};
use crate::tools::tool_result::{PathSubject, ToolResultItem, json_call_result};

#[mcp_tool(
    name = "get_videos_info",
    title="Get video information",
    description = concat!("Returns technical metadata about multiple video files: container format, ",
    "video and audio stream details, duration in seconds, size in bytes, bit rate and frame rate. ",
    "No video processing or modification is performed. ",
    "Every path gets its own entry with a `success` flag; a failing path does not stop the others. ",
    "Only works within permitted directories."),
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(::serde::Deserialize, ::serde::Serialize, Clone, Debug, JsonSchema)]
pub struct GetVideosInfo {
    /// The list of video file paths to describe.
    #[serde(rename = "videoPaths")]
    pub video_paths: Vec<String>,
}

impl GetVideosInfo {
    pub async fn describe(
        params: Self,
        context: &MediaService,
    ) -> Vec<ToolResultItem<PathSubject, VideoInfo>> {
        let mut items = Vec::with_capacity(params.video_paths.len());
        for path in params.video_paths {
            tracing::debug!(path = %path, "get_videos_info");
            let result = context.get_video_info(Path::new(&path)).await;
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
