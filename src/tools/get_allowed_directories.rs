use rust_mcp_sdk::macros::{JsonSchema, mcp_tool};
use rust_mcp_sdk::schema::{CallToolResult, schema_utils::CallToolError};

use crate::media_service::MediaService;
use crate::tools::tool_result::json_call_result;

#[mcp_tool(
    name = "get_allowed_directories",
    title="List permitted directories",
    description = concat!("Returns the list of directories this server may read media from and write thumbnails to, ",
    "exactly as configured at startup. Subdirectories of these directories are also accessible. ",
    "Use this to find out which paths are available before calling the other tools."),
    destructive_hint = false,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = true
)]
#[derive(::serde::Deserialize, ::serde::Serialize, Clone, Debug, JsonSchema)]
pub struct GetAllowedDirectories {}

impl GetAllowedDirectories {
    pub async fn run_tool(
        _: Self,
        context: &MediaService,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        json_call_result(&context.allowed_directories())
    }
}
