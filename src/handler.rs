use std::cmp::Ordering;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::CommandArguments;
use crate::invoke_tools;
use crate::media_service::backends::{FfmpegFrameExtractor, FfprobeProber, locate_program};
use crate::{error::ServiceResult, media_service::MediaService, tools::*};
use async_trait::async_trait;
use rust_mcp_sdk::McpServer;
use rust_mcp_sdk::mcp_server::ServerHandler;
use rust_mcp_sdk::schema::{
    CallToolRequestParams, CallToolResult, InitializeRequestParams, InitializeResult,
    ListToolsResult, PaginatedRequestParams, RpcError, schema_utils::CallToolError,
};

pub struct MediaHandler {
    media_service: Arc<MediaService>,
}

impl MediaHandler {
    pub fn new(args: &CommandArguments) -> ServiceResult<Self> {
        let media_service = MediaService::try_new(&args.permitted)?
            .with_prober(Arc::new(FfprobeProber::new(resolve_program(&args.ffprobe))))
            .with_frame_extractor(Arc::new(FfmpegFrameExtractor::new(resolve_program(
                &args.ffmpeg,
            ))))
            .with_probe_timeout(Duration::from_secs(args.probe_timeout));

        Ok(Self::with_service(media_service))
    }

    pub fn with_service(media_service: MediaService) -> Self {
        Self {
            media_service: Arc::new(media_service),
        }
    }

    pub fn startup_message(&self) -> String {
        let allowed_directories = self.media_service.allowed_directories();
        if allowed_directories.is_empty() {
            "Media MCP Server running without permitted directories: every path will be rejected."
                .to_string()
        } else {
            format!(
                "Media MCP Server running.\nPermitted directories:\n{}",
                allowed_directories.join(",\n")
            )
        }
    }
}

/// Resolves an executable through `PATH`. A missing program is not fatal: image
/// tools keep working and video items fail individually until it is installed.
fn resolve_program(program: &str) -> PathBuf {
    match locate_program(program) {
        Some(resolved) => {
            tracing::info!(program, resolved = %resolved.display(), "found media tool");
            resolved
        }
        None => {
            tracing::warn!(program, "media tool not found, video operations will fail");
            PathBuf::from(program)
        }
    }
}

#[async_trait]
impl ServerHandler for MediaHandler {
    async fn on_initialized(&self, _runtime: Arc<dyn McpServer>) {
        tracing::info!("{}", self.startup_message());
    }

    async fn handle_list_tools_request(
        &self,
        _: Option<PaginatedRequestParams>,
        _: Arc<dyn McpServer>,
    ) -> std::result::Result<ListToolsResult, RpcError> {
        Ok(ListToolsResult {
            tools: MediaTools::tools(),
            meta: None,
            next_cursor: None,
        })
    }

    async fn handle_initialize_request(
        &self,
        initialize_request: InitializeRequestParams,
        runtime: Arc<dyn McpServer>,
    ) -> std::result::Result<InitializeResult, RpcError> {
        runtime
            .set_client_details(initialize_request.clone())
            .await
            .map_err(|err| RpcError::internal_error().with_message(format!("{err}")))?;

        let mut server_info = runtime.server_info().to_owned();
        // Provide compatibility for clients using older MCP protocol versions.
        if server_info
            .protocol_version
            .cmp(&initialize_request.protocol_version)
            == Ordering::Greater
        {
            server_info.protocol_version = initialize_request.protocol_version;
        }
        Ok(server_info)
    }

    async fn handle_call_tool_request(
        &self,
        request: CallToolRequestParams,
        _: Arc<dyn McpServer>,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        tracing::debug!(tool = %request.name, "tool call");
        let tool_params: MediaTools =
            MediaTools::try_from(request).map_err(CallToolError::new)?;

        invoke_tools!(
            tool_params,
            &self.media_service,
            GetMediaInfo,
            GetImagesInfo,
            GetVideosInfo,
            GenerateImagesFromVideos,
            GetAllowedDirectories
        )
    }
}
