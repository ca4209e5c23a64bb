use crate::handler::MediaHandler;
use crate::{cli::CommandArguments, error::ServiceResult};
use rust_mcp_sdk::ToMcpServerHandler;
use rust_mcp_sdk::mcp_server::McpServerOptions;
use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ProtocolVersion, ServerCapabilities, ServerCapabilitiesTools,
};
use rust_mcp_sdk::{McpServer, StdioTransport, TransportOptions, mcp_server::server_runtime};

pub fn server_details() -> InitializeResult {
    InitializeResult {
        server_info: Implementation {
            name: "rust-mcp-media".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            title: Some("Media Utilities MCP Server".to_string()),
            description: Some(
                "Describes local images and videos and extracts representative video frames."
                    .to_string(),
            ),
            icons: vec![],
            website_url: None,
        },
        capabilities: ServerCapabilities {
            experimental: None,
            logging: None,
            prompts: None,
            resources: None,
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            completions: None,
            tasks: None,
        },
        instructions: None,
        meta: None,
        protocol_version: ProtocolVersion::V2025_11_25.to_string(),
    }
}

pub async fn start_server(args: CommandArguments) -> ServiceResult<()> {
    let transport = StdioTransport::new(TransportOptions::default())?;

    let handler = MediaHandler::new(&args)?;
    let server = server_runtime::create_server(McpServerOptions {
        server_details: server_details(),
        handler: handler.to_mcp_server_handler(),
        task_store: None,
        client_task_store: None,
        transport,
    });

    server.start().await?;

    Ok(())
}
