/// Generates a `match` expression for dispatching `MediaTools` variants to their respective `run_tool` methods.
///
/// # Parameters
/// - `$params:expr`: The expression to match against, expected to be a `MediaTools` enum value.
/// - `$media_service:expr`: The media service reference (e.g., `&self.media_service`) passed to each tool's `run_tool` method.
/// - `$($tool:ident),*`: A comma-separated list of tool identifiers (e.g., `GetMediaInfo`, `GetAllowedDirectories`)
///   matching `MediaTools` variants and their associated types.
///
/// Each tool must have a `run_tool` method with the signature:
/// ```rust,ignore
/// async fn run_tool(params: Self, context: &MediaService) -> Result<CallToolResult, CallToolError>
/// ```
///
/// # Example
/// ```rust,ignore
/// invoke_tools!(tool_params, &self.media_service, GetMediaInfo, GetAllowedDirectories)
/// ```
/// expands to:
/// ```rust,ignore
/// match tool_params {
///     MediaTools::GetMediaInfo(params) => GetMediaInfo::run_tool(params, &self.media_service).await,
///     MediaTools::GetAllowedDirectories(params) => GetAllowedDirectories::run_tool(params, &self.media_service).await,
/// }
/// ```
#[macro_export]
macro_rules! invoke_tools {
    ($params:expr, $media_service:expr, $($tool:ident),* $(,)?) => {
        match $params {
            $(
                MediaTools::$tool(params) => $tool::run_tool(params, $media_service).await,
            )*
        }
    };
}
