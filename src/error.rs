use rust_mcp_sdk::schema::{RpcError, schema_utils::SdkError};
use rust_mcp_sdk::{TransportError, error::McpSdkError};
use std::path::PathBuf;
use thiserror::Error;
use tokio::io;

pub type ServiceResult<T> = core::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    FromString(String),
    #[error("Path does not exist: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Access denied - {} is outside permitted directories: {}", path.display(), allowed)]
    NotPermitted { path: PathBuf, allowed: String },
    #[error("Unable to decode image: {0}")]
    DecodeError(String),
    #[error("Unable to probe media container: {0}")]
    ProbeError(String),
    #[error("Not a video file ({kind}): {}", path.display())]
    NotAVideo { path: PathBuf, kind: String },
    #[error("Frame extraction failed: {0}")]
    EncodeError(String),
    #[error("Thumbnail generation reported success but no file was written at {}", .0.display())]
    GenerationFailed(PathBuf),
    #[error("Unrecognized media file: {0}")]
    UnrecognizedMedia(String),
    #[error("Not a supported media type: {0}")]
    UnsupportedMedia(String),
    #[error("{operation} timed out after {seconds} seconds")]
    Timeout { operation: String, seconds: u64 },
    #[error("Required program '{0}' could not be found. Install it or pass its location explicitly.")]
    ToolNotFound(String),
    #[error("{0}")]
    TransportError(#[from] TransportError),
    #[error("{0}")]
    SdkError(#[from] SdkError),
    #[error("{0}")]
    RpcError(#[from] RpcError),
    #[error("{0}")]
    IoError(#[from] io::Error),
    #[error("{0}")]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("{0}")]
    McpSdkError(#[from] McpSdkError),
}
