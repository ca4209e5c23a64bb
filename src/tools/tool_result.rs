use rust_mcp_sdk::schema::{CallToolResult, TextContent, schema_utils::CallToolError};
use serde::Serialize;

use crate::error::ServiceResult;

/// Identifies the input a per-item result belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSubject {
    pub path: String,
}

/// Outcome for one input of a batch tool call.
///
/// Batch tools never fail as a whole because of a single input: every input yields
/// either its record or an error message, flagged by `success`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResultItem<S, T> {
    Success {
        #[serde(flatten)]
        subject: S,
        #[serde(flatten)]
        record: T,
        success: bool,
    },
    Failure {
        #[serde(flatten)]
        subject: S,
        error: String,
        success: bool,
    },
}

impl<S, T> ToolResultItem<S, T> {
    pub fn from_result(subject: S, result: ServiceResult<T>) -> Self {
        match result {
            Ok(record) => Self::Success {
                subject,
                record,
                success: true,
            },
            Err(err) => {
                tracing::warn!(error = %err, "tool item failed");
                Self::Failure {
                    subject,
                    error: err.to_string(),
                    success: false,
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn subject(&self) -> &S {
        match self {
            Self::Success { subject, .. } | Self::Failure { subject, .. } => subject,
        }
    }

    pub fn record(&self) -> Option<&T> {
        match self {
            Self::Success { record, .. } => Some(record),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}

/// Serializes `value` as pretty-printed JSON into a single text block.
pub fn json_call_result<V: Serialize>(value: &V) -> Result<CallToolResult, CallToolError> {
    let content = serde_json::to_string_pretty(value).map_err(CallToolError::new)?;
    Ok(CallToolResult::text_content(vec![TextContent::from(content)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use std::path::PathBuf;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Record {
        width: u32,
    }

    #[test]
    fn success_flattens_subject_and_record() {
        let item = ToolResultItem::from_result(
            PathSubject {
                path: "a.png".to_string(),
            },
            Ok(Record { width: 3 }),
        );
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["path"], "a.png");
        assert_eq!(value["width"], 3);
        assert_eq!(value["success"], true);
    }

    #[test]
    fn failure_carries_error_text() {
        let item: ToolResultItem<PathSubject, Record> = ToolResultItem::from_result(
            PathSubject {
                path: "missing.png".to_string(),
            },
            Err(ServiceError::NotFound(PathBuf::from("missing.png"))),
        );
        assert!(!item.is_success());
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["path"], "missing.png");
        assert_eq!(value["success"], false);
        assert!(value["error"].as_str().unwrap().contains("does not exist"));
    }
}
