use std::path::Path;

use rust_mcp_sdk::macros::{JsonSchema, mcp_tool};
use rust_mcp_sdk::schema::{CallToolResult, schema_utils::CallToolError};
use serde::Serialize;

use crate::media_service::{MediaService, thumbnail::ThumbnailOutcome};
use crate::tools::tool_result::{ToolResultItem, json_call_result};

#[derive(::serde::Deserialize, ::serde::Serialize, Clone, Debug, JsonSchema)]
/// A video to take a frame from and where to save it.
pub struct VideoImagePair {
    /// Path of the source video file.
    #[serde(rename = "videoPath")]
    pub video_path: String,
    /// Path of the image to write. The extension is changed to `.png` if it is anything else.
    #[serde(rename = "imagePath")]
    pub image_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThumbnailSubject {
    #[serde(rename = "videoPath")]
    pub video_path: String,
    #[serde(rename = "imagePath")]
    pub image_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThumbnailRecord {
    pub format: &'static str,
    #[serde(flatten)]
    pub outcome: ThumbnailOutcome,
}

#[mcp_tool(
    name = "generate_images_from_videos",
    title="Generate images from videos",
    description = concat!("Extracts one representative frame from each video and saves it as a PNG image. ",
    "The frame is picked by a thumbnail heuristic rather than being the first frame, so black intro frames are avoided. ",
    "If `imagePath` does not end in `.png` its extension is replaced and the returned `imagePath` reflects that. ",
    "Missing output directories are created. Returns width, height and size of each written image. ",
    "Every item gets its own entry with a `success` flag; a failing item does not stop the others. ",
    "Both the videos and the output images must be within permitted directories."),
    destructive_hint = true,
    idempotent_hint = true,
    open_world_hint = false,
    read_only_hint = false
)]
#[derive(::serde::Deserialize, ::serde::Serialize, Clone, Debug, JsonSchema)]
pub struct GenerateImagesFromVideos {
    /// The list of videos and their target image paths.
    pub items: Vec<VideoImagePair>,
}

impl GenerateImagesFromVideos {
    pub async fn generate(
        params: Self,
        context: &MediaService,
    ) -> Vec<ToolResultItem<ThumbnailSubject, ThumbnailRecord>> {
        let mut results = Vec::with_capacity(params.items.len());
        for item in params.items {
            tracing::debug!(video = %item.video_path, image = %item.image_path, "generate_images_from_videos");
            let outcome = context
                .generate_smart_thumbnail(Path::new(&item.video_path), Path::new(&item.image_path))
                .await;

            let result = match outcome {
                Ok(thumbnail) => ToolResultItem::from_result(
                    ThumbnailSubject {
                        video_path: item.video_path,
                        image_path: thumbnail.image_path.display().to_string(),
                    },
                    Ok(ThumbnailRecord {
                        format: "png",
                        outcome: thumbnail.outcome,
                    }),
                ),
                Err(err) => ToolResultItem::from_result(
                    ThumbnailSubject {
                        video_path: item.video_path,
                        image_path: item.image_path,
                    },
                    Err(err),
                ),
            };
            results.push(result);
        }
        results
    }

    pub async fn run_tool(
        params: Self,
        context: &MediaService,
    ) -> std::result::Result<CallToolResult, CallToolError> {
        json_call_result(&Self::generate(params, context).await)
    }
}
