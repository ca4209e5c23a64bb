use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::{
    error::{ServiceError, ServiceResult},
    media_service::{MediaService, utils::coerce_png_extension},
};

pub const UNVERIFIED_NOTE: &str = "created but metadata unreadable";

/// Result of a thumbnail extraction that wrote its output file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ThumbnailOutcome {
    /// The written image was read back successfully.
    Generated { width: u32, height: u32, size: u64 },
    /// The file exists but could not be decoded again.
    GeneratedUnverified { size: u64, note: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    /// Output path as requested by the caller, with the extension coerced to `.png`.
    pub image_path: PathBuf,
    /// Where the file was actually written, after symlinks were resolved.
    pub written_path: PathBuf,
    pub outcome: ThumbnailOutcome,
}

impl MediaService {
    /// Extracts one representative frame of `video_path` into a PNG at `output_image_path`.
    ///
    /// The output extension is replaced with `.png` when it is anything else. Missing
    /// output directories are created, then validated again so a symlinked directory
    /// cannot redirect the write outside the permitted roots.
    pub async fn generate_smart_thumbnail(
        &self,
        video_path: &Path,
        output_image_path: &Path,
    ) -> ServiceResult<Thumbnail> {
        let valid_video = self.check_path(video_path)?;

        let image_path = coerce_png_extension(output_image_path);
        let target = self.check_output_path(&image_path)?;

        let media_type = self.classify_valid(&valid_video).await;
        if !media_type.is_video() {
            return Err(ServiceError::NotAVideo {
                path: video_path.to_path_buf(),
                kind: media_type.kind().to_string(),
            });
        }

        let (output_dir, file_name) = match (target.parent(), target.file_name()) {
            (Some(parent), Some(name)) => (parent.to_path_buf(), name.to_os_string()),
            _ => {
                return Err(ServiceError::FromString(format!(
                    "Invalid output image path: {}",
                    output_image_path.display()
                )));
            }
        };
        tokio::fs::create_dir_all(&output_dir).await?;
        let written_path = self.check_path(&output_dir)?.join(file_name);

        // ffmpeg follows a symlink at the target, so it has to lead back into a root
        if let Ok(metadata) = tokio::fs::symlink_metadata(&written_path).await
            && metadata.file_type().is_symlink()
        {
            match written_path.canonicalize() {
                Ok(resolved) if self.is_permitted(&resolved) => {}
                _ => return Err(self.not_permitted(&image_path)),
            }
        }

        self.with_deadline(
            "Frame extraction",
            self.extractor.extract_frame(&valid_video, &written_path),
        )
        .await?;

        if !tokio::fs::try_exists(&written_path).await.unwrap_or(false) {
            return Err(ServiceError::GenerationFailed(written_path));
        }

        let outcome = match self.decode_image(&written_path).await {
            Ok(info) => ThumbnailOutcome::Generated {
                width: info.width,
                height: info.height,
                size: info.size,
            },
            Err(err) => {
                tracing::warn!(path = %written_path.display(), %err, "thumbnail written but not readable");
                ThumbnailOutcome::GeneratedUnverified {
                    size: tokio::fs::metadata(&written_path).await?.len(),
                    note: UNVERIFIED_NOTE.to_string(),
                }
            }
        };

        Ok(Thumbnail {
            image_path,
            written_path,
            outcome,
        })
    }
}
