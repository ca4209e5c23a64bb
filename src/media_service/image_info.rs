use image::{ImageDecoder, ImageReader};
use std::path::{Path, PathBuf};

use crate::{
    error::{ServiceError, ServiceResult},
    media_service::{MediaService, density::read_resolution, media_info::ImageInfo},
};

impl MediaService {
    /// Reads the image header at `path` and describes it.
    pub async fn get_image_info(&self, path: &Path) -> ServiceResult<ImageInfo> {
        let valid_path = self.check_path(path)?;
        self.decode_image(&valid_path).await
    }

    /// Inspects an already validated path on the blocking pool, under the probe deadline.
    pub(crate) async fn decode_image(&self, valid_path: &Path) -> ServiceResult<ImageInfo> {
        let owned_path = valid_path.to_path_buf();
        let task = tokio::task::spawn_blocking(move || read_image_info(owned_path));
        self.with_deadline("Image decoding", async move {
            task.await
                .map_err(|err| ServiceError::DecodeError(err.to_string()))?
        })
        .await
    }
}

fn read_image_info(path: PathBuf) -> ServiceResult<ImageInfo> {
    // content sniffing first, the extension is only used when the magic bytes say nothing
    let reader = ImageReader::open(&path)?.with_guessed_format()?;
    let format = reader.format().ok_or_else(|| {
        ServiceError::DecodeError("the image format could not be determined".to_string())
    })?;

    // only the header is read, truncated pixel data does not fail the inspection
    let decoder = reader
        .into_decoder()
        .map_err(|err| ServiceError::DecodeError(err.to_string()))?;
    let (width, height) = decoder.dimensions();
    let has_alpha = decoder.color_type().has_alpha();

    let size = std::fs::metadata(&path)?.len();
    let resolution = read_resolution(&path, format).unwrap_or_else(|err| {
        tracing::debug!(path = %path.display(), %err, "unable to read image density");
        None
    });

    Ok(ImageInfo {
        format: format!("{format:?}").to_uppercase(),
        mode: if has_alpha {
            "RGBA".to_string()
        } else {
            "RGB".to_string()
        },
        width,
        height,
        resolution,
        size,
        filename: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        absolute_path: path,
    })
}
