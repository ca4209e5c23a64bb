use image::ImageFormat;
use serde::Serialize;
use std::{fmt, path::Path};

use crate::{
    error::{ServiceError, ServiceResult},
    media_service::{
        MediaService,
        backends::ProbeReport,
        media_info::{ImageInfo, MediaInfo, VideoInfo},
    },
};

pub const NO_VIDEO_STREAM: &str = "recognized container with no video stream";

const VIDEO_EXTENSIONS: &[&str] = &[
    "3g2", "3gp", "avi", "flv", "m2ts", "m4v", "mkv", "mov", "mp4", "mpeg", "mpg", "mts", "ogv",
    "ts", "webm", "wmv",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaKind {
    Image,
    Video,
    OtherRecognizedMedia,
    Unknown,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::OtherRecognizedMedia => "recognized media without video",
            MediaKind::Unknown => "unrecognized content",
        };
        f.write_str(label)
    }
}

/// One content inspection the classifier may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStage {
    /// Decode the file with the image library.
    Image,
    /// Enumerate the file's streams with the container prober.
    Container,
}

impl fmt::Display for ProbeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStage::Image => f.write_str("image decode"),
            ProbeStage::Container => f.write_str("container probe"),
        }
    }
}

/// Ordered list of probe stages. The first stage that succeeds decides the media type,
/// so a file that is valid under several decoders takes the earliest stage's verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationPolicy {
    stages: Vec<ProbeStage>,
}

impl ClassificationPolicy {
    pub fn new(stages: Vec<ProbeStage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[ProbeStage] {
        &self.stages
    }
}

impl Default for ClassificationPolicy {
    /// Image decoding is cheap and covers the common case, the container probe is the fallback.
    fn default() -> Self {
        Self::new(vec![ProbeStage::Image, ProbeStage::Container])
    }
}

/// Metadata captured by the deciding probe, kept so callers need not probe again.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaMetadata {
    Image(ImageInfo),
    Container(ProbeReport),
}

/// Outcome of classifying a file by its content.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaType {
    kind: MediaKind,
    extension_hint: Option<MediaKind>,
    message: Option<String>,
    metadata: Option<MediaMetadata>,
}

impl MediaType {
    fn image(extension_hint: Option<MediaKind>, info: ImageInfo) -> Self {
        Self {
            kind: MediaKind::Image,
            extension_hint,
            message: None,
            metadata: Some(MediaMetadata::Image(info)),
        }
    }

    fn container(extension_hint: Option<MediaKind>, report: ProbeReport) -> Self {
        let (kind, message) = if report.has_video_stream() {
            (MediaKind::Video, None)
        } else {
            (MediaKind::OtherRecognizedMedia, Some(NO_VIDEO_STREAM.to_string()))
        };
        Self {
            kind,
            extension_hint,
            message,
            metadata: Some(MediaMetadata::Container(report)),
        }
    }

    fn unknown(extension_hint: Option<MediaKind>, message: String) -> Self {
        Self {
            kind: MediaKind::Unknown,
            extension_hint,
            message: Some(message),
            metadata: None,
        }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn is_image(&self) -> bool {
        self.kind == MediaKind::Image
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    /// What the file name alone suggested. Never used to decide `kind`.
    pub fn extension_hint(&self) -> Option<MediaKind> {
        self.extension_hint
    }

    /// Diagnostic text, present only for `OtherRecognizedMedia` and `Unknown`.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn metadata(&self) -> Option<&MediaMetadata> {
        self.metadata.as_ref()
    }

    pub fn into_metadata(self) -> Option<MediaMetadata> {
        self.metadata
    }
}

/// Guess based on the file extension alone.
pub fn extension_hint(path: &Path) -> Option<MediaKind> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    if ImageFormat::from_extension(&extension).is_some() {
        Some(MediaKind::Image)
    } else if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

impl MediaService {
    /// Validates `path` and classifies it by content.
    pub async fn classify(&self, path: &Path) -> ServiceResult<MediaType> {
        let valid_path = self.check_path(path)?;
        Ok(self.classify_valid(&valid_path).await)
    }

    /// Classifies `path` and describes it with the metadata the deciding probe captured.
    ///
    /// Recognized containers without a video stream are reported as unsupported.
    pub async fn get_media_info(&self, path: &Path) -> ServiceResult<MediaInfo> {
        let valid_path = self.check_path(path)?;
        let media_type = self.classify_valid(&valid_path).await;
        let kind = media_type.kind();
        let message = media_type.message().unwrap_or_default().to_string();

        match (kind, media_type.into_metadata()) {
            (MediaKind::Image, Some(MediaMetadata::Image(info))) => Ok(MediaInfo::Image(info)),
            (MediaKind::Video, Some(MediaMetadata::Container(report))) => Ok(MediaInfo::Video(
                VideoInfo::from_probe(&valid_path, report),
            )),
            (MediaKind::OtherRecognizedMedia, _) => Err(ServiceError::UnsupportedMedia(message)),
            _ => Err(ServiceError::UnrecognizedMedia(message)),
        }
    }

    /// Runs the policy stages in order against a path that already passed `check_path`.
    /// Stage failures are collected and only surface when no stage recognizes the file.
    pub(crate) async fn classify_valid(&self, valid_path: &Path) -> MediaType {
        let hint = extension_hint(valid_path);
        let mut failures: Vec<String> = Vec::new();

        for stage in self.policy.stages() {
            let decided = match stage {
                ProbeStage::Image => self
                    .decode_image(valid_path)
                    .await
                    .map(|info| MediaType::image(hint, info)),
                ProbeStage::Container => self
                    .probe_container(valid_path)
                    .await
                    .map(|report| MediaType::container(hint, report)),
            };

            match decided {
                Ok(media_type) => {
                    tracing::debug!(
                        path = %valid_path.display(),
                        %stage,
                        kind = %media_type.kind(),
                        "classified media file"
                    );
                    if let Some(hinted) = hint
                        && hinted != media_type.kind()
                    {
                        tracing::debug!(
                            path = %valid_path.display(),
                            %hinted,
                            "file extension does not match content"
                        );
                    }
                    return media_type;
                }
                Err(err) => failures.push(format!("{stage}: {err}")),
            }
        }

        // most recent failure first, the container probe's when the default policy is used
        failures.reverse();
        let message = if failures.is_empty() {
            "no probe stages configured".to_string()
        } else {
            failures.join("; ")
        };
        tracing::debug!(path = %valid_path.display(), %message, "unrecognized media file");
        MediaType::unknown(hint, message)
    }
}
