use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    path::{Path, PathBuf},
    process::Output,
};
use tokio::process::Command;

use crate::{
    error::{ServiceError, ServiceResult},
    media_service::utils::tail_text,
};

const MAX_ERROR_CHARS: usize = 1000;

/// Structural description of a media container, as reported by the prober.
///
/// The format and stream descriptors are kept as opaque JSON objects and are
/// returned to clients unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeReport {
    #[serde(default)]
    pub format: Map<String, Value>,
    #[serde(default)]
    pub streams: Vec<Map<String, Value>>,
}

impl ProbeReport {
    pub fn streams_of_kind<'a>(
        &'a self,
        kind: &'a str,
    ) -> impl Iterator<Item = &'a Map<String, Value>> + 'a {
        self.streams
            .iter()
            .filter(move |stream| stream.get("codec_type").and_then(Value::as_str) == Some(kind))
    }

    pub fn has_video_stream(&self) -> bool {
        self.streams_of_kind("video").next().is_some()
    }
}

/// Enumerates the streams and format-level fields of a media container.
#[async_trait]
pub trait ContainerProber: Send + Sync {
    async fn probe(&self, path: &Path) -> ServiceResult<ProbeReport>;
}

/// Writes one representative frame of `video_path` as an image at `output_path`.
#[async_trait]
pub trait FrameExtractor: Send + Sync {
    async fn extract_frame(&self, video_path: &Path, output_path: &Path) -> ServiceResult<()>;
}

/// Locates `program` on `PATH`, returning the resolved location when found.
pub fn locate_program(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}

async fn run_program(program: &Path, mut command: Command) -> ServiceResult<Output> {
    command
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ServiceError::ToolNotFound(program.display().to_string())
            } else {
                ServiceError::IoError(err)
            }
        })
}

fn failure_message(program: &Path, output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.trim().is_empty() {
        format!("{} exited with {}", program.display(), output.status)
    } else {
        tail_text(&stderr, MAX_ERROR_CHARS)
    }
}

/// [`ContainerProber`] backed by the `ffprobe` executable.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    program: PathBuf,
}

impl FfprobeProber {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

#[async_trait]
impl ContainerProber for FfprobeProber {
    async fn probe(&self, path: &Path) -> ServiceResult<ProbeReport> {
        tracing::debug!(path = %path.display(), "probing container");
        let mut command = Command::new(&self.program);
        command
            .args([
                "-v",
                "error",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path);
        let output = run_program(&self.program, command).await?;

        if !output.status.success() {
            return Err(ServiceError::ProbeError(failure_message(
                &self.program,
                &output,
            )));
        }

        serde_json::from_slice::<ProbeReport>(&output.stdout).map_err(|err| {
            ServiceError::ProbeError(format!("unreadable ffprobe output: {err}"))
        })
    }
}

/// [`FrameExtractor`] backed by the `ffmpeg` executable.
///
/// Uses the `thumbnail` filter, which picks the most representative frame out of
/// each batch of frames instead of the first one, so black lead-in frames are skipped.
#[derive(Debug, Clone)]
pub struct FfmpegFrameExtractor {
    program: PathBuf,
}

impl FfmpegFrameExtractor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FfmpegFrameExtractor {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

#[async_trait]
impl FrameExtractor for FfmpegFrameExtractor {
    async fn extract_frame(&self, video_path: &Path, output_path: &Path) -> ServiceResult<()> {
        tracing::debug!(
            video = %video_path.display(),
            output = %output_path.display(),
            "extracting representative frame"
        );
        let mut command = Command::new(&self.program);
        command
            .args(["-v", "error", "-y", "-i"])
            .arg(video_path)
            .args(["-vf", "thumbnail", "-frames:v", "1"])
            .arg(output_path);
        let output = run_program(&self.program, command).await?;

        if !output.status.success() {
            return Err(ServiceError::EncodeError(failure_message(
                &self.program,
                &output,
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_ffprobe_json() {
        let raw = json!({
            "streams": [
                {"index": 0, "codec_type": "video", "codec_name": "h264", "avg_frame_rate": "30000/1001"},
                {"index": 1, "codec_type": "audio", "codec_name": "aac"}
            ],
            "format": {"format_name": "mov,mp4,m4a,3gp,3g2,mj2", "duration": "10.010000"}
        });
        let report: ProbeReport = serde_json::from_value(raw).unwrap();
        assert!(report.has_video_stream());
        assert_eq!(report.streams_of_kind("audio").count(), 1);
        assert_eq!(report.streams_of_kind("subtitle").count(), 0);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let report: ProbeReport = serde_json::from_str("{}").unwrap();
        assert!(report.streams.is_empty());
        assert!(!report.has_video_stream());
    }

    #[tokio::test]
    async fn missing_program_is_reported() {
        let prober = FfprobeProber::new("/nonexistent/bin/ffprobe-for-tests");
        let result = prober.probe(Path::new("/tmp/whatever.mp4")).await;
        assert!(matches!(result, Err(ServiceError::ToolNotFound(_))));
    }
}
