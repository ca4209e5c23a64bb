#![allow(dead_code)]

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use rust_mcp_media::{
    error::{ServiceError, ServiceResult},
    media_service::{
        MediaService,
        backends::{ContainerProber, FrameExtractor, ProbeReport},
    },
};
use rust_mcp_sdk::schema::{CallToolResult, ContentBlock};
use serde_json::{Value, json};

pub const FAKE_VIDEO_MAGIC: &[u8] = b"FAKEVIDEO";
pub const FAKE_AUDIO_MAGIC: &[u8] = b"FAKEAUDIO";

pub fn get_temp_dir() -> PathBuf {
    let temp_dir = tempfile::tempdir().unwrap().keep();
    // roots and candidates are compared in canonical form
    temp_dir.canonicalize().unwrap()
}

/// Creates `dirs` under a fresh temp directory and a service permitted to use them.
pub fn setup_service(dirs: Vec<String>) -> (PathBuf, MediaService, Vec<String>) {
    setup_service_with(
        dirs,
        Arc::new(FakeProber::default()),
        Arc::new(FakeExtractor::new(ExtractMode::WritePng)),
    )
}

pub fn setup_service_with(
    dirs: Vec<String>,
    prober: Arc<dyn ContainerProber>,
    extractor: Arc<dyn FrameExtractor>,
) -> (PathBuf, MediaService, Vec<String>) {
    let temp_dir = get_temp_dir();
    let allowed_dirs = dirs
        .into_iter()
        .map(|dir| {
            let dir_path = temp_dir.join(&dir);
            fs::create_dir_all(&dir_path).unwrap();
            dir_path.to_str().unwrap().to_string()
        })
        .collect::<Vec<String>>();
    let service = MediaService::try_new(&allowed_dirs)
        .unwrap()
        .with_prober(prober)
        .with_frame_extractor(extractor)
        .with_probe_timeout(Duration::from_secs(5));
    (temp_dir, service, allowed_dirs)
}

pub fn create_temp_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(name);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut file = File::create(&file_path).unwrap();
    file.write_all(content).unwrap();
    file_path
}

/// Writes a real PNG, regardless of the extension in `name`.
pub fn create_png(dir: &Path, name: &str, width: u32, height: u32, alpha: bool) -> PathBuf {
    let file_path = dir.join(name);
    let bytes = png_bytes(width, height, alpha);
    fs::write(&file_path, bytes).unwrap();
    file_path
}

pub fn png_bytes(width: u32, height: u32, alpha: bool) -> Vec<u8> {
    let image = if alpha {
        image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([10, 20, 30, 128]),
        ))
    } else {
        image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            width,
            height,
            image::Rgb([200, 40, 40]),
        ))
    };
    let mut buffer = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, image::ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

pub fn create_fake_video(dir: &Path, name: &str) -> PathBuf {
    create_temp_file(dir, name, &[FAKE_VIDEO_MAGIC, &b" h264 stream data"[..]].concat())
}

pub fn create_fake_audio(dir: &Path, name: &str) -> PathBuf {
    create_temp_file(dir, name, &[FAKE_AUDIO_MAGIC, &b" aac stream data"[..]].concat())
}

pub fn video_report() -> ProbeReport {
    serde_json::from_value(json!({
        "streams": [
            {"index": 0, "codec_type": "video", "codec_name": "h264", "width": 1920, "height": 1080, "avg_frame_rate": "30000/1001"},
            {"index": 1, "codec_type": "audio", "codec_name": "aac", "channels": 2}
        ],
        "format": {"format_name": "mov,mp4,m4a,3gp,3g2,mj2", "duration": "10.010000", "size": "2048000", "bit_rate": "1636000"}
    }))
    .unwrap()
}

pub fn audio_report() -> ProbeReport {
    serde_json::from_value(json!({
        "streams": [{"index": 0, "codec_type": "audio", "codec_name": "mp3"}],
        "format": {"format_name": "mp3", "duration": "3.5"}
    }))
    .unwrap()
}

/// Recognizes files by their leading magic bytes, the way ffprobe recognizes containers.
#[derive(Default)]
pub struct FakeProber {
    pub calls: AtomicUsize,
}

#[async_trait]
impl ContainerProber for FakeProber {
    async fn probe(&self, path: &Path) -> ServiceResult<ProbeReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let content = tokio::fs::read(path).await?;
        if content.starts_with(FAKE_VIDEO_MAGIC) {
            Ok(video_report())
        } else if content.starts_with(FAKE_AUDIO_MAGIC) {
            Ok(audio_report())
        } else {
            Err(ServiceError::ProbeError(
                "Invalid data found when processing input".to_string(),
            ))
        }
    }
}

/// Recognizes every file as a video container.
#[derive(Default)]
pub struct AlwaysVideoProber {
    pub calls: AtomicUsize,
}

#[async_trait]
impl ContainerProber for AlwaysVideoProber {
    async fn probe(&self, _path: &Path) -> ServiceResult<ProbeReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(video_report())
    }
}

/// Never answers.
pub struct HangingProber;

#[async_trait]
impl ContainerProber for HangingProber {
    async fn probe(&self, _path: &Path) -> ServiceResult<ProbeReport> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(ProbeReport::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Write a decodable 64x36 PNG.
    WritePng,
    /// Write bytes that are not an image.
    WriteGarbage,
    /// Report success without writing anything.
    WriteNothing,
    /// Fail like ffmpeg does on a broken stream.
    Fail,
}

pub struct FakeExtractor {
    pub mode: ExtractMode,
    pub calls: AtomicUsize,
}

impl FakeExtractor {
    pub fn new(mode: ExtractMode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl FrameExtractor for FakeExtractor {
    async fn extract_frame(&self, _video_path: &Path, output_path: &Path) -> ServiceResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            ExtractMode::WritePng => {
                tokio::fs::write(output_path, png_bytes(64, 36, false)).await?;
                Ok(())
            }
            ExtractMode::WriteGarbage => {
                tokio::fs::write(output_path, b"definitely not a png").await?;
                Ok(())
            }
            ExtractMode::WriteNothing => Ok(()),
            ExtractMode::Fail => Err(ServiceError::EncodeError(
                "Output file is empty, nothing was encoded".to_string(),
            )),
        }
    }
}

/// Parses the single JSON text block a tool returns.
pub fn result_json(result: &CallToolResult) -> Value {
    assert_eq!(result.content.len(), 1);
    match result.content.first().unwrap() {
        ContentBlock::TextContent(text_content) => {
            serde_json::from_str(&text_content.text).unwrap()
        }
        _ => panic!("Expected TextContent result"),
    }
}
