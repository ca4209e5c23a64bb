use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::media_service::{backends::ProbeReport, utils::round2};

/// Properties of a decoded image file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    /// Codec / container name, e.g. `PNG` or `JPEG`.
    pub format: String,
    /// `RGBA` when the image carries an alpha channel, `RGB` otherwise.
    pub mode: String,
    pub width: u32,
    pub height: u32,
    /// Horizontal and vertical density in dots per inch, when the file records one.
    pub resolution: Option<(f64, f64)>,
    /// File size in bytes.
    pub size: u64,
    pub filename: String,
    pub absolute_path: PathBuf,
}

/// Properties of a probed media container.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub format: Map<String, Value>,
    pub video_streams: Vec<Map<String, Value>>,
    pub audio_streams: Vec<Map<String, Value>>,
    /// Seconds, 0 when the container does not say.
    pub duration: f64,
    /// Bytes, 0 when the container does not say.
    pub size: u64,
    /// Bits per second, 0 when the container does not say.
    pub bit_rate: u64,
    pub framerate: Option<f64>,
    pub absolute_path: PathBuf,
}

impl VideoInfo {
    pub fn from_probe(absolute_path: &Path, report: ProbeReport) -> Self {
        let video_streams: Vec<_> = report.streams_of_kind("video").cloned().collect();
        let audio_streams: Vec<_> = report.streams_of_kind("audio").cloned().collect();

        let framerate = video_streams
            .first()
            .and_then(|stream| stream.get("avg_frame_rate"))
            .and_then(Value::as_str)
            .and_then(parse_frame_rate);

        Self {
            duration: numeric_field(&report.format, "duration").unwrap_or(0.0),
            size: integer_field(&report.format, "size").unwrap_or(0),
            bit_rate: integer_field(&report.format, "bit_rate").unwrap_or(0),
            format: report.format,
            video_streams,
            audio_streams,
            framerate,
            absolute_path: absolute_path.to_path_buf(),
        }
    }
}

/// Successful description of a classified media file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mediaType", rename_all = "UPPERCASE")]
pub enum MediaInfo {
    Image(ImageInfo),
    Video(VideoInfo),
}

/// Parses an `N/D` frame rate into frames per second, rounded to two decimals.
///
/// Returns `None` unless the value has exactly two integer parts and a non-zero denominator.
pub fn parse_frame_rate(rate: &str) -> Option<f64> {
    let (numerator, denominator) = rate.split_once('/')?;
    if denominator.contains('/') {
        return None;
    }
    let numerator: i64 = numerator.trim().parse().ok()?;
    let denominator: i64 = denominator.trim().parse().ok()?;
    if denominator == 0 {
        return None;
    }
    Some(round2(numerator as f64 / denominator as f64))
}

// ffprobe reports most numbers as strings
fn numeric_field(map: &Map<String, Value>, key: &str) -> Option<f64> {
    match map.get(key)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn integer_field(map: &Map<String, Value>, key: &str) -> Option<u64> {
    match map.get(key)? {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(value: Value) -> ProbeReport {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn frame_rate_parsing() {
        assert_eq!(parse_frame_rate("30000/1001"), Some(29.97));
        assert_eq!(parse_frame_rate("25/1"), Some(25.0));
        assert_eq!(parse_frame_rate("0/0"), None);
        assert_eq!(parse_frame_rate("30"), None);
        assert_eq!(parse_frame_rate("1/2/3"), None);
        assert_eq!(parse_frame_rate("abc/1"), None);
    }

    #[test]
    fn video_info_from_probe() {
        let report = report(json!({
            "streams": [
                {"codec_type": "audio", "codec_name": "aac"},
                {"codec_type": "video", "codec_name": "h264", "avg_frame_rate": "24000/1001"},
                {"codec_type": "video", "codec_name": "mjpeg", "avg_frame_rate": "0/0"}
            ],
            "format": {"duration": "12.500000", "size": "1048576", "bit_rate": "671088"}
        }));
        let info = VideoInfo::from_probe(Path::new("/media/clip.mp4"), report);
        assert_eq!(info.video_streams.len(), 2);
        assert_eq!(info.audio_streams.len(), 1);
        assert_eq!(info.duration, 12.5);
        assert_eq!(info.size, 1_048_576);
        assert_eq!(info.bit_rate, 671_088);
        assert_eq!(info.framerate, Some(23.98));
        assert_eq!(info.absolute_path, PathBuf::from("/media/clip.mp4"));
    }

    #[test]
    fn unspecified_format_fields_default_to_zero() {
        let report = report(json!({
            "streams": [{"codec_type": "audio"}],
            "format": {"bit_rate": "N/A"}
        }));
        let info = VideoInfo::from_probe(Path::new("/media/song.mp3"), report);
        assert_eq!(info.duration, 0.0);
        assert_eq!(info.size, 0);
        assert_eq!(info.bit_rate, 0);
        assert_eq!(info.framerate, None);
    }

    #[test]
    fn media_info_is_tagged() {
        let info = MediaInfo::Image(ImageInfo {
            format: "PNG".to_string(),
            mode: "RGB".to_string(),
            width: 4,
            height: 2,
            resolution: None,
            size: 70,
            filename: "a.png".to_string(),
            absolute_path: PathBuf::from("/media/a.png"),
        });
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["mediaType"], "IMAGE");
        assert_eq!(value["width"], 4);
        assert_eq!(value["absolutePath"], "/media/a.png");
        assert!(value["resolution"].is_null());
    }
}
