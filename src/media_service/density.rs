//! Reads the pixel density an image file declares in its header.
//!
//! The `image` crate does not surface this, so the few header fields involved
//! are read directly for the formats that carry them.

use crate::media_service::utils::round2;
use image::ImageFormat;
use std::{fs::File, io::Read, path::Path};

const HEADER_READ_LIMIT: u64 = 64 * 1024;
const INCHES_PER_METER: f64 = 0.0254;
const CM_PER_INCH: f64 = 2.54;

/// Horizontal and vertical density in dots per inch, when recorded.
pub fn read_resolution(path: &Path, format: ImageFormat) -> std::io::Result<Option<(f64, f64)>> {
    let parse: fn(&[u8]) -> Option<(f64, f64)> = match format {
        ImageFormat::Png => png_density,
        ImageFormat::Jpeg => jfif_density,
        ImageFormat::Bmp => bmp_density,
        _ => return Ok(None),
    };

    let mut header = Vec::new();
    File::open(path)?
        .take(HEADER_READ_LIMIT)
        .read_to_end(&mut header)?;
    Ok(parse(&header))
}

fn be_u16(bytes: &[u8], at: usize) -> Option<u16> {
    Some(u16::from_be_bytes(bytes.get(at..at + 2)?.try_into().ok()?))
}

fn be_u32(bytes: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_be_bytes(bytes.get(at..at + 4)?.try_into().ok()?))
}

fn le_u32(bytes: &[u8], at: usize) -> Option<u32> {
    Some(u32::from_le_bytes(bytes.get(at..at + 4)?.try_into().ok()?))
}

fn le_i32(bytes: &[u8], at: usize) -> Option<i32> {
    Some(i32::from_le_bytes(bytes.get(at..at + 4)?.try_into().ok()?))
}

fn per_meter_to_dpi(x: f64, y: f64) -> (f64, f64) {
    (round2(x * INCHES_PER_METER), round2(y * INCHES_PER_METER))
}

/// `pHYs` chunk, only meaningful when its unit is the meter.
fn png_density(bytes: &[u8]) -> Option<(f64, f64)> {
    const SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
    if !bytes.starts_with(SIGNATURE) {
        return None;
    }

    let mut offset = SIGNATURE.len();
    while let Some(length) = be_u32(bytes, offset) {
        let kind = bytes.get(offset + 4..offset + 8)?;
        let data = offset + 8;
        match kind {
            b"pHYs" => {
                let x = be_u32(bytes, data)?;
                let y = be_u32(bytes, data + 4)?;
                let unit = *bytes.get(data + 8)?;
                return (unit == 1 && x > 0 && y > 0)
                    .then(|| per_meter_to_dpi(x as f64, y as f64));
            }
            // pHYs must precede the image data
            b"IDAT" | b"IEND" => return None,
            _ => offset = data + length as usize + 4,
        }
    }
    None
}

/// JFIF `APP0` segment density.
fn jfif_density(bytes: &[u8]) -> Option<(f64, f64)> {
    if !bytes.starts_with(&[0xFF, 0xD8]) {
        return None;
    }

    let mut offset = 2;
    loop {
        if *bytes.get(offset)? != 0xFF {
            return None;
        }
        let marker = *bytes.get(offset + 1)?;
        // start of scan, no more header segments
        if marker == 0xDA {
            return None;
        }
        let length = be_u16(bytes, offset + 2)? as usize;
        let data = offset + 4;
        if marker == 0xE0 && bytes.get(data..data + 5)? == b"JFIF\0" {
            let unit = *bytes.get(data + 7)?;
            let x = be_u16(bytes, data + 8)? as f64;
            let y = be_u16(bytes, data + 10)? as f64;
            if x == 0.0 || y == 0.0 {
                return None;
            }
            return match unit {
                1 => Some((x, y)),
                2 => Some((round2(x * CM_PER_INCH), round2(y * CM_PER_INCH))),
                _ => None,
            };
        }
        offset += 2 + length;
    }
}

/// Pixels-per-meter fields of the BITMAPINFOHEADER.
fn bmp_density(bytes: &[u8]) -> Option<(f64, f64)> {
    if !bytes.starts_with(b"BM") || le_u32(bytes, 14)? < 40 {
        return None;
    }
    let x = le_i32(bytes, 38)?;
    let y = le_i32(bytes, 42)?;
    (x > 0 && y > 0).then(|| per_meter_to_dpi(x as f64, y as f64))
}
