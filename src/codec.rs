// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Codec glue: everything that touches the `image` crate or the file
//! system on behalf of the pipeline.
//!
//! The carver itself only ever sees channel planes; this module owns
//! decode, encode, and the right-edge crop, and keeps the pipeline's
//! file-format knowledge in one place.

use crate::error::CarveError;
use image::bmp::BMPEncoder;
use image::jpeg::JPEGEncoder;
use image::{imageops, ColorType, DynamicImage, RgbaImage};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

/// Decoding is refused above this edge length in either dimension.
pub const MAX_DIMENSION: u32 = 5000;

const JPEG_QUALITY: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Bmp,
    Jpeg,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bmp" => Ok(OutputFormat::Bmp),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            other => Err(format!("unsupported output format: {}", other)),
        }
    }
}

/// Decode `path` into an RGBA pixel buffer.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, CarveError> {
    if !path.exists() {
        return Err(CarveError::SourceNotFound(path.to_path_buf()));
    }
    let decoded = image::open(path).map_err(CarveError::UnsupportedImage)?;
    let rgba = decoded.to_rgba();

    let (width, height) = rgba.dimensions();
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(CarveError::ImageTooLarge {
            width,
            height,
            max: MAX_DIMENSION,
        });
    }
    Ok(rgba)
}

/// Encode to a freshly created file.  Creation uses `create_new`, so
/// an existing destination fails here rather than being overwritten,
/// even if it appeared after the pipeline's own existence check.
/// JPEG has no alpha channel; that path flattens to RGB first.
pub fn save(image: RgbaImage, dest: &Path, format: OutputFormat) -> Result<(), CarveError> {
    let file = OpenOptions::new().write(true).create_new(true).open(dest)?;
    let mut writer = BufWriter::new(file);
    let (width, height) = image.dimensions();

    match format {
        OutputFormat::Bmp => {
            BMPEncoder::new(&mut writer).encode(&image, width, height, ColorType::RGBA(8))?;
        }
        OutputFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image).to_rgb();
            JPEGEncoder::new_with_quality(&mut writer, JPEG_QUALITY).encode(
                &rgb,
                width,
                height,
                ColorType::RGB(8),
            )?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Discard `columns` columns from the right edge.  The caller keeps
/// `columns` within `1..=width`.
pub fn crop_right_columns(image: RgbaImage, columns: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    assert!(
        columns >= 1 && columns <= width,
        "tried to crop {} columns, allowed: 1 - {}",
        columns,
        width
    );
    let mut image = image;
    imageops::crop(&mut image, 0, 0, width - columns, height).to_image()
}
