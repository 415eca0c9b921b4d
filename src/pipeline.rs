// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pipeline entry point: validate, decode, carve, encode.
//!
//! This is the whole public ceremony around the engine.  Validation
//! happens before any pixel work; the destination file is created only
//! after carving and just before encoding, so a failed or cancelled
//! run never leaves a partial file behind.

use crate::cancel::CancellationToken;
use crate::carver::SeamCarver;
use crate::codec::{self, OutputFormat};
use crate::cq;
use crate::error::CarveError;
use crate::pixelgrid::PixelGrid;
use std::path::Path;

/// Carve `columns_to_carve` vertical seams out of the image at
/// `source` and write the result to `dest`.
///
/// With `crop` set the output is narrower by `columns_to_carve`
/// columns; without it the output keeps the original width and the
/// carved-out columns remain as a 255-valued band on the right edge,
/// which is occasionally what you want for eyeballing what got cut.
///
/// At least three columns must survive, so `columns_to_carve` is
/// limited to `1..=width - 3` and sources narrower than four columns
/// are rejected outright.
pub fn carve_vertically(
    source: &Path,
    columns_to_carve: u32,
    dest: &Path,
    format: OutputFormat,
    cancel: &CancellationToken,
    crop: bool,
) -> Result<(), CarveError> {
    cancel.check()?;

    if dest.exists() {
        return Err(CarveError::DestinationAlreadyExists(dest.to_path_buf()));
    }

    let mut image = codec::load_rgba(source)?;
    let width = image.width();

    if width < 4 {
        return Err(CarveError::ImageTooSmall(width));
    }
    if columns_to_carve < 1 || columns_to_carve > width - 3 {
        return Err(CarveError::InvalidColumnCount {
            requested: columns_to_carve,
            max: width - 3,
        });
    }

    let mut carver = SeamCarver::new(PixelGrid::from_image(&image));
    carver.carve(columns_to_carve, cancel)?;
    carver.into_grid().write_into(&mut image);

    let image = cq!(
        crop,
        codec::crop_right_columns(image, columns_to_carve),
        image
    );
    codec::save(image, dest, format)
}
