// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render an energy field as a grayscale image, scaled so the hottest
//! pixel is white.  Purely a debugging aid: it makes a botched
//! gradient or border case visible at a glance.

use crate::energy::EnergyField;
use image::{GrayImage, Luma};
use itertools::iproduct;
use num_traits::clamp;

pub fn energy_to_image(energy: &EnergyField, width: u32, height: u32) -> GrayImage {
    // max(1) keeps a perfectly flat image from dividing by zero
    let peak = iproduct!(0..height, 0..width)
        .map(|(y, x)| energy.get(x, y))
        .max()
        .unwrap_or(0)
        .max(1) as i64;

    let mut out = GrayImage::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        let scaled = i64::from(energy.get(x, y)) * 255 / peak;
        out.put_pixel(
            x,
            y,
            Luma([clamp(scaled, 0, 255) as u8]),
        );
    }
    out
}
