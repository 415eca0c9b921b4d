// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The per-pixel energy field.
//!
//! Energy is the dual-gradient metric: the rounded Euclidean norm of
//! the horizontal and vertical colour gradients, summed over all four
//! channels.  Neighbour lookup wraps toroidally: the pixel left of
//! column 0 is the last working column, and the pixel above row 0 is
//! the bottom row.  The field is computed in full exactly once per carve
//! and afterwards only patched around each removed seam, which is
//! where the per-iteration savings of the whole carver come from.

use crate::gridmap::GridMap;
use crate::pixelgrid::PixelGrid;

/// Marks energy cells beyond the working width.  Kept distinct from
/// any reachable energy (those are never negative).
pub const UNUSED: i32 = i32::MIN;

/// The energy of a single pixel, with toroidal neighbour lookup.
/// `width` is the current working width; `x` must be below it.
pub fn pixel_energy(grid: &PixelGrid, x: u32, y: u32, width: u32) -> i32 {
    let height = grid.height();
    let left = (x + width - 1) % width;
    let right = (x + 1) % width;
    let up = (y + height - 1) % height;
    let down = (y + 1) % height;

    let mut sum = 0i32;
    for plane in grid.planes().iter() {
        let dx = i32::from(plane[(right, y)]) - i32::from(plane[(left, y)]);
        let dy = i32::from(plane[(x, down)]) - i32::from(plane[(x, up)]);
        sum += dx * dx + dy * dy;
    }
    f64::from(sum).sqrt().round() as i32
}

/// A `height × original_width` field of per-pixel energies, valid for
/// columns below the grid's working width.
#[derive(Debug)]
pub struct EnergyField {
    map: GridMap<i32>,
}

impl EnergyField {
    /// Allocate an empty field.  Sized once, at the original width.
    pub fn new(width: u32, height: u32) -> Self {
        EnergyField {
            map: GridMap::new(width, height),
        }
    }

    pub fn get(&self, x: u32, y: u32) -> i32 {
        self.map[(x, y)]
    }

    /// One allocated row; only the first `working_width` entries are
    /// meaningful.
    pub fn row(&self, y: u32) -> &[i32] {
        self.map.row(y)
    }

    /// Compute every pixel's energy from scratch.  The four border
    /// lines go through the wrap-aware scalar path; the interior runs
    /// a modulo-free pass over row slices, which is where nearly all
    /// pixels are.
    pub fn compute_full(&mut self, grid: &PixelGrid) {
        let w = grid.working_width();
        let h = grid.height();

        for x in 0..w {
            self.map[(x, 0)] = pixel_energy(grid, x, 0, w);
            self.map[(x, h - 1)] = pixel_energy(grid, x, h - 1, w);
        }
        for y in 1..h - 1 {
            self.map[(0, y)] = pixel_energy(grid, 0, y, w);
            self.map[(w - 1, y)] = pixel_energy(grid, w - 1, y, w);
        }
        self.fill_interior(grid, w, h);
    }

    // Interior pixels have all four neighbours in place, so the wrap
    // arithmetic drops out entirely and each gradient is two slice
    // reads one stride apart.
    fn fill_interior(&mut self, grid: &PixelGrid, w: u32, h: u32) {
        if w < 3 || h < 3 {
            return;
        }
        let planes = grid.planes();
        let stride = planes[0].stride() as usize;

        for y in 1..h - 1 {
            let base = y as usize * stride;
            let out = self.map.row_mut(y);
            for x in 1..(w - 1) as usize {
                let i = base + x;
                let mut sum = 0i32;
                for plane in planes.iter() {
                    let cells = plane.cells();
                    let dx = i32::from(cells[i + 1]) - i32::from(cells[i - 1]);
                    let dy = i32::from(cells[i + stride]) - i32::from(cells[i - stride]);
                    sum += dx * dx + dy * dy;
                }
                out[x] = f64::from(sum).sqrt().round() as i32;
            }
        }
    }

    /// Patch the field after `grid` has had `seam` removed.  Expects
    /// the grid's working width to be the post-removal one.
    ///
    /// Three narrow updates suffice for a full refresh: the energy
    /// rows mirror the pixel shift, the two pixels flanking each
    /// removed column get new horizontal neighbours, and the top and
    /// bottom rows (vertical wrap partners) get recomputed across
    /// the span where exactly one of the two has shifted.  Everything
    /// else keeps both its neighbour identities because a seam moves
    /// at most one column between adjacent rows.
    pub fn adjust_after_removal(&mut self, grid: &PixelGrid, seam: &[u32]) {
        let w = grid.working_width();
        let h = grid.height();
        assert_eq!(seam.len(), h as usize);

        for y in 0..h {
            let pos = seam[y as usize] as usize;
            let row = self.map.row_mut(y);
            row.copy_within(pos + 1..w as usize + 1, pos);
            row[w as usize] = UNUSED;
        }

        for y in 0..h {
            let col = seam[y as usize];
            let left = (col + w - 1) % w;
            let right = col % w;
            self.map[(left, y)] = pixel_energy(grid, left, y, w);
            self.map[(right, y)] = pixel_energy(grid, right, y, w);
        }

        let top = seam[0];
        let bottom = seam[h as usize - 1];
        for x in top.min(bottom)..top.max(bottom) {
            self.map[(x, 0)] = pixel_energy(grid, x, 0, w);
            self.map[(x, h - 1)] = pixel_energy(grid, x, h - 1, w);
        }
    }
}

#[cfg(test)]
impl EnergyField {
    /// Test fixture hook: plant an arbitrary energy value.
    pub(crate) fn set(&mut self, x: u32, y: u32, energy: i32) {
        self.map[(x, y)] = energy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    // Build a grid whose red channel comes from `reds` (row-major)
    // and whose other channels are flat, so only red gradients count.
    fn grid_from_reds(width: u32, height: u32, reds: &[u8]) -> PixelGrid {
        let image = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([reds[(y * width + x) as usize], 7, 7, 7])
        });
        PixelGrid::from_image(&image)
    }

    #[test]
    fn flat_image_has_zero_energy() {
        let grid = grid_from_reds(5, 4, &[42; 20]);
        let mut field = EnergyField::new(5, 4);
        field.compute_full(&grid);
        for y in 0..4 {
            assert_eq!(field.row(y)[..5], [0; 5]);
        }
    }

    #[test]
    fn energy_wraps_toroidally() {
        // A single bright red pixel at (2, 1).  Its own energy is zero
        // (opposing neighbours are equal); the four pixels around it
        // light up, and the wrap makes (2, 0) see it from below *and*
        // from row 3 above.
        #[rustfmt::skip]
        const REDS: [u8; 20] = [
            0, 0,  0, 0, 0,
            0, 0, 10, 0, 0,
            0, 0,  0, 0, 0,
            0, 0,  0, 0, 0,
        ];
        #[rustfmt::skip]
        const EXPECTED: [i32; 20] = [
            0,  0, 10,  0, 0,
            0, 10,  0, 10, 0,
            0,  0, 10,  0, 0,
            0,  0,  0,  0, 0,
        ];
        let grid = grid_from_reds(5, 4, &REDS);
        let mut field = EnergyField::new(5, 4);
        field.compute_full(&grid);
        for y in 0..4u32 {
            assert_eq!(
                field.row(y)[..5],
                EXPECTED[(y * 5) as usize..(y * 5 + 5) as usize]
            );
        }
    }

    #[test]
    fn multi_channel_energies_sum_before_the_root() {
        // Red and green both step by 6, so the gradient square doubles
        // and sqrt(72) = 8.485... rounds to 8.
        let image = RgbaImage::from_fn(3, 1, |x, _| {
            let v = if x == 1 { 6 } else { 0 };
            Rgba([v, v, 7, 7])
        });
        let grid = PixelGrid::from_image(&image);
        let mut field = EnergyField::new(3, 1);
        field.compute_full(&grid);
        assert_eq!(field.row(0)[..3], [8, 0, 8]);
    }

    #[test]
    fn energies_are_never_negative() {
        let reds: Vec<u8> = (0..48).map(|i| (i * 37 % 251) as u8).collect();
        let grid = grid_from_reds(8, 6, &reds);
        let mut field = EnergyField::new(8, 6);
        field.compute_full(&grid);
        for y in 0..6 {
            assert!(field.row(y)[..8].iter().all(|&e| e >= 0));
        }
    }

    #[test]
    fn repeated_evaluation_is_stable() {
        let reds: Vec<u8> = (0..20).map(|i| (i * 11 % 256) as u8).collect();
        let grid = grid_from_reds(5, 4, &reds);
        assert_eq!(pixel_energy(&grid, 3, 2, 5), pixel_energy(&grid, 3, 2, 5));
    }
}
