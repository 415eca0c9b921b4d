// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The carving engine: one grid, three reusable working buffers, and
//! the seam-removal loop.
//!
//! Per iteration the engine rebuilds the seam map from the energy
//! field, backtracks the minimal seam, removes it from the grid, and
//! patches the energy field around the cut.  The energy field is
//! computed in full only once, before the first seam; the buffers are
//! allocated once at the original image size and shrink only
//! logically, so a whole carve performs no allocation after `new`.

use crate::cancel::CancellationToken;
use crate::energy::EnergyField;
use crate::error::CarveError;
use crate::pixelgrid::PixelGrid;
use crate::seammap::SeamMap;

pub struct SeamCarver {
    grid: PixelGrid,
    energy: EnergyField,
    seam_map: SeamMap,
    seam: Vec<u32>,
}

impl SeamCarver {
    /// Take ownership of a grid and size the working buffers to it.
    pub fn new(grid: PixelGrid) -> Self {
        let (width, height) = (grid.width(), grid.height());
        SeamCarver {
            energy: EnergyField::new(width, height),
            seam_map: SeamMap::new(width, height),
            seam: Vec::with_capacity(height as usize),
            grid,
        }
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn energy(&self) -> &EnergyField {
        &self.energy
    }

    /// Hand the carved grid back for write-out.
    pub fn into_grid(self) -> PixelGrid {
        self.grid
    }

    /// Remove `seams` vertical seams.  The token is polled once up
    /// front and once before each seam; the caller guarantees the
    /// working width stays above the number of seams requested.
    pub fn carve(&mut self, seams: u32, cancel: &CancellationToken) -> Result<(), CarveError> {
        if seams == 0 {
            return Ok(());
        }
        cancel.check()?;

        self.energy.compute_full(&self.grid);
        for _ in 0..seams {
            cancel.check()?;
            self.carve_one();
        }
        Ok(())
    }

    // One full iteration against an already-valid energy field.
    fn carve_one(&mut self) {
        let width = self.grid.working_width();
        let height = self.grid.height();

        self.seam_map.rebuild(&self.energy, width, height);
        self.seam_map.find_minimal_seam(width, height, &mut self.seam);
        self.grid.remove_seam(&self.seam);
        self.energy.adjust_after_removal(&self.grid, &self.seam);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixelgrid::SEAM_SENTINEL;
    use image::{Rgba, RgbaImage};

    // Column values chosen so that x=2 is the unique smooth path:
    // its horizontal neighbours are equal, everywhere else has a
    // gradient.  All four channels carry the same value, so each
    // energy is exactly 2 * |dx|.
    const COLUMNS: [u8; 5] = [10, 50, 30, 50, 90];

    fn five_by_three() -> PixelGrid {
        let image = RgbaImage::from_fn(5, 3, |x, _| {
            let v = COLUMNS[x as usize];
            Rgba([v, v, v, v])
        });
        PixelGrid::from_image(&image)
    }

    fn full_recompute(grid: &PixelGrid) -> EnergyField {
        let mut reference = EnergyField::new(grid.width(), grid.height());
        reference.compute_full(grid);
        reference
    }

    #[test]
    fn carves_the_smooth_column_at_every_row() {
        let mut carver = SeamCarver::new(five_by_three());
        carver.carve(1, &CancellationToken::new()).unwrap();

        assert_eq!(carver.seam, vec![2, 2, 2]);
        assert_eq!(carver.grid.working_width(), 4);
        assert_eq!(carver.grid.height(), 3);
        for y in 0..3 {
            assert_eq!(
                carver.grid.planes()[0].row(y),
                &[10, 50, 50, 90, SEAM_SENTINEL]
            );
        }
    }

    #[test]
    fn patched_energies_reflect_the_new_neighbours() {
        let mut carver = SeamCarver::new(five_by_three());
        carver.carve(1, &CancellationToken::new()).unwrap();

        // The surviving columns sit on a uniform 40-per-channel ring,
        // so every energy is 2 * 40.
        for y in 0..3 {
            assert_eq!(carver.energy.row(y)[..4], [80, 80, 80, 80]);
        }
        let reference = full_recompute(&carver.grid);
        for y in 0..3 {
            assert_eq!(carver.energy.row(y)[..4], reference.row(y)[..4]);
        }
    }

    #[test]
    fn incremental_patch_matches_a_full_recompute() {
        // A deterministic mixed-channel pattern with no symmetry; the
        // narrow patch has to agree with a from-scratch field after
        // every one of several removals.
        let image = RgbaImage::from_fn(6, 6, |x, y| {
            Rgba([
                ((x * 31 + y * 17) % 97) as u8,
                ((x * 13 + y * 7) % 89) as u8,
                ((x * 5 + y * 23) % 71) as u8,
                ((x * 3 + y * 29) % 53) as u8,
            ])
        });
        let mut carver = SeamCarver::new(PixelGrid::from_image(&image));
        carver.energy.compute_full(&carver.grid);

        for _ in 0..3 {
            let width_before = carver.grid.working_width();
            carver.carve_one();

            // exactly one valid column removed per row
            assert_eq!(carver.seam.len(), 6);
            assert!(carver.seam.iter().all(|&x| x < width_before));
            assert_eq!(carver.grid.working_width(), width_before - 1);

            let reference = full_recompute(&carver.grid);
            let w = carver.grid.working_width() as usize;
            for y in 0..6 {
                assert_eq!(
                    carver.energy.row(y)[..w],
                    reference.row(y)[..w],
                    "energy drifted from full recompute at row {}",
                    y
                );
                assert!(carver.energy.row(y)[..w].iter().all(|&e| e >= 0));
            }
        }
    }

    #[test]
    fn width_shrinks_and_height_never_moves() {
        let image = RgbaImage::from_fn(8, 5, |x, y| {
            Rgba([(x * 29 % 256) as u8, (y * 41 % 256) as u8, 0, 255])
        });
        let mut carver = SeamCarver::new(PixelGrid::from_image(&image));
        carver.carve(3, &CancellationToken::new()).unwrap();

        assert_eq!(carver.grid.working_width(), 5);
        assert_eq!(carver.grid.width(), 8);
        assert_eq!(carver.grid.height(), 5);
    }

    #[test]
    fn a_fired_token_stops_the_carve_before_any_work() {
        let token = CancellationToken::new();
        token.cancel();

        let mut carver = SeamCarver::new(five_by_three());
        match carver.carve(1, &token) {
            Err(CarveError::Cancelled) => {}
            other => panic!("expected Cancelled, got {:?}", other),
        }
        assert_eq!(carver.grid.working_width(), 5);
    }
}
