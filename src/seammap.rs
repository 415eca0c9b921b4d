// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The cumulative seam-cost map and the minimal-seam backtrack.
//!
//! The map is the classic dynamic program: each cell holds the energy
//! of its pixel plus the cheapest of the three cells above it.  Unlike
//! the energy field, DP neighbour lookup does NOT wrap (a seam cannot
//! leave the left edge and re-enter on the right), so missing
//! neighbours at the edges are priced at `i32::MAX`.  That asymmetry
//! (toroidal energy, clamped seams) is intentional; unifying the two
//! silently changes which seams get carved.
//!
//! The map is rebuilt in full every iteration.  There is no useful
//! incremental variant: any cell's value can depend on a cell in the
//! row above that the previous removal moved.

use crate::cq;
use crate::energy::EnergyField;
use crate::gridmap::GridMap;

#[inline]
fn min3(a: i32, b: i32, c: i32) -> i32 {
    if a < b {
        cq!(a < c, a, c)
    } else {
        cq!(b < c, b, c)
    }
}

/// A `height × original_width` table of cumulative minimum seam costs.
#[derive(Debug)]
pub struct SeamMap {
    map: GridMap<i32>,
}

impl SeamMap {
    /// Allocate once at the original width; `rebuild` is called with
    /// the shrinking working width.
    pub fn new(width: u32, height: u32) -> Self {
        SeamMap {
            map: GridMap::new(width, height),
        }
    }

    pub fn get(&self, x: u32, y: u32) -> i32 {
        self.map[(x, y)]
    }

    /// Fill the table from the energy field.  Row 0 is the energy row
    /// verbatim; every later cell adds the cheapest of its up-to-three
    /// upper neighbours.  `width` must be at least 2.
    pub fn rebuild(&mut self, energy: &EnergyField, width: u32, height: u32) {
        debug_assert!(width >= 2);
        let w = width as usize;

        self.map.row_mut(0)[..w].copy_from_slice(&energy.row(0)[..w]);

        for y in 1..height {
            let erow = energy.row(y);
            let (prev, cur) = self.map.split_row_mut(y);

            cur[0] = erow[0] + min3(i32::MAX, prev[0], prev[1]);
            for x in 1..w - 1 {
                cur[x] = erow[x] + min3(prev[x - 1], prev[x], prev[x + 1]);
            }
            cur[w - 1] = erow[w - 1] + min3(prev[w - 2], prev[w - 1], i32::MAX);
        }
    }

    /// Backtrack the minimal vertical seam into `seam`, one column
    /// index per row.
    ///
    /// Two deliberate and opposite tie rules, kept for bit-identical
    /// seams: the bottom-row seed takes the LOWEST column among equal
    /// minima (strict-less scan), while each backtrack step evaluates
    /// its candidates left, center, right and keeps the LAST minimum,
    /// so ties favour the highest column.
    pub fn find_minimal_seam(&self, width: u32, height: u32, seam: &mut Vec<u32>) {
        seam.clear();
        seam.resize(height as usize, 0);

        let last = height - 1;
        let mut min = i32::MAX;
        for x in 0..width {
            if self.map[(x, last)] < min {
                min = self.map[(x, last)];
                seam[last as usize] = x;
            }
        }

        for y in (0..last).rev() {
            let prev = seam[y as usize + 1];
            let lo = cq!(prev == 0, 0, prev - 1);
            let hi = cq!(prev + 1 >= width, width - 1, prev + 1);

            let mut best = i32::MAX;
            let mut best_x = lo;
            for x in lo..=hi {
                if self.map[(x, y)] <= best {
                    best = self.map[(x, y)];
                    best_x = x;
                }
            }
            seam[y as usize] = best_x;
        }
    }
}
