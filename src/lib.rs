// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image narrowing by seam carving.
//!
//! The usual entry point is [`carve_vertically`], which takes a file
//! path in and a file path out.  The pieces underneath, from the
//! pixel grid up to the carving engine, are public too for callers
//! that already hold decoded pixels.

mod ternary;

pub mod cancel;
pub mod carver;
pub mod codec;
pub mod dump;
pub mod energy;
pub mod error;
pub mod gridmap;
pub mod pipeline;
pub mod pixelgrid;
pub mod seammap;

pub use cancel::CancellationToken;
pub use carver::SeamCarver;
pub use codec::OutputFormat;
pub use energy::EnergyField;
pub use error::CarveError;
pub use pipeline::carve_vertically;
pub use pixelgrid::PixelGrid;
pub use seammap::SeamMap;
