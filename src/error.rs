//! The error taxonomy of the carving pipeline.
//!
//! Every failure is a precondition or resource problem surfaced to the
//! caller; nothing is caught or retried internally, and each variant
//! is distinguishable so front ends can render targeted messages.

use failure::Fail;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Fail)]
pub enum CarveError {
    /// Raised before any work begins; the pipeline never overwrites.
    #[fail(display = "there is already a file under the path {:?}", _0)]
    DestinationAlreadyExists(PathBuf),

    #[fail(display = "the specified file was not found: {:?}", _0)]
    SourceNotFound(PathBuf),

    #[fail(display = "image could not be decoded: {}", _0)]
    UnsupportedImage(#[fail(cause)] image::ImageError),

    #[fail(
        display = "image is too large: {} x {} (WxH), currently max {} x {} px is supported",
        width, height, max, max
    )]
    ImageTooLarge { width: u32, height: u32, max: u32 },

    #[fail(
        display = "image too small for carving, at least a width of 4 is required (got {})",
        _0
    )]
    ImageTooSmall(u32),

    #[fail(
        display = "number of columns to carve is out of range: 1 - {} (got {})",
        max, requested
    )]
    InvalidColumnCount { requested: u32, max: u32 },

    #[fail(display = "carving was cancelled")]
    Cancelled,

    #[fail(display = "i/o error: {}", _0)]
    Io(#[fail(cause)] io::Error),
}

impl From<io::Error> for CarveError {
    fn from(err: io::Error) -> CarveError {
        CarveError::Io(err)
    }
}
