//! Frame sources and intensity planes.
//!
//! This module provides abstractions for retrieving single-channel
//! intensity planes from a frame sequence. The source is treated as an
//! external collaborator: media decoding happens behind the [`FrameSource`]
//! trait, never inside the fingerprinting core.

mod plane;
mod synthetic;

pub use plane::Plane;
pub use synthetic::SyntheticSource;

use thiserror::Error;

/// Errors that can occur while retrieving frames.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("frame {0} is unavailable: {1}")]
    FrameUnavailable(usize, String),
    #[error("frame source reported invalid dimensions {0}x{1}")]
    InvalidDimensions(u32, u32),
    #[error("frame {0} dimensions do not match frame {1}")]
    DimensionMismatch(usize, usize),
}

/// Trait for frame sequence implementations.
///
/// Implementations expose random access to the intensity plane of any
/// frame plus the sequence geometry. `Sync` is required so extraction
/// can fan frames out across a worker pool.
pub trait FrameSource: Sync {
    /// Returns the number of frames in the sequence.
    fn frame_count(&self) -> usize;

    /// Returns the frame width in pixels.
    fn width(&self) -> u32;

    /// Returns the frame height in pixels.
    fn height(&self) -> u32;

    /// Retrieves the intensity plane for the given frame index.
    fn plane(&self, index: usize) -> Result<Plane, SourceError>;
}
