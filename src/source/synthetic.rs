//! Synthetic frame source for testing and demonstration.

use super::{FrameSource, Plane, SourceError};

/// Frame source that generates a deterministic moving gradient.
///
/// Each frame shifts the gradient by a fixed offset, so nearby frames
/// are visually similar and distant frames diverge. Useful for
/// exercising the extraction and matching pipeline without a video
/// decoder.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    width: u32,
    height: u32,
    frame_count: usize,
}

impl SyntheticSource {
    /// Creates a synthetic source with the given geometry.
    pub fn new(width: u32, height: u32, frame_count: usize) -> Result<Self, SourceError> {
        if width == 0 || height == 0 {
            return Err(SourceError::InvalidDimensions(width, height));
        }

        Ok(Self {
            width,
            height,
            frame_count,
        })
    }
}

impl FrameSource for SyntheticSource {
    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn plane(&self, index: usize) -> Result<Plane, SourceError> {
        if index >= self.frame_count {
            return Err(SourceError::FrameUnavailable(
                index,
                format!("sequence has {} frames", self.frame_count),
            ));
        }

        let shift = index as u32 * 7;
        let samples = (0..self.height)
            .flat_map(|y| (0..self.width).map(move |x| ((x + 2 * y + shift) % 256) as i32))
            .collect();

        Ok(Plane::new(samples, self.width, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_is_deterministic() {
        let source = SyntheticSource::new(16, 16, 4).unwrap();

        let a = source.plane(2).unwrap();
        let b = source.plane(2).unwrap();

        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn test_out_of_range_frame() {
        let source = SyntheticSource::new(16, 16, 4).unwrap();

        assert!(matches!(
            source.plane(4),
            Err(SourceError::FrameUnavailable(4, _))
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            SyntheticSource::new(0, 16, 4),
            Err(SourceError::InvalidDimensions(0, 16))
        ));
    }

    #[test]
    fn test_samples_in_luma_range() {
        let source = SyntheticSource::new(32, 32, 8).unwrap();
        let plane = source.plane(7).unwrap();

        assert!(plane.samples().iter().all(|&v| (0..256).contains(&v)));
    }
}
