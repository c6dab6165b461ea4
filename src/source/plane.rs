//! Intensity plane type representing one single-channel frame.

/// A single-channel intensity plane.
///
/// Samples are stored row-major as `i32` so the same type can hold
/// 8-bit luma values in `[0, 255]` and signed frame differences in
/// `[-255, 255]`. Each plane is created per processed frame and
/// discarded once its observations are emitted.
#[derive(Clone)]
pub struct Plane {
    /// Row-major sample values.
    samples: Vec<i32>,
    /// Plane width in pixels.
    width: u32,
    /// Plane height in pixels.
    height: u32,
}

impl Plane {
    /// Creates a plane from raw signed samples.
    pub fn new(samples: Vec<i32>, width: u32, height: u32) -> Self {
        Self {
            samples,
            width,
            height,
        }
    }

    /// Creates a plane from 8-bit luma samples.
    pub fn from_luma(luma: &[u8], width: u32, height: u32) -> Self {
        Self {
            samples: luma.iter().map(|&v| i32::from(v)).collect(),
            width,
            height,
        }
    }

    /// Returns the plane width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the plane height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the sample at pixel coordinates `(x, y)`.
    #[inline]
    pub fn sample(&self, x: u32, y: u32) -> i32 {
        self.samples[y as usize * self.width as usize + x as usize]
    }

    /// Returns a reference to the raw row-major samples.
    #[inline]
    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    /// Returns the number of whole 8x8 blocks along the x axis.
    ///
    /// Trailing partial blocks are truncated away.
    #[inline]
    pub fn blocks_x(&self) -> u32 {
        self.width / 8
    }

    /// Returns the number of whole 8x8 blocks along the y axis.
    #[inline]
    pub fn blocks_y(&self) -> u32 {
        self.height / 8
    }

    /// Validates that the sample buffer matches the dimensions.
    pub fn is_valid(&self) -> bool {
        self.samples.len() == self.width as usize * self.height as usize
    }

    /// Computes the signed per-sample difference `self - next`.
    ///
    /// Returns `None` if the planes have different dimensions.
    pub fn difference(&self, next: &Plane) -> Option<Plane> {
        if self.width != next.width || self.height != next.height {
            return None;
        }

        let samples = self
            .samples
            .iter()
            .zip(&next.samples)
            .map(|(&a, &b)| a - b)
            .collect();

        Some(Plane::new(samples, self.width, self.height))
    }
}

impl std::fmt::Debug for Plane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plane")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("samples", &self.samples.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_from_luma() {
        let plane = Plane::from_luma(&[0, 128, 255, 64], 2, 2);

        assert!(plane.is_valid());
        assert_eq!(plane.sample(0, 0), 0);
        assert_eq!(plane.sample(1, 0), 128);
        assert_eq!(plane.sample(0, 1), 255);
        assert_eq!(plane.sample(1, 1), 64);
    }

    #[test]
    fn test_block_counts_truncate() {
        let plane = Plane::new(vec![0; 20 * 17], 20, 17);

        assert_eq!(plane.blocks_x(), 2);
        assert_eq!(plane.blocks_y(), 2);
    }

    #[test]
    fn test_difference_range() {
        let a = Plane::from_luma(&[255, 0], 2, 1);
        let b = Plane::from_luma(&[0, 255], 2, 1);

        let diff = a.difference(&b).unwrap();
        assert_eq!(diff.sample(0, 0), 255);
        assert_eq!(diff.sample(1, 0), -255);
    }

    #[test]
    fn test_difference_dimension_mismatch() {
        let a = Plane::from_luma(&[0; 4], 2, 2);
        let b = Plane::from_luma(&[0; 6], 3, 2);

        assert!(a.difference(&b).is_none());
    }
}
