//! Block and frame feature extraction kernels.
//!
//! This module holds the numeric core: block partitioning, the DCT and
//! Haar DWT kernels, histogram binning, and the diagonal selector they
//! share. [`FeatureKind`] ties them together as a tagged processor
//! family with a common configure / process / describe lifecycle.

pub mod block;
pub mod dct;
pub mod dwt;
pub mod histogram;
pub mod scan;

pub use block::{extract_block, Block, BLOCK_SIZE};
pub use scan::{select_significant, zigzag_positions, Coefficient};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::{MatrixLayout, Observation, RecordSchema};
use crate::source::Plane;

/// Errors raised by the transform stage.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("block ({0},{1}) out of range for {2}x{3} plane")]
    BlockOutOfRange(u32, u32, u32, u32),
    #[error("invalid feature parameter: {0}")]
    InvalidParameter(String),
}

/// The feature family to extract, with its parameters.
///
/// Each variant carries the single knob the original processors read
/// at configure time: components to retain for the transforms, bin
/// count for the histograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeatureKind {
    /// Per-block quantized intensity histogram.
    Histogram {
        /// Number of equal-width bins.
        bins: usize,
    },
    /// Per-block histogram of the signed difference to the next frame.
    DifferenceHistogram {
        /// Number of equal-width bins.
        bins: usize,
    },
    /// Per-block 2D DCT significant coefficients.
    BlockDct {
        /// Significant components to retain per block.
        retain: usize,
    },
    /// Per-block three-level Haar DWT significant coefficients.
    BlockDwt {
        /// Significant components to retain per block.
        retain: usize,
    },
    /// Whole-frame multiresolution Haar DWT significant coefficients.
    FrameDwt {
        /// Significant components to retain per frame.
        retain: usize,
    },
}

impl FeatureKind {
    /// Validates the feature parameters.
    pub fn validate(&self) -> Result<(), TransformError> {
        match *self {
            FeatureKind::Histogram { bins } | FeatureKind::DifferenceHistogram { bins } => {
                if bins == 0 || bins > 256 {
                    return Err(TransformError::InvalidParameter(format!(
                        "histogram bin count {bins} not in 1..=256"
                    )));
                }
            }
            FeatureKind::BlockDct { retain }
            | FeatureKind::BlockDwt { retain }
            | FeatureKind::FrameDwt { retain } => {
                if retain == 0 {
                    return Err(TransformError::InvalidParameter(
                        "must retain at least one component".into(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Returns the conventional output file name for this feature.
    ///
    /// External tooling discovers feature files by this scheme.
    pub fn output_file_name(&self, name: &str) -> String {
        match *self {
            FeatureKind::Histogram { bins } => format!("{name}_hist_{bins}.hst"),
            FeatureKind::DifferenceHistogram { bins } => format!("{name}_diff_{bins}.dhc"),
            FeatureKind::BlockDct { retain } => format!("{name}_blockdct_{retain}.bct"),
            FeatureKind::BlockDwt { retain } => format!("{name}_blockdwt_{retain}.bwt"),
            FeatureKind::FrameDwt { retain } => format!("{name}_framedwt_{retain}.fwt"),
        }
    }

    /// Returns the record schema this feature writes and reads.
    pub fn schema(&self) -> RecordSchema {
        match self {
            FeatureKind::Histogram { .. } | FeatureKind::DifferenceHistogram { .. } => {
                RecordSchema::BlockHistogram
            }
            FeatureKind::BlockDct { .. } | FeatureKind::BlockDwt { .. } => {
                RecordSchema::BlockTransform
            }
            FeatureKind::FrameDwt { .. } => RecordSchema::FrameLevel,
        }
    }

    /// True if frames are processed as differences to their successor.
    pub fn is_difference(&self) -> bool {
        matches!(self, FeatureKind::DifferenceHistogram { .. })
    }

    /// True if the feature is computed once per frame, not per block.
    pub fn is_frame_level(&self) -> bool {
        matches!(self, FeatureKind::FrameDwt { .. })
    }

    /// Components emitted per block (or per frame for frame-level).
    pub fn components(&self) -> usize {
        match *self {
            FeatureKind::Histogram { bins } | FeatureKind::DifferenceHistogram { bins } => bins,
            FeatureKind::BlockDct { retain }
            | FeatureKind::BlockDwt { retain }
            | FeatureKind::FrameDwt { retain } => retain.min(64),
        }
    }

    /// Matrix layout for rebuilding feature vectors from records.
    ///
    /// `frame_count` is the raw sequence length; difference features
    /// cover one frame less.
    pub fn matrix_layout(&self, width: u32, height: u32, frame_count: usize) -> MatrixLayout {
        let frames = if self.is_difference() {
            frame_count.saturating_sub(1)
        } else {
            frame_count
        };

        if self.is_frame_level() {
            MatrixLayout::frame_level(frames, self.components())
        } else {
            MatrixLayout::block(
                self.schema(),
                frames,
                (width / BLOCK_SIZE) as usize,
                (height / BLOCK_SIZE) as usize,
                self.components(),
            )
        }
    }

    /// Processes one 8x8 block into its observations.
    ///
    /// For difference features the plane must already hold signed
    /// frame differences. Frame-level features have no per-block form.
    pub fn process_block(
        &self,
        plane: &Plane,
        frame_index: usize,
        block_x: u32,
        block_y: u32,
    ) -> Result<Vec<Observation>, TransformError> {
        let observation = |component: usize, value: i64| Observation {
            frame_index,
            block: Some((block_x, block_y)),
            component,
            value,
        };

        match *self {
            FeatureKind::Histogram { bins } | FeatureKind::DifferenceHistogram { bins } => {
                let block = extract_block(plane, block_x, block_y)?;
                let counts = histogram::bin_block(&block, bins, self.is_difference());

                Ok(counts
                    .iter()
                    .enumerate()
                    .map(|(bin, &count)| observation(bin, i64::from(count)))
                    .collect())
            }
            FeatureKind::BlockDct { retain } => {
                let block = extract_block(plane, block_x, block_y)?;
                let coefficients = dct::transform_block(&block);

                Ok(select_significant(&coefficients, retain)
                    .into_iter()
                    .map(|c| observation(c.rank, c.value))
                    .collect())
            }
            FeatureKind::BlockDwt { retain } => {
                let block = extract_block(plane, block_x, block_y)?;
                let mut grid = dwt::Grid::from_block(&block);
                dwt::decompose_block(&mut grid);

                Ok(select_significant(&grid.corner(), retain)
                    .into_iter()
                    .map(|c| observation(c.rank, c.value))
                    .collect())
            }
            FeatureKind::FrameDwt { .. } => Err(TransformError::InvalidParameter(
                "frame-level feature has no per-block records".into(),
            )),
        }
    }

    /// Processes one whole frame into its observations.
    ///
    /// Block features iterate blocks x-major (all of column 0's blocks
    /// before column 1), matching the record emission order of the
    /// extraction loop this kernel is derived from.
    pub fn observations(
        &self,
        plane: &Plane,
        frame_index: usize,
    ) -> Result<Vec<Observation>, TransformError> {
        if let FeatureKind::FrameDwt { retain } = *self {
            let mut grid = dwt::Grid::from_plane(plane);
            dwt::decompose_frame(&mut grid);

            return Ok(select_significant(&grid.corner(), retain)
                .into_iter()
                .map(|c| Observation {
                    frame_index,
                    block: None,
                    component: c.rank,
                    value: c.value,
                })
                .collect());
        }

        let mut out =
            Vec::with_capacity(plane.blocks_x() as usize * plane.blocks_y() as usize * self.components());

        for block_x in 0..plane.blocks_x() {
            for block_y in 0..plane.blocks_y() {
                out.extend(self.process_block(plane, frame_index, block_x, block_y)?);
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant_plane(value: i32, width: u32, height: u32) -> Plane {
        Plane::new(vec![value; (width * height) as usize], width, height)
    }

    #[test]
    fn test_output_file_names() {
        assert_eq!(
            FeatureKind::BlockDct { retain: 7 }.output_file_name("clip"),
            "clip_blockdct_7.bct"
        );
        assert_eq!(
            FeatureKind::BlockDwt { retain: 5 }.output_file_name("clip"),
            "clip_blockdwt_5.bwt"
        );
        assert_eq!(
            FeatureKind::Histogram { bins: 8 }.output_file_name("clip"),
            "clip_hist_8.hst"
        );
        assert_eq!(
            FeatureKind::DifferenceHistogram { bins: 8 }.output_file_name("clip"),
            "clip_diff_8.dhc"
        );
        assert_eq!(
            FeatureKind::FrameDwt { retain: 12 }.output_file_name("clip"),
            "clip_framedwt_12.fwt"
        );
    }

    #[test]
    fn test_parameter_validation() {
        assert!(FeatureKind::Histogram { bins: 0 }.validate().is_err());
        assert!(FeatureKind::Histogram { bins: 257 }.validate().is_err());
        assert!(FeatureKind::Histogram { bins: 256 }.validate().is_ok());
        assert!(FeatureKind::BlockDct { retain: 0 }.validate().is_err());
        assert!(FeatureKind::FrameDwt { retain: 64 }.validate().is_ok());
    }

    #[test]
    fn test_histogram_block_observations() {
        let plane = constant_plane(200, 8, 8);
        let kind = FeatureKind::Histogram { bins: 4 };

        let observations = kind.process_block(&plane, 2, 0, 0).unwrap();

        assert_eq!(observations.len(), 4);
        // 200 falls in bin 3 of [0, 64, 128, 192, 256).
        assert_eq!(observations[3].value, 64);
        assert!(observations.iter().all(|o| o.frame_index == 2));
        assert!(observations.iter().all(|o| o.block == Some((0, 0))));
    }

    #[test]
    fn test_dct_observations_for_mid_gray() {
        let plane = constant_plane(128, 8, 8);
        let kind = FeatureKind::BlockDct { retain: 3 };

        let observations = kind.process_block(&plane, 0, 0, 0).unwrap();

        assert_eq!(observations.len(), 3);
        assert!(observations.iter().all(|o| o.value == 0));
        assert_eq!(
            observations.iter().map(|o| o.component).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_block_dwt_dc_is_block_mean() {
        let plane = constant_plane(50, 8, 8);
        let kind = FeatureKind::BlockDwt { retain: 2 };

        let observations = kind.process_block(&plane, 0, 0, 0).unwrap();

        assert_eq!(observations[0].value, 50);
        assert_eq!(observations[1].value, 0);
    }

    #[test]
    fn test_frame_dwt_has_no_block_form() {
        let plane = constant_plane(0, 8, 8);
        let kind = FeatureKind::FrameDwt { retain: 4 };

        assert!(kind.process_block(&plane, 0, 0, 0).is_err());

        let observations = kind.observations(&plane, 1).unwrap();
        assert_eq!(observations.len(), 4);
        assert!(observations.iter().all(|o| o.block.is_none()));
    }

    #[test]
    fn test_observations_iterate_blocks_x_major() {
        let plane = constant_plane(10, 16, 16);
        let kind = FeatureKind::Histogram { bins: 1 };

        let observations = kind.observations(&plane, 0).unwrap();
        let blocks: Vec<_> = observations.iter().map(|o| o.block.unwrap()).collect();

        assert_eq!(blocks, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_matrix_layout_dimensions() {
        let kind = FeatureKind::BlockDct { retain: 7 };
        let layout = kind.matrix_layout(64, 48, 10);

        assert_eq!(layout.frame_count, 10);
        assert_eq!(layout.vector_length(), 8 * 6 * 7);

        let diff = FeatureKind::DifferenceHistogram { bins: 8 };
        let layout = diff.matrix_layout(64, 48, 10);

        // The last frame has no successor to difference against.
        assert_eq!(layout.frame_count, 9);
    }
}
