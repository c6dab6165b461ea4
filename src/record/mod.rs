//! Feature record serialization and matrix assembly.
//!
//! Observations produced by the transform stage are written as plain-text
//! records, one per line. The matching stage later parses the record
//! stream back into a dense per-frame feature matrix. The two block
//! record schemas intentionally stay distinct: histogram records carry
//! `blockY` before `blockX`, transform records the reverse.

mod matrix;
mod schema;
mod writer;

pub use matrix::{build_matrix, FeatureMatrix, MatrixLayout};
pub use schema::{ParsedRecord, RecordSchema};
pub use writer::RecordWriter;

use thiserror::Error;

/// Errors that can occur while writing or reading feature records.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("feature record i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// One retained coefficient or bin count, ready for serialization.
///
/// `component` is the rank in diagonal scan order for transform
/// features, or the bin index for histogram features. Frame-level
/// features carry no block coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Index of the source frame.
    pub frame_index: usize,
    /// Block coordinates `(block_x, block_y)`, if block-based.
    pub block: Option<(u32, u32)>,
    /// Component rank or bin index.
    pub component: usize,
    /// Rounded integer feature value.
    pub value: i64,
}
