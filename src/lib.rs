//! Frame Fingerprint Library
//!
//! Extracts compact, comparable fingerprints from video frames and uses
//! them to find frames visually similar to a reference frame.
//!
//! # Architecture
//!
//! Extraction flows one direction, matching flows back:
//!
//! ```text
//! source → transform (DCT | DWT | histogram) → scan → record (write)
//! record (read) → matrix → matching → ranked result list
//! ```
//!
//! Each frame is partitioned into 8x8 blocks; each block (or the whole
//! frame) is transformed into a frequency or wavelet domain, and only
//! the most significant coefficients in a fixed diagonal scan order are
//! written as feature records. The matching stage reassembles the
//! records into per-frame feature vectors and ranks all frames by
//! Euclidean distance to a query frame's vector.
//!
//! # Example
//!
//! ```no_run
//! use frame_fingerprint::{
//!     matching::find_matches,
//!     pipeline::extract,
//!     record::build_matrix,
//!     source::SyntheticSource,
//!     transform::FeatureKind,
//! };
//!
//! let source = SyntheticSource::new(64, 48, 30).unwrap();
//! let kind = FeatureKind::BlockDct { retain: 7 };
//!
//! // Extract feature records.
//! let mut records = Vec::new();
//! extract(&source, &kind, &mut records).unwrap();
//!
//! // Rebuild feature vectors and rank matches for frame 4.
//! let layout = kind.matrix_layout(64, 48, 30);
//! let matrix = build_matrix(std::io::Cursor::new(records), &layout).unwrap();
//! let matches = find_matches(&matrix, 4, 10).unwrap();
//!
//! for m in matches {
//!     println!("frame {} at distance {:.3}", m.frame_index, m.distance);
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod matching;
pub mod pipeline;
pub mod record;
pub mod source;
pub mod transform;

// Re-export commonly used types at crate root
pub use config::{FileConfig, MatchingConfig, SourceConfig};
pub use matching::{find_matches, Match};
pub use pipeline::{extract, ExtractionSummary};
pub use record::{
    build_matrix, FeatureMatrix, MatrixLayout, Observation, RecordSchema, RecordWriter,
};
pub use source::{FrameSource, Plane, SyntheticSource};
pub use transform::FeatureKind;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
