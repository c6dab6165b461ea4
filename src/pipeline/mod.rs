//! Extraction pipeline: frame source to feature record stream.
//!
//! Frames are independent once fetched, so the outer frame loop fans
//! out across a worker pool. Each worker fills a private observation
//! buffer; buffers are then written in frame order so the record stream
//! stays frame-major. A failed frame stops the run, but records from
//! earlier frames remain valid in the output.

use std::io::Write;

use rayon::prelude::*;
use thiserror::Error;

use crate::record::{Observation, RecordError, RecordWriter};
use crate::source::{FrameSource, SourceError};
use crate::transform::{FeatureKind, TransformError};

/// Errors raised while running the extraction pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Summary of a completed extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Number of frames fully processed.
    pub frames_processed: usize,
    /// Number of feature records written.
    pub records_written: u64,
}

/// Computes the observations for one frame of the sequence.
fn frame_observations<S: FrameSource + ?Sized>(
    source: &S,
    kind: &FeatureKind,
    index: usize,
) -> Result<Vec<Observation>, PipelineError> {
    let plane = source.plane(index)?;

    let plane = if kind.is_difference() {
        let next = source.plane(index + 1)?;
        plane
            .difference(&next)
            .ok_or(SourceError::DimensionMismatch(index, index + 1))?
    } else {
        plane
    };

    let observations = kind.observations(&plane, index)?;
    tracing::debug!(frame = index, records = observations.len(), "processed frame");

    Ok(observations)
}

/// Extracts feature records for every frame of `source` into `out`.
///
/// Difference features process `frame_count - 1` frames, since the
/// last frame has no successor. Frames are transformed in parallel and
/// written frame-major. On the first frame error the run stops; the
/// error is returned after all earlier frames have been written.
pub fn extract<S, W>(
    source: &S,
    kind: &FeatureKind,
    out: W,
) -> Result<ExtractionSummary, PipelineError>
where
    S: FrameSource + ?Sized,
    W: Write,
{
    kind.validate()?;

    let total = source.frame_count();
    let frames = if kind.is_difference() {
        total.saturating_sub(1)
    } else {
        total
    };

    tracing::info!(
        frames,
        width = source.width(),
        height = source.height(),
        feature = ?kind,
        "starting extraction"
    );

    let results: Vec<Result<Vec<Observation>, PipelineError>> = (0..frames)
        .into_par_iter()
        .map(|index| frame_observations(source, kind, index))
        .collect();

    let mut writer = RecordWriter::new(out, kind.schema());
    let mut frames_processed = 0;

    for result in results {
        writer.write_all(&result?)?;
        frames_processed += 1;
    }

    writer.flush()?;

    let summary = ExtractionSummary {
        frames_processed,
        records_written: writer.records_written(),
    };
    tracing::info!(
        frames = summary.frames_processed,
        records = summary.records_written,
        "extraction complete"
    );

    Ok(summary)
}
