//! Dense per-frame feature matrix built from a record stream.

use std::io::BufRead;

use super::{ParsedRecord, RecordError, RecordSchema};

/// Describes how parsed records map into the dense feature matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLayout {
    /// Schema used to parse each record line.
    pub schema: RecordSchema,
    /// Number of frames (matrix rows).
    pub frame_count: usize,
    /// Whole blocks along the x axis (1 for frame-level features).
    pub blocks_x: usize,
    /// Whole blocks along the y axis (1 for frame-level features).
    pub blocks_y: usize,
    /// Retained components per block, or histogram bins.
    pub components: usize,
}

impl MatrixLayout {
    /// Layout for a block-based feature.
    pub fn block(
        schema: RecordSchema,
        frame_count: usize,
        blocks_x: usize,
        blocks_y: usize,
        components: usize,
    ) -> Self {
        Self {
            schema,
            frame_count,
            blocks_x,
            blocks_y,
            components,
        }
    }

    /// Layout for a frame-level feature of `components` values per frame.
    pub fn frame_level(frame_count: usize, components: usize) -> Self {
        Self {
            schema: RecordSchema::FrameLevel,
            frame_count,
            blocks_x: 1,
            blocks_y: 1,
            components,
        }
    }

    /// Length of every per-frame feature vector.
    pub fn vector_length(&self) -> usize {
        self.blocks_x * self.blocks_y * self.components
    }

    /// Flat column offset for a record, or `None` if out of range.
    fn offset(&self, record: &ParsedRecord) -> Option<usize> {
        let bx = record.block_x as usize;
        let by = record.block_y as usize;

        if record.frame_index >= self.frame_count
            || bx >= self.blocks_x
            || by >= self.blocks_y
            || record.component >= self.components
        {
            return None;
        }

        Some(self.components * (self.blocks_y * bx + by) + record.component)
    }
}

/// Dense `frame_count x vector_length` feature matrix.
///
/// Rows are frame feature vectors; cells not covered by any record
/// stay at 0. The matrix is built once per matching session and is
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    data: Vec<i64>,
    frame_count: usize,
    vector_length: usize,
    skipped_records: usize,
}

impl FeatureMatrix {
    /// Returns the number of frames (rows).
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Returns the per-frame feature vector length.
    pub fn vector_length(&self) -> usize {
        self.vector_length
    }

    /// Returns the feature vector for one frame.
    pub fn row(&self, frame_index: usize) -> &[i64] {
        let start = frame_index * self.vector_length;
        &self.data[start..start + self.vector_length]
    }

    /// Returns how many record lines were dropped while building.
    ///
    /// Malformed and out-of-range records are skipped rather than
    /// rejected; this counter makes the leniency observable.
    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }
}

/// Builds a feature matrix from a record stream.
///
/// Each parsed record writes its value at the target cell; lines that
/// fail to parse or point outside the layout are counted and dropped.
/// Record order does not matter, only the per-record target cell.
pub fn build_matrix<R: BufRead>(
    reader: R,
    layout: &MatrixLayout,
) -> Result<FeatureMatrix, RecordError> {
    let vector_length = layout.vector_length();
    let mut data = vec![0i64; layout.frame_count * vector_length];
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line?;

        match layout.schema.parse(&line).and_then(|record| {
            layout
                .offset(&record)
                .map(|offset| (record.frame_index, offset, record.value))
        }) {
            Some((frame, offset, value)) => {
                data[frame * vector_length + offset] = value;
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "dropped unparsable or out-of-range feature records");
    }

    Ok(FeatureMatrix {
        data,
        frame_count: layout.frame_count,
        vector_length,
        skipped_records: skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_two_record_matrix() {
        let layout = MatrixLayout::block(RecordSchema::BlockTransform, 2, 1, 1, 1);
        let matrix = build_matrix(Cursor::new("0,0,0,0,5\n1,0,0,0,7\n"), &layout).unwrap();

        assert_eq!(matrix.row(0), &[5]);
        assert_eq!(matrix.row(1), &[7]);
        assert_eq!(matrix.skipped_records(), 0);
    }

    #[test]
    fn test_block_offsets_are_x_major() {
        // 2x2 blocks, 3 components per block.
        let layout = MatrixLayout::block(RecordSchema::BlockTransform, 1, 2, 2, 3);

        let records = "0,0,0,0,1\n0,0,1,0,2\n0,1,0,0,3\n0,1,1,2,4\n";
        let matrix = build_matrix(Cursor::new(records), &layout).unwrap();

        assert_eq!(matrix.row(0), &[1, 0, 0, 2, 0, 0, 3, 0, 0, 0, 0, 4]);
    }

    #[test]
    fn test_malformed_records_skipped_and_counted() {
        let layout = MatrixLayout::block(RecordSchema::BlockTransform, 2, 1, 1, 1);
        let records = "0,0,0,0,5\nnot a record\n\n9,0,0,0,1\n1,0,0,0,7\n";
        let matrix = build_matrix(Cursor::new(records), &layout).unwrap();

        // Malformed line, blank line, and out-of-range frame all dropped.
        assert_eq!(matrix.skipped_records(), 3);
        assert_eq!(matrix.row(0), &[5]);
        assert_eq!(matrix.row(1), &[7]);
    }

    #[test]
    fn test_frame_level_layout() {
        let layout = MatrixLayout::frame_level(2, 4);
        let matrix = build_matrix(Cursor::new("0,0,9\n0,3,-2\n1,1,6\n"), &layout).unwrap();

        assert_eq!(layout.vector_length(), 4);
        assert_eq!(matrix.row(0), &[9, 0, 0, -2]);
        assert_eq!(matrix.row(1), &[0, 6, 0, 0]);
    }

    #[test]
    fn test_missing_cells_default_to_zero() {
        let layout = MatrixLayout::block(RecordSchema::BlockHistogram, 1, 1, 1, 4);
        let matrix = build_matrix(Cursor::new("0,0,0,1,64\n"), &layout).unwrap();

        assert_eq!(matrix.row(0), &[0, 64, 0, 0]);
    }
}
