//! Record line formats for each feature family.

use super::Observation;

/// The column layout of one feature record line.
///
/// Histogram and transform block records differ only in the order of
/// the block coordinates. They are kept as separate schemas so a reader
/// can never silently swap `blockX` and `blockY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSchema {
    /// `frame,blockX,blockY,component,value` (block DCT and block DWT).
    BlockTransform,
    /// `frame,blockY,blockX,bin,count` (plain and difference histograms).
    BlockHistogram,
    /// `frame,component,value` (whole-frame DWT).
    FrameLevel,
}

/// A record parsed back from its text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedRecord {
    /// Index of the source frame.
    pub frame_index: usize,
    /// Block x coordinate (0 for frame-level records).
    pub block_x: u32,
    /// Block y coordinate (0 for frame-level records).
    pub block_y: u32,
    /// Component rank or bin index.
    pub component: usize,
    /// Feature value.
    pub value: i64,
}

impl RecordSchema {
    /// Formats an observation as a record line (without the newline).
    pub fn format(&self, obs: &Observation) -> String {
        let (bx, by) = obs.block.unwrap_or((0, 0));

        match self {
            RecordSchema::BlockTransform => format!(
                "{},{},{},{},{}",
                obs.frame_index, bx, by, obs.component, obs.value
            ),
            RecordSchema::BlockHistogram => format!(
                "{},{},{},{},{}",
                obs.frame_index, by, bx, obs.component, obs.value
            ),
            RecordSchema::FrameLevel => {
                format!("{},{},{}", obs.frame_index, obs.component, obs.value)
            }
        }
    }

    /// Parses a record line, returning `None` if it is malformed.
    pub fn parse(&self, line: &str) -> Option<ParsedRecord> {
        let fields: Vec<i64> = line
            .split(',')
            .map(|field| field.trim().parse().ok())
            .collect::<Option<_>>()?;

        match (self, fields.as_slice()) {
            (RecordSchema::BlockTransform, &[frame, bx, by, component, value]) => {
                Some(ParsedRecord {
                    frame_index: usize::try_from(frame).ok()?,
                    block_x: u32::try_from(bx).ok()?,
                    block_y: u32::try_from(by).ok()?,
                    component: usize::try_from(component).ok()?,
                    value,
                })
            }
            (RecordSchema::BlockHistogram, &[frame, by, bx, component, value]) => {
                Some(ParsedRecord {
                    frame_index: usize::try_from(frame).ok()?,
                    block_x: u32::try_from(bx).ok()?,
                    block_y: u32::try_from(by).ok()?,
                    component: usize::try_from(component).ok()?,
                    value,
                })
            }
            (RecordSchema::FrameLevel, &[frame, component, value]) => Some(ParsedRecord {
                frame_index: usize::try_from(frame).ok()?,
                block_x: 0,
                block_y: 0,
                component: usize::try_from(component).ok()?,
                value,
            }),
            _ => None,
        }
    }
}
