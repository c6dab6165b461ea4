//! Haar wavelet transform kernel.
//!
//! Single-level 2D Haar transforms operating in place on the top-left
//! region of a backing grid, plus the two multiresolution drivers: the
//! fixed 8 -> 4 -> 2 block decomposition and the whole-frame
//! decomposition that keeps halving the corner until either dimension
//! drops below 2. Only one backing buffer exists per frame; every level
//! re-slices a shrinking top-left window of it.

use super::block::Block;
use crate::source::Plane;

/// Owned row-major grid of `f32` transform samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Creates a zero-filled grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0.0; width * height],
            width,
            height,
        }
    }

    /// Copies an intensity plane into a grid.
    pub fn from_plane(plane: &Plane) -> Self {
        Self {
            data: plane.samples().iter().map(|&v| v as f32).collect(),
            width: plane.width() as usize,
            height: plane.height() as usize,
        }
    }

    /// Copies an 8x8 block into a grid.
    pub fn from_block(block: &Block) -> Self {
        let data = block
            .iter()
            .flat_map(|row| row.iter().map(|&v| v as f32))
            .collect();
        Self {
            data,
            width: 8,
            height: 8,
        }
    }

    /// Returns the grid width (columns).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height (rows).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the value at `(row, col)`.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.width + col]
    }

    /// Sets the value at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row * self.width + col] = value;
    }

    /// Copies the top-left 8x8 corner, padding with zeros if the grid
    /// is smaller than 8 in either dimension.
    pub fn corner(&self) -> [[f64; 8]; 8] {
        let mut out = [[0.0f64; 8]; 8];
        for (u, row) in out.iter_mut().enumerate() {
            for (v, cell) in row.iter_mut().enumerate() {
                if u < self.height && v < self.width {
                    *cell = f64::from(self.at(u, v));
                }
            }
        }
        out
    }

    /// Copies the `h x w` top-left region into a flat row-major buffer.
    fn read_region(&self, w: usize, h: usize) -> Vec<f32> {
        let mut out = Vec::with_capacity(w * h);
        for row in 0..h {
            out.extend_from_slice(&self.data[row * self.width..row * self.width + w]);
        }
        out
    }

    /// Writes a flat row-major `h x w` buffer back to the top-left region.
    fn write_region(&mut self, region: &[f32], w: usize, h: usize) {
        for row in 0..h {
            self.data[row * self.width..row * self.width + w]
                .copy_from_slice(&region[row * w..(row + 1) * w]);
        }
    }
}

/// Builds the `size x size` Haar transform matrix.
///
/// 2x2 blocks `[[0.5, 0.5], [0.5, -0.5]]` along the diagonal; for odd
/// sizes the last row and column stay zero, matching the generator this
/// kernel is derived from.
pub fn haar_matrix(size: usize) -> Vec<f32> {
    let mut h = vec![0.0f32; size * size];
    for i in 0..size / 2 {
        h[(2 * i) * size + 2 * i] = 0.5;
        h[(2 * i) * size + 2 * i + 1] = 0.5;
        h[(2 * i + 1) * size + 2 * i] = 0.5;
        h[(2 * i + 1) * size + 2 * i + 1] = -0.5;
    }
    h
}

/// Builds the inverse Haar matrix `IH = 2 * H`.
pub fn inverse_haar_matrix(size: usize) -> Vec<f32> {
    let mut h = haar_matrix(size);
    for value in &mut h {
        *value *= 2.0;
    }
    h
}

/// `a (ar x ac) * b (ac x bc)`, both row-major.
fn matmul(a: &[f32], ar: usize, ac: usize, b: &[f32], bc: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; ar * bc];
    for r in 0..ar {
        for k in 0..ac {
            let lhs = a[r * ac + k];
            if lhs == 0.0 {
                continue;
            }
            for c in 0..bc {
                out[r * bc + c] += lhs * b[k * bc + c];
            }
        }
    }
    out
}

/// Transpose of a row-major `rows x cols` buffer.
fn transposed(a: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; rows * cols];
    for r in 0..rows {
        for c in 0..cols {
            out[c * rows + r] = a[r * cols + c];
        }
    }
    out
}

/// Moves even columns into the low band and odd columns into the high
/// band: column `2i -> i`, column `2i+1 -> i + half`. Columns beyond
/// `2 * half` are left in place.
fn deinterleave_cols(buffer: &[f32], w: usize, h: usize) -> Vec<f32> {
    let half = w / 2;
    let mut out = buffer.to_vec();
    for row in 0..h {
        for i in 0..half {
            out[row * w + i] = buffer[row * w + 2 * i];
            out[row * w + i + half] = buffer[row * w + 2 * i + 1];
        }
    }
    out
}

/// Row counterpart of [`deinterleave_cols`].
fn deinterleave_rows(buffer: &[f32], w: usize, h: usize) -> Vec<f32> {
    let half = h / 2;
    let mut out = buffer.to_vec();
    for i in 0..half {
        out[i * w..(i + 1) * w].copy_from_slice(&buffer[2 * i * w..(2 * i + 1) * w]);
        out[(i + half) * w..(i + half + 1) * w]
            .copy_from_slice(&buffer[(2 * i + 1) * w..(2 * i + 2) * w]);
    }
    out
}

/// Inverse of [`deinterleave_cols`]: column `i -> 2i`, `i + half -> 2i+1`.
fn interleave_cols(buffer: &[f32], w: usize, h: usize) -> Vec<f32> {
    let half = w / 2;
    let mut out = buffer.to_vec();
    for row in 0..h {
        for i in 0..half {
            out[row * w + 2 * i] = buffer[row * w + i];
            out[row * w + 2 * i + 1] = buffer[row * w + i + half];
        }
    }
    out
}

/// Inverse of [`deinterleave_rows`].
fn interleave_rows(buffer: &[f32], w: usize, h: usize) -> Vec<f32> {
    let half = h / 2;
    let mut out = buffer.to_vec();
    for i in 0..half {
        out[2 * i * w..(2 * i + 1) * w].copy_from_slice(&buffer[i * w..(i + 1) * w]);
        out[(2 * i + 1) * w..(2 * i + 2) * w]
            .copy_from_slice(&buffer[(i + half) * w..(i + half + 1) * w]);
    }
    out
}

/// Applies one forward Haar level to the square top-left `size x size`
/// region: `T = (roi * H)^t * H`, then deinterleave columns and rows
/// into the LL/LH/HL/HH quadrant layout. The rest of the backing grid
/// is untouched.
pub fn forward_level(grid: &mut Grid, size: usize) {
    let h = haar_matrix(size);
    let roi = grid.read_region(size, size);

    let horizontal = matmul(&roi, size, size, &h, size);
    let transformed = matmul(&transposed(&horizontal, size, size), size, size, &h, size);

    let ordered = deinterleave_cols(&transformed, size, size);
    let ordered = deinterleave_rows(&ordered, size, size);

    grid.write_region(&ordered, size, size);
}

/// Exact mirror of [`forward_level`]: re-interleave columns and rows,
/// then apply `IH = 2 * H` on both axes.
pub fn inverse_level(grid: &mut Grid, size: usize) {
    let ih = inverse_haar_matrix(size);
    let roi = grid.read_region(size, size);

    let ordered = interleave_cols(&roi, size, size);
    let ordered = interleave_rows(&ordered, size, size);

    let horizontal = matmul(&ordered, size, size, &ih, size);
    let inverted = matmul(&transposed(&horizontal, size, size), size, size, &ih, size);

    grid.write_region(&inverted, size, size);
}

/// Applies one forward Haar level to the rectangular top-left `h x w`
/// region, with separate Haar matrices per axis:
/// `T = ((roi * Hw)^t * Hh)^t`, then per-axis deinterleave.
pub fn forward_level_rect(grid: &mut Grid, w: usize, h: usize) {
    let hw = haar_matrix(w);
    let hh = haar_matrix(h);
    let roi = grid.read_region(w, h);

    let horizontal = matmul(&roi, h, w, &hw, w);
    let vertical = matmul(&transposed(&horizontal, h, w), w, h, &hh, h);
    let transformed = transposed(&vertical, w, h);

    let ordered = deinterleave_cols(&transformed, w, h);
    let ordered = deinterleave_rows(&ordered, w, h);

    grid.write_region(&ordered, w, h);
}

/// Exact mirror of [`forward_level_rect`].
pub fn inverse_level_rect(grid: &mut Grid, w: usize, h: usize) {
    let ihw = inverse_haar_matrix(w);
    let ihh = inverse_haar_matrix(h);
    let roi = grid.read_region(w, h);

    let ordered = interleave_cols(&roi, w, h);
    let ordered = interleave_rows(&ordered, w, h);

    let horizontal = matmul(&ordered, h, w, &ihw, w);
    let vertical = matmul(&transposed(&horizontal, h, w), w, h, &ihh, h);
    let inverted = transposed(&vertical, w, h);

    grid.write_region(&inverted, w, h);
}

/// Three-level block decomposition: sizes 8, 4, 2, independent of the
/// frame geometry. Expects an 8x8 grid.
pub fn decompose_block(grid: &mut Grid) {
    forward_level(grid, 8);
    forward_level(grid, 4);
    forward_level(grid, 2);
}

/// Mirror of [`decompose_block`] for verification.
pub fn recompose_block(grid: &mut Grid) {
    inverse_level(grid, 2);
    inverse_level(grid, 4);
    inverse_level(grid, 8);
}

/// Whole-frame multiresolution decomposition.
///
/// Transforms the full `width x height` region, then halves both
/// dimensions (integer division) and transforms the remaining LL
/// corner, stopping once either dimension drops below 2. Only the LL
/// quadrant of each level is decomposed further; this corner recursion
/// is not equivalent to independent per-axis passes.
pub fn decompose_frame(grid: &mut Grid) {
    let mut w = grid.width();
    let mut h = grid.height();

    while w >= 2 && h >= 2 {
        forward_level_rect(grid, w, h);
        w /= 2;
        h /= 2;
    }
}

/// Mirror of [`decompose_frame`]; lossless when every intermediate
/// size is even.
pub fn recompose_frame(grid: &mut Grid) {
    let mut sizes = Vec::new();
    let mut w = grid.width();
    let mut h = grid.height();

    while w >= 2 && h >= 2 {
        sizes.push((w, h));
        w /= 2;
        h /= 2;
    }

    for &(w, h) in sizes.iter().rev() {
        inverse_level_rect(grid, w, h);
    }
}
