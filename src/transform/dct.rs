//! 8x8 two-dimensional DCT-II kernel.

use std::f64::consts::{PI, SQRT_2};

use super::block::Block;

/// Normalization factor: `C(0) = sqrt(2)/2`, otherwise 1.
fn normalization(index: usize) -> f64 {
    if index == 0 {
        SQRT_2 / 2.0
    } else {
        1.0
    }
}

/// Computes the 2D DCT-II of one 8x8 intensity block.
///
/// Samples are centered by subtracting 128, then the separable
/// transform is applied:
///
/// ```text
/// G(i,v) = 0.5 * C(v) * sum_j cos((2j+1)v*pi/16) * f(i,j)
/// F(u,v) = 0.5 * C(u) * sum_i cos((2i+1)u*pi/16) * G(i,v)
/// ```
///
/// Coefficients are rounded to the nearest integer before they reach
/// the diagonal selector; the returned grid already holds the rounded
/// values. No inverse transform is provided.
pub fn transform_block(block: &Block) -> [[f64; 8]; 8] {
    let mut f = [[0.0f64; 8]; 8];
    for i in 0..8 {
        for j in 0..8 {
            f[i][j] = f64::from(block[i][j] - 128);
        }
    }

    // Row pass.
    let mut g = [[0.0f64; 8]; 8];
    for i in 0..8 {
        for v in 0..8 {
            let mut acc = 0.0;
            for (j, &sample) in f[i].iter().enumerate() {
                acc += ((2 * j + 1) as f64 * v as f64 * PI / 16.0).cos() * sample;
            }
            g[i][v] = 0.5 * normalization(v) * acc;
        }
    }

    // Column pass.
    let mut coefficients = [[0.0f64; 8]; 8];
    for u in 0..8 {
        for v in 0..8 {
            let mut acc = 0.0;
            for (i, row) in g.iter().enumerate() {
                acc += ((2 * i + 1) as f64 * u as f64 * PI / 16.0).cos() * row[v];
            }
            coefficients[u][v] = (0.5 * normalization(u) * acc).round();
        }
    }

    coefficients
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::scan::select_significant;

    #[test]
    fn test_mid_gray_block_is_all_zero() {
        let block = [[128i32; 8]; 8];
        let coefficients = transform_block(&block);

        for row in &coefficients {
            for &value in row {
                assert_eq!(value, 0.0);
            }
        }

        // K = 1 retains only the zero DC coefficient.
        let selected = select_significant(&coefficients, 1);
        assert_eq!(selected.len(), 1);
        assert_eq!((selected[0].u, selected[0].v), (0, 0));
        assert_eq!(selected[0].value, 0);
    }

    #[test]
    fn test_constant_block_concentrates_in_dc() {
        let block = [[255i32; 8]; 8];
        let coefficients = transform_block(&block);

        // DC of an orthonormal 8x8 DCT is 8 * mean = 8 * 127.
        assert_eq!(coefficients[0][0], 1016.0);

        for (u, row) in coefficients.iter().enumerate() {
            for (v, &value) in row.iter().enumerate() {
                if (u, v) != (0, 0) {
                    assert_eq!(value, 0.0, "AC coefficient ({u},{v}) not zero");
                }
            }
        }
    }

    #[test]
    fn test_horizontal_edge_excites_vertical_frequencies() {
        // Top half bright, bottom half dark: energy in the u axis only.
        let mut block = [[0i32; 8]; 8];
        for row in block.iter_mut().take(4) {
            *row = [255; 8];
        }

        let coefficients = transform_block(&block);

        for (u, row) in coefficients.iter().enumerate() {
            for (v, &value) in row.iter().enumerate() {
                if v != 0 {
                    assert_eq!(value, 0.0, "unexpected energy at ({u},{v})");
                }
            }
        }
        assert!(coefficients[1][0].abs() > 100.0);
    }

    #[test]
    fn test_transform_is_deterministic() {
        let mut block = [[0i32; 8]; 8];
        for (r, row) in block.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = ((r * 37 + c * 11) % 256) as i32;
            }
        }

        assert_eq!(transform_block(&block), transform_block(&block));
    }
}
