//! Quantized histogram binning of 8x8 blocks.

use super::block::Block;

/// Computes the bin edges for an equal-width histogram.
///
/// Plain mode covers `[0, 256)`: `edge[k] = k * (256 / bins)` using
/// integer division, with `edge[bins] = 256`. Difference mode covers
/// `[-255, 256)`: `edge[0] = -255` and each following edge adds
/// `2 * (256 / bins)`, again capped by `edge[bins] = 256`.
///
/// `bins` must be in `1..=256`; parameter validation happens at the
/// feature configuration level.
pub fn bin_edges(bins: usize, difference: bool) -> Vec<i32> {
    let width = 256 / bins as i32;
    let mut edges = Vec::with_capacity(bins + 1);

    if difference {
        edges.push(-255);
        for k in 1..bins {
            edges.push(edges[k - 1] + 2 * width);
        }
    } else {
        for k in 0..bins {
            edges.push(k as i32 * width);
        }
    }
    edges.push(256);

    edges
}

/// Counts block samples into `bins` equal-width bins.
///
/// A sample belongs to bin `k` iff `edge[k] <= value < edge[k+1]`;
/// under this half-open convention a sample can fall in zero or one
/// bin, and the value 256 would never match (impossible for 8-bit
/// input). Returns the ordered counts for bins `0..bins`.
pub fn bin_block(block: &Block, bins: usize, difference: bool) -> Vec<u32> {
    let edges = bin_edges(bins, difference);
    let mut counts = vec![0u32; bins];

    for row in block {
        for &value in row {
            if let Some(k) = edges
                .windows(2)
                .position(|edge| value >= edge[0] && value < edge[1])
            {
                counts[k] += 1;
            }
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_of(value: i32) -> Block {
        [[value; 8]; 8]
    }

    #[test]
    fn test_plain_edges() {
        assert_eq!(bin_edges(4, false), vec![0, 64, 128, 192, 256]);
        assert_eq!(bin_edges(1, false), vec![0, 256]);
    }

    #[test]
    fn test_difference_edges() {
        // width = 256 / 4 = 64, step = 128 starting from -255.
        assert_eq!(bin_edges(4, true), vec![-255, -127, 1, 129, 256]);
    }

    #[test]
    fn test_full_coverage_for_luma_input() {
        let mut block = [[0i32; 8]; 8];
        for (r, row) in block.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = ((r * 8 + c) * 4) as i32 % 256;
            }
        }

        for bins in [1, 2, 4, 8, 16, 256] {
            let counts = bin_block(&block, bins, false);
            assert_eq!(counts.iter().sum::<u32>(), 64, "bins = {bins}");
        }
    }

    #[test]
    fn test_boundary_values_use_half_open_bins() {
        let counts = bin_block(&block_of(128), 4, false);
        // 128 is the lower edge of bin 2.
        assert_eq!(counts, vec![0, 0, 64, 0]);

        let counts = bin_block(&block_of(127), 4, false);
        assert_eq!(counts, vec![0, 64, 0, 0]);
    }

    #[test]
    fn test_difference_mode_covers_negative_values() {
        let counts = bin_block(&block_of(-255), 4, true);
        assert_eq!(counts, vec![64, 0, 0, 0]);

        let counts = bin_block(&block_of(255), 4, true);
        assert_eq!(counts, vec![0, 0, 0, 64]);

        let counts = bin_block(&block_of(0), 4, true);
        assert_eq!(counts, vec![0, 64, 0, 0]);
    }

    #[test]
    fn test_non_divisible_bin_count_leaves_gap_at_top() {
        // 256 / 3 = 85, so edges are 0, 85, 170, 256: full coverage
        // still holds because the last edge is pinned to 256.
        let counts = bin_block(&block_of(255), 3, false);
        assert_eq!(counts, vec![0, 0, 64]);
    }
}
