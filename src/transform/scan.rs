//! Diagonal (zig-zag) significant-coefficient selection.
//!
//! Both transform kernels rank their coefficients with the same fixed
//! zig-zag traversal of the 8x8 grid, low frequencies first. The order
//! must be reproduced exactly between extraction runs: matching relies
//! on component ranks lining up across frames.

/// One retained coefficient in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coefficient {
    /// Grid row of the coefficient.
    pub u: usize,
    /// Grid column of the coefficient.
    pub v: usize,
    /// 0-based rank in scan order.
    pub rank: usize,
    /// Coefficient value rounded to the nearest integer.
    pub value: i64,
}

/// Enumerates all 64 grid positions `(u, v)` in zig-zag order.
///
/// Diagonals `d = u + v` are visited in increasing order. On even
/// diagonals `v` runs upward (`u` downward), on odd diagonals the walk
/// reverses. Positions falling outside the 8x8 grid on the long
/// diagonals are skipped.
pub fn zigzag_positions() -> impl Iterator<Item = (usize, usize)> {
    (0..16usize)
        .flat_map(|d| {
            (0..=d).map(move |x| {
                if d % 2 == 0 {
                    (d - x, x)
                } else {
                    (x, d - x)
                }
            })
        })
        .filter(|&(u, v)| u < 8 && v < 8)
}

/// Selects the first `k` coefficients of `grid` in zig-zag order.
///
/// Values are rounded before emission. `k` greater than 64 is clamped
/// to the full grid.
pub fn select_significant(grid: &[[f64; 8]; 8], k: usize) -> Vec<Coefficient> {
    zigzag_positions()
        .take(k.min(64))
        .enumerate()
        .map(|(rank, (u, v))| Coefficient {
            u,
            v,
            rank,
            value: grid[u][v].round() as i64,
        })
        .collect()
}
