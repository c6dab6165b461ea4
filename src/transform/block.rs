//! Block partitioning of an intensity plane.

use super::TransformError;
use crate::source::Plane;

/// Side length of every processed block.
pub const BLOCK_SIZE: u32 = 8;

/// An 8x8 sub-grid of an intensity plane, row-major (`block[row][col]`).
pub type Block = [[i32; 8]; 8];

/// Extracts the 8x8 block at block coordinates `(block_x, block_y)`.
///
/// The block with its top-left corner at pixel (32, 72) has block
/// coordinates (4, 9). Fails if the 8x8 window would cross the plane
/// bounds; callers iterate `0..width/8` and `0..height/8` so trailing
/// partial blocks are never requested.
pub fn extract_block(plane: &Plane, block_x: u32, block_y: u32) -> Result<Block, TransformError> {
    let x0 = block_x * BLOCK_SIZE;
    let y0 = block_y * BLOCK_SIZE;

    if x0 + BLOCK_SIZE > plane.width() || y0 + BLOCK_SIZE > plane.height() {
        return Err(TransformError::BlockOutOfRange(
            block_x,
            block_y,
            plane.width(),
            plane.height(),
        ));
    }

    let mut block = [[0i32; 8]; 8];
    for (row, out) in block.iter_mut().enumerate() {
        for (col, cell) in out.iter_mut().enumerate() {
            *cell = plane.sample(x0 + col as u32, y0 + row as u32);
        }
    }

    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_plane(width: u32, height: u32) -> Plane {
        let samples = (0..height)
            .flat_map(|y| (0..width).map(move |x| (y * width + x) as i32))
            .collect();
        Plane::new(samples, width, height)
    }

    #[test]
    fn test_extracts_expected_window() {
        let plane = gradient_plane(16, 16);
        let block = extract_block(&plane, 1, 1).unwrap();

        // Top-left of block (1, 1) is pixel (8, 8).
        assert_eq!(block[0][0], 8 * 16 + 8);
        assert_eq!(block[0][7], 8 * 16 + 15);
        assert_eq!(block[7][0], 15 * 16 + 8);
        assert_eq!(block[7][7], 15 * 16 + 15);
    }

    #[test]
    fn test_out_of_range_block_rejected() {
        let plane = gradient_plane(16, 16);

        assert!(extract_block(&plane, 0, 0).is_ok());
        assert!(matches!(
            extract_block(&plane, 2, 0),
            Err(TransformError::BlockOutOfRange(2, 0, 16, 16))
        ));
    }

    #[test]
    fn test_partial_trailing_block_rejected() {
        // 20 pixels wide: blocks 0 and 1 fit, block 2 would need 24.
        let plane = gradient_plane(20, 8);

        assert!(extract_block(&plane, 1, 0).is_ok());
        assert!(extract_block(&plane, 2, 0).is_err());
    }
}
