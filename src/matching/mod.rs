//! Nearest-neighbor frame matching over feature vectors.
//!
//! Given the dense feature matrix, every frame is scored by the
//! Euclidean distance between its feature vector and the query frame's
//! vector; the closest frames win. The query frame's own distance is
//! defined as infinity so it can never match itself.

use rayon::prelude::*;
use thiserror::Error;

use crate::record::FeatureMatrix;

/// Errors raised by the matching stage.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("query frame {0} out of range (frame count {1})")]
    QueryOutOfRange(usize, usize),
}

/// One ranked match: a frame index and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// Index of the matched frame.
    pub frame_index: usize,
    /// Euclidean distance to the query frame's feature vector.
    pub distance: f64,
}

/// Euclidean (L2) distance between two equal-length feature vectors.
fn euclidean(a: &[i64], b: &[i64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = (x - y) as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Ranks all frames by distance to `query` and returns the closest
/// `count` of them.
///
/// Distances are computed per row in parallel; ranking is a stable
/// ascending sort so equal distances keep frame-index order. The query
/// frame itself is excluded from the result. `count` larger than the
/// number of candidate frames is clamped.
pub fn find_matches(
    matrix: &FeatureMatrix,
    query: usize,
    count: usize,
) -> Result<Vec<Match>, MatchError> {
    let frames = matrix.frame_count();
    if query >= frames {
        return Err(MatchError::QueryOutOfRange(query, frames));
    }

    let reference = matrix.row(query);
    let scores: Vec<f64> = (0..frames)
        .into_par_iter()
        .map(|index| {
            if index == query {
                f64::INFINITY
            } else {
                euclidean(matrix.row(index), reference)
            }
        })
        .collect();

    let mut ranked: Vec<usize> = (0..frames).collect();
    ranked.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    Ok(ranked
        .into_iter()
        .filter(|&index| index != query)
        .take(count)
        .map(|index| Match {
            frame_index: index,
            distance: scores[index],
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{build_matrix, MatrixLayout, RecordSchema};
    use std::io::Cursor;

    fn matrix_from(records: &str, frames: usize, components: usize) -> FeatureMatrix {
        let layout = MatrixLayout::block(RecordSchema::BlockTransform, frames, 1, 1, components);
        build_matrix(Cursor::new(records), &layout).unwrap()
    }

    #[test]
    fn test_two_frame_distance() {
        let matrix = matrix_from("0,0,0,0,5\n1,0,0,0,7\n", 2, 1);
        let matches = find_matches(&matrix, 0, 1).unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].frame_index, 1);
        assert!((matches[0].distance - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_query_never_matches_itself() {
        // Identical rows everywhere: the best candidate for any query
        // is some other frame at distance zero.
        let matrix = matrix_from("0,0,0,0,3\n1,0,0,0,3\n2,0,0,0,3\n3,0,0,0,3\n", 4, 1);

        for query in 0..4 {
            let matches = find_matches(&matrix, query, 4).unwrap();
            assert_eq!(matches.len(), 3);
            assert!(matches.iter().all(|m| m.frame_index != query));
            assert!(matches.iter().all(|m| m.distance == 0.0));
        }
    }

    #[test]
    fn test_ties_keep_frame_order() {
        // Frames 1 and 3 are equidistant from frame 0.
        let matrix = matrix_from("0,0,0,0,10\n1,0,0,0,12\n2,0,0,0,20\n3,0,0,0,8\n", 4, 1);
        let matches = find_matches(&matrix, 0, 3).unwrap();

        assert_eq!(matches[0].frame_index, 1);
        assert_eq!(matches[1].frame_index, 3);
        assert_eq!(matches[2].frame_index, 2);
    }

    #[test]
    fn test_ranking_is_ascending() {
        let matrix = matrix_from("0,0,0,0,0\n1,0,0,0,9\n2,0,0,0,1\n3,0,0,0,4\n", 4, 1);
        let matches = find_matches(&matrix, 0, 3).unwrap();

        let order: Vec<usize> = matches.iter().map(|m| m.frame_index).collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert!(matches.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_query_out_of_range() {
        let matrix = matrix_from("0,0,0,0,1\n", 1, 1);

        assert!(matches!(
            find_matches(&matrix, 1, 1),
            Err(MatchError::QueryOutOfRange(1, 1))
        ));
    }

    #[test]
    fn test_count_is_clamped() {
        let matrix = matrix_from("0,0,0,0,1\n1,0,0,0,2\n", 2, 1);
        let matches = find_matches(&matrix, 0, 10).unwrap();

        assert_eq!(matches.len(), 1);
    }
}
