//! Score-threshold row filtering.

use super::matrix::AlignmentMatrix;

/// Hide every scored row below `threshold`; show everything else.
///
/// Returns the highest index among scored rows left visible. Unscored
/// rows (seed members, structural annotation rows) always stay visible
/// but never advance the returned index, so trailing seed-only blocks do
/// not extend the active range of the downstream passes.
pub fn filter_rows(matrix: &mut AlignmentMatrix, threshold: f64) -> Option<usize> {
    let mut last_visible = None;

    for (index, row) in matrix.rows_mut().iter_mut().enumerate() {
        match row.score {
            Some(score) if score < threshold => {
                row.visible = false;
            }
            Some(_) => {
                row.visible = true;
                last_visible = Some(index);
            }
            None => {
                row.visible = true;
            }
        }
    }

    last_visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::matrix::Row;

    fn scored_matrix(scores: &[Option<f64>]) -> AlignmentMatrix {
        let rows = scores
            .iter()
            .enumerate()
            .map(|(i, s)| Row::new(format!("seq{i}"), *s, "ACGU"))
            .collect();
        AlignmentMatrix::new(rows, 0).unwrap()
    }

    #[test]
    fn test_threshold_scenario() {
        // Scores [30, 28, 20, 15, 35] at threshold 25: rows 0, 1 and 4
        // stay visible and the last qualifying index is 4.
        let mut matrix = scored_matrix(&[
            Some(30.0),
            Some(28.0),
            Some(20.0),
            Some(15.0),
            Some(35.0),
        ]);
        let last = filter_rows(&mut matrix, 25.0);
        assert_eq!(last, Some(4));
        assert_eq!(matrix.visible_row_indices(), vec![0, 1, 4]);
    }

    #[test]
    fn test_unscored_rows_always_visible_and_uncounted() {
        let mut matrix = scored_matrix(&[None, Some(30.0), None]);
        let last = filter_rows(&mut matrix, 25.0);
        assert_eq!(last, Some(1));
        assert_eq!(matrix.visible_row_indices(), vec![0, 1, 2]);

        // Even at an impossible threshold the unscored rows remain.
        let last = filter_rows(&mut matrix, 1000.0);
        assert_eq!(last, None);
        assert_eq!(matrix.visible_row_indices(), vec![0, 2]);
    }

    #[test]
    fn test_score_equal_to_threshold_kept() {
        let mut matrix = scored_matrix(&[Some(25.0)]);
        assert_eq!(filter_rows(&mut matrix, 25.0), Some(0));
        assert!(matrix.rows()[0].visible);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let scores = [Some(30.0), Some(28.0), Some(20.0), Some(15.0), Some(35.0)];
        let mut matrix = scored_matrix(&scores);

        filter_rows(&mut matrix, 18.0);
        let low: std::collections::HashSet<_> =
            matrix.visible_row_indices().into_iter().collect();
        filter_rows(&mut matrix, 29.0);
        let high: std::collections::HashSet<_> =
            matrix.visible_row_indices().into_iter().collect();

        assert!(high.is_subset(&low));
    }

    #[test]
    fn test_refilter_restores_hidden_rows() {
        let mut matrix = scored_matrix(&[Some(10.0), Some(40.0)]);
        filter_rows(&mut matrix, 25.0);
        assert!(!matrix.rows()[0].visible);
        filter_rows(&mut matrix, 5.0);
        assert!(matrix.rows()[0].visible);
    }
}
