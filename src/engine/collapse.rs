//! Gap-driven column collapsing.

use super::matrix::AlignmentMatrix;

/// Recompute column visibility from the current visible-row set.
///
/// A column is hidden when every visible cell in the active range fails
/// the alphanumeric test, i.e. holds a gap marker or other placeholder.
/// The active range runs from the first data row up to and including
/// `last_visible`; collapsing is a function of the currently visible
/// rows, so this must rerun in full after every threshold change.
///
/// An empty active range (no scored row visible, or `last_visible` above
/// the header block) collapses nothing: with no rows to judge, every
/// column is left shown.
pub fn collapse_gap_columns(matrix: &mut AlignmentMatrix, last_visible: Option<usize>) {
    let first = matrix.first_data_row();
    let last = match last_visible {
        Some(last) if last >= first => last,
        _ => {
            for col in 0..matrix.width() {
                matrix.set_column_hidden(col, false);
            }
            return;
        }
    };

    for col in 0..matrix.width() {
        let all_gaps = matrix.rows()[first..=last]
            .iter()
            .filter(|row| row.visible)
            .all(|row| {
                row.get(col)
                    .map(|ch| !ch.is_alphanumeric())
                    .unwrap_or(true)
            });
        matrix.set_column_hidden(col, all_gaps);
    }
}
