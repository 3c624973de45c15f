//! Core types for the alignment matrix.
//!
//! The matrix is the single source of truth for row visibility, column
//! visibility and conservation bands. Column visibility and bands are
//! derived state: they are recomputed in full from the rows and the
//! current threshold, never patched incrementally.

use thiserror::Error;

/// Default gathering threshold in bits, applied by `reset_threshold`.
pub const DEFAULT_GA_THRESHOLD: f64 = 25.0;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("row {row} has {found} columns, expected {expected}")]
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("header row count {header_rows} exceeds row count {rows}")]
    HeaderOverflow { header_rows: usize, rows: usize },
}

/// Conservation band for a column-dominant nucleotide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Frequency >= 0.8.
    High,
    /// Frequency >= 0.6.
    Medium,
    /// Frequency >= 0.4.
    Low,
}

impl Band {
    /// Map a nucleotide frequency to a band.
    pub fn from_frequency(freq: f64) -> Option<Self> {
        if freq >= 0.8 {
            Some(Band::High)
        } else if freq >= 0.6 {
            Some(Band::Medium)
        } else if freq >= 0.4 {
            Some(Band::Low)
        } else {
            None
        }
    }
}

/// The four RNA nucleotide categories tracked by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nucleotide {
    Adenine,
    Cytosine,
    Guanine,
    Uracil,
}

impl Nucleotide {
    pub const ALL: [Nucleotide; 4] = [
        Nucleotide::Adenine,
        Nucleotide::Cytosine,
        Nucleotide::Guanine,
        Nucleotide::Uracil,
    ];

    /// Classify a character case-insensitively. `T` and ambiguity codes
    /// are "other" (the alignment is RNA).
    pub fn classify(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'A' => Some(Nucleotide::Adenine),
            'C' => Some(Nucleotide::Cytosine),
            'G' => Some(Nucleotide::Guanine),
            'U' => Some(Nucleotide::Uracil),
            _ => None,
        }
    }

    /// Upper- and lowercase display characters for this nucleotide.
    #[allow(dead_code)] // API completeness
    pub fn chars(&self) -> [char; 2] {
        match self {
            Nucleotide::Adenine => ['A', 'a'],
            Nucleotide::Cytosine => ['C', 'c'],
            Nucleotide::Guanine => ['G', 'g'],
            Nucleotide::Uracil => ['U', 'u'],
        }
    }
}

/// A single cell: its display character plus an optional conservation band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Symbol {
    pub ch: char,
    pub band: Option<Band>,
}

impl Symbol {
    pub fn new(ch: char) -> Self {
        Self { ch, band: None }
    }
}

/// A row of the matrix: one sequence, or a structural annotation row.
#[derive(Debug, Clone)]
pub struct Row {
    /// Sequence identifier (may include coordinates like "id/start-end"),
    /// or an annotation tag for structural rows.
    pub id: String,
    /// Bit score; `None` marks a non-data row (seed member, annotation
    /// row) that is never hidden by threshold filtering.
    pub score: Option<f64>,
    /// Mutated by the row filter only.
    pub visible: bool,
    symbols: Vec<Symbol>,
}

impl Row {
    pub fn new(id: impl Into<String>, score: Option<f64>, text: &str) -> Self {
        Self {
            id: id.into(),
            score,
            visible: true,
            symbols: text.chars().map(Symbol::new).collect(),
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut [Symbol] {
        &mut self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[allow(dead_code)] // API completeness
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Get the character at a column (O(1)).
    pub fn get(&self, col: usize) -> Option<char> {
        self.symbols.get(col).map(|s| s.ch)
    }
}

/// Threshold state machine: re-entering `Filtered` always triggers a full
/// row re-evaluation, never an incremental diff.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FilterState {
    #[default]
    Unfiltered,
    Filtered(f64),
}

/// Result of a filtering pass, consumed by the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSummary {
    pub visible_rows: Vec<usize>,
    pub hidden_columns: Vec<usize>,
    /// Highest index among scored rows left visible.
    #[allow(dead_code)] // API for callers that track the active range
    pub last_visible: Option<usize>,
}

/// An index-addressed alignment grid with per-row scores.
///
/// Built once from parsed input and mutated in place by the filtering
/// and conservation passes; rows and columns are never removed, only
/// toggled hidden.
#[derive(Debug, Clone)]
pub struct AlignmentMatrix {
    rows: Vec<Row>,
    width: usize,
    /// Leading structural rows (SS_cons, RF) excluded from the active
    /// range of the collapse and conservation passes.
    header_rows: usize,
    /// Cached column visibility, recomputed on every threshold change.
    column_hidden: Vec<bool>,
    state: FilterState,
}

impl AlignmentMatrix {
    /// Empty matrix, the state before any file is loaded.
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            width: 0,
            header_rows: 0,
            column_hidden: Vec::new(),
            state: FilterState::Unfiltered,
        }
    }

    /// Build a matrix from rows. Fails if row lengths are not uniform;
    /// on failure no matrix is built.
    pub fn new(rows: Vec<Row>, header_rows: usize) -> Result<Self, MatrixError> {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(MatrixError::InconsistentWidth {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
        }
        if header_rows > rows.len() {
            return Err(MatrixError::HeaderOverflow {
                header_rows,
                rows: rows.len(),
            });
        }
        Ok(Self {
            rows,
            width,
            header_rows,
            column_hidden: vec![false; width],
            state: FilterState::Unfiltered,
        })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    #[allow(dead_code)] // API for state inspection
    pub fn state(&self) -> FilterState {
        self.state
    }

    /// First row index of the active range (first data row).
    pub fn first_data_row(&self) -> usize {
        self.header_rows
    }

    pub fn is_column_hidden(&self, col: usize) -> bool {
        self.column_hidden.get(col).copied().unwrap_or(false)
    }

    pub(crate) fn set_column_hidden(&mut self, col: usize, hidden: bool) {
        if let Some(slot) = self.column_hidden.get_mut(col) {
            *slot = hidden;
        }
    }

    /// Number of currently visible rows.
    pub fn visible_row_count(&self) -> usize {
        self.rows.iter().filter(|r| r.visible).count()
    }

    /// Number of currently visible columns.
    pub fn visible_column_count(&self) -> usize {
        self.column_hidden.iter().filter(|h| !**h).count()
    }

    pub fn visible_row_indices(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.visible)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn hidden_column_indices(&self) -> Vec<usize> {
        self.column_hidden
            .iter()
            .enumerate()
            .filter(|(_, h)| **h)
            .map(|(i, _)| i)
            .collect()
    }

    /// Apply a threshold: full row re-evaluation followed by a full
    /// column-collapse recomputation.
    pub fn set_threshold(&mut self, threshold: f64) -> FilterSummary {
        let last_visible = super::filter::filter_rows(self, threshold);
        super::collapse::collapse_gap_columns(self, last_visible);
        self.state = FilterState::Filtered(threshold);
        FilterSummary {
            visible_rows: self.visible_row_indices(),
            hidden_columns: self.hidden_column_indices(),
            last_visible,
        }
    }

    /// Re-filter with the default gathering threshold.
    pub fn reset_threshold(&mut self) -> FilterSummary {
        self.set_threshold(DEFAULT_GA_THRESHOLD)
    }

    /// Recolor conserved positions for the given threshold. Always starts
    /// from a clean slate (bands are never additive across calls).
    /// Returns the number of painted cells.
    pub fn show_conservation(&mut self, threshold: f64) -> usize {
        super::conservation::reset_conservation(self);
        let last_visible = super::filter::filter_rows(self, threshold);
        super::collapse::collapse_gap_columns(self, last_visible);
        self.state = FilterState::Filtered(threshold);
        super::conservation::analyze_conservation(self, last_visible)
    }

    /// Clear all conservation bands.
    pub fn hide_conservation(&mut self) {
        super::conservation::reset_conservation(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_width() {
        let rows = vec![
            Row::new("seq1", Some(30.0), "ACGU..ACGU"),
            Row::new("seq2", Some(28.0), "ACGU..ACGU"),
        ];
        let matrix = AlignmentMatrix::new(rows, 0).unwrap();
        assert_eq!(matrix.width(), 10);
        assert_eq!(matrix.num_rows(), 2);
    }

    #[test]
    fn test_inconsistent_width_rejected() {
        let rows = vec![
            Row::new("seq1", Some(30.0), "ACGU"),
            Row::new("seq2", Some(28.0), "ACG"),
        ];
        let err = AlignmentMatrix::new(rows, 0).unwrap_err();
        assert!(matches!(
            err,
            MatrixError::InconsistentWidth {
                row: 1,
                expected: 4,
                found: 3
            }
        ));
    }

    #[test]
    fn test_header_overflow_rejected() {
        let rows = vec![Row::new("SS_cons", None, "<<>>")];
        assert!(AlignmentMatrix::new(rows, 2).is_err());
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(Nucleotide::classify('a'), Some(Nucleotide::Adenine));
        assert_eq!(Nucleotide::classify('G'), Some(Nucleotide::Guanine));
        assert_eq!(Nucleotide::classify('u'), Some(Nucleotide::Uracil));
        assert_eq!(Nucleotide::classify('T'), None);
        assert_eq!(Nucleotide::classify('.'), None);
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(Band::from_frequency(0.95), Some(Band::High));
        assert_eq!(Band::from_frequency(0.8), Some(Band::High));
        assert_eq!(Band::from_frequency(0.79), Some(Band::Medium));
        assert_eq!(Band::from_frequency(0.6), Some(Band::Medium));
        assert_eq!(Band::from_frequency(0.59), Some(Band::Low));
        assert_eq!(Band::from_frequency(0.4), Some(Band::Low));
        assert_eq!(Band::from_frequency(0.39), None);
    }

    #[test]
    fn test_threshold_state_machine() {
        let rows = vec![Row::new("seq1", Some(30.0), "ACGU")];
        let mut matrix = AlignmentMatrix::new(rows, 0).unwrap();
        assert_eq!(matrix.state(), FilterState::Unfiltered);
        matrix.set_threshold(20.0);
        assert_eq!(matrix.state(), FilterState::Filtered(20.0));
        matrix.reset_threshold();
        assert_eq!(matrix.state(), FilterState::Filtered(DEFAULT_GA_THRESHOLD));
    }
}
