//! Per-column nucleotide conservation analysis.
//!
//! For each column the analyzer counts nucleotide occurrences over the
//! active row range, maps the resulting frequencies to conservation
//! bands, and paints qualifying cells. Counters carry a pseudo-count of
//! one, so a column never divides by a raw zero and single-row columns
//! do not saturate at 1.0.

use super::matrix::{AlignmentMatrix, Band, Nucleotide};

/// Nucleotide counters for one column scan.
#[derive(Debug)]
struct ColumnCounts {
    /// Pseudo-counted occurrences, indexed by `Nucleotide::ALL` order.
    counts: [usize; 4],
    /// Rows actually scanned (visible rows in the active range).
    scanned: usize,
    /// Raw count of gaps and other unclassifiable characters.
    other: usize,
}

impl ColumnCounts {
    fn new() -> Self {
        Self {
            counts: [1; 4],
            scanned: 0,
            other: 0,
        }
    }

    fn slot(nt: Nucleotide) -> usize {
        match nt {
            Nucleotide::Adenine => 0,
            Nucleotide::Cytosine => 1,
            Nucleotide::Guanine => 2,
            Nucleotide::Uracil => 3,
        }
    }

    fn add(&mut self, ch: char) {
        self.scanned += 1;
        match Nucleotide::classify(ch) {
            Some(nt) => self.counts[Self::slot(nt)] += 1,
            None => self.other += 1,
        }
    }

    /// Frequency of a nucleotide among classifiable positions.
    ///
    /// The denominator excludes gaps and other unclassifiable cells; a
    /// column of nothing but gaps yields a zero denominator, which
    /// degrades to frequency 0 (no band) rather than an error.
    fn frequency(&self, nt: Nucleotide) -> f64 {
        let classifiable = self.scanned as i64 - self.other as i64;
        if classifiable <= 0 {
            return 0.0;
        }
        self.counts[Self::slot(nt)] as f64 / classifiable as f64
    }

    /// Banded nucleotides for this column, in paint precedence order.
    ///
    /// Uracil is special: when it qualifies for a band it replaces the
    /// whole paintable set, so only uracil cells are painted even if
    /// other nucleotides also reached a band.
    fn paintable(&self) -> Vec<(Nucleotide, Band)> {
        let mut banded: Vec<(Nucleotide, Band)> = Nucleotide::ALL
            .iter()
            .filter_map(|&nt| Band::from_frequency(self.frequency(nt)).map(|b| (nt, b)))
            .collect();

        if let Some(&(_, band)) = banded.iter().find(|(nt, _)| *nt == Nucleotide::Uracil) {
            banded = vec![(Nucleotide::Uracil, band)];
        }
        banded
    }
}

/// Assign conservation bands over the active row range.
///
/// Statistics and painting both cover visible rows only: hidden rows
/// neither dilute the counts nor receive bands. A cell is painted when
/// its character belongs to a banded nucleotide, replacing any prior
/// band. Returns the number of painted cells, which therefore matches
/// what the rendering layer shows.
pub fn analyze_conservation(matrix: &mut AlignmentMatrix, last_visible: Option<usize>) -> usize {
    let first = matrix.first_data_row();
    let last = match last_visible {
        Some(last) if last >= first => last,
        _ => return 0,
    };

    let mut painted = 0;
    for col in 0..matrix.width() {
        let mut counts = ColumnCounts::new();
        for row in matrix.rows()[first..=last].iter().filter(|r| r.visible) {
            if let Some(ch) = row.get(col) {
                counts.add(ch);
            }
        }

        let paintable = counts.paintable();
        if paintable.is_empty() {
            continue;
        }

        for row in matrix.rows_mut()[first..=last]
            .iter_mut()
            .filter(|r| r.visible)
        {
            let symbol = &mut row.symbols_mut()[col];
            let band = Nucleotide::classify(symbol.ch)
                .and_then(|nt| paintable.iter().find(|(p, _)| *p == nt))
                .map(|&(_, band)| band);
            if let Some(band) = band {
                symbol.band = Some(band);
                painted += 1;
            }
        }
    }
    painted
}

/// Clear every symbol's band. Idempotent; independent of filtering.
pub fn reset_conservation(matrix: &mut AlignmentMatrix) {
    for row in matrix.rows_mut() {
        for symbol in row.symbols_mut() {
            symbol.band = None;
        }
    }
}
