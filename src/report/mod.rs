//! Report input loading: alignment + outlist -> alignment matrix.

pub mod parser;

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

use crate::engine::{AlignmentMatrix, MatrixError, Row};
use parser::{ParseError, ReportAlignment};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to parse alignment: {0}")]
    Parse(#[from] ParseError),
    #[error("invalid alignment: {0}")]
    Matrix(#[from] MatrixError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Open an alignment file, transparently decompressing `.gz` input.
fn open_alignment(path: &Path) -> std::io::Result<Box<dyn Read>> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Load an alignment (and optionally an outlist of bit scores) into a
/// matrix ready for filtering.
pub fn load_report(
    align_path: &Path,
    outlist_path: Option<&Path>,
) -> Result<AlignmentMatrix, ReportError> {
    let alignment = parser::parse_alignment(open_alignment(align_path)?)?;
    let scores = match outlist_path {
        Some(path) => parser::parse_outlist(File::open(path)?)?,
        None => HashMap::new(),
    };
    Ok(build_matrix(alignment, &scores)?)
}

/// Assemble matrix rows: structural annotation rows first (the report
/// renders them above the alignment block), then sequence rows joined
/// to their bit scores by name. Sequences absent from the outlist (seed
/// members) stay unscored.
pub fn build_matrix(
    alignment: ReportAlignment,
    scores: &HashMap<String, f64>,
) -> Result<AlignmentMatrix, MatrixError> {
    let mut rows = Vec::with_capacity(alignment.sequences.len() + 2);

    if let Some(ss_cons) = &alignment.ss_cons {
        rows.push(Row::new("SS_cons", None, ss_cons));
    }
    if let Some(rf) = &alignment.rf {
        rows.push(Row::new("RF", None, rf));
    }
    let header_rows = rows.len();

    for (id, data) in &alignment.sequences {
        rows.push(Row::new(id.clone(), scores.get(id).copied(), data));
    }

    AlignmentMatrix::new(rows, header_rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_alignment() -> ReportAlignment {
        ReportAlignment {
            ss_cons: Some("<<..>>".to_string()),
            rf: Some("xx..xx".to_string()),
            sequences: vec![
                ("seq1".to_string(), "AC..GU".to_string()),
                ("seq2".to_string(), "ACGUGU".to_string()),
                ("seed1".to_string(), "AC..GU".to_string()),
            ],
        }
    }

    #[test]
    fn test_build_matrix() {
        let scores: HashMap<String, f64> =
            [("seq1".to_string(), 30.0), ("seq2".to_string(), 20.0)]
                .into_iter()
                .collect();
        let matrix = build_matrix(sample_alignment(), &scores).unwrap();

        assert_eq!(matrix.num_rows(), 5);
        assert_eq!(matrix.header_rows(), 2);
        assert_eq!(matrix.rows()[0].id, "SS_cons");
        assert_eq!(matrix.rows()[2].score, Some(30.0));
        // Seed member has no outlist entry: unscored.
        assert_eq!(matrix.rows()[4].score, None);
    }

    #[test]
    fn test_build_matrix_rejects_ragged_rows() {
        let mut alignment = sample_alignment();
        alignment.sequences.push(("bad".to_string(), "AC".to_string()));
        assert!(build_matrix(alignment, &HashMap::new()).is_err());
    }

    #[test]
    fn test_filter_pipeline_on_built_matrix() {
        let scores: HashMap<String, f64> =
            [("seq1".to_string(), 30.0), ("seq2".to_string(), 20.0)]
                .into_iter()
                .collect();
        let mut matrix = build_matrix(sample_alignment(), &scores).unwrap();

        let summary = matrix.set_threshold(25.0);
        // seq2 (row 3) drops out; columns 2 and 3 are gaps in every
        // remaining data row and collapse.
        assert_eq!(summary.visible_rows, vec![0, 1, 2, 4]);
        assert_eq!(summary.last_visible, Some(2));
        assert_eq!(summary.hidden_columns, vec![2, 3]);
    }
}
