//! Alignment analysis engine.
//!
//! Three passes over a shared [`matrix::AlignmentMatrix`]: score-threshold
//! row filtering, gap-driven column collapsing, and per-column nucleotide
//! conservation banding. Each user action runs one full synchronous pass;
//! the `&mut` receiver is the single-writer guarantee.

pub mod collapse;
pub mod conservation;
pub mod filter;
pub mod matrix;

pub use matrix::{
    AlignmentMatrix, Band, FilterState, FilterSummary, MatrixError, Nucleotide, Row, Symbol,
    DEFAULT_GA_THRESHOLD,
};
