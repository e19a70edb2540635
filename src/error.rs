//! Error type shared by the peak caller and the cluster resolver.

use std::io;
use thiserror::Error;

/// Exit status for an overlap that the shortening and swap rules cannot settle.
pub const EXIT_AMBIGUOUS_OVERLAP: i32 = 2;

/// Exit status for malformed or out-of-order input.
pub const EXIT_INPUT_ERROR: i32 = 1;

/// Exit status for bad command-line usage (-1 as seen by the shell).
pub const EXIT_USAGE: i32 = 255;

/// Errors that can occur while calling or resolving peaks.
#[derive(Error, Debug)]
pub enum PeakError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Interval on line {line} is not 1bp wide as expected; interval is {chrom}:{start}-{end}")]
    NotSingleBase {
        line: usize,
        chrom: String,
        start: u64,
        end: u64,
    },

    #[error(
        "Line {prev_line} contains {prev_chrom}:{prev_start}-{prev_end} for summit {summit}, \
         but line {line} contains {chrom}:{start}-{end} for the same summit. \
         All entries for a given summit must be in ascending order by column 3"
    )]
    OutOfOrder {
        prev_line: usize,
        prev_chrom: String,
        prev_start: u64,
        prev_end: u64,
        line: usize,
        chrom: String,
        start: u64,
        end: u64,
        summit: u64,
    },

    #[error("{left}, unsure how to resolve overlap with {right}")]
    AmbiguousOverlap { left: String, right: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl PeakError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            PeakError::AmbiguousOverlap { .. } => EXIT_AMBIGUOUS_OVERLAP,
            PeakError::InvalidArgument(_) => EXIT_USAGE,
            _ => EXIT_INPUT_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, PeakError>;
