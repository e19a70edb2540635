//! Core types: per-base positions, local-maximum candidates and peaks.
//!
//! Coordinates are the 1-based "pos" column of the input (the end of a
//! 1bp BED interval). A peak spanning sites `beg..=end` is written as the
//! 0-based half-open interval `(beg - 1, end]`.

use std::cmp::Ordering;
use std::fmt;

/// One base-pair site within a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Genomic coordinate.
    pub x: u64,
    /// Signal score at `x`.
    pub y: f32,
    /// Index of this site within its region.
    pub idx: usize,
}

impl Position {
    #[inline]
    pub fn new(x: u64, y: f32, idx: usize) -> Self {
        Self { x, y, idx }
    }
}

/// A run of equal-score sites that the run-tracking state machine flagged
/// as a local maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub beg: Position,
    pub end: Position,
}

impl Candidate {
    /// A single-site candidate.
    #[inline]
    pub fn at(pos: Position) -> Self {
        Self { beg: pos, end: pos }
    }

    /// Height of the flat top. All sites in the run share it.
    #[inline]
    pub fn height(&self) -> f32 {
        self.beg.y
    }

    /// Center of the flat top, rounded down.
    #[inline]
    pub fn apex(&self) -> u64 {
        self.beg.x + (self.end.x - self.beg.x) / 2
    }
}

/// A width-qualified FWHM peak.
#[derive(Debug, Clone, PartialEq)]
pub struct Peak {
    pub chrom: String,
    pub id: String,
    /// First site of the peak (inclusive).
    pub beg: u64,
    /// Last site of the peak (inclusive).
    pub end: u64,
    pub max_score: f32,
    /// Coordinate of the maximum score.
    pub apex: u64,
    /// Summit coordinate the peak was selected for.
    pub input_summit: u64,
    /// `|apex - input_summit|`.
    pub summit_separation: u64,
}

impl Peak {
    /// Number of sites covered, `end - (beg - 1)`.
    #[inline]
    pub fn width(&self) -> u64 {
        self.end
            .checked_sub(self.beg)
            .map_or(0, |w| w.saturating_add(1))
    }

    /// Whether the sites of `other` start at or before the last site of `self`
    /// on the same chromosome. `other` is assumed not to start before `self`.
    #[inline]
    pub fn overlaps_next(&self, other: &Peak) -> bool {
        self.chrom == other.chrom && other.beg <= self.end
    }

    /// `chrom:beg-end` in output coordinates, for diagnostics.
    pub fn locus(&self) -> String {
        format!("{}:{}-{}", self.chrom, self.beg.saturating_sub(1), self.end)
    }

    /// Order by chromosome, beg, end, apex, then input summit.
    pub fn genomic_cmp(&self, other: &Peak) -> Ordering {
        self.chrom
            .cmp(&other.chrom)
            .then(self.beg.cmp(&other.beg))
            .then(self.end.cmp(&other.end))
            .then(self.apex.cmp(&other.apex))
            .then(self.input_summit.cmp(&other.input_summit))
    }
}

impl fmt::Display for Peak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, input summit = {}, FWHM summit = {}",
            self.locus(),
            self.input_summit,
            self.apex
        )
    }
}
