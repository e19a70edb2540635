//! Summit-centered variable-width peak calling.
//!
//! # Algorithm
//!
//! 1. Stream sites grouped by (chromosome, summit); each contiguous island
//!    of a group is a [`Region`].
//! 2. Find the local maxima of the region as the sites arrive.
//! 3. When the region closes, widen each maximum to its half-max bounds and
//!    keep the peak whose apex is nearest the summit.
//! 4. After the input ends, settle overlaps between the peaks of all
//!    regions (see [`overlap`]).
//!
//! # Memory Complexity
//!
//! O(region) while streaming plus O(peaks) for the overlap pass.

pub mod boundary;
pub mod overlap;
pub mod region;
pub mod select;

pub use boundary::find_peak_boundaries;
pub use overlap::{resolve_overlaps, resolve_overlaps_with, OverlapStats};
pub use region::Region;
pub use select::{order_by_height, select_peak};

use crate::bed::SignalRecord;
use crate::error::{PeakError, Result};
use crate::interval::Peak;
use crate::streaming::GroupOrderValidator;
use std::fmt;

/// Counters from the region-scanning phase.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CallStats {
    pub records: usize,
    pub regions: usize,
    pub candidates: usize,
    pub peaks_called: usize,
}

impl fmt::Display for CallStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Records: {}, Regions: {}, Local maxima: {}, Peaks called: {}",
            self.records, self.regions, self.candidates, self.peaks_called
        )
    }
}

/// Streaming per-region peak caller.
///
/// Feed records with [`PeakCaller::push`], then take the called peaks with
/// [`PeakCaller::finish`] and pass them to [`resolve_overlaps_with`].
#[derive(Debug)]
pub struct PeakCaller {
    min_width: u64,
    region: Region,
    validator: GroupOrderValidator,
    id: Option<String>,
    warned_id: bool,
    peaks: Vec<Peak>,
    stats: CallStats,
}

impl PeakCaller {
    /// A caller that only keeps peaks at least `min_width` sites wide.
    pub fn new(min_width: u64) -> Result<Self> {
        if min_width == 0 {
            return Err(PeakError::InvalidArgument(
                "minimum width must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            min_width,
            region: Region::new(),
            validator: GroupOrderValidator::new(),
            id: None,
            warned_id: false,
            peaks: Vec::new(),
            stats: CallStats::default(),
        })
    }

    /// Consume the next record.
    pub fn push(&mut self, record: &SignalRecord<'_>) -> Result<()> {
        let step = self
            .validator
            .validate(record.chrom, record.pos, record.summit, record.line)?;
        self.stats.records += 1;

        match self.id.as_deref() {
            None => self.id = Some(record.id.to_string()),
            Some(id) if id != record.id && !self.warned_id => {
                log::warn!(
                    "Line {} has id '{}', expected '{}'; all peaks are labelled '{}'",
                    record.line,
                    record.id,
                    id,
                    id
                );
                self.warned_id = true;
            }
            Some(_) => {}
        }

        if step.starts_region() {
            self.flush_region();
            let id = self.id.as_deref().unwrap_or_default();
            self.region.start(record.chrom, id, record.summit);
        }
        self.region.push(record.pos, record.score);
        Ok(())
    }

    /// Close the current region and keep its peak, if any.
    fn flush_region(&mut self) {
        if self.region.is_empty() {
            return;
        }
        self.region.close();
        self.stats.regions += 1;
        self.stats.candidates += self.region.candidates.len();

        match select_peak(&mut self.region, self.min_width) {
            Some(peak) => {
                log::trace!("Called {}", peak);
                self.peaks.push(peak);
                self.stats.peaks_called += 1;
            }
            None => log::debug!(
                "No peak of width >= {} contains summit {}:{}",
                self.min_width,
                self.region.chrom,
                self.region.summit
            ),
        }
        self.region.clear();
    }

    /// Close the last region and return every peak called.
    pub fn finish(mut self) -> (Vec<Peak>, CallStats) {
        self.flush_region();
        log::info!("Peak calling: {}", self.stats);
        (self.peaks, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bed::parse_signal_line;

    fn call(lines: &[String], min_width: u64) -> Result<(Vec<Peak>, CallStats)> {
        let mut caller = PeakCaller::new(min_width)?;
        for (i, line) in lines.iter().enumerate() {
            let rec = parse_signal_line(line.as_bytes(), i + 1)?;
            caller.push(&rec)?;
        }
        Ok(caller.finish())
    }

    fn track(chrom: &str, first_pos: u64, summit: u64, scores: &[f32]) -> Vec<String> {
        scores
            .iter()
            .enumerate()
            .map(|(i, y)| {
                let pos = first_pos + i as u64;
                format!("{}\t{}\t{}\tsample\t{}\t{}", chrom, pos - 1, pos, y, summit)
            })
            .collect()
    }

    #[test]
    fn test_zero_min_width_rejected() {
        let err = PeakCaller::new(0).unwrap_err();
        assert!(matches!(err, PeakError::InvalidArgument(_)));
    }

    #[test]
    fn test_one_region() {
        let lines = track("chr1", 101, 103, &[1.0, 2.0, 5.0, 5.0, 2.0, 1.0]);
        let (peaks, stats) = call(&lines, 2).unwrap();
        assert_eq!(peaks.len(), 1);
        assert_eq!((peaks[0].beg, peaks[0].end), (103, 104));
        assert_eq!(peaks[0].id, "sample");
        assert_eq!(stats.records, 6);
        assert_eq!(stats.regions, 1);
        assert_eq!(stats.peaks_called, 1);
    }

    #[test]
    fn test_groups_split_by_summit_and_gap() {
        let mut lines = track("chr1", 1, 3, &[1.0, 4.0, 6.0, 4.0, 1.0]);
        // Same summit after a gap: a second region.
        lines.extend(track("chr1", 20, 3, &[1.0, 1.0]));
        // Another summit revisiting earlier coordinates.
        lines.extend(track("chr1", 2, 4, &[2.0, 8.0, 7.0, 2.0]));
        let (peaks, stats) = call(&lines, 1).unwrap();
        assert_eq!(stats.regions, 3);
        // The gap region cannot contain summit 3.
        assert_eq!(peaks.len(), 2);
        assert_eq!(peaks[0].input_summit, 3);
        assert_eq!(peaks[1].input_summit, 4);
        assert_eq!(peaks[1].apex, 3);
    }

    #[test]
    fn test_out_of_order_is_an_error() {
        let mut lines = track("chr1", 10, 11, &[1.0, 2.0]);
        lines.extend(track("chr1", 10, 11, &[1.0]));
        let err = call(&lines, 1).unwrap_err();
        assert!(matches!(err, PeakError::OutOfOrder { line: 3, .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_first_id_labels_all_peaks() {
        let mut lines = track("chr1", 1, 2, &[1.0, 3.0, 1.0]);
        lines.push("chr1\t9\t10\tother\t3\t10".to_string());
        let (peaks, _) = call(&lines, 1).unwrap();
        assert_eq!(peaks.len(), 2);
        assert!(peaks.iter().all(|p| p.id == "sample"));
    }

    #[test]
    fn test_empty_input() {
        let (peaks, stats) = call(&[], 1).unwrap();
        assert!(peaks.is_empty());
        assert_eq!(stats, CallStats::default());
    }
}
