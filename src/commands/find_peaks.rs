//! Streaming variable-width peak calling.
//!
//! Reads a summit-grouped per-base signal track, calls one FWHM peak per
//! region and writes the overlap-resolved peaks.
//!
//! # Requirements
//!
//! Rows for one (chromosome, summit) pair must be adjacent and ascending by
//! position. Groups themselves may come in any order.

use crate::bed::SignalReader;
use crate::error::Result;
use crate::peaks::{resolve_overlaps_with, CallStats, OverlapStats, PeakCaller};
use crate::streaming::PeakWriter;
use std::fmt;
use std::io::{self, Read, Write};
use std::path::Path;

/// Peak calling command configuration.
#[derive(Debug, Clone)]
pub struct FindPeaksCommand {
    /// Minimum reported peak width in sites.
    pub min_width: u64,
}

impl Default for FindPeaksCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl FindPeaksCommand {
    pub fn new() -> Self {
        Self { min_width: 1 }
    }

    /// Set the minimum peak width.
    pub fn with_min_width(mut self, min_width: u64) -> Self {
        self.min_width = min_width;
        self
    }

    /// Call peaks from a signal track file.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        input_path: P,
        output: &mut W,
    ) -> Result<FindPeaksStats> {
        let reader = SignalReader::from_path(input_path)?;
        self.run_reader(reader, output)
    }

    /// Call peaks from stdin.
    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<FindPeaksStats> {
        let stdin = io::stdin();
        self.run_reader(SignalReader::new(stdin.lock()), output)
    }

    /// Core loop: stream records into the caller, then resolve overlaps and
    /// write the result.
    pub fn run_reader<R: Read, W: Write>(
        &self,
        mut reader: SignalReader<R>,
        output: &mut W,
    ) -> Result<FindPeaksStats> {
        let mut caller = PeakCaller::new(self.min_width)?;
        while let Some(record) = reader.read_record()? {
            caller.push(&record)?;
        }
        let (peaks, calling) = caller.finish();

        let mut writer = PeakWriter::new(output);
        let overlaps =
            resolve_overlaps_with(peaks, self.min_width, |peak| writer.write_peak(peak))?;
        writer.flush()?;

        Ok(FindPeaksStats { calling, overlaps })
    }
}

/// Statistics from a peak calling run.
#[derive(Debug, Default, Clone)]
pub struct FindPeaksStats {
    pub calling: CallStats,
    pub overlaps: OverlapStats,
}

impl FindPeaksStats {
    /// Number of peaks written.
    pub fn peaks_written(&self) -> usize {
        self.overlaps.peaks_out
    }
}

impl fmt::Display for FindPeaksStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}; {}", self.calling, self.overlaps)
    }
}
