//! Score-greedy overlap resolution within peak clusters.
//!
//! Each input line is one cluster: a merged interval, `|`, then the
//! `;`-separated peaks that fall inside it. Every peak has at least five
//! tab-separated fields (chrom, start, end, id, score); extra fields are
//! ignored.
//!
//! Within a cluster the strongest peak is kept and every peak overlapping it
//! is dropped, then the same is done for the strongest survivor, and so on.
//! Survivors are written in coordinate order with the score text unchanged.

use crate::bed::LineReader;
use crate::error::{PeakError, Result};
use crate::streaming::parsing::{parse_score, parse_u64_fast, Fields};
use crate::streaming::PeakWriter;
use std::cmp::Ordering;
use std::fmt;
use std::io::{self, Read, Write};
use std::path::Path;

/// One peak of a cluster line. Text fields keep the input bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPeak {
    pub chrom: Vec<u8>,
    pub start: u64,
    pub end: u64,
    pub id: Vec<u8>,
    pub score: f32,
    /// Score exactly as it appeared in the input.
    pub score_text: Vec<u8>,
}

impl ClusterPeak {
    /// Half-open overlap on the same chromosome.
    #[inline]
    pub fn overlaps(&self, other: &ClusterPeak) -> bool {
        self.chrom == other.chrom && self.start < other.end && other.start < self.end
    }

    fn coord_cmp(&self, other: &ClusterPeak) -> Ordering {
        self.chrom
            .cmp(&other.chrom)
            .then(self.start.cmp(&other.start))
            .then(self.end.cmp(&other.end))
            .then(self.id.cmp(&other.id))
            .then(self.score.total_cmp(&other.score))
    }
}

/// Parse one `;`-separated peak.
pub fn parse_cluster_peak(text: &[u8], line_number: usize) -> Result<ClusterPeak> {
    let mut fields = Fields::tabs(text);
    let mut next = |field_num: usize| {
        fields
            .next()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| PeakError::Parse {
                line: line_number,
                message: format!(
                    "Missing required field {} in '{}'",
                    field_num,
                    String::from_utf8_lossy(text)
                ),
            })
    };

    let chrom = next(1)?;
    let start = next(2)?;
    let end = next(3)?;
    let id = next(4)?;
    let score = next(5)?;

    let coord = |bytes: &[u8]| {
        parse_u64_fast(bytes).ok_or_else(|| PeakError::Parse {
            line: line_number,
            message: format!("Invalid coordinate: '{}'", String::from_utf8_lossy(bytes)),
        })
    };

    Ok(ClusterPeak {
        chrom: chrom.to_vec(),
        start: coord(start)?,
        end: coord(end)?,
        id: id.to_vec(),
        score: parse_score(score).ok_or_else(|| PeakError::Parse {
            line: line_number,
            message: format!("Invalid score: '{}'", String::from_utf8_lossy(score)),
        })?,
        score_text: score.to_vec(),
    })
}

/// Parse a whole cluster line into its peaks.
pub fn parse_cluster_line(line: &[u8], line_number: usize) -> Result<Vec<ClusterPeak>> {
    let Some(bar) = memchr::memchr(b'|', line) else {
        return Err(PeakError::Parse {
            line: line_number,
            message: "Failed to find |-delimited input".to_string(),
        });
    };

    Fields::new(&line[bar + 1..], b';')
        .filter(|peak| !peak.is_empty())
        .map(|peak| parse_cluster_peak(peak, line_number))
        .collect()
}

/// Keep the strongest peaks of a cluster such that no two overlap, in
/// coordinate order. Equal scores keep input order.
pub fn resolve_cluster(mut peaks: Vec<ClusterPeak>) -> Vec<ClusterPeak> {
    peaks.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut kept: Vec<ClusterPeak> = Vec::with_capacity(peaks.len());
    for peak in peaks {
        if !kept.iter().any(|k| k.overlaps(&peak)) {
            kept.push(peak);
        }
    }
    kept.sort_by(ClusterPeak::coord_cmp);
    kept
}

/// Cluster resolution command configuration.
#[derive(Debug, Clone, Default)]
pub struct ResolveClustersCommand;

impl ResolveClustersCommand {
    pub fn new() -> Self {
        Self
    }

    /// Resolve clusters from a file.
    pub fn run<P: AsRef<Path>, W: Write>(
        &self,
        input_path: P,
        output: &mut W,
    ) -> Result<ResolveClustersStats> {
        let reader = LineReader::from_path(input_path)?;
        self.run_reader(reader, output)
    }

    /// Resolve clusters from stdin.
    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<ResolveClustersStats> {
        let stdin = io::stdin();
        self.run_reader(LineReader::new(stdin.lock()), output)
    }

    /// Process one cluster per line, writing survivors as they are found.
    pub fn run_reader<R: Read, W: Write>(
        &self,
        mut reader: LineReader<R>,
        output: &mut W,
    ) -> Result<ResolveClustersStats> {
        let mut stats = ResolveClustersStats::default();
        let mut writer = PeakWriter::new(output);

        while let Some((line_number, line)) = reader.next_line()? {
            let peaks = parse_cluster_line(line, line_number)?;
            stats.clusters += 1;
            stats.peaks_read += peaks.len();

            let kept = resolve_cluster(peaks);
            stats.peaks_written += kept.len();
            for peak in &kept {
                writer.write_bed3(&peak.chrom, peak.start, peak.end)?;
                writer.write_tab()?;
                writer.write_bytes(&peak.id)?;
                writer.write_tab()?;
                writer.write_bytes(&peak.score_text)?;
                writer.write_newline()?;
            }
        }
        writer.flush()?;

        log::info!("Cluster resolution: {}", stats);
        Ok(stats)
    }
}

/// Statistics from cluster resolution.
#[derive(Debug, Default, Clone)]
pub struct ResolveClustersStats {
    pub clusters: usize,
    pub peaks_read: usize,
    pub peaks_written: usize,
}

impl ResolveClustersStats {
    pub fn peaks_removed(&self) -> usize {
        self.peaks_read - self.peaks_written
    }
}

impl fmt::Display for ResolveClustersStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Clusters: {}, Peaks read: {}, Removed: {}, Written: {}",
            self.clusters,
            self.peaks_read,
            self.peaks_removed(),
            self.peaks_written
        )
    }
}
