//! Resolving overlaps between peaks called for different summits.
//!
//! Peaks are scanned in genomic order, one adjacent pair at a time. The
//! overlapping stretch goes to whichever peak does not have its apex there:
//!
//! 1. left apex before right start: trim the left peak's end;
//! 2. right apex after left end: trim the right peak's start;
//! 3. otherwise swap the pair and try once more;
//! 4. still stuck: identical peaks keep the one whose apex is nearer its own
//!    summit, anything else is an error.
//!
//! One scan settles every adjacent pair, but a peak cut back after a swap
//! can still reach over a peak settled earlier in the same scan. The
//! scan is repeated on its own result until it finds no overlap, so the
//! peaks handed to `emit` are disjoint and in genomic order. Each repeat
//! only shortens or removes peaks, which bounds the number of scans. Peaks
//! narrower than `min_width` are dropped at the end of every scan.

use crate::error::{PeakError, Result};
use crate::interval::Peak;
use std::fmt;

/// Counters from an overlap-resolution pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OverlapStats {
    pub peaks_in: usize,
    pub trimmed: usize,
    pub swaps: usize,
    pub duplicates_removed: usize,
    pub too_narrow: usize,
    pub peaks_out: usize,
    pub scans: usize,
}

impl fmt::Display for OverlapStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Peaks in: {}, Trimmed: {}, Swaps: {}, Duplicates removed: {}, Too narrow: {}, Peaks out: {}, Scans: {}",
            self.peaks_in,
            self.trimmed,
            self.swaps,
            self.duplicates_removed,
            self.too_narrow,
            self.peaks_out,
            self.scans
        )
    }
}

/// How one overlapping pair was settled.
enum Settled {
    Trimmed,
    Swapped,
    RemovedDuplicate,
}

/// Resolve overlaps and pass each surviving peak to `emit` in genomic
/// order. Nothing is emitted when the overlaps are ambiguous.
pub fn resolve_overlaps_with<F>(
    mut peaks: Vec<Peak>,
    min_width: u64,
    mut emit: F,
) -> Result<OverlapStats>
where
    F: FnMut(&Peak) -> Result<()>,
{
    let mut stats = OverlapStats {
        peaks_in: peaks.len(),
        ..Default::default()
    };

    loop {
        peaks.sort_by(Peak::genomic_cmp);
        stats.scans += 1;
        let changed = settle_scan(&mut peaks, &mut stats)?;

        let before = peaks.len();
        peaks.retain(|peak| peak.width() >= min_width);
        stats.too_narrow += before - peaks.len();

        if !changed {
            break;
        }
        log::debug!("Scan {} settled overlaps, scanning again", stats.scans);
    }

    for peak in &peaks {
        emit(peak)?;
    }
    stats.peaks_out = peaks.len();

    log::info!("Overlap resolution: {}", stats);
    Ok(stats)
}

/// Settle every overlapping adjacent pair once, in order. Returns whether
/// any pair overlapped.
fn settle_scan(peaks: &mut Vec<Peak>, stats: &mut OverlapStats) -> Result<bool> {
    let mut changed = false;
    let mut left = 0;
    while left + 1 < peaks.len() {
        let mut swapped = false;
        while left + 1 < peaks.len() && peaks[left].overlaps_next(&peaks[left + 1]) {
            changed = true;
            match settle_pair(peaks, left, swapped)? {
                Settled::Trimmed => {
                    stats.trimmed += 1;
                    break;
                }
                Settled::Swapped => {
                    stats.swaps += 1;
                    swapped = true;
                }
                Settled::RemovedDuplicate => {
                    // The survivor is checked again against its new neighbor.
                    stats.duplicates_removed += 1;
                    swapped = false;
                }
            }
        }
        left += 1;
    }
    Ok(changed)
}

/// Resolve overlaps and collect the emitted peaks.
pub fn resolve_overlaps(peaks: Vec<Peak>, min_width: u64) -> Result<Vec<Peak>> {
    let mut out = Vec::with_capacity(peaks.len());
    resolve_overlaps_with(peaks, min_width, |peak| {
        out.push(peak.clone());
        Ok(())
    })?;
    Ok(out)
}

fn settle_pair(peaks: &mut Vec<Peak>, left: usize, swapped: bool) -> Result<Settled> {
    let right = left + 1;

    if peaks[left].apex < peaks[right].beg {
        peaks[left].end = peaks[right].beg - 1;
        return Ok(Settled::Trimmed);
    }
    if peaks[right].apex > peaks[left].end {
        // The right apex lies past the left end, so this cannot overflow.
        peaks[right].beg = peaks[left].end + 1;
        return Ok(Settled::Trimmed);
    }
    if !swapped {
        peaks.swap(left, right);
        return Ok(Settled::Swapped);
    }

    let (l, r) = (&peaks[left], &peaks[right]);
    if l.beg == r.beg && l.end == r.end {
        // Two summits produced the same FWHM peak.
        let dist_l = l.apex.abs_diff(l.input_summit);
        let dist_r = r.apex.abs_diff(r.input_summit);
        if dist_l > dist_r {
            peaks.swap(left, right);
        }
        let dropped = peaks.remove(right);
        log::debug!("Dropped duplicate peak {}", dropped);
        return Ok(Settled::RemovedDuplicate);
    }

    Err(PeakError::AmbiguousOverlap {
        left: l.to_string(),
        right: r.to_string(),
    })
}
