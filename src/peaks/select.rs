//! Choosing the one peak a region reports.

use super::boundary::find_peak_boundaries;
use super::region::Region;
use crate::interval::{Candidate, Peak};
use crate::score::approx_eq;

/// Sort candidates tallest first. Candidates whose heights agree within
/// tolerance are ordered by position, leftmost first.
///
/// Heights are first sorted exactly, then each chain of near-equal
/// neighbors is reordered by position, which keeps the order total.
pub fn order_by_height(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.height()
            .total_cmp(&a.height())
            .then(a.beg.x.cmp(&b.beg.x))
            .then(a.end.x.cmp(&b.end.x))
    });

    let mut i = 0;
    while i < candidates.len() {
        let mut j = i + 1;
        while j < candidates.len() && approx_eq(candidates[j - 1].height(), candidates[j].height())
        {
            j += 1;
        }
        if j - i > 1 {
            candidates[i..j].sort_by_key(|c| (c.beg.x, c.end.x));
        }
        i = j;
    }
}

/// Find the region's peak: among candidates that widen into a peak of at
/// least `min_width` sites containing the summit, the one whose apex lies
/// closest to the summit. Ties go to the taller (then leftmost) candidate.
///
/// Candidates are reordered in place.
pub fn select_peak(region: &mut Region, min_width: u64) -> Option<Peak> {
    order_by_height(&mut region.candidates);

    let mut best: Option<Peak> = None;
    for candidate in &region.candidates {
        let Some((idx_l, idx_r)) = find_peak_boundaries(region, candidate, min_width) else {
            log::trace!(
                "{}: local maximum {}-{} rejected for summit {}",
                region.chrom,
                candidate.beg.x,
                candidate.end.x,
                region.summit
            );
            continue;
        };

        let apex = candidate.apex();
        let separation = apex.abs_diff(region.summit);
        if best
            .as_ref()
            .is_some_and(|b| b.summit_separation <= separation)
        {
            continue;
        }
        best = Some(Peak {
            chrom: region.chrom.clone(),
            id: region.id.clone(),
            beg: region.positions[idx_l].x,
            end: region.positions[idx_r].x,
            max_score: candidate.height(),
            apex,
            input_summit: region.summit,
            summit_separation: separation,
        });
    }
    best
}
