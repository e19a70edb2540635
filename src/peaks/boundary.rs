//! Full-width-at-half-maximum boundary search.
//!
//! Starting from a local maximum, each side walks outward until the signal
//! drops to half the maximum, the region ends, or the signal climbs back up
//! to the maximum (the candidate is then a shoulder of a taller peak and the
//! side stops at the lowest point seen so far). A side that reaches the
//! region edge without crossing half-max falls back to that lowest point
//! when the edge is higher.

use super::region::Region;
use crate::interval::{Candidate, Position};
use crate::score::{approx_ge, approx_le, strictly_gt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    fn at_edge(self, idx: usize, last: usize) -> bool {
        match self {
            Side::Left => idx == 0,
            Side::Right => idx == last,
        }
    }

    #[inline]
    fn outward(self, idx: usize) -> usize {
        match self {
            Side::Left => idx - 1,
            Side::Right => idx + 1,
        }
    }

    #[inline]
    fn inward(self, idx: usize) -> usize {
        match self {
            Side::Left => idx + 1,
            Side::Right => idx - 1,
        }
    }
}

/// Widen `candidate` to its half-maximum bounds within `region`.
///
/// Returns the inclusive index range of the peak, or `None` if the peak
/// does not contain the region's summit or is narrower than `min_width`.
/// Candidates whose height is not above zero have no half maximum and are
/// always rejected.
pub fn find_peak_boundaries(
    region: &Region,
    candidate: &Candidate,
    min_width: u64,
) -> Option<(usize, usize)> {
    let posns = &region.positions;
    let max_y = candidate.height();
    if posns.is_empty() || !strictly_gt(max_y, 0.0) {
        return None;
    }

    let idx_l = expand(posns, candidate.beg.idx, max_y, Side::Left);
    let idx_r = expand(posns, candidate.end.idx, max_y, Side::Right);

    if region.summit < posns[idx_l].x || region.summit > posns[idx_r].x {
        return None;
    }
    if ((idx_r - idx_l + 1) as u64) < min_width {
        return None;
    }
    Some((idx_l, idx_r))
}

/// Walk one side outward from `start` and return the boundary index.
fn expand(posns: &[Position], start: usize, max_y: f32, side: Side) -> usize {
    let last = posns.len() - 1;
    let half_y = max_y / 2.0;
    let mut min_y = max_y;
    let mut idx_of_min = start;

    let mut idx = if side.at_edge(start, last) {
        start
    } else {
        side.outward(start)
    };

    while !side.at_edge(idx, last) && strictly_gt(posns[idx].y, half_y) {
        let y = posns[idx].y;
        if approx_le(y, min_y) {
            min_y = y;
            idx_of_min = idx;
        }
        if approx_ge(y, max_y) {
            // Climbed back to the maximum: this is a shoulder of a taller
            // neighbor. Stop at the lowest point between the two.
            debug_assert!(approx_le(posns[idx_of_min].y, max_y));
            debug_assert!(strictly_gt(posns[idx_of_min].y, half_y));
            return idx_of_min;
        }
        idx = side.outward(idx);
    }

    if idx != start && approx_ge(half_y, posns[idx].y) {
        // Crossed half-max: the last site above it is the boundary.
        side.inward(idx)
    } else if side.at_edge(idx, last) && strictly_gt(posns[idx].y, min_y) {
        idx_of_min
    } else {
        idx
    }
}
