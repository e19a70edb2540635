//! A contiguous island of sites and the local maxima found inside it.
//!
//! Sites are appended one at a time. A run-tracking state machine watches the
//! scores as they arrive:
//!
//! - a score equal (within tolerance) to the current run extends the run;
//! - a drop closes the run, which becomes a candidate if the signal was
//!   rising into it;
//! - a rise starts a new run and marks the signal as rising.

use crate::interval::{Candidate, Position};
use crate::score::{approx_eq, strictly_gt};

/// Sites of one summit group between two discontinuities.
#[derive(Debug, Default, Clone)]
pub struct Region {
    pub chrom: String,
    pub id: String,
    /// Summit coordinate every peak from this region must contain.
    pub summit: u64,
    pub positions: Vec<Position>,
    pub candidates: Vec<Candidate>,
    /// Run of equal scores ending at the last site appended.
    run: Option<Candidate>,
    ascending: bool,
}

impl Region {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to an empty region for a new summit group.
    pub fn start(&mut self, chrom: &str, id: &str, summit: u64) {
        self.clear();
        if self.chrom != chrom {
            self.chrom.clear();
            self.chrom.push_str(chrom);
        }
        if self.id != id {
            self.id.clear();
            self.id.push_str(id);
        }
        self.summit = summit;
    }

    /// Append the next site. Its coordinate must follow the previous one.
    pub fn push(&mut self, x: u64, y: f32) {
        debug_assert!(self.positions.last().is_none_or(|p| p.x.checked_add(1) == Some(x)));

        let pos = Position::new(x, y, self.positions.len());
        self.positions.push(pos);

        match self.run.as_mut() {
            None => {
                self.run = Some(Candidate::at(pos));
                self.ascending = true;
            }
            Some(run) if approx_eq(pos.y, run.beg.y) => run.end = pos,
            Some(run) => {
                if strictly_gt(run.beg.y, pos.y) {
                    if self.ascending {
                        self.candidates.push(*run);
                    }
                    self.ascending = false;
                } else {
                    self.ascending = true;
                }
                *run = Candidate::at(pos);
            }
        }
    }

    /// Record the run touching the right edge if the signal rose into it,
    /// or if nothing else qualified.
    pub fn close(&mut self) {
        if let Some(run) = self.run.take() {
            if self.ascending || self.candidates.is_empty() {
                self.candidates.push(run);
            }
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.candidates.clear();
        self.run = None;
        self.ascending = true;
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }
}
