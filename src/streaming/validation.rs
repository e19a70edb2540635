//! Input-order validation for summit-grouped signal tracks.
//!
//! Peak calling requires rows grouped by (chromosome, summit) and, within a
//! group, ascending by position. The validator checks each record against
//! the previous one as records stream past and tells the caller whether the
//! record continues the current region or starts a new one.

use crate::error::PeakError;

/// How a record relates to the record before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStep {
    /// First record of the input.
    First,
    /// Next adjacent site of the current region.
    Extend,
    /// A different chromosome or summit: new group, new region.
    NewGroup,
    /// Same group, but positions jumped forward: new region.
    Gap,
}

impl GroupStep {
    /// Whether the record opens a new region.
    #[inline]
    pub fn starts_region(self) -> bool {
        !matches!(self, GroupStep::Extend)
    }
}

/// Inline order validator for use within the streaming loop.
#[derive(Debug, Default)]
pub struct GroupOrderValidator {
    prev_chrom: String,
    prev_pos: u64,
    prev_summit: u64,
    prev_line: usize,
    record_count: usize,
}

impl GroupOrderValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate one record and classify it relative to the previous one.
    #[inline]
    pub fn validate(
        &mut self,
        chrom: &str,
        pos: u64,
        summit: u64,
        line: usize,
    ) -> Result<GroupStep, PeakError> {
        let step = if self.record_count == 0 {
            GroupStep::First
        } else if chrom != self.prev_chrom || summit != self.prev_summit {
            GroupStep::NewGroup
        } else if self.prev_pos.checked_add(1) == Some(pos) {
            GroupStep::Extend
        } else if pos > self.prev_pos {
            GroupStep::Gap
        } else {
            return Err(PeakError::OutOfOrder {
                prev_line: self.prev_line,
                prev_chrom: self.prev_chrom.clone(),
                prev_start: self.prev_pos - 1,
                prev_end: self.prev_pos,
                line,
                chrom: chrom.to_string(),
                start: pos - 1,
                end: pos,
                summit,
            });
        };

        self.record_count += 1;
        if chrom != self.prev_chrom {
            self.prev_chrom.clear();
            self.prev_chrom.push_str(chrom);
        }
        self.prev_pos = pos;
        self.prev_summit = summit;
        self.prev_line = line;
        Ok(step)
    }

    /// Get the number of records validated.
    pub fn record_count(&self) -> usize {
        self.record_count
    }
}
