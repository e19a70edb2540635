//! Streaming utilities shared by the peak caller and the cluster resolver:
//! - Zero-allocation field parsing
//! - Summit-group order validation
//! - Buffered output formatting

pub mod output;
pub mod parsing;
pub mod validation;

pub use output::PeakWriter;
pub use parsing::{parse_score, parse_u64_fast, should_skip_line, trim_line_end, Fields};
pub use validation::{GroupOrderValidator, GroupStep};
