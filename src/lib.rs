//! vwpeaks: summit-centered variable-width peak calling
//!
//! Calls one full-width-at-half-maximum peak per summit from a per-base
//! signal track, then settles overlaps between neighboring peaks.
//!
//! # Features
//!
//! - **Streaming I/O**: one region in memory at a time while scanning
//! - **Summit-centered selection**: the reported peak always contains the
//!   summit it was called for
//! - **Cluster resolution**: score-greedy cleanup of merged peak clusters
//!
//! # Example
//!
//! ```rust,no_run
//! use vwpeaks::commands::FindPeaksCommand;
//!
//! let cmd = FindPeaksCommand::new().with_min_width(20);
//! let mut out = std::io::stdout();
//! let stats = cmd.run("signal.bed", &mut out).unwrap();
//! eprintln!("{}", stats);
//! ```

pub mod bed;
pub mod commands;
pub mod error;
pub mod interval;
pub mod logging;
pub mod peaks;
pub mod score;
pub mod streaming;

// Re-export commonly used types
pub use bed::{SignalReader, SignalRecord};
pub use error::{PeakError, Result};
pub use interval::{Candidate, Peak, Position};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bed::{SignalReader, SignalRecord};
    pub use crate::commands::{FindPeaksCommand, ResolveClustersCommand};
    pub use crate::error::{PeakError, Result};
    pub use crate::interval::{Candidate, Peak, Position};
    pub use crate::peaks::{resolve_overlaps, PeakCaller};
}
