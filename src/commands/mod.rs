//! Command implementations for vwpeaks.

pub mod find_peaks;
pub mod resolve_clusters;

pub use find_peaks::{FindPeaksCommand, FindPeaksStats};
pub use resolve_clusters::{
    parse_cluster_line, resolve_cluster, ClusterPeak, ResolveClustersCommand,
    ResolveClustersStats,
};
