//! Error types for gcviz-collector.

use thiserror::Error;

/// Result type for gcviz-collector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from parsing collector input. Stepping itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An algorithm name that is not one of the three collectors.
    #[error("unknown algorithm {0:?}, expected cms, g1 or zgc")]
    UnknownAlgorithm(String),
}
