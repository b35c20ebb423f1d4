//! Error types for gcviz-vis.

use thiserror::Error;

/// Result type for gcviz-vis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up a visualizer session.
///
/// Stepping, playback and rendering never fail; these only arise from
/// configuration and I/O at startup.
#[derive(Debug, Error)]
pub enum Error {
    /// The heap definition is malformed.
    #[error("invalid heap: {0}")]
    Heap(#[from] gcviz_heap::Error),

    /// A collector name or similar collector input was rejected.
    #[error(transparent)]
    Collector(#[from] gcviz_collector::Error),

    /// A configuration value could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
