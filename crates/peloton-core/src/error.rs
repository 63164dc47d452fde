// File: crates/peloton-core/src/error.rs
// Summary: Error taxonomy for loading, configuration and rendering.

use thiserror::Error;

/// Errors surfaced by data sources, configuration and exporters.
///
/// `Network` and `Format` are terminal for a load attempt; their `Display`
/// text is what the failed view shows in place of the chart.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to fetch data: {0}")]
    Network(String),
    #[error("Malformed data: {0}")]
    Format(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("render failed: {0}")]
    Render(String),
}

impl Error {
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Format(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
