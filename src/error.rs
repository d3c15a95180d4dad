use thiserror::Error;

/// errors that can terminate the visualizer before or outside the sorting core.
/// cancellation is not represented here: it is ordinary control flow.
#[derive(Debug, Error)]
pub enum Error {
    #[error("'{0}' is not a sorting algorithm (expected bubble, selection, merge, quick, shufflesort, insert, quickselect or 0-6)")]
    UnknownAlgorithm(String),

    #[error("invalid element amount '{0}': expected a positive integer")]
    InvalidAmount(String),

    #[error("settings file is not valid JSON: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("settings file could not be accessed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to spawn worker thread '{name}': {source}")]
    Spawn {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
