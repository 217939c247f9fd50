use std::{io, path::PathBuf};

use linx_core::EncodingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    #[error("Failed to write report to {path}: {source}")]
    ReportIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize report")]
    ReportFormat(#[from] serde_json::Error),
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}:{line}: {reason}")]
    Trace { path: PathBuf, line: usize, reason: String },
    #[error("Invalid encoding table")]
    Encoding(#[from] EncodingError),
    #[error("Thread pool creation failed")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
