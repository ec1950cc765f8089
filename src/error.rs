use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the pipeline. All of them are fatal: the run aborts
/// on the first one and nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The input directory exists but holds no result files.
    #[error("no result files found in {folder}")]
    NotFound { folder: PathBuf },

    /// A matched file could not be parsed as a result record.
    #[error("failed to parse {file}: {reason}")]
    Parse { file: PathBuf, reason: String },

    /// Filesystem failure while reading inputs or writing the table.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The plot could not be drawn or rasterized.
    #[error("render failed: {0}")]
    Render(String),
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        match err.into_kind() {
            csv::ErrorKind::Io(err) => Error::Io(err),
            kind => Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("csv: {:?}", kind),
            )),
        }
    }
}
