use std::path::PathBuf;

use cin_table::TableError;
use thiserror::Error;

/// Terminal failures for a single invocation. There is no retry and no
/// partial recovery; the binary surfaces the error and exits non-zero.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no sentences found in {path}")]
    EmptyContent { path: PathBuf },
    #[error(transparent)]
    Table(#[from] TableError),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}
