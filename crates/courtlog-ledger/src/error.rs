use std::path::PathBuf;

/// Failures surfaced by the point log. Nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("storage error on {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed partition {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot format log time: {0}")]
    Time(#[from] time::error::Format),
}

impl LogError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LogError::Storage {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        LogError::Csv {
            path: path.into(),
            source,
        }
    }
}
