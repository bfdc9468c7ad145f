use std::path::PathBuf;

/// Common error type for grid construction, lookup and report writing.
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("class id {0} is not defined")]
    InvalidClass(i64),
    #[error("nearest-value search on an empty grid")]
    EmptyGrid,
    #[error("bin index {index} outside grid of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("malformed detection tensor: {0}")]
    MalformedTensor(String),
    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl MapError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MapError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type MapResult<T> = Result<T, MapError>;
