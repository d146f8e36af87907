use std::path::PathBuf;

use thiserror::Error;

pub type FigureResult<T> = Result<T, FigureError>;

#[derive(Debug, Error)]
pub enum FigureError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("series `{series}`: `{field}` has {actual} values, expected {expected}")]
    LengthMismatch {
        series: String,
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("render backend error: {0}")]
    Backend(String),

    #[error("failed to write `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize scene: {0}")]
    Serialization(#[from] serde_json::Error),
}
