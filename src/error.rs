use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("dataset has no primary axis column (type `x`)")]
    MissingPrimaryAxis,

    #[error("series `{id}` has {actual} values, primary axis has {expected}")]
    SeriesLengthMismatch {
        id: String,
        expected: usize,
        actual: usize,
    },
}
