use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("InvalidData: {0}")]
    InvalidData(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}
