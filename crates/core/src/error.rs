use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CqError {
    #[error("Unable to open file [{}]: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read json: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to parse json: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to render json: {0}")]
    Render(#[source] serde_json::Error),
}

impl CqError {
    /// True for failures to open or read the input.
    pub fn is_io(&self) -> bool {
        matches!(self, CqError::Open { .. } | CqError::Read(_))
    }
}

pub type Result<T> = std::result::Result<T, CqError>;
