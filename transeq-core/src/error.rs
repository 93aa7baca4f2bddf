use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranseqError {
    #[error("invalid table code: {id}")]
    UnknownTable { id: u32 },

    #[error("invalid frame: {frame} (must be one of 1, 2, 3, F, -1, -2, -3, R, 6)")]
    InvalidFrame { frame: String },

    #[error("invalid character '{ch}' at position {pos} in sequence {id}")]
    InvalidChar { ch: char, pos: usize, id: String },

    #[error("fail to read input: {0}")]
    Input(#[source] io::Error),

    #[error("fail to write to output: {0}")]
    Output(#[source] io::Error),

    #[error("could not start worker pool: {0}")]
    WorkerPool(String),
}

impl TranseqError {
    /// Configuration errors are detected before any record is translated.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            TranseqError::UnknownTable { .. }
                | TranseqError::InvalidFrame { .. }
                | TranseqError::WorkerPool(_)
        )
    }
}

pub type TranseqResult<T> = Result<T, TranseqError>;
