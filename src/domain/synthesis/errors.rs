//! Synthesis Context - Errors

use thiserror::Error;

/// 合成请求验证错误
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Text cannot be empty")]
    EmptyText,

    #[error("Text exceeds {limit} characters: {actual}")]
    TextTooLong { actual: usize, limit: usize },

    #[error("Speed must be between 0.5 and 2.0: {0}")]
    SpeedOutOfRange(f32),

    #[error("Unknown synthesis mode: {0}")]
    UnknownMode(String),

    #[error("Mode {0} requires a non-empty prompt text")]
    MissingPromptText(&'static str),

    #[error("Mode {0} requires a non-empty instruct text")]
    MissingInstructText(&'static str),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),
}
