//! Error types for calendar-query operations.
//!
//! Resolution itself never fails. These errors only occur at the edges:
//! parsing payload text, building a normalizer from configuration, and
//! reading an explicit anchor instant.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid UTC offset: {0}")]
    InvalidOffset(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),
}

pub type Result<T> = std::result::Result<T, NormalizerError>;
