use thiserror::Error;

pub type PulseResult<T> = Result<T, PulseError>;

/// Errors raised at the edges of the engine (decoding fetched batches,
/// loading configuration, file IO). The aggregation core itself never
/// fails: degenerate inputs resolve to zero-filled defaults.
#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Input decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for PulseError {
    fn from(e: config::ConfigError) -> Self {
        PulseError::Config(e.to_string())
    }
}
