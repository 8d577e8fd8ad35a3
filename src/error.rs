use thiserror::Error;

#[derive(Error, Debug)]
pub enum OmniError {
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Unknown style: {0}")]
    UnknownStyle(String),

    #[error("No data found in the response (attempt {attempt})")]
    EmptyResponse { attempt: u32 },

    #[error("Incomplete data after {attempts} attempt(s): {data_lines} data line(s) written")]
    IncompleteData { attempts: u32, data_lines: usize },

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<reqwest::Error> for OmniError {
    fn from(err: reqwest::Error) -> Self {
        OmniError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OmniError>;
