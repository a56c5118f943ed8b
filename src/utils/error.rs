// src/utils/error.rs
use thiserror::Error;

/// Errors raised by the profile fetch collaborator. Parsing itself never
/// fails; everything in here comes from URL validation or the network.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid LinkedIn profile URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Anti-automation block detected: {0}")]
    Blocked(String),

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("Fetch failed after {attempts} attempts: {cause}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        cause: Box<FetchError>,
    },
}

impl FetchError {
    /// Number of attempts behind this error. Single-shot failures
    /// (invalid URL, anti-bot block) report 1.
    pub fn attempts(&self) -> u32 {
        match self {
            FetchError::RetriesExhausted { attempts, .. } => *attempts,
            _ => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Profile fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
