use std::error::Error;
use std::fmt;

/// Why a single call to the data service produced no usable payload.
#[derive(Debug)]
pub enum FetchError {
    Network(String),
    Status { code: u16, body: String },
    Decode(String),
    Config(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {msg}"),
            FetchError::Status { code, body } => write!(f, "HTTP {code}: {body}"),
            FetchError::Decode(msg) => write!(f, "JSON decode error: {msg}"),
            FetchError::Config(msg) => write!(f, "Client configuration error: {msg}"),
        }
    }
}

impl Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
