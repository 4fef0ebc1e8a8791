use thiserror::Error;

/// Main error type for the bridge
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Tuner unreachable: {0}")]
    DeviceUnreachable(String),

    #[error("Tuner did not report a DeviceAuth token")]
    AuthMissing,

    #[error("Channel not found: {0}")]
    NotFound(String),

    #[error("Malformed upstream response: {0}")]
    UpstreamMalformed(String),

    #[error("Guide service unavailable: {0}")]
    GuideUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    /// Classify a failed request to the tuner.
    pub fn from_tuner(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            BridgeError::DeviceUnreachable(err.to_string())
        } else {
            BridgeError::UpstreamMalformed(err.to_string())
        }
    }

    /// Classify a failed request to the remote guide service.
    pub fn from_guide(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            BridgeError::GuideUnavailable(err.to_string())
        } else {
            BridgeError::UpstreamMalformed(err.to_string())
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BridgeError>;
