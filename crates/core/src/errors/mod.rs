//! Error types and Result alias for the airdrop portal

use thiserror::Error;

/// Main error type for the airdrop portal
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Structured error reported by the backend (`{"error": {"message": ..}}`)
    #[error("{0}")]
    ApiError(String),

    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Raised by the source-chain provider (reverts, rejected transactions)
    #[error("Contract error: {0}")]
    ContractError(String),

    #[error("Wallet error: {0}")]
    WalletError(String),

    #[error("Signature error: {0}")]
    SignatureError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Coarse classification used when turning an error into an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Backend message, shown verbatim
    Api,
    /// Chain provider failure
    Contract,
    /// Everything else
    Other,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ApiError(_) => ErrorKind::Api,
            Error::ContractError(_) => ErrorKind::Contract,
            _ => ErrorKind::Other,
        }
    }

    /// Best available human-readable detail, without the variant prefix
    pub fn message(&self) -> String {
        match self {
            Error::ApiError(msg)
            | Error::NetworkError(msg)
            | Error::InvalidData(msg)
            | Error::ContractError(msg)
            | Error::WalletError(msg)
            | Error::SignatureError(msg)
            | Error::ConfigError(msg)
            | Error::Unknown(msg) => msg.clone(),
            Error::HttpError { status, body } if body.is_empty() => format!("HTTP {}", status),
            Error::HttpError { body, .. } => body.clone(),
        }
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}
