use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Partner secret is not set")]
    MissingSecret,

    #[error("API key is not set")]
    MissingApiKey,

    #[error("Token lifetime must be positive, got {seconds}s")]
    InvalidLifetime { seconds: i64 },

    #[error("Failed to encode claims: {0}")]
    Encoding(String),

    #[error("Invalid token format")]
    InvalidFormat,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Invalid claims: {0}")]
    InvalidClaims(String),

    #[error("Token expired at {exp} (now: {now})")]
    Expired { exp: i64, now: i64 },
}
