use thiserror::Error;

#[derive(Error, Debug)]
pub enum CuidaError {
    #[error("No user found")]
    NoProfile,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Invalid mood value: {0} (expected 1 to 5)")]
    InvalidMood(u8),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Corrupt data in bucket {bucket}: {source}")]
    CorruptBucket {
        bucket: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CuidaError>;
