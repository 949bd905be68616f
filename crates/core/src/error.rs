use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagWindowError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record: {0}")]
    Malformed(String),

    #[error("Rate limit marker")]
    RateLimit,

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}
