use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptError {
    #[error("invalid salt: {0}")]
    InvalidSalt(#[from] InvalidSaltError),

    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(#[from] rand_core::Error),

    #[error("unknown scheme: {0}")]
    UnknownScheme(String),

    #[error("malformed hash: {0}")]
    MalformedHash(&'static str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidSaltError {
    #[error("salt is {len} characters long, at most {max} are allowed")]
    TooLong { len: usize, max: usize },

    #[error("salt contains an invalid character: '{0}'")]
    InvalidCharacter(char),

    #[error("malformed rounds parameter: {0}")]
    MalformedRounds(String),
}
