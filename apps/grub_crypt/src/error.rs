use std::io;

use crypt::CryptError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read password: {0}")]
    TerminalReadFailure(#[source] io::Error),

    #[error("password is not valid UTF-8")]
    NonUtf8Password,

    #[error("Sorry, passwords do not match.")]
    PasswordMismatch,

    #[error("{0}")]
    Crypt(#[from] CryptError),

    #[error("password does not match the hash")]
    VerifyFailed,

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}
