use std::io;

use zeroize::Zeroizing;

use crate::Error;

/// Source of interactively entered passwords.
pub trait PasswordReader {
    /// Shows `prompt` and reads one line without echoing it.
    fn read_password(&mut self, prompt: &str) -> io::Result<String>;
}

/// Reads from the controlling terminal with echo disabled.
pub struct Terminal;

impl PasswordReader for Terminal {
    fn read_password(&mut self, prompt: &str) -> io::Result<String> {
        rpassword::prompt_password(prompt)
    }
}

fn read(reader: &mut impl PasswordReader, prompt: &str) -> Result<Zeroizing<String>, Error> {
    reader
        .read_password(prompt)
        .map(Zeroizing::new)
        .map_err(|err| match err.kind() {
            io::ErrorKind::InvalidData => Error::NonUtf8Password,
            _ => Error::TerminalReadFailure(err),
        })
}

/// Reads a password and its confirmation.
pub(crate) fn read_new_password(
    reader: &mut impl PasswordReader,
) -> Result<Zeroizing<String>, Error> {
    let password = read(reader, "Password: ")?;
    let confirmation = read(reader, "Retype Password: ")?;
    if *password != *confirmation {
        return Err(Error::PasswordMismatch);
    }
    Ok(password)
}

/// Reads a password once, for checking against an existing hash.
pub(crate) fn read_password(
    reader: &mut impl PasswordReader,
) -> Result<Zeroizing<String>, Error> {
    read(reader, "Password: ")
}
