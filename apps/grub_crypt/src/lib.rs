#![forbid(unsafe_code)]
#![warn(clippy::default_trait_access)]

mod config;
mod error;
mod prompt;

use std::io::Write;
use std::path::PathBuf;

use crypt::{validate_salt, EncodedHash, SaltSpec, Scheme};
use structopt::StructOpt;

use prompt::{read_new_password, read_password};

pub use config::Config;
pub use error::Error;
pub use prompt::{PasswordReader, Terminal};

#[derive(Debug, StructOpt)]
#[structopt(name = "grub-crypt", about = "Encrypt a password.")]
pub struct Options {
    /// Use MD5 to encrypt the password.
    #[structopt(long)]
    pub md5: bool,

    /// Use SHA-256 to encrypt the password.
    #[structopt(long = "sha-256")]
    pub sha256: bool,

    /// Use SHA-512 to encrypt the password (default).
    #[structopt(long = "sha-512")]
    pub sha512: bool,

    /// Fixed salt instead of a random one, optionally prefixed with `rounds=<N>$`
    #[structopt(long)]
    pub salt: Option<SaltSpec>,

    /// Rounds for SHA-256 and SHA-512, clamped to 1000..=999999999
    #[structopt(long)]
    pub rounds: Option<u64>,

    /// Path of the config file
    #[structopt(long, parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Check the password against an existing hash instead of creating one
    #[structopt(
        long,
        value_name = "HASH",
        conflicts_with_all = &["md5", "sha256", "sha512", "salt", "rounds"]
    )]
    pub verify: Option<String>,
}

impl Options {
    /// Resolves the scheme, flags win over the config file.
    pub fn scheme(&self, config: &Config) -> Scheme {
        if self.md5 {
            Scheme::Md5
        } else if self.sha256 {
            Scheme::Sha256
        } else if self.sha512 {
            Scheme::Sha512
        } else {
            config.scheme.unwrap_or_default()
        }
    }

    /// Merges `--salt`, `--rounds` and the configured rounds.
    pub fn salt_spec(&self, scheme: Scheme, config: &Config) -> Option<SaltSpec> {
        let salt = self.salt.as_ref().and_then(|spec| spec.salt.clone());
        let rounds = self
            .rounds
            .or_else(|| self.salt.as_ref().and_then(|spec| spec.rounds))
            .or(config.rounds);

        if let (Some(rounds), None) = (rounds, scheme.params().rounds) {
            tracing::warn!(%scheme, rounds, "rounds are ignored by this scheme");
        }

        if salt.is_none() && rounds.is_none() {
            return None;
        }
        Some(SaltSpec { salt, rounds })
    }
}

/// Prompts for a password and writes its hash, or the verification result,
/// to `out`.
///
/// Nothing is written unless the whole operation succeeds.
pub fn run(
    options: &Options,
    config: &Config,
    reader: &mut impl PasswordReader,
    out: &mut impl Write,
) -> Result<(), Error> {
    if let Some(encoded) = &options.verify {
        let hash: EncodedHash = encoded.parse()?;
        tracing::debug!(scheme = %hash.scheme(), "verify password");
        let password = read_password(reader)?;
        if !hash.verify(password.as_bytes()) {
            return Err(Error::VerifyFailed);
        }
        return writeln!(out, "valid").map_err(Error::Output);
    }

    let scheme = options.scheme(config);
    let spec = options.salt_spec(scheme, config);
    if let Some(salt) = spec.as_ref().and_then(|spec| spec.salt.as_deref()) {
        validate_salt(scheme, salt).map_err(crypt::CryptError::from)?;
    }
    tracing::debug!(%scheme, "create password hash");

    let password = read_new_password(reader)?;
    let encoded = crypt::hash(scheme, password.as_bytes(), spec.as_ref())?;
    writeln!(out, "{}", encoded).map_err(Error::Output)
}
