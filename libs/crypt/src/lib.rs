//! crypt(3) password hashing: MD5-crypt (`$1$`), SHA-256-crypt (`$5$`) and
//! SHA-512-crypt (`$6$`).
//!
//! ```
//! use grubcrypt_crypt::{hash, verify, SaltSpec, Scheme};
//!
//! let spec = SaltSpec::with_salt("salt");
//! let encoded = hash(Scheme::Md5, "password", Some(&spec)).unwrap();
//! assert_eq!(encoded, "$1$salt$qJH7.N4xYta3aEG/dfqo/0");
//! assert!(verify(&encoded, "password"));
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::default_trait_access)]

#[macro_use]
mod macros;
mod encoding;
mod error;
mod hash;
mod md5_crypt;
mod salt;
mod scheme;
mod sha_crypt;
mod wipe;

pub use encoding::{decode, encode, is_crypt_char, ALPHABET};
pub use error::{CryptError, InvalidSaltError};
pub use hash::EncodedHash;
pub use salt::{generate_salt, validate_salt, SaltSpec};
pub use scheme::{
    RoundsPolicy, Scheme, SchemeParams, MD5_ROUNDS, ROUNDS_DEFAULT, ROUNDS_MAX, ROUNDS_MIN,
};

/// Hashes `password` and returns the encoded crypt string.
pub fn hash(
    scheme: Scheme,
    password: impl AsRef<[u8]>,
    spec: Option<&SaltSpec>,
) -> Result<String, CryptError> {
    Ok(EncodedHash::compute(scheme, password.as_ref(), spec)?.to_string())
}

/// Checks `password` against an encoded crypt string.
///
/// Malformed or unsupported hashes never verify.
pub fn verify(encoded: impl AsRef<str>, password: impl AsRef<[u8]>) -> bool {
    match encoded.as_ref().parse::<EncodedHash>() {
        Ok(hash) => hash.verify(password.as_ref()),
        Err(_) => false,
    }
}
