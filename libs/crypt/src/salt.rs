use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use rand_core::{OsRng, RngCore};

use crate::encoding::{is_crypt_char, ALPHABET};
use crate::{CryptError, InvalidSaltError, Scheme};

const ROUNDS_PREFIX: &str = "rounds=";

/// Caller supplied salt and cost of a hash.
///
/// The textual form is `[rounds=<N>$]<salt>`, the same shape the parameters
/// take inside an encoded hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaltSpec {
    /// Explicit salt, a random one is generated when `None`.
    pub salt: Option<String>,

    /// Requested rounds, clamped to the scheme's bounds when used.
    pub rounds: Option<u64>,
}

impl SaltSpec {
    pub fn with_salt(salt: impl Into<String>) -> Self {
        Self {
            salt: Some(salt.into()),
            rounds: None,
        }
    }

    pub fn rounds(self, rounds: u64) -> Self {
        Self {
            rounds: Some(rounds),
            ..self
        }
    }
}

impl FromStr for SaltSpec {
    type Err = InvalidSaltError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rounds, salt) = match s.strip_prefix(ROUNDS_PREFIX) {
            Some(rest) => {
                let (rounds, salt) = rest
                    .split_once('$')
                    .ok_or_else(|| InvalidSaltError::MalformedRounds(rest.to_string()))?;
                (Some(parse_rounds(rounds)?), salt)
            }
            None => (None, s),
        };

        Ok(Self {
            salt: Some(salt.to_string()),
            rounds,
        })
    }
}

impl Display for SaltSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(rounds) = self.rounds {
            write!(f, "{}{}$", ROUNDS_PREFIX, rounds)?;
        }
        if let Some(salt) = &self.salt {
            f.write_str(salt)?;
        }
        Ok(())
    }
}

/// Parses the decimal value of a `rounds=` parameter.
///
/// Values too large for `u64` saturate, they are clamped afterwards anyway.
pub(crate) fn parse_rounds(s: &str) -> Result<u64, InvalidSaltError> {
    ensure!(
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()),
        InvalidSaltError::MalformedRounds(s.to_string())
    );
    Ok(s.parse().unwrap_or(u64::MAX))
}

/// Checks a caller supplied salt against the alphabet and length of `scheme`.
pub fn validate_salt(scheme: Scheme, salt: &str) -> Result<(), InvalidSaltError> {
    let max = scheme.params().max_salt_len;
    if let Some(c) = salt.chars().find(|c| !is_crypt_char(*c)) {
        return Err(InvalidSaltError::InvalidCharacter(c));
    }
    ensure!(
        salt.len() <= max,
        InvalidSaltError::TooLong {
            len: salt.len(),
            max
        }
    );
    Ok(())
}

/// Generates a random salt of the maximum length allowed by `scheme`.
pub fn generate_salt(scheme: Scheme) -> Result<String, CryptError> {
    let mut buf = vec![0u8; scheme.params().max_salt_len];
    OsRng.try_fill_bytes(&mut buf)?;
    // 256 is a multiple of 64, masking keeps the distribution uniform
    Ok(buf
        .iter()
        .map(|b| ALPHABET[(b & 0x3f) as usize] as char)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        for scheme in Scheme::ALL {
            let salt = generate_salt(scheme).unwrap();
            assert_eq!(salt.len(), scheme.params().max_salt_len);
            assert!(salt.chars().all(is_crypt_char));
            assert_eq!(validate_salt(scheme, &salt), Ok(()));
        }

        assert_ne!(
            generate_salt(Scheme::Sha512).unwrap(),
            generate_salt(Scheme::Sha512).unwrap()
        );
    }

    #[test]
    fn test_validate() {
        assert_eq!(validate_salt(Scheme::Md5, ""), Ok(()));
        assert_eq!(validate_salt(Scheme::Md5, "abcd./89"), Ok(()));
        assert_eq!(
            validate_salt(Scheme::Md5, "abcdefghi"),
            Err(InvalidSaltError::TooLong { len: 9, max: 8 })
        );
        assert_eq!(validate_salt(Scheme::Sha256, "saltstringsaltst"), Ok(()));
        assert_eq!(
            validate_salt(Scheme::Sha256, "saltstringsaltstr"),
            Err(InvalidSaltError::TooLong { len: 17, max: 16 })
        );
        assert_eq!(
            validate_salt(Scheme::Sha512, "salt$"),
            Err(InvalidSaltError::InvalidCharacter('$'))
        );
        assert_eq!(
            validate_salt(Scheme::Sha512, "sa lt"),
            Err(InvalidSaltError::InvalidCharacter(' '))
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "saltstring".parse::<SaltSpec>().unwrap(),
            SaltSpec::with_salt("saltstring")
        );
        assert_eq!(
            "rounds=10000$saltstring".parse::<SaltSpec>().unwrap(),
            SaltSpec::with_salt("saltstring").rounds(10000)
        );
        assert_eq!(
            "rounds=99999999999999999999999$abc"
                .parse::<SaltSpec>()
                .unwrap()
                .rounds,
            Some(u64::MAX)
        );
        assert_eq!("".parse::<SaltSpec>().unwrap(), SaltSpec::with_salt(""));

        assert!(matches!(
            "rounds=12ab$salt".parse::<SaltSpec>(),
            Err(InvalidSaltError::MalformedRounds(_))
        ));
        assert!(matches!(
            "rounds=1000".parse::<SaltSpec>(),
            Err(InvalidSaltError::MalformedRounds(_))
        ));
        assert!(matches!(
            "rounds=$salt".parse::<SaltSpec>(),
            Err(InvalidSaltError::MalformedRounds(_))
        ));
    }

    #[test]
    fn test_display() {
        let spec = SaltSpec::with_salt("abc").rounds(1200);
        assert_eq!(spec.to_string(), "rounds=1200$abc");
        assert_eq!(spec.to_string().parse::<SaltSpec>().unwrap(), spec);
        assert_eq!(SaltSpec::with_salt("abc").to_string(), "abc");
    }
}
