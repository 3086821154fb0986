use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use sha2::{Sha256, Sha512};
use subtle::ConstantTimeEq;

use crate::encoding::{decode, encode, is_crypt_char};
use crate::md5_crypt::md5_crypt;
use crate::salt::{generate_salt, parse_rounds, validate_salt, SaltSpec};
use crate::sha_crypt::sha_crypt;
use crate::{CryptError, Scheme};

/// A password hash in crypt format, `$<id>$[rounds=<N>$]<salt>$<digest>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHash {
    scheme: Scheme,
    rounds: Option<u32>,
    salt: String,
    digest: Vec<u8>,
}

impl EncodedHash {
    /// Hashes `password` with the salt and rounds of `spec`.
    ///
    /// A random salt is generated when `spec` carries none. Rounds are
    /// clamped to the scheme's bounds and ignored by schemes with a fixed
    /// cost.
    pub fn compute(
        scheme: Scheme,
        password: &[u8],
        spec: Option<&SaltSpec>,
    ) -> Result<Self, CryptError> {
        let salt = match spec.and_then(|spec| spec.salt.as_deref()) {
            Some(salt) => {
                validate_salt(scheme, salt)?;
                salt.to_string()
            }
            None => generate_salt(scheme)?,
        };

        let rounds = scheme.params().rounds.map(|policy| {
            let requested = spec.and_then(|spec| spec.rounds);
            let rounds = requested.map_or(policy.default, |n| policy.clamp(n));
            if requested.map_or(false, |n| n != rounds as u64) {
                tracing::warn!(
                    requested = requested.unwrap_or_default(),
                    rounds,
                    "rounds out of range, clamped"
                );
            }
            rounds
        });

        tracing::debug!(%scheme, ?rounds, "hash password");
        let digest = compute_digest(scheme, password, salt.as_bytes(), rounds);
        Ok(Self {
            scheme,
            rounds,
            salt,
            digest,
        })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Effective rounds, `None` for schemes with a fixed cost.
    pub fn rounds(&self) -> Option<u32> {
        self.rounds
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// Returns `true` if `password` produces this hash.
    pub fn verify(&self, password: &[u8]) -> bool {
        let digest = compute_digest(self.scheme, password, self.salt.as_bytes(), self.rounds);
        digest.ct_eq(&self.digest).into()
    }
}

fn compute_digest(scheme: Scheme, password: &[u8], salt: &[u8], rounds: Option<u32>) -> Vec<u8> {
    let rounds = rounds
        .or_else(|| scheme.params().rounds.map(|policy| policy.default))
        .unwrap_or_default();
    match scheme {
        Scheme::Md5 => md5_crypt(password, salt),
        Scheme::Sha256 => sha_crypt::<Sha256>(password, salt, rounds),
        Scheme::Sha512 => sha_crypt::<Sha512>(password, salt, rounds),
    }
}

impl Display for EncodedHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let params = self.scheme.params();
        write!(f, "${}$", params.id)?;
        if let (Some(rounds), Some(policy)) = (self.rounds, params.rounds) {
            if rounds != policy.default {
                write!(f, "rounds={}$", rounds)?;
            }
        }
        write!(f, "{}${}", self.salt, encode(self.scheme, &self.digest))
    }
}

impl FromStr for EncodedHash {
    type Err = CryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s
            .strip_prefix('$')
            .ok_or(CryptError::MalformedHash("missing leading '$'"))?
            .split('$');

        let id = fields.next().unwrap_or_default();
        let scheme = Scheme::from_id(id).ok_or_else(|| CryptError::UnknownScheme(id.to_string()))?;
        let params = scheme.params();

        let mut field = fields
            .next()
            .ok_or(CryptError::MalformedHash("missing salt"))?;
        let mut rounds = params.rounds.map(|policy| policy.default);
        if let (Some(policy), Some(value)) = (params.rounds, field.strip_prefix("rounds=")) {
            let value = parse_rounds(value)?;
            ensure!(
                value >= policy.min as u64 && value <= policy.max as u64,
                CryptError::MalformedHash("rounds out of range")
            );
            rounds = Some(value as u32);
            field = fields
                .next()
                .ok_or(CryptError::MalformedHash("missing salt"))?;
        }

        let salt = field;
        ensure!(
            salt.chars().all(is_crypt_char) && salt.len() <= params.max_salt_len,
            CryptError::MalformedHash("invalid salt")
        );

        let digest = decode(
            scheme,
            fields
                .next()
                .ok_or(CryptError::MalformedHash("missing digest"))?,
        )?;
        ensure!(
            fields.next().is_none(),
            CryptError::MalformedHash("trailing fields")
        );

        Ok(Self {
            scheme,
            rounds,
            salt: salt.to_string(),
            digest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::ROUNDS_MIN;

    fn spec(s: &str) -> SaltSpec {
        s.parse().unwrap()
    }

    #[test]
    fn test_deterministic() {
        for scheme in Scheme::ALL {
            let spec = spec("rounds=1234$abcdefgh");
            let a = EncodedHash::compute(scheme, b"secret", Some(&spec)).unwrap();
            let b = EncodedHash::compute(scheme, b"secret", Some(&spec)).unwrap();
            assert_eq!(a.to_string(), b.to_string());
        }
    }

    #[test]
    fn test_random_salt() {
        for scheme in Scheme::ALL {
            let a = EncodedHash::compute(scheme, b"secret", None).unwrap();
            let b = EncodedHash::compute(scheme, b"secret", None).unwrap();
            assert_eq!(a.salt().len(), scheme.params().max_salt_len);
            assert_ne!(a.salt(), b.salt());
            assert_ne!(a.digest(), b.digest());
        }
    }

    #[test]
    fn test_rounds() {
        let hash = EncodedHash::compute(Scheme::Sha256, b"secret", Some(&spec("rounds=500$abc")))
            .unwrap();
        assert_eq!(hash.rounds(), Some(ROUNDS_MIN));
        assert!(hash.to_string().starts_with("$5$rounds=1000$abc$"));

        let hash = EncodedHash::compute(Scheme::Sha512, b"secret", Some(&spec("rounds=5000$abc")))
            .unwrap();
        assert_eq!(hash.rounds(), Some(5000));
        assert!(hash.to_string().starts_with("$6$abc$"));

        let hash = EncodedHash::compute(Scheme::Md5, b"secret", Some(&spec("rounds=2000$abc")))
            .unwrap();
        assert_eq!(hash.rounds(), None);
        assert!(hash.to_string().starts_with("$1$abc$"));
    }

    #[test]
    fn test_invalid_salt() {
        assert!(matches!(
            EncodedHash::compute(Scheme::Md5, b"secret", Some(&spec("toolongsalt"))),
            Err(CryptError::InvalidSalt(_))
        ));
        assert!(matches!(
            EncodedHash::compute(Scheme::Sha512, b"secret", Some(&spec("bad_salt"))),
            Err(CryptError::InvalidSalt(_))
        ));
    }

    #[test]
    fn test_parse() {
        let hash: EncodedHash = "$1$salt$qJH7.N4xYta3aEG/dfqo/0".parse().unwrap();
        assert_eq!(hash.scheme(), Scheme::Md5);
        assert_eq!(hash.rounds(), None);
        assert_eq!(hash.salt(), "salt");
        assert_eq!(hash.digest().len(), 16);
        assert_eq!(hash.to_string(), "$1$salt$qJH7.N4xYta3aEG/dfqo/0");
        assert!(hash.verify(b"password"));
        assert!(!hash.verify(b"passwort"));

        let hash: EncodedHash =
            "$5$rounds=10000$saltstringsaltst$3xv.VbSHBb41AL9AvLeujZkZRBAwqFMz2.opqey6IcA"
                .parse()
                .unwrap();
        assert_eq!(hash.scheme(), Scheme::Sha256);
        assert_eq!(hash.rounds(), Some(10000));
        assert_eq!(hash.salt(), "saltstringsaltst");

        let hash: EncodedHash = "$5$rounds=5000$toolongsaltstrin$Un/5jzAHMgOGZ5.mWJpuVolil07guHPvOW8mGRcvxa5"
            .parse()
            .unwrap();
        assert_eq!(hash.rounds(), Some(5000));
        assert_eq!(
            hash.to_string(),
            "$5$toolongsaltstrin$Un/5jzAHMgOGZ5.mWJpuVolil07guHPvOW8mGRcvxa5"
        );
    }

    #[test]
    fn test_parse_rejects() {
        for s in [
            "",
            "1$salt$qJH7.N4xYta3aEG/dfqo/0",
            "$1$salt",
            "$1$salt$qJH7.N4xYta3aEG/dfqo/0$",
            "$1$salt$qJH7.N4xYta3aEG/dfqo/",
            "$1$sa-lt$qJH7.N4xYta3aEG/dfqo/0",
            "$1$saltsaltsalt$qJH7.N4xYta3aEG/dfqo/0",
            "$5$rounds=999$abc$3xv.VbSHBb41AL9AvLeujZkZRBAwqFMz2.opqey6IcA",
            "$5$rounds=x$abc$3xv.VbSHBb41AL9AvLeujZkZRBAwqFMz2.opqey6IcA",
        ] {
            assert!(s.parse::<EncodedHash>().is_err(), "{}", s);
        }

        assert!(matches!(
            "$2b$10$abc".parse::<EncodedHash>(),
            Err(CryptError::UnknownScheme(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        for scheme in Scheme::ALL {
            for spec in [None, Some(spec("rounds=1001$xyz")), Some(spec(""))] {
                let hash = EncodedHash::compute(scheme, b"pass", spec.as_ref()).unwrap();
                let parsed: EncodedHash = hash.to_string().parse().unwrap();
                assert_eq!(parsed, hash);
                assert!(parsed.verify(b"pass"));
            }
        }
    }
}
