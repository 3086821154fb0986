use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::encoding::{Layout, MD5_LAYOUT, SHA256_LAYOUT, SHA512_LAYOUT};
use crate::CryptError;

/// Rounds used by the SHA schemes when none are requested.
pub const ROUNDS_DEFAULT: u32 = 5000;

/// Lowest accepted rounds count, smaller requests are raised to it.
pub const ROUNDS_MIN: u32 = 1000;

/// Highest accepted rounds count, larger requests are lowered to it.
pub const ROUNDS_MAX: u32 = 999_999_999;

/// Fixed number of mixing rounds of MD5-crypt.
pub const MD5_ROUNDS: u32 = 1000;

/// A crypt(3) hashing scheme.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    #[serde(rename = "md5")]
    Md5,

    #[serde(rename = "sha-256")]
    Sha256,

    #[serde(rename = "sha-512")]
    Sha512,
}

/// Rounds bounds of a scheme with a configurable cost.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RoundsPolicy {
    pub default: u32,
    pub min: u32,
    pub max: u32,
}

impl RoundsPolicy {
    pub fn clamp(&self, rounds: u64) -> u32 {
        rounds.clamp(self.min as u64, self.max as u64) as u32
    }
}

/// Fixed parameters of a scheme.
#[derive(Debug)]
pub struct SchemeParams {
    /// Identifier between the first two `$`.
    pub id: &'static str,
    pub digest_len: usize,
    pub encoded_len: usize,
    pub max_salt_len: usize,
    /// `None` for schemes with a fixed cost.
    pub rounds: Option<RoundsPolicy>,
    pub(crate) layout: &'static Layout,
}

const SHA_ROUNDS: RoundsPolicy = RoundsPolicy {
    default: ROUNDS_DEFAULT,
    min: ROUNDS_MIN,
    max: ROUNDS_MAX,
};

static MD5_PARAMS: SchemeParams = SchemeParams {
    id: "1",
    digest_len: 16,
    encoded_len: 22,
    max_salt_len: 8,
    rounds: None,
    layout: &MD5_LAYOUT,
};

static SHA256_PARAMS: SchemeParams = SchemeParams {
    id: "5",
    digest_len: 32,
    encoded_len: 43,
    max_salt_len: 16,
    rounds: Some(SHA_ROUNDS),
    layout: &SHA256_LAYOUT,
};

static SHA512_PARAMS: SchemeParams = SchemeParams {
    id: "6",
    digest_len: 64,
    encoded_len: 86,
    max_salt_len: 16,
    rounds: Some(SHA_ROUNDS),
    layout: &SHA512_LAYOUT,
};

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Md5, Scheme::Sha256, Scheme::Sha512];

    pub fn params(&self) -> &'static SchemeParams {
        match self {
            Scheme::Md5 => &MD5_PARAMS,
            Scheme::Sha256 => &SHA256_PARAMS,
            Scheme::Sha512 => &SHA512_PARAMS,
        }
    }

    /// Looks a scheme up by the identifier of an encoded hash.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|scheme| scheme.params().id == id)
    }
}

impl Default for Scheme {
    fn default() -> Self {
        Scheme::Sha512
    }
}

impl FromStr for Scheme {
    type Err = CryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Scheme::*;

        let scheme = match s {
            "md5" => Md5,
            "sha-256" | "sha256" => Sha256,
            "sha-512" | "sha512" => Sha512,
            _ => return Err(CryptError::UnknownScheme(s.to_string())),
        };
        Ok(scheme)
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Scheme::*;

        match self {
            Md5 => write!(f, "md5"),
            Sha256 => write!(f, "sha-256"),
            Sha512 => write!(f, "sha-512"),
        }
    }
}
