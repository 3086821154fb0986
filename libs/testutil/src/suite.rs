use crypt::Scheme;
use serde::Deserialize;

/// A known answer for one password.
#[derive(Debug, Deserialize)]
pub struct Vector {
    pub scheme: Scheme,
    pub password: String,
    /// Salt in `[rounds=<N>$]<salt>` form.
    pub salt: String,
    pub expected: String,
    /// Other encodings of the same hash, e.g. with an explicit default rounds.
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Suite {
    pub vectors: Vec<Vector>,
    #[serde(default)]
    pub disable: bool,
}
