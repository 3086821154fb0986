use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use crypt::Scheme;
use serde::Deserialize;

const DEFAULT_CONFIG_FILENAME: &str = ".grub-crypt.yaml";

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scheme used when no scheme flag is given.
    #[serde(default)]
    pub scheme: Option<Scheme>,

    /// Rounds for the SHA schemes.
    #[serde(default)]
    pub rounds: Option<u64>,
}

impl Config {
    /// Loads the config file, falling back to `~/.grub-crypt.yaml` and then
    /// to the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let filename = match path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|path| path.exists()),
        };

        match filename {
            Some(filename) => {
                tracing::debug!(filename = %filename.display(), "load config file");
                Self::from_file(&filename)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(filename: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(filename)
            .with_context(|| format!("load config file '{}'.", filename.display()))?;
        Self::from_yaml(&data)
            .with_context(|| format!("parse config file '{}'.", filename.display()))
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        // an empty document deserializes to unit, not to a mapping
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(data)?)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home_dir| home_dir.join(DEFAULT_CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert_eq!(
            Config::from_yaml("scheme: sha-256\nrounds: 10000\n").unwrap(),
            Config {
                scheme: Some(Scheme::Sha256),
                rounds: Some(10000),
            }
        );
        assert_eq!(
            Config::from_yaml("scheme: md5").unwrap(),
            Config {
                scheme: Some(Scheme::Md5),
                rounds: None,
            }
        );

        assert!(Config::from_yaml("scheme: des").is_err());
        assert!(Config::from_yaml("salt: abc").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/.grub-crypt.yaml")).unwrap_err();
        assert!(err.to_string().starts_with("load config file"));
    }
}
