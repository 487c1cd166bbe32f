//! Persistent settings for the gostsum tool
//!
//! Stored as JSON in `<config dir>/gostsum/config.json`. Every field has a
//! default, so a partial or missing file is fine.

use std::fs;
use std::path::Path;
#[cfg(feature = "cli")]
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use streebog_core::{DEFAULT_SECURE_KEY, DigestSize};

use crate::error::Result;

/// Config file name inside the gostsum config directory
pub const CONFIG_FILE: &str = "config.json";

/// Default read size for stream hashing
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Tool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prefix used by `make` when no salt is given
    pub secure_key: String,
    /// Digest size used when a command does not pass `--bits`
    pub default_bits: u32,
    /// Bytes read per call when hashing files and stdin
    pub read_chunk_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secure_key: DEFAULT_SECURE_KEY.to_string(),
            default_bits: 512,
            read_chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Config {
    /// Read a config file
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config = serde_json::from_str(&data)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Read a config file, or return the defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Write the config as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Configured default digest size
    pub fn digest_size(&self) -> Result<DigestSize> {
        Ok(DigestSize::try_from(self.default_bits)?)
    }

    /// Read size for stream hashing, never zero
    pub fn chunk_size(&self) -> usize {
        self.read_chunk_size.max(1)
    }
}

/// Default config file path
#[cfg(feature = "cli")]
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Create the config directory and return the config file path
#[cfg(feature = "cli")]
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir();
    fs::create_dir_all(&dir)?;
    Ok(dir.join(CONFIG_FILE))
}

#[cfg(feature = "cli")]
fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gostsum")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.secure_key, DEFAULT_SECURE_KEY);
        assert_eq!(config.digest_size().unwrap(), DigestSize::Bits512);
        assert_eq!(config.chunk_size(), DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"default_bits": 256}"#).unwrap();
        assert_eq!(config.default_bits, 256);
        assert_eq!(config.secure_key, DEFAULT_SECURE_KEY);
        assert_eq!(config.read_chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_bad_bits_rejected() {
        let config = Config {
            default_bits: 384,
            ..Config::default()
        };
        assert!(config.digest_size().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_default_path_under_gostsum_dir() {
        let path = default_config_path();
        assert!(path.ends_with(Path::new("gostsum").join(CONFIG_FILE)));
    }

    #[test]
    fn test_zero_chunk_size_clamped() {
        let config = Config {
            read_chunk_size: 0,
            ..Config::default()
        };
        assert_eq!(config.chunk_size(), 1);
    }
}
