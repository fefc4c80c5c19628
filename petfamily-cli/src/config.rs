//! Optional TOML configuration file
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:3000"
//! cors_permissive = false
//!
//! [database]
//! url = "postgres://petfamily@localhost/petfamily"
//! max_connections = 20
//! acquire_timeout_secs = 2
//! idle_timeout_secs = 30
//! ```
//!
//! Values here sit below command-line flags and environment variables.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "petfamily.toml";

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSection {
    pub bind: Option<SocketAddr>,
    pub cors_permissive: Option<bool>,
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load `explicit` if given (it must exist), else `./petfamily.toml` if
    /// present, else an empty config.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_path(path),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_path(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_full_file() {
        let file = write_config(
            r#"
            [server]
            bind = "0.0.0.0:8080"
            cors_permissive = true

            [database]
            url = "postgres://localhost/petfamily"
            max_connections = 5
            acquire_timeout_secs = 1
            idle_timeout_secs = 10
            "#,
        );

        let config = FileConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.bind, Some("0.0.0.0:8080".parse().unwrap()));
        assert_eq!(config.server.cors_permissive, Some(true));
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://localhost/petfamily")
        );
        assert_eq!(config.database.max_connections, Some(5));
        assert_eq!(config.database.acquire_timeout_secs, Some(1));
        assert_eq!(config.database.idle_timeout_secs, Some(10));
    }

    #[test]
    fn sections_are_optional() {
        let file = write_config("[database]\nmax_connections = 3\n");
        let config = FileConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server, ServerSection::default());
        assert_eq!(config.database.max_connections, Some(3));
        assert!(config.database.url.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("[server]\nport = 3000\n");
        let err = FileConfig::load(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = FileConfig::load(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
