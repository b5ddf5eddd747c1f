//! Optional TOML configuration for stub installation.
//!
//! Precedence is resolved by the CLI layer: command-line flag, then
//! the `SHELLBIND_HOME` environment variable, then this file, then
//! `~/.shellbind`. The values read from the environment are passed in
//! as arguments rather than read here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::ShellbindError;

#[derive(Debug, Default, Deserialize)]
pub struct ShellbindConfig {
    /// Overrides the default stub home directory.
    pub home: Option<PathBuf>,
}

impl ShellbindConfig {
    pub fn load(path: &Path) -> Result<Self, ShellbindError> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| ShellbindError::ConfigError(format!("{}: {e}", path.display())))
    }

    /// Missing file means defaults; an unreadable or malformed file is
    /// still an error when it was named explicitly.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ShellbindError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(ShellbindConfig::default()),
        }
    }
}

/// Pick the stub home from explicit inputs, in precedence order.
pub fn resolve_home(
    flag: Option<PathBuf>,
    env_home: Option<PathBuf>,
    config: &ShellbindConfig,
    fallback: PathBuf,
) -> PathBuf {
    flag.or(env_home)
        .or_else(|| config.home.clone())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_parses_home_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "home = \"/opt/shellbind\"").unwrap();
        let config = ShellbindConfig::load(file.path()).unwrap();
        assert_eq!(config.home, Some(PathBuf::from("/opt/shellbind")));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "home = [nonsense").unwrap();
        assert!(matches!(
            ShellbindConfig::load(file.path()),
            Err(ShellbindError::ConfigError(_))
        ));
    }

    #[test]
    fn test_resolve_home_precedence() {
        let config = ShellbindConfig {
            home: Some(PathBuf::from("/from-config")),
        };
        let fallback = PathBuf::from("/fallback");

        assert_eq!(
            resolve_home(
                Some(PathBuf::from("/from-flag")),
                Some(PathBuf::from("/from-env")),
                &config,
                fallback.clone()
            ),
            PathBuf::from("/from-flag")
        );
        assert_eq!(
            resolve_home(
                None,
                Some(PathBuf::from("/from-env")),
                &config,
                fallback.clone()
            ),
            PathBuf::from("/from-env")
        );
        assert_eq!(
            resolve_home(None, None, &config, fallback.clone()),
            PathBuf::from("/from-config")
        );
        assert_eq!(
            resolve_home(None, None, &ShellbindConfig::default(), fallback.clone()),
            fallback
        );
    }
}
