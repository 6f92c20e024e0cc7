//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::bank::QuestionBank;
use crate::parser;
use crate::scoring::CoveragePolicy;

/// Top-level wiscar configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WiscarConfig {
    /// Question bank file to use instead of the built-in bank.
    #[serde(default)]
    pub bank: Option<PathBuf>,
    /// How the scorer treats incomplete response sets.
    #[serde(default)]
    pub coverage: CoveragePolicy,
    /// Output format used when none is given on the command line.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for WiscarConfig {
    fn default() -> Self {
        Self {
            bank: None,
            coverage: CoveragePolicy::default(),
            default_format: default_format(),
        }
    }
}

impl WiscarConfig {
    /// Load the configured bank, or the built-in one when none is set.
    pub fn load_bank(&self) -> Result<QuestionBank> {
        match &self.bank {
            Some(path) => parser::parse_bank(path),
            None => Ok(QuestionBank::builtin()),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `wiscar.toml` in the current directory
/// 2. `~/.config/wiscar/config.toml`
///
/// Environment variable overrides: `WISCAR_BANK`, `WISCAR_COVERAGE`.
pub fn load_config() -> Result<WiscarConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<WiscarConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("wiscar.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => WiscarConfig::default(),
    };

    if let Ok(bank) = std::env::var("WISCAR_BANK") {
        config.bank = Some(PathBuf::from(bank));
    }
    if let Ok(coverage) = std::env::var("WISCAR_COVERAGE") {
        config.coverage = coverage
            .parse()
            .map_err(|e: String| anyhow::anyhow!("WISCAR_COVERAGE: {e}"))?;
    }

    // Relative bank paths are relative to the config file.
    if let (Some(bank), Some(config_path)) = (&config.bank, &config_path) {
        if bank.is_relative() {
            if let Some(dir) = config_path.parent().filter(|d| !d.as_os_str().is_empty()) {
                config.bank = Some(dir.join(bank));
            }
        }
    }

    tracing::debug!(?config_path, ?config, "configuration loaded");
    Ok(config)
}

/// Parse a config document, expanding `${VAR}` references in the bank path.
pub fn parse_config_str(content: &str) -> Result<WiscarConfig> {
    let mut config: WiscarConfig = toml::from_str(content)?;
    config.bank = config
        .bank
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("wiscar"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_WISCAR_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_WISCAR_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_WISCAR_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_WISCAR_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = WiscarConfig::default();
        assert!(config.bank.is_none());
        assert_eq!(config.coverage, CoveragePolicy::Lenient);
        assert_eq!(config.default_format, "text");
        assert_eq!(config.load_bank().unwrap().id, "portfolio-manager");
    }

    #[test]
    fn parse_full_config() {
        std::env::set_var("_WISCAR_BANK_DIR", "/srv/banks");
        let config = parse_config_str(
            r#"
bank = "${_WISCAR_BANK_DIR}/pm.toml"
coverage = "strict"
default_format = "json"
"#,
        )
        .unwrap();
        std::env::remove_var("_WISCAR_BANK_DIR");

        assert_eq!(config.bank, Some(PathBuf::from("/srv/banks/pm.toml")));
        assert_eq!(config.coverage, CoveragePolicy::Strict);
        assert_eq!(config.default_format, "json");
    }

    #[test]
    fn unknown_coverage_is_an_error() {
        assert!(parse_config_str(r#"coverage = "sometimes""#).is_err());
    }

    #[test]
    fn explicit_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn bank_path_is_relative_to_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wiscar.toml");
        std::fs::write(&path, "bank = \"banks/default.toml\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        if std::env::var("WISCAR_BANK").is_err() {
            assert_eq!(config.bank, Some(dir.path().join("banks/default.toml")));
        }
    }
}
