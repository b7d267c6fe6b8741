//! Filter configuration resolution
//!
//! Precedence, lowest first: built-in defaults, `--config` file, environment
//! (`CHECKIN_EXPECTED_ITEMS`, `CHECKIN_TARGET_FPR`), command-line flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use checkin_filter::FilterConfig;
use tracing::info;

use crate::args::Args;

/// Load a JSON configuration file
///
/// Missing fields fall back to defaults.
pub fn load_config_file(path: &Path) -> Result<FilterConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: FilterConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    info!(path = %path.display(), "Loaded config file");
    Ok(config)
}

/// Resolve the filter configuration from the process environment
///
/// The result is not validated; building the filter does that.
pub fn resolve_config(args: &Args) -> Result<FilterConfig> {
    let mut config = base_config(args)?;
    config.apply_env_overrides();
    apply_flags(args, &mut config);
    Ok(config)
}

/// Resolve the filter configuration using `lookup` for environment values
pub fn resolve_config_with<F>(args: &Args, lookup: F) -> Result<FilterConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = base_config(args)?;
    config.apply_overrides_from(lookup);
    apply_flags(args, &mut config);
    Ok(config)
}

fn base_config(args: &Args) -> Result<FilterConfig> {
    match &args.config {
        Some(path) => load_config_file(path),
        None => Ok(FilterConfig::default()),
    }
}

fn apply_flags(args: &Args, config: &mut FilterConfig) {
    if let Some(n) = args.expected_items {
        config.expected_items = n;
    }
    if let Some(p) = args.target_fpr {
        config.target_fpr = p;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkin_filter::domain::{ENV_EXPECTED_ITEMS, ENV_TARGET_FPR};
    use clap::Parser;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_overrides() {
        let args = Args::parse_from(["checkin"]);
        let config = resolve_config_with(&args, no_env).unwrap();
        assert_eq!(config, FilterConfig::default());
    }

    #[test]
    fn test_flags_override_env_and_file() {
        let file = config_file(r#"{ "expected_items": 10, "target_fpr": 0.2 }"#);
        let path = file.path().to_str().unwrap();
        let args = Args::parse_from(["checkin", "--config", path, "--fpr", "0.001"]);

        let config = resolve_config_with(&args, |key| {
            (key == ENV_EXPECTED_ITEMS).then(|| "2000".to_string())
        })
        .unwrap();

        assert_eq!(config.expected_items, 2000, "env beats file");
        assert_eq!(config.target_fpr, 0.001, "flag beats file");
    }

    #[test]
    fn test_env_overrides_defaults() {
        let args = Args::parse_from(["checkin"]);
        let config = resolve_config_with(&args, |key| {
            (key == ENV_TARGET_FPR).then(|| "0.05".to_string())
        })
        .unwrap();

        assert_eq!(config.target_fpr, 0.05);
        assert_eq!(config.expected_items, FilterConfig::default().expected_items);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let file = config_file(r#"{ "target_fpr": 0.05 }"#);
        let config = load_config_file(file.path()).unwrap();

        assert_eq!(config.target_fpr, 0.05);
        assert_eq!(config.expected_items, FilterConfig::default().expected_items);
    }

    #[test]
    fn test_malformed_config_file_is_an_error() {
        let file = config_file("expected_items = 10");
        let err = load_config_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
