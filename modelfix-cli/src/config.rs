//! Configuration file loading for modelfix.
//!
//! Discovers and loads `modelfix.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use modelfix_domain::BuildPolicy;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "modelfix.toml";

/// Top-level configuration from modelfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelfixConfig {
    /// Build policy settings.
    pub build: BuildConfig,
}

/// Build section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Drop test-scoped dependencies.
    pub skip_tests: bool,

    /// Compiler source level every compiler configuration is pinned to.
    pub compiler_source: Option<String>,
}

/// Discover the modelfix.toml config file.
///
/// Returns `None` if no config file is found in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a modelfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<ModelfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<ModelfixConfig> {
    let config: ModelfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<ModelfixConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(ModelfixConfig::default()),
    }
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: ModelfixConfig,
}

impl ConfigMerger {
    pub fn new(config: ModelfixConfig) -> Self {
        Self { config }
    }

    /// Merge with policy CLI arguments into a validated policy.
    ///
    /// `--skip-tests` turns skipping on even when the file leaves it off. An explicit
    /// `--compiler-source` replaces the file's value.
    pub fn merge_policy_args(
        self,
        cli_skip_tests: bool,
        cli_compiler_source: Option<&str>,
    ) -> anyhow::Result<BuildPolicy> {
        let skip_tests = cli_skip_tests || self.config.build.skip_tests;
        let compiler_source = cli_compiler_source.or(self.config.build.compiler_source.as_deref());

        let policy = BuildPolicy::from_raw(skip_tests, compiler_source)
            .context("invalid build policy")?;
        debug!(
            "merged policy: skip_tests={}, compiler_source={:?}",
            policy.skip_tests,
            policy.compiler_source.as_ref().map(ToString::to_string)
        );
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let contents = r#"
[build]
skip_tests = true
compiler_source = "1.8"
"#;

        let config = parse_config(contents).unwrap();
        assert!(config.build.skip_tests);
        assert_eq!(config.build.compiler_source.as_deref(), Some("1.8"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(!config.build.skip_tests);
        assert!(config.build.compiler_source.is_none());
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = parse_config("[build\nskip_tests = ").expect_err("invalid");
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn test_merge_cli_skip_tests_wins() {
        let policy = ConfigMerger::new(ModelfixConfig::default())
            .merge_policy_args(true, None)
            .unwrap();
        assert!(policy.skip_tests);
        assert!(policy.compiler_source.is_none());
    }

    #[test]
    fn test_merge_config_used_when_cli_unset() {
        let config = ModelfixConfig {
            build: BuildConfig {
                skip_tests: true,
                compiler_source: Some("1.6".to_string()),
            },
        };
        let policy = ConfigMerger::new(config)
            .merge_policy_args(false, None)
            .unwrap();
        assert!(policy.skip_tests);
        assert_eq!(
            policy.compiler_source.map(|l| l.to_string()).as_deref(),
            Some("1.6")
        );
    }

    #[test]
    fn test_merge_cli_compiler_source_overrides() {
        let config = ModelfixConfig {
            build: BuildConfig {
                skip_tests: false,
                compiler_source: Some("1.6".to_string()),
            },
        };
        let policy = ConfigMerger::new(config)
            .merge_policy_args(false, Some("11"))
            .unwrap();
        assert_eq!(
            policy.compiler_source.map(|l| l.to_string()).as_deref(),
            Some("11")
        );
    }

    #[test]
    fn test_merge_rejects_invalid_level() {
        let config = ModelfixConfig {
            build: BuildConfig {
                skip_tests: false,
                compiler_source: Some("java8".to_string()),
            },
        };
        let err = ConfigMerger::new(config)
            .merge_policy_args(false, None)
            .expect_err("invalid level");
        assert!(format!("{:#}", err).contains("java8"));
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());
    }

    #[test]
    fn test_load_or_default_returns_default_when_missing() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let cfg = load_or_default(&root).expect("load default");
        assert!(!cfg.build.skip_tests);
        assert!(cfg.build.compiler_source.is_none());
    }
}
