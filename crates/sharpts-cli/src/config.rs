//! Configuration for the sharpts driver.
//!
//! Loaded from `--config <path>` when given, otherwise from `sharpts.toml`
//! in the input's directory (the project root, or the file's parent).
//! Command-line flags override file values.
//!
//! Example sharpts.toml:
//! ```toml
//! dialect = "script-sharp"
//! extension = "ts"
//! abort_on_error = false
//! output = "out"
//! ```

use anyhow::Context;
use serde::Deserialize;
use sharpts::{DialectKind, ErrorPolicy};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "sharpts.toml";

const DEFAULT_EXTENSION: &str = "ts";

/// Values read from a config file. Unset keys fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SharptsConfig {
    pub dialect: Option<DialectKind>,
    /// Extension of the written files, without the dot.
    pub extension: Option<String>,
    pub abort_on_error: Option<bool>,
    /// Output directory, relative to the current directory.
    pub output: Option<PathBuf>,
}

impl SharptsConfig {
    /// Load `explicit` if given (it must exist), else `root/sharpts.toml`
    /// if present, else the defaults.
    pub fn load(explicit: Option<&Path>, root: &Path) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        let candidate = root.join(CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using project config");
            return Self::load_file(&candidate);
        }
        Ok(Self::default())
    }

    fn load_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }
}

/// Fully resolved driver settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub dialect: DialectKind,
    pub extension: String,
    pub policy: ErrorPolicy,
    pub output: PathBuf,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dialect: Option<DialectKind>,
    pub abort_on_error: bool,
    pub output: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(config: SharptsConfig, overrides: Overrides) -> Self {
        let abort = overrides.abort_on_error || config.abort_on_error.unwrap_or(false);
        Self {
            dialect: overrides.dialect.or(config.dialect).unwrap_or_default(),
            extension: config
                .extension
                .map(|ext| ext.trim_start_matches('.').to_string())
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
            policy: if abort { ErrorPolicy::Abort } else { ErrorPolicy::Skip },
            output: overrides
                .output
                .or(config.output)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_project_config_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = SharptsConfig::load(None, dir.path()).unwrap();
        let settings = Settings::resolve(config, Overrides::default());
        assert_eq!(
            settings,
            Settings {
                dialect: DialectKind::TypeScript,
                extension: "ts".into(),
                policy: ErrorPolicy::Skip,
                output: PathBuf::from("."),
            }
        );
    }

    #[test]
    fn project_config_is_read_and_flags_override_it() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "dialect = \"script-sharp\"\nextension = \".d.ts\"\noutput = \"out\"\n",
        )
        .unwrap();

        let config = SharptsConfig::load(None, dir.path()).unwrap();
        assert_eq!(config.dialect, Some(DialectKind::ScriptSharp));

        let overrides = Overrides {
            dialect: Some(DialectKind::TypeScript),
            abort_on_error: true,
            output: None,
        };
        let settings = Settings::resolve(config, overrides);
        assert_eq!(settings.dialect, DialectKind::TypeScript);
        assert_eq!(settings.extension, "d.ts");
        assert_eq!(settings.policy, ErrorPolicy::Abort);
        assert_eq!(settings.output, PathBuf::from("out"));
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(SharptsConfig::load(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "dialekt = \"typescript\"\n").unwrap();
        let err = SharptsConfig::load(Some(&path), dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid config"));
    }
}
