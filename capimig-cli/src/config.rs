//! Configuration file loading for capimig.
//!
//! Discovers and loads `capimig.toml` from the working directory (or an
//! explicit `--config` path). CLI arguments take precedence over the file.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use capimig_domain::schema::{LEGACY_API_VERSION, TARGET_API_VERSION};
use capimig_edit::{MigrateOptions, Substitution};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "capimig.toml";

/// Top-level configuration from capimig.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CapimigConfig {
    /// Raw-text identifier replacement.
    pub substitution: SubstitutionConfig,

    /// Backup settings.
    pub backups: BackupsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubstitutionConfig {
    pub from: String,
    pub to: String,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            from: LEGACY_API_VERSION.to_string(),
            to: TARGET_API_VERSION.to_string(),
        }
    }
}

/// Backups section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackupsConfig {
    /// Whether to copy the original file aside before overwriting it.
    pub enabled: bool,

    /// Suffix for backup files.
    pub suffix: String,
}

impl Default for BackupsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            suffix: ".capimig.bak".to_string(),
        }
    }
}

/// Discover the capimig.toml config file in `dir`.
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

/// Load and parse a capimig.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<CapimigConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<CapimigConfig> {
    let config: CapimigConfig = toml::from_str(contents).context("invalid TOML")?;
    if config.substitution.from.is_empty() {
        anyhow::bail!("substitution.from must not be empty");
    }
    Ok(config)
}

/// Load the explicit config, or the discovered one, or the defaults.
pub fn load_or_default(explicit: Option<&Utf8Path>, dir: &Utf8Path) -> anyhow::Result<CapimigConfig> {
    match explicit.map(Utf8Path::to_path_buf).or_else(|| discover_config(dir)) {
        Some(path) => load_config(&path),
        None => Ok(CapimigConfig::default()),
    }
}

/// CLI values that can override the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub from: Option<String>,
    pub to: Option<String>,
    pub backup: bool,
    pub dry_run: bool,
}

/// Builder for merging the config file with CLI arguments.
pub struct ConfigMerger {
    config: CapimigConfig,
}

impl ConfigMerger {
    pub fn new(config: CapimigConfig) -> Self {
        Self { config }
    }

    /// CLI strings replace the file's; `--backup` turns backups on even when
    /// the file leaves them off.
    pub fn merge(self, cli: CliOverrides) -> MigrateOptions {
        let CapimigConfig {
            substitution,
            backups,
        } = self.config;

        let backup_suffix = (cli.backup || backups.enabled).then_some(backups.suffix);

        MigrateOptions {
            substitution: Substitution::new(
                cli.from.unwrap_or(substitution.from),
                cli.to.unwrap_or(substitution.to),
            ),
            dry_run: cli.dry_run,
            backup_suffix,
        }
    }
}
