//! Grid settings with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/colgrid/colgrid.toml`
//! 3. Local config: the file passed to [`GridSettings::load`]
//! 4. Environment variables: `COLGRID_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{GridError, GridResult};

/// Smallest number of units a merge can ever combine.
pub const MIN_MERGE_ARITY: usize = 2;

/// Behavior knobs of a [`Grid`](crate::application::Grid).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GridSettings {
    /// Stands in for the key of unkeyed units in messages and rendered trees
    pub unkeyed_label: String,
    /// Smallest merge accepted (never below [`MIN_MERGE_ARITY`])
    pub min_merge_arity: usize,
    /// Label at the root of rendered column trees
    pub tree_root_label: String,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            unkeyed_label: "<unkeyed>".into(),
            min_merge_arity: MIN_MERGE_ARITY,
            tree_root_label: "Grid".into(),
        }
    }
}

/// Raw settings for intermediate parsing; `None` means "not specified".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawGridSettings {
    pub unkeyed_label: Option<String>,
    pub min_merge_arity: Option<usize>,
    pub tree_root_label: Option<String>,
}

/// Get the XDG config directory for colgrid.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "colgrid").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("colgrid.toml"))
}

fn load_raw_settings(path: &Path) -> GridResult<RawGridSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| GridError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| GridError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl GridSettings {
    /// Effective merge arity, clamped to [`MIN_MERGE_ARITY`].
    pub fn merge_arity(&self) -> usize {
        self.min_merge_arity.max(MIN_MERGE_ARITY)
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawGridSettings) -> Self {
        Self {
            unkeyed_label: overlay
                .unkeyed_label
                .clone()
                .unwrap_or_else(|| self.unkeyed_label.clone()),
            min_merge_arity: overlay.min_merge_arity.unwrap_or(self.min_merge_arity),
            tree_root_label: overlay
                .tree_root_label
                .clone()
                .unwrap_or_else(|| self.tree_root_label.clone()),
        }
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.min_merge_arity < MIN_MERGE_ARITY {
            return Err(GridError::Config {
                message: format!(
                    "min_merge_arity must be at least {MIN_MERGE_ARITY}, got {}",
                    self.min_merge_arity
                ),
            });
        }
        Ok(())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional TOML file applied on top of the global config
    pub fn load(local: Option<&Path>) -> GridResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(local_path) = local {
            debug!("load: local config {}", local_path.display());
            current = current.merge_with(&load_raw_settings(local_path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Parse settings from TOML text on top of the compiled defaults.
    pub fn from_toml_str(content: &str) -> GridResult<Self> {
        let raw: RawGridSettings = toml::from_str(content).map_err(|e| GridError::Config {
            message: format!("parse settings: {e}"),
        })?;
        let settings = Self::default().merge_with(&raw);
        settings.validate()?;
        Ok(settings)
    }

    /// Apply COLGRID_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> GridResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("COLGRID")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("unkeyed_label") {
            settings.unkeyed_label = val;
        }
        if let Ok(val) = config.get_string("tree_root_label") {
            settings.tree_root_label = val;
        }
        match config.get_int("min_merge_arity") {
            Ok(val) => {
                settings.min_merge_arity = usize::try_from(val).map_err(|_| GridError::Config {
                    message: format!("min_merge_arity must not be negative, got {val}"),
                })?;
            }
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> GridResult<String> {
        toml::to_string_pretty(self).map_err(|e| GridError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# colgrid configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/colgrid/colgrid.toml
#   Local:  file passed to GridSettings::load
#   Env:    COLGRID_* environment variables

# Shown instead of a key for units that have none
# unkeyed_label = "<unkeyed>"

# Smallest number of units a merge accepts (at least 2)
# min_merge_arity = 2

# Root label of rendered column trees
# tree_root_label = "Grid"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> GridError {
    GridError::Config {
        message: e.to_string(),
    }
}
