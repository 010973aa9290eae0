//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rstree/rstree.toml`
//! 3. Local config: `<project_dir>/.rstree.toml`
//! 4. Environment variables: `RSTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::view::RenderOptions;
use crate::application::ApplicationError;

/// Tree rendering options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show `[id]` after each label
    pub show_ids: bool,
    /// Show `= value` after each label
    pub show_values: bool,
    /// Color highlighted, unbalanced and path nodes
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_ids: true,
            show_values: true,
            color: true,
        }
    }
}

impl DisplayConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_ids: self.show_ids,
            show_values: self.show_values,
            color: self.color,
        }
    }
}

/// Traversal playback pacing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Delay between revealed nodes in milliseconds
    pub step_delay_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { step_delay_ms: 600 }
    }
}

/// Raw display config for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplayConfig {
    pub show_ids: Option<bool>,
    pub show_values: Option<bool>,
    pub color: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawPlaybackConfig {
    pub step_delay_ms: Option<u64>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree_file: Option<PathBuf>,
    pub display: RawDisplayConfig,
    pub playback: RawPlaybackConfig,
}

/// Unified configuration for rstree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// JSON tree file; the built-in sample tree is used when unset
    pub tree_file: Option<PathBuf>,
    /// Rendering options
    pub display: DisplayConfig,
    /// Playback options
    pub playback: PlaybackConfig,
}

/// Get the XDG config directory for rstree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rstree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rstree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".rstree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is returned unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(tree_file) = &self.tree_file {
            self.tree_file = Some(PathBuf::from(expand_env_vars(
                tree_file.to_string_lossy().as_ref(),
            )));
        }
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree_file: overlay.tree_file.clone().or_else(|| self.tree_file.clone()),
            display: DisplayConfig {
                show_ids: overlay.display.show_ids.unwrap_or(self.display.show_ids),
                show_values: overlay.display.show_values.unwrap_or(self.display.show_values),
                color: overlay.display.color.unwrap_or(self.display.color),
            },
            playback: PlaybackConfig {
                step_delay_ms: overlay
                    .playback
                    .step_delay_ms
                    .unwrap_or(self.playback.step_delay_ms),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/rstree/rstree.toml`
    /// 3. Local config: `<project_dir>/.rstree.toml`
    /// 4. Environment variables: `RSTREE_*` prefix
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        current = Self::apply_env_overrides(current, Self::env_source())?;

        current.expand_paths();

        Ok(current)
    }

    fn env_source() -> Environment {
        Environment::with_prefix("RSTREE")
            .prefix_separator("_")
            .separator("__")
    }

    /// Apply RSTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("tree_file") {
            settings.tree_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_bool("display.show_ids") {
            settings.display.show_ids = val;
        }
        if let Ok(val) = config.get_bool("display.show_values") {
            settings.display.show_values = val;
        }
        if let Ok(val) = config.get_bool("display.color") {
            settings.display.color = val;
        }
        if let Ok(val) = config.get_int("playback.step_delay_ms") {
            settings.playback.step_delay_ms = u64::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("playback.step_delay_ms must not be negative: {val}"),
            })?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# rstree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/rstree/rstree.toml
#   Local:  <project_dir>/.rstree.toml
#   Env:    RSTREE_* environment variables (e.g. RSTREE_DISPLAY__COLOR=false)

# JSON tree file (built-in sample tree when unset)
# tree_file = "~/trees/org.json"

[display]
# show_ids = true
# show_values = true
# color = true

[playback]
# Delay between revealed nodes of an animated traversal
# step_delay_ms = 600
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> Environment {
        let mut map = config::Map::new();
        for (k, v) in pairs {
            map.insert(k.to_string(), v.to_string());
        }
        Settings::env_source().source(Some(map))
    }

    #[test]
    fn given_defaults_when_created_then_sample_tree_and_600ms() {
        let settings = Settings::default();
        assert!(settings.tree_file.is_none());
        assert!(settings.display.show_ids);
        assert_eq!(settings.playback.step_delay_ms, 600);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_unspecified_fields_inherited() {
        let overlay: RawSettings = toml::from_str(
            r#"
tree_file = "tree.json"
[display]
show_ids = false
"#,
        )
        .unwrap();

        let merged = Settings::default().merge_with(&overlay);

        assert_eq!(merged.tree_file, Some(PathBuf::from("tree.json")));
        assert!(!merged.display.show_ids);
        assert!(merged.display.show_values);
        assert_eq!(merged.playback.step_delay_ms, 600);
    }

    #[test]
    fn given_env_vars_when_applying_overrides_then_replace_values() {
        let env = env_from(&[
            ("RSTREE_TREE_FILE", "/tmp/t.json"),
            ("RSTREE_DISPLAY__COLOR", "false"),
            ("RSTREE_PLAYBACK__STEP_DELAY_MS", "25"),
        ]);

        let settings = Settings::apply_env_overrides(Settings::default(), env).unwrap();

        assert_eq!(settings.tree_file, Some(PathBuf::from("/tmp/t.json")));
        assert!(!settings.display.color);
        assert_eq!(settings.playback.step_delay_ms, 25);
    }

    #[test]
    fn given_negative_delay_when_applying_overrides_then_config_error() {
        let env = env_from(&[("RSTREE_PLAYBACK__STEP_DELAY_MS", "-5")]);
        let result = Settings::apply_env_overrides(Settings::default(), env);
        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }

    #[test]
    fn given_tilde_in_tree_file_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            tree_file: Some(PathBuf::from("~/trees/t.json")),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let path = settings.tree_file.unwrap();
        assert!(path.to_string_lossy().starts_with(&home));
    }

    #[test]
    fn given_template_when_parsed_then_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.tree_file.is_none());
    }
}
