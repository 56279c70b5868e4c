//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treedit/treedit.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `TREEDIT_*` prefix

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{default_seed, NodeSpec, Seed};

/// How a forest is drawn on the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Box-drawing tree (`├──`, `└──`)
    #[default]
    Tree,
    /// One node per line, indented by depth
    Indent,
}

impl FromStr for RenderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(RenderStyle::Tree),
            "indent" => Ok(RenderStyle::Indent),
            other => Err(format!("unknown render style: {other}")),
        }
    }
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStyle::Tree => write!(f, "tree"),
            RenderStyle::Indent => write!(f, "indent"),
        }
    }
}

/// Terminal rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    pub style: RenderStyle,
    /// Spaces per depth level in `indent` style
    pub indent: usize,
    /// Highlight the selected node
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: RenderStyle::Tree,
            indent: 2,
            color: true,
        }
    }
}

/// Raw render config for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderConfig {
    pub style: Option<RenderStyle>,
    pub indent: Option<usize>,
    pub color: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub render: RawRenderConfig,
    pub seed: Option<Vec<NodeSpec>>,
}

/// Unified configuration for treedit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub render: RenderConfig,
    /// Forest a session starts from and resets to
    pub seed: Vec<NodeSpec>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            seed: default_seed(),
        }
    }
}

/// Get the XDG config directory for treedit.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treedit").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treedit.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
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

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Materialize the configured seed forest.
    pub fn seed(&self) -> Seed {
        Seed::from_specs(&self.seed)
    }

    /// Overlay a layer onto self. A layer replaces only what it specifies;
    /// a `seed` array replaces the seed wholesale.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            render: RenderConfig {
                style: overlay.render.style.unwrap_or(self.render.style),
                indent: overlay.render.indent.unwrap_or(self.render.indent),
                color: overlay.render.color.unwrap_or(self.render.color),
            },
            seed: overlay.seed.clone().unwrap_or_else(|| self.seed.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist when given
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/treedit/treedit.toml` (if present)
    /// 3. Explicit config file
    /// 4. Environment variables: `TREEDIT_*` prefix
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|path| path.exists());
        Self::load_layers(global.as_deref(), config_file, None)
    }

    /// Layered load with every source explicit.
    ///
    /// `env` replaces the process environment as the source of `TREEDIT_*`
    /// overrides when given.
    pub fn load_layers(
        global: Option<&Path>,
        config_file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            debug!("loading global config: {}", global_path.display());
            let raw = load_raw_settings(global_path)?;
            current = current.merge_with(&raw);
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            let path = expand_path(path);
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("loading config: {}", path.display());
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        normalize_seed_names(&mut current.seed, "seed")?;

        // 4. Environment variables
        Self::apply_env_overrides(current, env)
    }

    /// Apply TREEDIT_* environment variables as explicit overrides.
    ///
    /// e.g. `TREEDIT_RENDER__STYLE=indent`, `TREEDIT_RENDER__INDENT=4`
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("TREEDIT")
                .prefix_separator("_")
                .separator("__")
                .source(env),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("render.style") {
            settings.render.style = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Ok(val) = config.get_string("render.indent") {
            settings.render.indent = val.trim().parse().map_err(|_| ApplicationError::Config {
                message: format!("invalid render.indent: {val}"),
            })?;
        }
        if let Ok(val) = config.get_string("render.color") {
            settings.render.color = parse_bool(&val).ok_or_else(|| ApplicationError::Config {
                message: format!("invalid render.color: {val}"),
            })?;
        }

        Ok(settings)
    }

    /// Serialize effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }
}

/// Trim every seed node name; a blank name is a config error, as it would be
/// for an interactive `add`.
fn normalize_seed_names(specs: &mut [NodeSpec], path: &str) -> Result<(), ApplicationError> {
    for (index, spec) in specs.iter_mut().enumerate() {
        let at = format!("{path}[{index}]");
        let trimmed = spec.name.trim();
        if trimmed.is_empty() {
            return Err(ApplicationError::Config {
                message: format!("{at}: node name must not be blank"),
            });
        }
        if trimmed.len() != spec.name.len() {
            spec.name = trimmed.to_string();
        }
        normalize_seed_names(&mut spec.children, &format!("{at}.children"))?;
    }
    Ok(())
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
