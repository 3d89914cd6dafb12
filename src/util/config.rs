//! Configuration file support for gibind.
//!
//! gibind reads configuration from two locations:
//! - Global: `~/.gibind/config.toml` - User-wide defaults
//! - Project: `.gibind/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::QualifiedName;

/// gibind configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Code generation settings
    pub codegen: CodegenConfig,

    /// Metadata lookup settings
    pub provider: ProviderConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Settings that shape the generated code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Prefix of every generated C shim symbol
    pub shim_prefix: String,

    /// Base types at which ancestor walking stops (inclusive)
    pub root_types: Vec<QualifiedName>,

    /// Receiver name of generated Go methods
    pub receiver_name: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        CodegenConfig {
            shim_prefix: "gibind_".to_string(),
            root_types: vec![
                QualifiedName::new("GObject", "Object"),
                QualifiedName::new("GObject", "InitiallyUnowned"),
            ],
            receiver_name: "recv".to_string(),
        }
    }
}

impl CodegenConfig {
    /// Whether `name` terminates ancestor walking.
    pub fn is_root(&self, name: &QualifiedName) -> bool {
        self.root_types.contains(name)
    }
}

/// Where introspection metadata is looked up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Directories searched for `<Namespace>.json` metadata files
    pub search_paths: Vec<PathBuf>,
}

/// Where and how generated bindings are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory (one package directory per namespace)
    pub dir: PathBuf,

    /// Go import path under which namespace packages live
    pub import_root: String,

    /// Directory holding per-namespace denylist files
    pub denylist_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: PathBuf::from("bindings"),
            import_root: "gibind.local/bindings".to_string(),
            denylist_dir: PathBuf::from("denylist"),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration, falling back to defaults if the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence where it
    /// differs from the defaults).
    pub fn merge(&mut self, other: Config) {
        let defaults = Config::default();

        if other.codegen.shim_prefix != defaults.codegen.shim_prefix {
            self.codegen.shim_prefix = other.codegen.shim_prefix;
        }
        if other.codegen.root_types != defaults.codegen.root_types {
            self.codegen.root_types = other.codegen.root_types;
        }
        if other.codegen.receiver_name != defaults.codegen.receiver_name {
            self.codegen.receiver_name = other.codegen.receiver_name;
        }
        if !other.provider.search_paths.is_empty() {
            self.provider.search_paths = other.provider.search_paths;
        }
        if other.output.dir != defaults.output.dir {
            self.output.dir = other.output.dir;
        }
        if other.output.import_root != defaults.output.import_root {
            self.output.import_root = other.output.import_root;
        }
        if other.output.denylist_dir != defaults.output.denylist_dir {
            self.output.denylist_dir = other.output.denylist_dir;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.gibind/config.toml)
/// 2. Global config (~/.gibind/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global gibind config directory (~/.gibind).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".gibind"))
}

/// Get the global config path (~/.gibind/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.gibind/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".gibind").join("config.toml")
}
