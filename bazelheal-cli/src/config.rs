//! Configuration file loading for bazelheal.
//!
//! Discovers `bazelheal.toml` in the workspace root and merges it with CLI
//! arguments (CLI takes precedence, then the file, then built-in defaults).

use anyhow::Context;
use bazelheal_catalog::{DEFAULT_EXTENSION, DEFAULT_LAYOUT};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "bazelheal.toml";

/// Default catalog cache file name, relative to the workspace.
pub const DEFAULT_CACHE_FILE: &str = ".healdb";

/// Top-level configuration from bazelheal.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BazelhealConfig {
    pub workspace: WorkspaceConfig,
    pub catalog: CatalogConfig,
}

/// Workspace section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Bazel workspace directory.
    pub root: Option<Utf8PathBuf>,
}

/// Catalog section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Cache file holding the serialized catalog.
    pub cache_file: Option<Utf8PathBuf>,

    /// Root of the source tree scanned during refresh.
    pub source_root: Option<Utf8PathBuf>,

    /// Source file extension matched during refresh.
    pub source_extension: Option<String>,

    /// Layout marker separating module path from class path.
    pub layout_marker: Option<String>,
}

/// Discover the bazelheal.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!(path = %config_path, "found config file");
        Some(config_path)
    } else {
        debug!(path = %config_path, "no config file");
        None
    }
}

/// Load and parse a bazelheal.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<BazelhealConfig> {
    let contents = fs::read_to_string(path).with_context(|| format!("read config file {path}"))?;
    parse_config(&contents).with_context(|| format!("parse config file {path}"))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<BazelhealConfig> {
    let config: BazelhealConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return the default if none is present.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<BazelhealConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(BazelhealConfig::default()),
    }
}

/// Effective settings after merging config file and CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub workspace: Utf8PathBuf,
    pub cache_file: Utf8PathBuf,
    pub source_root: Utf8PathBuf,
    pub source_extension: String,
    pub layout_marker: String,
}

/// Builder merging the config file beneath CLI arguments.
pub struct ConfigMerger {
    config: BazelhealConfig,
}

impl ConfigMerger {
    pub fn new(config: BazelhealConfig) -> Self {
        Self { config }
    }

    /// CLI values win over config file values, which win over defaults.
    /// The cache file and source root default relative to the workspace.
    pub fn merge(
        self,
        cli_workspace: Option<&Utf8Path>,
        cli_cache: Option<&Utf8Path>,
        cli_source_root: Option<&Utf8Path>,
        cli_source_extension: Option<&str>,
    ) -> Settings {
        let workspace = cli_workspace
            .map(Utf8Path::to_path_buf)
            .or(self.config.workspace.root)
            .unwrap_or_else(|| Utf8PathBuf::from("."));

        let cache_file = cli_cache
            .map(Utf8Path::to_path_buf)
            .or(self.config.catalog.cache_file)
            .unwrap_or_else(|| workspace.join(DEFAULT_CACHE_FILE));

        let source_root = cli_source_root
            .map(Utf8Path::to_path_buf)
            .or(self.config.catalog.source_root)
            .unwrap_or_else(|| workspace.clone());

        let source_extension = cli_source_extension
            .map(str::to_string)
            .or(self.config.catalog.source_extension)
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        let layout_marker = self
            .config
            .catalog
            .layout_marker
            .unwrap_or_else(|| DEFAULT_LAYOUT.to_string());

        Settings {
            workspace,
            cache_file,
            source_root,
            source_extension,
            layout_marker,
        }
    }
}
