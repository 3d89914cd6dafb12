//! Command implementations

pub mod completions;
pub mod deps;
pub mod generate;

use anyhow::{Context, Result};

use crate::cli::MetadataArgs;
use gibind::provider::MetadataProvider;
use gibind::util::config::{global_config_path, load_config, project_config_path};
use gibind::Config;

/// Merged global and project configuration for the current directory.
pub fn current_config() -> Result<Config> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    Ok(load_config(
        global_config_path().as_deref(),
        &project_config_path(&cwd),
    ))
}

/// A metadata provider over the command-line directories, or the configured
/// ones when none were given.
pub fn metadata_provider(args: &MetadataArgs, config: &Config) -> MetadataProvider {
    let search_paths = if args.metadata_dirs.is_empty() {
        config.provider.search_paths.clone()
    } else {
        args.metadata_dirs.clone()
    };
    tracing::debug!("metadata search paths: {:?}", search_paths);
    MetadataProvider::new(search_paths)
}
