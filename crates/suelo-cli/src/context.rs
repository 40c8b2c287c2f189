//! Configuration loading and store wiring for CLI commands

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use suelo_core::config::{CliConfigOverrides, LayeredConfig, StorageBackend, CONFIG_FILE_NAME};
use suelo_store::file::FileKeyValueStore;
use suelo_store::memory::{MemoryKeyValueStore, StaticIdentity};
use suelo_store::ports::KeyValueStore;
use suelo_store::{ReportStore, Session};

use crate::cli::Cli;

/// Load layered configuration: defaults, config file, environment, flags.
///
/// An explicit `--config` path must exist; the default `suelo.toml` in the
/// current directory is optional.
pub fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let config = match &cli.config {
        Some(path) => LayeredConfig::with_defaults()
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration file {}", path.display()))?,
        None => LayeredConfig::with_defaults()
            .load_from_optional_file(CONFIG_FILE_NAME)
            .context("Failed to load configuration file")?,
    };

    let mut config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        data_dir: cli.data_dir.clone(),
        storage: cli.storage,
        user: cli.user.clone(),
    });
    Ok(config)
}

/// Key-value backend selected by the configuration
pub fn key_value_store(backend: StorageBackend, data_dir: PathBuf) -> Arc<dyn KeyValueStore> {
    match backend {
        StorageBackend::File => Arc::new(FileKeyValueStore::new(data_dir)),
        StorageBackend::Memory => Arc::new(MemoryKeyValueStore::new()),
    }
}

/// Report store for the configured user and backend
pub async fn open_store(config: &LayeredConfig) -> ReportStore {
    let identity = match &config.user.value {
        Some(user) => StaticIdentity::signed_in(user.clone()),
        None => StaticIdentity::anonymous(),
    };
    let session = Session::from_identity(&identity).await;

    tracing::debug!(
        storage = %config.storage.value,
        data_dir = %config.data_dir.value.display(),
        user = ?session.user(),
        "Opening report store"
    );

    let kv = key_value_store(config.storage.value, config.data_dir.value.clone());
    ReportStore::new(kv, session)
}
