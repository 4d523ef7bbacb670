use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::services::config_service::{self, Config};
use crate::services::slide_service::SlideStore;
use crate::services::storage_service::{get_app_data_dir, FileStorage};

/// Per-invocation state shared by the command handlers.
pub struct AppContext {
    data_dir: PathBuf,
}

impl AppContext {
    pub fn new(explicit_data_dir: Option<&Path>) -> anyhow::Result<Self> {
        let data_dir = get_app_data_dir(explicit_data_dir).context("Failed to prepare data directory")?;
        tracing::debug!(data_dir = %data_dir.display(), "Using data directory");
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store(&self) -> SlideStore<FileStorage> {
        SlideStore::new(FileStorage::in_dir(&self.data_dir))
    }

    pub fn config(&self) -> anyhow::Result<Config> {
        config_service::load_config(&self.data_dir).context("Failed to load config")
    }
}
