use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use moviemania_config::{Config, CredentialStore, PathManager};
use moviemania_core::{FileStore, Persisted, Session, SessionOptions};
use moviemania_models::WatchedEntry;
use moviemania_sources::OmdbClient;
use std::sync::Arc;
use tracing::debug;

/// Loaded configuration plus the paths it came from
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub credentials: CredentialStore,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();

        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;

        let mut credentials = CredentialStore::new(paths.credentials_file());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;

        debug!("Loaded configuration from {}", config_file.display());
        Ok(Self { paths, config, credentials })
    }

    pub fn store(&self) -> Result<FileStore> {
        let dir = self.paths.store_dir();
        FileStore::new(&dir).wrap_err_with(|| format!("Failed to open data store at {}", dir.display()))
    }

    /// Watched list on its own, for commands that never hit the network
    pub fn watched_list(&self) -> Result<Persisted<Vec<WatchedEntry>>> {
        let store = self.store()?;
        Ok(Persisted::load(Box::new(store), self.config.storage.watched_key.clone(), Vec::new()))
    }

    pub fn session(&self) -> Result<Session<OmdbClient>> {
        let client = OmdbClient::from_config(&self.config, &self.credentials)?;
        let store = self.store()?;
        Ok(Session::new(Arc::new(client), Box::new(store), SessionOptions::from(&self.config)))
    }
}
