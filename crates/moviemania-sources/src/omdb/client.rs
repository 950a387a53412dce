use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::MovieProvider;
use async_trait::async_trait;
use moviemania_config::{Config, CredentialStore};
use moviemania_models::{MovieDetail, SearchResult};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: String, base_url: String, timeout: Option<Duration>) -> Result<Self, SourceError> {
        if api_key.trim().is_empty() {
            return Err(SourceError::MissingApiKey);
        }

        let mut builder = Client::builder().user_agent(concat!("moviemania/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: Arc::new(builder.build()?),
            base_url,
            api_key,
        })
    }

    /// Build a client from the loaded configuration and credentials
    pub fn from_config(config: &Config, credentials: &CredentialStore) -> Result<Self, SourceError> {
        let api_key = credentials
            .resolve_omdb_api_key()
            .ok_or(SourceError::MissingApiKey)?;
        let timeout = config.omdb.timeout_secs.map(Duration::from_secs);

        info!("Using OMDb at {}", config.omdb.base_url);
        Self::new(api_key, config.omdb.base_url.clone(), timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MovieProvider for OmdbClient {
    fn provider_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        api::search(&self.client, &self.base_url, &self.api_key, query).await
    }

    async fn get_details(&self, id: &str) -> Result<MovieDetail, SourceError> {
        api::get_details(&self.client, &self.base_url, &self.api_key, id).await
    }
}
