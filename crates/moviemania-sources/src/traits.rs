use async_trait::async_trait;
use moviemania_models::{MovieDetail, SearchResult};
use crate::error::SourceError;

/// A remote movie database that can be searched by title and queried by id
#[async_trait]
pub trait MovieProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Title search. An empty match set is reported as `SourceError::NotFound`.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError>;

    /// Full record for one external id
    async fn get_details(&self, id: &str) -> Result<MovieDetail, SourceError>;
}
