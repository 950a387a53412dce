use async_trait::async_trait;
use moviemania_models::{MovieDetail, SearchResult};
use moviemania_sources::{MovieProvider, SourceError};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Clone)]
enum Canned<T> {
    Data(T),
    Status(u16),
}

/// Provider double: canned responses per query/id, records every call
#[derive(Default)]
pub struct FakeProvider {
    searches: HashMap<String, Canned<Vec<SearchResult>>>,
    details: HashMap<String, Canned<MovieDetail>>,
    hold_searches: bool,
    search_calls: Mutex<Vec<String>>,
    detail_calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, query: &str, results: Vec<SearchResult>) -> Self {
        self.searches.insert(query.to_string(), Canned::Data(results));
        self
    }

    pub fn with_search_status(mut self, query: &str, status: u16) -> Self {
        self.searches.insert(query.to_string(), Canned::Status(status));
        self
    }

    pub fn with_detail(mut self, detail: MovieDetail) -> Self {
        self.details.insert(detail.id.clone(), Canned::Data(detail));
        self
    }

    pub fn with_detail_status(mut self, id: &str, status: u16) -> Self {
        self.details.insert(id.to_string(), Canned::Status(status));
        self
    }

    /// Searches never complete; only cancellation ends them
    pub fn holding_searches(mut self) -> Self {
        self.hold_searches = true;
        self
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieProvider for FakeProvider {
    fn provider_name(&self) -> &str {
        "fake"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SourceError> {
        self.search_calls.lock().unwrap().push(query.to_string());
        if self.hold_searches {
            std::future::pending::<()>().await;
        }
        match self.searches.get(query).cloned() {
            Some(Canned::Data(results)) => Ok(results),
            Some(Canned::Status(status)) => Err(SourceError::Http { status }),
            None => Err(SourceError::NotFound("Movie not found!".to_string())),
        }
    }

    async fn get_details(&self, id: &str) -> Result<MovieDetail, SourceError> {
        self.detail_calls.lock().unwrap().push(id.to_string());
        match self.details.get(id).cloned() {
            Some(Canned::Data(detail)) => Ok(detail),
            Some(Canned::Status(status)) => Err(SourceError::Http { status }),
            None => Err(SourceError::NotFound("Incorrect IMDb ID.".to_string())),
        }
    }
}

pub fn result(id: &str, title: &str) -> SearchResult {
    SearchResult {
        id: id.to_string(),
        title: title.to_string(),
        year: "2005".to_string(),
        poster_url: format!("https://posters.example/{}.jpg", id),
    }
}

pub fn detail(id: &str, title: &str) -> MovieDetail {
    MovieDetail {
        id: id.to_string(),
        title: title.to_string(),
        year: "2005".to_string(),
        poster_url: format!("https://posters.example/{}.jpg", id),
        release_date: "15 Jun 2005".to_string(),
        runtime_minutes: Some(140),
        genre: "Action".to_string(),
        external_rating: Some(8.2),
        plot: "A plot.".to_string(),
        actors: "Someone".to_string(),
        director: "Somebody".to_string(),
    }
}
