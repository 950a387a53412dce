use crate::detail::{DetailError, DetailLoader, DetailRequest, DetailResponse, DetailState, DetailUpdate, RatingChange};
use crate::search::{ApplyOutcome, SearchController, SearchRequest, SearchResponse, SearchState};
use crate::store::{KeyValueStore, Persisted, StoreError};
use crate::watched;
use moviemania_config::Config;
use moviemania_models::{WatchedEntry, WatchedSummary};
use moviemania_sources::MovieProvider;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Detail(#[from] DetailError),

    #[error("failed to save watched list: {0}")]
    Store(#[from] StoreError),

    #[error("no search result at position {0}")]
    NoSuchResult(usize),
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub min_query_length: usize,
    pub watched_key: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            min_query_length: 3,
            watched_key: "watched".to_string(),
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            min_query_length: config.search.min_query_length,
            watched_key: config.storage.watched_key.clone(),
        }
    }
}

/// Everything one user sees: the query and its results, the open detail
/// view and the persisted watched list.
///
/// Methods that start a lookup come in two forms: a synchronous one that
/// updates state and returns the request to run, and an async one that also
/// runs it and applies the response.
pub struct Session<P: ?Sized> {
    provider: Arc<P>,
    search: SearchController,
    detail: DetailLoader,
    watched: Persisted<Vec<WatchedEntry>>,
    search_focused: bool,
}

impl<P: MovieProvider + ?Sized> Session<P> {
    pub fn new(provider: Arc<P>, store: Box<dyn KeyValueStore>, options: SessionOptions) -> Self {
        let watched = Persisted::load(store, options.watched_key, Vec::new());
        info!("Loaded {} watched movies", watched.get().len());

        Self {
            provider,
            search: SearchController::new(options.min_query_length),
            detail: DetailLoader::new(),
            watched,
            search_focused: false,
        }
    }

    pub fn provider(&self) -> &P {
        self.provider.as_ref()
    }

    pub fn search_state(&self) -> &SearchState {
        self.search.state()
    }

    pub fn detail_state(&self) -> &DetailState {
        self.detail.state()
    }

    /// Shared error shown in place of the results list
    pub fn error(&self) -> Option<&str> {
        self.search.state().error.as_deref()
    }

    pub fn watched(&self) -> &[WatchedEntry] {
        self.watched.get()
    }

    pub fn summary(&self) -> WatchedSummary {
        watched::summary(self.watched.get())
    }

    pub fn window_title(&self) -> String {
        self.detail.window_title()
    }

    // Query

    /// Change the query; closes any open detail view
    pub fn set_query(&mut self, text: impl Into<String>) -> Option<SearchRequest> {
        self.detail.close();
        self.search.set_query(text)
    }

    pub fn apply_search(&mut self, response: SearchResponse) -> ApplyOutcome {
        self.search.apply(response)
    }

    pub async fn search(&mut self, text: impl Into<String>) -> ApplyOutcome {
        match self.set_query(text) {
            Some(request) => {
                let response = request.execute(self.provider.as_ref()).await;
                self.apply_search(response)
            }
            None => ApplyOutcome::Applied,
        }
    }

    pub fn is_search_focused(&self) -> bool {
        self.search_focused
    }

    pub fn focus_search(&mut self) {
        self.search_focused = true;
    }

    pub fn blur_search(&mut self) {
        self.search_focused = false;
    }

    // Selection

    /// Toggle selection of `id`, clearing the shared error when a movie opens
    pub fn select(&mut self, id: &str) -> Option<DetailRequest> {
        let request = self.detail.select_id(id, self.watched.get());
        if request.is_some() {
            self.search.set_error(None);
        }
        request
    }

    /// Select by zero-based position in the current results
    pub fn select_result(&mut self, index: usize) -> Result<Option<DetailRequest>, SessionError> {
        let id = self
            .search
            .state()
            .results
            .get(index)
            .map(|result| result.id.clone())
            .ok_or(SessionError::NoSuchResult(index))?;
        Ok(self.select(&id))
    }

    pub fn apply_detail(&mut self, response: DetailResponse) -> DetailUpdate {
        let update = self.detail.apply(response);
        if let DetailUpdate::Failed(message) = &update {
            self.search.set_error(Some(message.to_string()));
        }
        update
    }

    /// Toggle selection and, when a movie opened, fetch its details
    pub async fn open(&mut self, id: &str) -> Option<DetailUpdate> {
        let request = self.select(id)?;
        let response = request.execute(self.provider.as_ref()).await;
        Some(self.apply_detail(response))
    }

    /// Escape key and back button
    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    // Watched list

    /// Set the rating for the open movie. An already-watched movie has the
    /// new rating written to its entry immediately.
    pub fn set_rating(&mut self, rating: u8) -> Result<RatingChange, SessionError> {
        let change = self.detail.set_rating(rating, self.watched.get())?;
        if let RatingChange::WriteThrough { id, rating } = &change {
            self.update_watched_rating(id, *rating)?;
        }
        Ok(change)
    }

    pub fn can_add(&self) -> bool {
        self.detail.can_add(self.watched.get())
    }

    /// Add the open movie with the chosen rating, then close the detail view
    pub fn add_to_list(&mut self) -> Result<WatchedEntry, SessionError> {
        let entry = self.detail.take_entry(self.watched.get())?;
        info!("Adding {} ({}) rated {}", entry.title, entry.id, entry.user_rating);
        self.watched.update(|list| watched::add(list, entry.clone()))?;
        Ok(entry)
    }

    /// Returns false when `id` is not in the list
    pub fn update_watched_rating(&mut self, id: &str, rating: u8) -> Result<bool, SessionError> {
        if !(crate::detail::MIN_RATING..=crate::detail::MAX_RATING).contains(&rating) {
            return Err(DetailError::InvalidRating(rating).into());
        }
        if !watched::contains(self.watched.get(), id) {
            return Ok(false);
        }
        info!("Updating rating of {} to {}", id, rating);
        self.watched.update(|list| watched::update_rating(list, id, rating))?;
        Ok(true)
    }

    /// Returns false when `id` is not in the list
    pub fn delete_watched(&mut self, id: &str) -> Result<bool, SessionError> {
        if !watched::contains(self.watched.get(), id) {
            return Ok(false);
        }
        info!("Removing {} from watched list", id);
        self.watched.update(|list| watched::delete(list, id))?;
        Ok(true)
    }
}
